/// CQL type parsing and the CQL → TypeScript type mapping

use std::fmt;

/// Parameterized families may nest one level inside the outer family
/// (`map<text, list<int>>`). Anything deeper resolves to `unknown`.
const MAX_NESTING: usize = 2;

/// Native scalar types of the storage engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeType {
    Ascii,
    Bigint,
    Blob,
    Boolean,
    Counter,
    Date,
    Decimal,
    Double,
    Duration,
    Float,
    Inet,
    Int,
    Smallint,
    Text,
    Time,
    Timestamp,
    Timeuuid,
    Tinyint,
    Uuid,
    Varchar,
    Varint,
}

/// Catalog spelling of every native type.
static NATIVE_TYPES: &[(&str, NativeType)] = &[
    ("ascii", NativeType::Ascii),
    ("bigint", NativeType::Bigint),
    ("blob", NativeType::Blob),
    ("boolean", NativeType::Boolean),
    ("counter", NativeType::Counter),
    ("date", NativeType::Date),
    ("decimal", NativeType::Decimal),
    ("double", NativeType::Double),
    ("duration", NativeType::Duration),
    ("float", NativeType::Float),
    ("inet", NativeType::Inet),
    ("int", NativeType::Int),
    ("smallint", NativeType::Smallint),
    ("text", NativeType::Text),
    ("time", NativeType::Time),
    ("timestamp", NativeType::Timestamp),
    ("timeuuid", NativeType::Timeuuid),
    ("tinyint", NativeType::Tinyint),
    ("uuid", NativeType::Uuid),
    ("varchar", NativeType::Varchar),
    ("varint", NativeType::Varint),
];

impl NativeType {
    /// Look up a native type by its catalog name.
    pub fn from_name(name: &str) -> Option<Self> {
        NATIVE_TYPES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, ty)| *ty)
    }

    pub fn name(self) -> &'static str {
        NATIVE_TYPES
            .iter()
            .find(|(_, ty)| *ty == self)
            .map(|(n, _)| *n)
            .unwrap_or("unknown")
    }

    pub fn all() -> impl Iterator<Item = NativeType> {
        NATIVE_TYPES.iter().map(|(_, ty)| *ty)
    }

    pub fn target(self) -> TargetType {
        match self {
            NativeType::Ascii | NativeType::Text | NativeType::Varchar => TargetType::String,
            NativeType::Boolean => TargetType::Boolean,
            NativeType::Blob => TargetType::Buffer,
            NativeType::Timestamp => TargetType::Date,
            NativeType::Int
            | NativeType::Smallint
            | NativeType::Tinyint
            | NativeType::Float
            | NativeType::Double
            | NativeType::Bigint
            | NativeType::Counter
            | NativeType::Varint
            | NativeType::Decimal => TargetType::Number,
            NativeType::Uuid
            | NativeType::Timeuuid
            | NativeType::Inet
            | NativeType::Date
            | NativeType::Time
            | NativeType::Duration => TargetType::String,
        }
    }

    /// Driver values that are not plain JS values need a `toModel` converter.
    pub fn conversion(self) -> Option<Conversion> {
        match self {
            NativeType::Bigint | NativeType::Counter | NativeType::Varint | NativeType::Decimal => {
                Some(Conversion::ToNumber)
            }
            NativeType::Uuid
            | NativeType::Timeuuid
            | NativeType::Inet
            | NativeType::Date
            | NativeType::Time
            | NativeType::Duration => Some(Conversion::ToString),
            NativeType::Timestamp => Some(Conversion::ToDate),
            _ => None,
        }
    }
}

/// Parsed form of a raw catalog type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Native(NativeType),
    List(Box<ColumnType>),
    Set(Box<ColumnType>),
    Map(Box<ColumnType>, Box<ColumnType>),
    Tuple(Vec<ColumnType>),
    Vector(Box<ColumnType>, u32),
    Unknown,
}

impl ColumnType {
    /// Parse a raw catalog type. Never fails: malformed or unsupported input
    /// becomes [`ColumnType::Unknown`].
    pub fn parse(raw: &str) -> Self {
        parse_at(raw, 0).unwrap_or(ColumnType::Unknown)
    }

    /// True when this type or any of its arguments is unknown.
    pub fn contains_unknown(&self) -> bool {
        match self {
            ColumnType::Native(_) => false,
            ColumnType::Unknown => true,
            ColumnType::List(inner) | ColumnType::Set(inner) | ColumnType::Vector(inner, _) => {
                inner.contains_unknown()
            }
            ColumnType::Map(key, value) => key.contains_unknown() || value.contains_unknown(),
            ColumnType::Tuple(items) => items.iter().any(ColumnType::contains_unknown),
        }
    }

    pub fn target(&self) -> TargetType {
        match self {
            ColumnType::Native(native) => native.target(),
            ColumnType::List(inner) | ColumnType::Set(inner) => {
                TargetType::Array(Box::new(inner.target()))
            }
            ColumnType::Map(key, value) => TargetType::Record {
                key: Box::new(key.target().key_domain()),
                value: Box::new(value.target()),
            },
            ColumnType::Tuple(items) => {
                TargetType::Tuple(items.iter().map(ColumnType::target).collect())
            }
            ColumnType::Vector(_, _) => TargetType::Array(Box::new(TargetType::Number)),
            ColumnType::Unknown => TargetType::Unknown,
        }
    }

    /// Converter applied to the driver value, `None` when it maps 1:1.
    pub fn conversion(&self) -> Option<Conversion> {
        match self {
            ColumnType::Native(native) => native.conversion(),
            ColumnType::List(inner) | ColumnType::Set(inner) => inner
                .conversion()
                .map(|c| Conversion::Each(Box::new(c))),
            ColumnType::Tuple(items) => Some(Conversion::Tuple(
                items.iter().map(ColumnType::conversion).collect(),
            )),
            ColumnType::Vector(_, _) => Some(Conversion::ArrayFrom),
            // Map keys arrive as object property names, so only values convert.
            ColumnType::Map(_, value) => value
                .conversion()
                .map(|c| Conversion::Values(Box::new(c))),
            ColumnType::Unknown => None,
        }
    }
}

/// Resolve a raw catalog type straight to its TypeScript target.
pub fn resolve(raw: &str) -> TargetType {
    ColumnType::parse(raw).target()
}

/// `None` means the type nests deeper than [`MAX_NESTING`]; the caller turns
/// the whole type into [`ColumnType::Unknown`] rather than a partial shape.
fn parse_at(raw: &str, depth: usize) -> Option<ColumnType> {
    let raw = raw.trim().to_ascii_lowercase();
    if let Some(native) = NativeType::from_name(&raw) {
        return Some(ColumnType::Native(native));
    }

    let Some((family, args)) = split_family(&raw) else {
        return Some(ColumnType::Unknown);
    };
    let Some(args) = split_args(args) else {
        return Some(ColumnType::Unknown);
    };

    // frozen<T> only changes storage semantics, not the value shape.
    if family == "frozen" {
        return match args.as_slice() {
            [inner] => parse_at(inner, depth),
            _ => Some(ColumnType::Unknown),
        };
    }
    if depth >= MAX_NESTING {
        return None;
    }

    let next = depth + 1;
    let ty = match (family, args.as_slice()) {
        ("list", [inner]) => ColumnType::List(Box::new(parse_at(inner, next)?)),
        ("set", [inner]) => ColumnType::Set(Box::new(parse_at(inner, next)?)),
        ("map", [key, value]) => ColumnType::Map(
            Box::new(parse_at(key, next)?),
            Box::new(parse_at(value, next)?),
        ),
        ("tuple", items) if !items.is_empty() => ColumnType::Tuple(
            items
                .iter()
                .map(|item| parse_at(item, next))
                .collect::<Option<Vec<_>>>()?,
        ),
        ("vector", [inner, dimension]) => match dimension.parse::<u32>() {
            Ok(dimension) => ColumnType::Vector(Box::new(parse_at(inner, next)?), dimension),
            Err(_) => ColumnType::Unknown,
        },
        _ => ColumnType::Unknown,
    };
    Some(ty)
}

/// Split `family<args>` into its identifier and the text between the outer
/// brackets. The closing bracket of the first `<` must be the last character.
fn split_family(raw: &str) -> Option<(&str, &str)> {
    let open = raw.find('<')?;
    let family = &raw[..open];
    if family.is_empty()
        || !family
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return None;
    }

    let mut depth = 0usize;
    for (offset, ch) in raw[open..].char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    let close = open + offset;
                    return (close == raw.len() - 1).then(|| (family, &raw[open + 1..close]));
                }
            }
            _ => {}
        }
    }
    None
}

/// Split arguments on commas that are not inside nested brackets.
fn split_args(args: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in args.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(args[start..].trim());

    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    Some(parts)
}

/// TypeScript type a column is exposed as in generated models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetType {
    String,
    Number,
    Boolean,
    Buffer,
    Date,
    Array(Box<TargetType>),
    Record {
        key: Box<TargetType>,
        value: Box<TargetType>,
    },
    Tuple(Vec<TargetType>),
    Unknown,
}

impl TargetType {
    /// Object keys can only be strings or numbers in TypeScript records.
    fn key_domain(self) -> TargetType {
        match self {
            TargetType::Number => TargetType::Number,
            _ => TargetType::String,
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetType::String => f.write_str("string"),
            TargetType::Number => f.write_str("number"),
            TargetType::Boolean => f.write_str("boolean"),
            TargetType::Buffer => f.write_str("Buffer"),
            TargetType::Date => f.write_str("Date"),
            TargetType::Array(inner) => write!(f, "{}[]", inner),
            TargetType::Record { key, value } => write!(f, "Record<{}, {}>", key, value),
            TargetType::Tuple(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            TargetType::Unknown => f.write_str("unknown"),
        }
    }
}

/// A `toModel` conversion from a driver value to the model value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// `Long`, `Integer` and `BigDecimal` values.
    ToNumber,
    /// `Uuid`, `InetAddress`, `LocalDate`, `LocalTime` and `Duration` values.
    ToString,
    ToDate,
    /// Tuple values, with a per-position converter where the element needs one.
    Tuple(Vec<Option<Conversion>>),
    ArrayFrom,
    /// Element-wise conversion of a list or set.
    Each(Box<Conversion>),
    /// Converts every value of a map, keeping its keys.
    Values(Box<Conversion>),
}

impl Conversion {
    /// Arrow function suitable for a mapper `toModel` option. Null values
    /// pass through untouched.
    pub fn to_model(&self) -> String {
        format!("(val) => (val == null ? val : {})", self.apply("val"))
    }

    fn apply(&self, var: &str) -> String {
        match self {
            Conversion::ToNumber => format!("{}.toNumber()", var),
            Conversion::ToString => format!("{}.toString()", var),
            Conversion::ToDate => format!("new Date({})", var),
            Conversion::Tuple(items) if items.iter().all(Option::is_none) => {
                format!("{}.values()", var)
            }
            Conversion::Tuple(items) => {
                let elements: Vec<String> = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let element = format!("items[{}]", i);
                        match item {
                            Some(conversion) => conversion.apply(&element),
                            None => element,
                        }
                    })
                    .collect();
                format!("((items) => [{}])({}.values())", elements.join(", "), var)
            }
            Conversion::ArrayFrom => format!("Array.from({})", var),
            Conversion::Each(inner) => format!("{}.map((item) => {})", var, inner.apply("item")),
            Conversion::Values(inner) => format!(
                "Object.fromEntries(Object.entries({}).map(([k, v]) => [k, {}]))",
                var,
                inner.apply("v")
            ),
        }
    }
}
