/// Name casing helpers for generated identifiers and file names

/// Replace every `_x` (x in `a-z`) with `X`. Underscores followed by anything
/// else are left as they are.
pub fn snake_to_camel(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '_' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_lowercase() {
                    result.push(next.to_ascii_uppercase());
                    chars.next();
                    continue;
                }
            }
        }
        result.push(ch);
    }

    result
}

/// `snake_to_camel` with the first character upper-cased.
pub fn snake_to_pascal(s: &str) -> String {
    let camel = snake_to_camel(s);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => camel,
    }
}

/// Camel/Pascal case to kebab case: a hyphen goes between a lowercase letter
/// or digit and the uppercase letter after it, then everything is lowercased.
pub fn kebab_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;

    for ch in s.chars() {
        if let Some(p) = prev {
            if ch.is_ascii_uppercase() && (p.is_ascii_lowercase() || p.is_ascii_digit()) {
                result.push('-');
            }
        }
        result.push(ch);
        prev = Some(ch);
    }

    result.to_lowercase()
}

/// Words whose singular and plural are the same.
static UNINFLECTED: &[&str] = &[
    "data",
    "deer",
    "equipment",
    "feedback",
    "fish",
    "information",
    "metadata",
    "news",
    "series",
    "sheep",
    "species",
];

/// Irregular plural → singular pairs. Matched against the last word only.
static IRREGULAR: &[(&str, &str)] = &[
    ("aliases", "alias"),
    ("analyses", "analysis"),
    ("buses", "bus"),
    ("canoes", "canoe"),
    ("children", "child"),
    ("cookies", "cookie"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("halves", "half"),
    ("indices", "index"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("matrices", "matrix"),
    ("men", "man"),
    ("mice", "mouse"),
    ("movies", "movie"),
    ("oxen", "ox"),
    ("people", "person"),
    ("phenomena", "phenomenon"),
    ("quizzes", "quiz"),
    ("shelves", "shelf"),
    ("shoes", "shoe"),
    ("statuses", "status"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("thieves", "thief"),
    ("toes", "toe"),
    ("vertices", "vertex"),
    ("viruses", "virus"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
];

/// Suffixes that already read as singular.
static SINGULAR_ENDINGS: &[&str] = &["ss", "us", "is"];

/// Sibilant endings take `es` in the plural.
static ES_ENDINGS: &[&str] = &["sses", "shes", "ches", "xes", "zzes"];

/// Reduce a plural table or type name to its singular form.
///
/// Only the last word is inflected, so Pascal-case names work as well as
/// plain words (`UserMessages` → `UserMessage`). The case of the replaced
/// suffix is preserved.
pub fn singularize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    for plural in UNINFLECTED {
        if ends_with_word(word, &lower, plural) {
            return word.to_string();
        }
    }

    for (plural, singular) in IRREGULAR {
        if ends_with_word(word, &lower, plural) {
            return replace_suffix(word, plural.len(), singular);
        }
    }

    if SINGULAR_ENDINGS.iter().any(|e| lower.ends_with(e)) {
        return word.to_string();
    }

    if lower.len() > 3 && lower.ends_with("ies") {
        let before = lower.as_bytes()[lower.len() - 4];
        if !matches!(before, b'a' | b'e' | b'i' | b'o' | b'u') {
            return replace_suffix(word, 3, "y");
        }
    }

    if ES_ENDINGS.iter().any(|e| lower.ends_with(e)) || lower.ends_with("oes") {
        return replace_suffix(word, 2, "");
    }

    if lower.len() > 1 && lower.ends_with('s') {
        return replace_suffix(word, 1, "");
    }

    word.to_string()
}

/// `lower` ends with `suffix` and the suffix starts a word: at the start of
/// the name, after an underscore, or at an uppercase letter.
fn ends_with_word(word: &str, lower: &str, suffix: &str) -> bool {
    if !lower.ends_with(suffix) {
        return false;
    }
    let start = lower.len() - suffix.len();
    if start == 0 {
        return true;
    }
    let bytes = word.as_bytes();
    bytes[start].is_ascii_uppercase() || bytes[start - 1] == b'_'
}

/// Replace the last `len` bytes of `word` with `replacement`, keeping the
/// case of what was removed.
fn replace_suffix(word: &str, len: usize, replacement: &str) -> String {
    let (stem, removed) = word.split_at(word.len() - len);
    let has_letters = removed.chars().any(|c| c.is_ascii_alphabetic());
    let all_upper = has_letters
        && removed
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .all(|c| c.is_ascii_uppercase());

    let replacement = if all_upper && removed.len() > 1 {
        replacement.to_ascii_uppercase()
    } else if removed.starts_with(|c: char| c.is_ascii_uppercase()) {
        let mut chars = replacement.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    } else {
        replacement.to_string()
    };

    format!("{}{}", stem, replacement)
}
