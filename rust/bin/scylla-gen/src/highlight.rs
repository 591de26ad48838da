//! Terminal syntax highlighting for printed models and CQL.

use colored::*;
use scylla_gen_codegen::{Language, NativeType};

/// Highlighter for generated source.
pub struct Highlighter {
    language: Language,
    enabled: bool,
}

impl Highlighter {
    pub fn new(language: Language, enabled: bool) -> Self {
        Self { language, enabled }
    }

    fn is_keyword(&self, word: &str) -> bool {
        match self.language {
            Language::TypeScript => matches!(
                word,
                "import" | "from" | "export" | "default" | "interface" | "type" | "const"
                    | "new" | "extends" | "as" | "null" | "undefined" | "return" | "if"
                    | "throw" | "process"
            ),
            Language::Cql => matches!(
                word.to_uppercase().as_str(),
                "CREATE" | "TABLE" | "PRIMARY" | "KEY" | "WITH" | "CLUSTERING" | "ORDER"
                    | "BY" | "ASC" | "DESC" | "STATIC" | "FROZEN"
            ),
        }
    }

    fn is_type(&self, word: &str) -> bool {
        match self.language {
            Language::TypeScript => matches!(
                word,
                "string" | "number" | "boolean" | "unknown" | "never" | "object" | "Date"
                    | "Buffer" | "Record" | "Promise"
            ),
            Language::Cql => {
                let word = word.to_ascii_lowercase();
                NativeType::from_name(&word).is_some()
                    || matches!(word.as_str(), "list" | "set" | "map" | "tuple" | "vector")
            }
        }
    }

    /// Highlight a whole text, line by line.
    pub fn highlight(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len() * 2);
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&self.highlight_line(line));
        }
        out
    }

    fn highlight_line(&self, line: &str) -> String {
        let comment = match self.language {
            Language::TypeScript => "//",
            Language::Cql => "--",
        };

        let mut result = String::new();
        let mut word = String::new();
        let mut quote: Option<char> = None;

        for (idx, ch) in line.char_indices() {
            if let Some(q) = quote {
                result.push_str(&ch.to_string().green().to_string());
                if ch == q {
                    quote = None;
                }
                continue;
            }

            if line[idx..].starts_with(comment) {
                self.flush(&mut word, &mut result);
                result.push_str(&line[idx..].dimmed().to_string());
                return result;
            }

            if ch == '\'' || ch == '"' || ch == '`' {
                self.flush(&mut word, &mut result);
                quote = Some(ch);
                result.push_str(&ch.to_string().green().to_string());
                continue;
            }

            if ch.is_alphanumeric() || ch == '_' || ch == '$' {
                word.push(ch);
                continue;
            }

            self.flush(&mut word, &mut result);
            if ch.is_whitespace() {
                result.push(ch);
            } else {
                result.push_str(&ch.to_string().cyan().to_string());
            }
        }

        self.flush(&mut word, &mut result);
        result
    }

    fn flush(&self, word: &mut String, out: &mut String) {
        if word.is_empty() {
            return;
        }
        let painted = if self.is_keyword(word) {
            word.blue().bold().to_string()
        } else if self.is_type(word) {
            word.magenta().to_string()
        } else if word.chars().all(|c| c.is_ascii_digit()) {
            word.yellow().to_string()
        } else {
            word.normal().to_string()
        };
        out.push_str(&painted);
        word.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_is_identity() {
        let text = "CREATE TABLE chat.messages (\n  id uuid,\n);";
        assert_eq!(Highlighter::new(Language::Cql, false).highlight(text), text);
    }

    #[test]
    fn test_highlight_keeps_text() {
        colored::control::set_override(true);
        let text = "export interface Message {\n  id: string; // key\n}";
        let out = Highlighter::new(Language::TypeScript, true).highlight(text);
        assert_ne!(out, text);
        assert!(out.contains("interface"));
        assert!(out.contains("Message"));
        assert_eq!(out.matches('\n').count(), 2);
        colored::control::unset_override();
    }

    #[test]
    fn test_keyword_sets_per_language() {
        let ts = Highlighter::new(Language::TypeScript, true);
        let cql = Highlighter::new(Language::Cql, true);
        assert!(ts.is_keyword("interface"));
        assert!(!ts.is_keyword("PRIMARY"));
        assert!(cql.is_keyword("primary"));
        assert!(cql.is_type("timeuuid"));
        assert!(cql.is_type("TIMESTAMP"));
        assert!(cql.is_keyword("frozen"));
        assert!(!cql.is_type("messages"));
    }
}
