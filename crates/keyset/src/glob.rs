//! Case-sensitive shell-style pattern matching over string keys.

use regex::Regex;

use crate::error::KeysetError;

/// A shell-style pattern (`?` one character, `*` any run, `[...]` classes)
/// compiled to an anchored regex. Exact key names are the degenerate pattern
/// with no metacharacters.
#[derive(Debug, Clone)]
pub(crate) struct GlobPattern {
    pattern: String,
    regex: Regex,
}

impl GlobPattern {
    pub(crate) fn new(pattern: &str) -> Result<Self, KeysetError> {
        let regex = Regex::new(&format!("^(?s:{})$", translate(pattern)))
            .map_err(|e| KeysetError::parse(pattern, e.to_string()))?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub(crate) fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

impl PartialEq for GlobPattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

/// Translates a shell pattern into a regex fragment.
fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::new();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => {
                // Find the closing bracket; a ']' directly after '[' or '[!'
                // belongs to the class.
                let mut j = i + 1;
                if j < chars.len() && chars[j] == '!' {
                    j += 1;
                }
                if j < chars.len() && chars[j] == ']' {
                    j += 1;
                }
                while j < chars.len() && chars[j] != ']' {
                    j += 1;
                }
                if j >= chars.len() {
                    // Unterminated class matches a literal '['.
                    out.push_str(r"\[");
                } else {
                    let stuff: String = chars[i + 1..j].iter().collect();
                    let stuff = stuff.replace('\\', r"\\");
                    out.push('[');
                    if let Some(rest) = stuff.strip_prefix('!') {
                        out.push('^');
                        out.push_str(rest);
                    } else if let Some(rest) = stuff.strip_prefix('^') {
                        out.push_str(r"\^");
                        out.push_str(rest);
                    } else {
                        out.push_str(&stuff);
                    }
                    out.push(']');
                    i = j;
                }
            }
            c => out.push_str(&regex::escape(&c.to_string())),
        }
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_and_wildcards() {
        let glob = GlobPattern::new("item?").unwrap();
        assert!(glob.matches("item1"));
        assert!(glob.matches("item2"));
        assert!(!glob.matches("item"));
        assert!(!glob.matches("items12"));

        let glob = GlobPattern::new("b*").unwrap();
        assert!(glob.matches("b"));
        assert!(glob.matches("ba"));
        assert!(glob.matches("bb"));
        assert!(!glob.matches("ab"));

        let glob = GlobPattern::new("name").unwrap();
        assert!(glob.matches("name"));
        assert!(!glob.matches("Name"));
    }

    #[test]
    fn test_character_classes() {
        let glob = GlobPattern::new("na[mn]e").unwrap();
        assert!(glob.matches("name"));
        assert!(glob.matches("nane"));
        assert!(!glob.matches("nape"));

        let glob = GlobPattern::new("a[!xy]c").unwrap();
        assert!(glob.matches("abc"));
        assert!(!glob.matches("axc"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let glob = GlobPattern::new("a.b+c").unwrap();
        assert!(glob.matches("a.b+c"));
        assert!(!glob.matches("aXb+c"));
    }

    #[test]
    fn test_unterminated_class_is_literal() {
        let glob = GlobPattern::new("a[bc").unwrap();
        assert!(glob.matches("a[bc"));
        assert!(!glob.matches("ab"));
    }
}
