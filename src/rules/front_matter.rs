//! Front-matter blocks: detection, stripping, and per-tool rendering.

use chrono::NaiveDate;

/// Line that opens and closes a front-matter block.
pub const DELIMITER: &str = "---";

/// Windsurf rules are only applied when the user asks for them.
pub const MANUAL_TRIGGER: &str = "manual";

/// Byte-order mark some editors prepend to UTF-8 files.
pub const BOM: char = '\u{feff}';

/// Returns `text` without a leading byte-order mark.
#[must_use]
pub fn without_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Splits a leading front-matter block from `text`.
///
/// Returns `(block, body)` where `block` is the text between the delimiters
/// and `body` everything after the closing delimiter line. Returns `None`
/// when the first line is not a delimiter or the block is never closed.
/// A leading byte-order mark is ignored.
#[must_use]
pub fn split(text: &str) -> Option<(&str, &str)> {
    let text = without_bom(text);
    let mut lines = text.split_inclusive('\n');
    let first = lines.next()?;
    if !is_delimiter(first) {
        return None;
    }

    let mut offset = first.len();
    for line in lines {
        let end = offset + line.len();
        if is_delimiter(line) {
            return Some((&text[first.len()..offset], &text[end..]));
        }
        offset = end;
    }
    None
}

/// Returns `text` without a leading byte-order mark or front-matter block.
#[must_use]
pub fn strip(text: &str) -> &str {
    let text = without_bom(text);
    split(text).map_or(text, |(_, body)| body)
}

/// Values stamped into every Windsurf block of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    /// Organization credited as author.
    pub author: String,
    /// Rule format version.
    pub version: String,
    /// Build date.
    pub date: NaiveDate,
}

/// Generated metadata for one rule file, keyed by target tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontMatter {
    /// Windsurf schema.
    Windsurf {
        /// Activation mode, always [`MANUAL_TRIGGER`].
        trigger: String,
        /// Rule title.
        title: String,
        /// One-line summary.
        description: String,
        /// Organization credited as author.
        author: String,
        /// Build date.
        date: NaiveDate,
        /// Rule format version.
        version: String,
    },
    /// Cursor schema.
    Cursor {
        /// One-line summary.
        description: String,
        /// Files the rule attaches to.
        globs: Vec<String>,
        /// Whether Cursor applies the rule to every request.
        always_apply: bool,
    },
}

impl FrontMatter {
    /// Renders the block including both delimiter lines and a trailing newline.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(DELIMITER);
        out.push('\n');
        match self {
            FrontMatter::Windsurf { trigger, title, description, author, date, version } => {
                push_field(&mut out, "trigger", trigger);
                push_field(&mut out, "title", &quote(title));
                push_field(&mut out, "description", &quote(description));
                push_field(&mut out, "author", &quote(author));
                push_field(&mut out, "date", &date.format("%Y-%m-%d").to_string());
                push_field(&mut out, "version", &quote(version));
            }
            FrontMatter::Cursor { description, globs, always_apply } => {
                let list = globs.iter().map(|g| quote(g)).collect::<Vec<_>>().join(", ");
                push_field(&mut out, "description", &quote(description));
                push_field(&mut out, "globs", &format!("[{list}]"));
                push_field(&mut out, "alwaysApply", &always_apply.to_string());
            }
        }
        out.push_str(DELIMITER);
        out.push('\n');
        out
    }
}

fn push_field(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push_str(": ");
    out.push_str(value);
    out.push('\n');
}

/// Double-quoted YAML scalar.
///
/// A JSON string literal is a valid YAML double-quoted scalar, and `serde_json`
/// escapes quotes, backslashes, and C0 controls. YAML additionally rejects raw
/// DEL, C1 controls, and U+FEFF, which are escaped here as `\uXXXX`.
fn quote(value: &str) -> String {
    let json = serde_json::Value::from(value).to_string();
    if !json.chars().any(needs_yaml_escape) {
        return json;
    }
    let mut out = String::with_capacity(json.len() + 8);
    for c in json.chars() {
        if needs_yaml_escape(c) {
            out.push_str(&format!("\\u{:04x}", u32::from(c)));
        } else {
            out.push(c);
        }
    }
    out
}

fn needs_yaml_escape(c: char) -> bool {
    matches!(c, '\u{7f}'..='\u{9f}' | '\u{feff}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_block_only() {
        let text = "---\ntitle: old\n---\n# Rule\n\nBody\n---\nnot front matter\n---\n";
        assert_eq!(strip(text), "# Rule\n\nBody\n---\nnot front matter\n---\n");
    }

    #[test]
    fn no_block_leaves_text_untouched() {
        let text = "# Rule\n---\nx\n---\n";
        assert_eq!(strip(text), text);
        assert!(split(text).is_none());
    }

    #[test]
    fn unterminated_block_is_not_stripped() {
        let text = "---\ntitle: never closed\n# Rule\n";
        assert_eq!(strip(text), text);
    }

    #[test]
    fn split_returns_block_contents() {
        let (block, body) = split("---\r\na: 1\r\n--- \r\nbody").unwrap();
        assert_eq!(block, "a: 1\r\n");
        assert_eq!(body, "body");
    }

    #[test]
    fn byte_order_mark_does_not_hide_block() {
        let text = "\u{feff}---\ntitle: old\n---\n# Rule\n";
        assert_eq!(split(text), Some(("title: old\n", "# Rule\n")));
        assert_eq!(strip(text), "# Rule\n");
        assert_eq!(strip("\u{feff}# Rule\n"), "# Rule\n");
    }

    #[test]
    fn empty_block_is_stripped() {
        assert_eq!(strip("---\n---\n# Rule\n"), "# Rule\n");
    }

    #[test]
    fn windsurf_block_parses_as_yaml() {
        let fm = FrontMatter::Windsurf {
            trigger: MANUAL_TRIGGER.into(),
            title: "SQL \"Injection\" Defense".into(),
            description: "Parameterize: always".into(),
            author: "Secure Rules Project".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            version: "1.0".into(),
        };
        let rendered = fm.render();
        assert!(rendered.starts_with("---\ntrigger: manual\n"));
        assert!(rendered.contains("date: 2025-03-15\n"));

        let (block, body) = split(&rendered).unwrap();
        assert!(body.is_empty());
        let yaml: serde_yaml::Value = serde_yaml::from_str(block).unwrap();
        assert_eq!(yaml["title"].as_str(), Some("SQL \"Injection\" Defense"));
        assert_eq!(yaml["description"].as_str(), Some("Parameterize: always"));
        assert_eq!(yaml["version"].as_str(), Some("1.0"));
    }

    #[test]
    fn control_characters_are_escaped() {
        let fm = FrontMatter::Windsurf {
            trigger: MANUAL_TRIGGER.into(),
            title: "Shell \u{1b}[31mcolors\u{7}".into(),
            description: "DEL \u{7f} and NEL \u{85} and BOM \u{feff}".into(),
            author: "Secure Rules Project".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            version: "1.0".into(),
        };
        let rendered = fm.render();
        assert!(!rendered.contains('\u{1b}'));
        assert!(!rendered.contains('\u{7f}'));

        let (block, _) = split(&rendered).unwrap();
        let yaml: serde_yaml::Value = serde_yaml::from_str(block).unwrap();
        assert_eq!(yaml["title"].as_str(), Some("Shell \u{1b}[31mcolors\u{7}"));
        assert_eq!(yaml["description"].as_str(), Some("DEL \u{7f} and NEL \u{85} and BOM \u{feff}"));
    }

    #[test]
    fn cursor_block_has_bracketed_globs() {
        let fm = FrontMatter::Cursor {
            description: "Backend rules".into(),
            globs: vec!["**/*.py".into(), "**/*.go".into()],
            always_apply: false,
        };
        let rendered = fm.render();
        assert!(rendered.contains("globs: [\"**/*.py\", \"**/*.go\"]\n"));
        assert!(rendered.contains("alwaysApply: false\n"));

        let (block, _) = split(&rendered).unwrap();
        let yaml: serde_yaml::Value = serde_yaml::from_str(block).unwrap();
        let globs: Vec<&str> =
            yaml["globs"].as_sequence().unwrap().iter().filter_map(|g| g.as_str()).collect();
        assert_eq!(globs, vec!["**/*.py", "**/*.go"]);
        assert_eq!(yaml["alwaysApply"].as_bool(), Some(false));
    }
}
