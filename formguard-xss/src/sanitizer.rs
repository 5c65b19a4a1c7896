use ammonia::Builder;
use serde::Deserialize;
use std::collections::HashSet;

/// Named sanitizer configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SanitizerPreset {
    /// No markup survives; script and style bodies are dropped.
    #[default]
    Text,
    /// Inline emphasis only.
    Strict,
    /// Common formatting tags.
    Basic,
    /// Formatting, tables and images.
    Permissive,
}

impl SanitizerPreset {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "text_only" => Some(SanitizerPreset::Text),
            "strict" => Some(SanitizerPreset::Strict),
            "basic" | "default" => Some(SanitizerPreset::Basic),
            "permissive" => Some(SanitizerPreset::Permissive),
            _ => None,
        }
    }
}

/// HTML sanitizer backed by ammonia.
///
/// Sanitizing never fails: disallowed markup is removed and the remaining
/// text is returned HTML-escaped.
#[derive(Debug, Clone)]
pub struct XssSanitizer {
    allowed_tags: Vec<String>,
    allowed_attributes: Vec<String>,
    strip_comments: bool,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl XssSanitizer {
    /// Common formatting tags with `href`, `title`, `class` and `id`.
    pub fn new() -> Self {
        Self {
            allowed_tags: owned(&[
                "a", "b", "br", "code", "div", "em", "h1", "h2", "h3", "h4", "h5", "h6", "i",
                "li", "ol", "p", "pre", "span", "strong", "ul",
            ]),
            allowed_attributes: owned(&["href", "title", "class", "id"]),
            strip_comments: true,
        }
    }

    /// Plain text only. The preset used for form fields.
    pub fn text_only() -> Self {
        Self {
            allowed_tags: Vec::new(),
            allowed_attributes: Vec::new(),
            strip_comments: true,
        }
    }

    pub fn strict() -> Self {
        Self {
            allowed_tags: owned(&["b", "br", "em", "i", "p", "strong"]),
            allowed_attributes: Vec::new(),
            strip_comments: true,
        }
    }

    pub fn permissive() -> Self {
        Self {
            allowed_tags: owned(&[
                "a", "abbr", "b", "blockquote", "br", "cite", "code", "dd", "del", "div", "dl",
                "dt", "em", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i", "img", "ins", "li",
                "ol", "p", "pre", "q", "small", "span", "strong", "sub", "sup", "table", "tbody",
                "td", "th", "thead", "tr", "ul",
            ]),
            allowed_attributes: owned(&["alt", "class", "href", "id", "src", "title"]),
            strip_comments: true,
        }
    }

    pub fn from_preset(preset: SanitizerPreset) -> Self {
        match preset {
            SanitizerPreset::Text => Self::text_only(),
            SanitizerPreset::Strict => Self::strict(),
            SanitizerPreset::Basic => Self::new(),
            SanitizerPreset::Permissive => Self::permissive(),
        }
    }

    pub fn with_allowed_tags(mut self, tags: Vec<String>) -> Self {
        self.allowed_tags = tags;
        self
    }

    pub fn with_allowed_attributes(mut self, attributes: Vec<String>) -> Self {
        self.allowed_attributes = attributes;
        self
    }

    pub fn with_strip_comments(mut self, strip: bool) -> Self {
        self.strip_comments = strip;
        self
    }

    pub fn allows_markup(&self) -> bool {
        !self.allowed_tags.is_empty()
    }

    /// Remove everything not explicitly allowed.
    pub fn sanitize(&self, html: &str) -> String {
        let tags: HashSet<&str> = self.allowed_tags.iter().map(String::as_str).collect();
        let attributes: HashSet<&str> =
            self.allowed_attributes.iter().map(String::as_str).collect();

        let mut builder = Builder::default();
        builder
            .tags(tags)
            .generic_attributes(attributes)
            .strip_comments(self.strip_comments);

        builder.clean(html).to_string()
    }
}

impl Default for XssSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_only_keeps_plain_text() {
        let sanitizer = XssSanitizer::text_only();
        assert_eq!(sanitizer.sanitize("Alice"), "Alice");
        assert_eq!(sanitizer.sanitize("Jean-Luc Picard"), "Jean-Luc Picard");
    }

    #[test]
    fn test_text_only_drops_script_with_body() {
        let sanitizer = XssSanitizer::text_only();
        assert_eq!(sanitizer.sanitize("<script>alert(1)</script>Bob"), "Bob");
    }

    #[test]
    fn test_text_only_unwraps_tags() {
        let sanitizer = XssSanitizer::text_only();
        assert_eq!(sanitizer.sanitize("<b>Bo</b><i>b</i>"), "Bob");
        assert_eq!(sanitizer.sanitize(r#"<img src=x onerror="alert(1)">Eve"#), "Eve");
    }

    #[test]
    fn test_text_only_escapes_stray_brackets() {
        let clean = XssSanitizer::text_only().sanitize("a < b");
        assert!(!clean.contains('<'));
        assert!(clean.contains("&lt;"));
    }

    #[test]
    fn test_text_only_output_is_html_escaped() {
        let sanitizer = XssSanitizer::text_only();
        assert_eq!(sanitizer.sanitize("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(sanitizer.sanitize("O'Brien"), "O'Brien");
    }

    #[test]
    fn test_basic_removes_script_and_handlers() {
        let sanitizer = XssSanitizer::new();
        let clean = sanitizer.sanitize(r#"<p>Hello</p><script>alert('XSS')</script>"#);
        assert!(!clean.contains("script"));
        assert!(clean.contains("<p>Hello</p>"));

        let clean = sanitizer.sanitize("<a href=\"#\" onclick=\"alert('XSS')\">Click</a>");
        assert!(!clean.contains("onclick"));
        assert!(clean.contains("Click"));
    }

    #[test]
    fn test_strict_preset() {
        let clean = XssSanitizer::strict().sanitize("<div><p><strong>Bold</strong></p></div>");
        assert!(!clean.contains("<div>"));
        assert!(clean.contains("<strong>"));
    }

    #[test]
    fn test_permissive_preset() {
        let clean =
            XssSanitizer::permissive().sanitize(r#"<div><img src="image.jpg" alt="Test"/></div>"#);
        assert!(clean.contains("<div>"));
        assert!(clean.contains("<img"));
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!(SanitizerPreset::parse("TEXT"), Some(SanitizerPreset::Text));
        assert_eq!(SanitizerPreset::parse("default"), Some(SanitizerPreset::Basic));
        assert_eq!(SanitizerPreset::parse("anything"), None);
        assert!(!XssSanitizer::from_preset(SanitizerPreset::Text).allows_markup());
        assert!(XssSanitizer::from_preset(SanitizerPreset::Strict).allows_markup());
    }
}
