use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Kind of script-injection pattern found in a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackKind {
    ScriptTag,
    ErrorHandler,
    EventHandler,
    JavascriptUrl,
    DataHtmlUrl,
    VbscriptUrl,
    Iframe,
    ObjectTag,
    EmbedTag,
}

impl AttackKind {
    pub fn description(&self) -> &'static str {
        match self {
            AttackKind::ScriptTag => "Script injection",
            AttackKind::ErrorHandler => "Event handler injection (onerror)",
            AttackKind::EventHandler => "Event handler injection",
            AttackKind::JavascriptUrl => "JavaScript protocol",
            AttackKind::DataHtmlUrl => "Data URL injection",
            AttackKind::VbscriptUrl => "VBScript injection",
            AttackKind::Iframe => "Iframe injection",
            AttackKind::ObjectTag => "Object tag injection",
            AttackKind::EmbedTag => "Embed tag injection",
        }
    }
}

impl fmt::Display for AttackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

// Checked in order; the first match names the attack.
static PATTERNS: Lazy<Vec<(AttackKind, Regex)>> = Lazy::new(|| {
    [
        (AttackKind::ScriptTag, r"(?is)<script[^>]*>.*?</script>|<script[^>]*/?>"),
        (AttackKind::ErrorHandler, r"(?i)onerror\s*="),
        (AttackKind::EventHandler, r"(?i)<[^>]*\bon\w+\s*="),
        (AttackKind::JavascriptUrl, r"(?i)javascript\s*:"),
        (AttackKind::DataHtmlUrl, r"(?i)data:text/html"),
        (AttackKind::VbscriptUrl, r"(?i)vbscript\s*:"),
        (AttackKind::Iframe, r"(?i)<iframe[^>]*>"),
        (AttackKind::ObjectTag, r"(?i)<object[^>]*>"),
        (AttackKind::EmbedTag, r"(?i)<embed[^>]*>"),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("static XSS pattern")))
    .collect()
});

/// Detects common script-injection patterns.
///
/// Detection is advisory: FormGuard sanitizes regardless and uses the
/// detector to report what was stripped.
pub struct XssValidator;

impl XssValidator {
    pub fn contains_xss(text: &str) -> bool {
        PATTERNS.iter().any(|(_, pattern)| pattern.is_match(text))
    }

    /// First matching attack kind, if any.
    pub fn detect_attack_type(text: &str) -> Option<AttackKind> {
        PATTERNS
            .iter()
            .find(|(_, pattern)| pattern.is_match(text))
            .map(|(kind, _)| *kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_injection() {
        assert_eq!(
            XssValidator::detect_attack_type("<script>alert(1)</script>Bob"),
            Some(AttackKind::ScriptTag)
        );
        assert_eq!(
            XssValidator::detect_attack_type("<SCRIPT src=//evil.example/x.js>"),
            Some(AttackKind::ScriptTag)
        );
    }

    #[test]
    fn test_handler_injection() {
        assert_eq!(
            XssValidator::detect_attack_type(r#"<img src="x" onerror="alert(1)">"#),
            Some(AttackKind::ErrorHandler)
        );
        assert_eq!(
            XssValidator::detect_attack_type(r##"<a href="#" onclick="alert(1)">x</a>"##),
            Some(AttackKind::EventHandler)
        );
    }

    #[test]
    fn test_protocols() {
        assert_eq!(
            XssValidator::detect_attack_type(r#"<a href="javascript:void(0)">Link</a>"#),
            Some(AttackKind::JavascriptUrl)
        );
        assert!(XssValidator::contains_xss(r#"<a href="data:text/html,hi">x</a>"#));
        assert!(XssValidator::contains_xss("<iframe src=x></iframe>"));
    }

    #[test]
    fn test_plain_names_are_clean() {
        for name in ["Alice", "Carol", "Jean-Luc Picard", "Mona=Lisa", "online = yes"] {
            assert!(!XssValidator::contains_xss(name), "{name}");
        }
        assert!(!XssValidator::contains_xss("<p>Hello <strong>world</strong>!</p>"));
    }

    #[test]
    fn test_display() {
        assert_eq!(AttackKind::ScriptTag.to_string(), "Script injection");
    }
}
