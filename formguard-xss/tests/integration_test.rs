//! Integration tests for formguard-xss

use formguard_core::HttpResponse;
use formguard_xss::*;

#[test]
fn test_benign_name_round_trips() {
    let sanitizer = XssSanitizer::text_only();
    assert_eq!(sanitizer.sanitize("Alice"), "Alice");
    assert!(!XssValidator::contains_xss("Alice"));
}

#[test]
fn test_script_payload_is_detected_then_stripped() {
    let input = "<script>alert(1)</script>Bob";

    assert_eq!(
        XssValidator::detect_attack_type(input),
        Some(AttackKind::ScriptTag)
    );

    let clean = XssSanitizer::from_preset(SanitizerPreset::Text).sanitize(input);
    assert_eq!(clean, "Bob");
    assert!(!XssValidator::contains_xss(&clean));
}

#[test]
fn test_sanitized_output_never_contains_tags() {
    let sanitizer = XssSanitizer::text_only();
    let payloads = [
        r#"<img src=x onerror=alert(1)>"#,
        r#"<svg onload=alert(1)>"#,
        r#"<iframe src="javascript:alert(1)"></iframe>"#,
        r#"<a href="javascript:alert(1)">x</a>"#,
        r#"<style>body{}</style>Zed"#,
    ];

    for payload in payloads {
        let clean = sanitizer.sanitize(payload);
        assert!(!clean.contains('<'), "{payload} -> {clean}");
        assert!(!XssValidator::contains_xss(&clean), "{payload} -> {clean}");
    }
}

#[test]
fn test_preset_from_config_value() {
    let preset: SanitizerPreset = serde_json::from_str("\"permissive\"").unwrap();
    assert_eq!(preset, SanitizerPreset::Permissive);
    assert!(XssSanitizer::from_preset(preset).allows_markup());
}

#[test]
fn test_guard_headers() {
    let guard = XssGuard::new(
        XssConfig::new().with_content_security_policy(Some("default-src 'none'".to_string())),
    );
    let response = guard.add_protection_headers(HttpResponse::created());

    assert_eq!(response.status, 201);
    assert_eq!(
        response.header("Content-Security-Policy"),
        Some("default-src 'none'")
    );
    assert_eq!(response.header("X-Content-Type-Options"), Some("nosniff"));
}
