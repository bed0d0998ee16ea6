//! Map friendly provider names to SMTP submission URLs.
//!
//! `-s 163` is easier to type than `-s smtps://smtp.163.com:465`. Anything
//! that is not a known name passes through unchanged and is treated as a
//! URL by the transport.

use std::collections::HashMap;

/// Built-in provider table.
pub fn builtin_endpoint(name: &str) -> Option<&'static str> {
    match name {
        "163" => Some("smtps://smtp.163.com:465"),
        "126" => Some("smtps://smtp.126.com:465"),
        "qq" => Some("smtps://smtp.qq.com:465"),
        _ => None,
    }
}

/// Resolve a provider name or URL to a submission URL.
///
/// Precedence: config `[providers]` overrides, then builtins, then the
/// input itself.
pub fn resolve_endpoint(server: &str, overrides: &HashMap<String, String>) -> String {
    if let Some(url) = overrides.get(server) {
        return url.clone();
    }
    if let Some(url) = builtin_endpoint(server) {
        return url.to_string();
    }
    server.to_string()
}
