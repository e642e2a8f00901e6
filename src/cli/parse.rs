//! Value parsers for CLI arguments

/// Parse a record kind: non-empty, no surrounding whitespace
pub fn parse_kind(s: &str) -> std::result::Result<String, String> {
    let kind = s.trim();
    if kind.is_empty() {
        return Err("kind must not be empty".to_string());
    }
    if kind != s {
        return Err(format!("kind must not have surrounding whitespace: {:?}", s));
    }
    Ok(kind.to_string())
}
