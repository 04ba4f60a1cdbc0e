/// Cuts `value` to at most `limit` characters for logging.
pub fn truncate_for_log(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{}...[{} chars]", truncated, value.chars().count())
}

/// Only the first few characters of a secret, for startup logs.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}***")
}
