//! Helpers for keeping personal data out of logs

/// Mask an email address for logging (`maria@example.com` → `m****@example.com`)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap_or('*');
            format!("{}****@{}", first, domain)
        }
        _ => "****".to_string(),
    }
}
