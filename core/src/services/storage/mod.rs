//! Object-storage collaborator used to turn stored paths into public URLs.

use url::Url;

/// Resolves a stored object path into an absolute, publicly reachable URL
pub trait StorageUrlResolver: Send + Sync {
    fn url_for(&self, path: &str) -> String;
}

/// Resolve a stored file reference at read time.
///
/// Absolute URLs are returned unchanged, relative paths go through the
/// storage resolver, and a missing or blank value yields `None`. Nothing is
/// precomputed, so changing the storage base needs no data migration.
pub fn resolve_public_url(stored: Option<&str>, storage: &dyn StorageUrlResolver) -> Option<String> {
    let stored = stored.map(str::trim).filter(|value| !value.is_empty())?;
    if is_absolute_url(stored) {
        Some(stored.to_string())
    } else {
        Some(storage.url_for(stored))
    }
}

fn is_absolute_url(value: &str) -> bool {
    Url::parse(value).map_or(false, |url| url.has_host())
}
