//! Public disk URL resolver

use tm_core::services::StorageUrlResolver;
use url::Url;

/// Resolves stored paths against the public storage origin
/// (e.g. `http://localhost:8080/storage`)
#[derive(Debug, Clone)]
pub struct PublicStorage {
    base_url: Url,
}

impl PublicStorage {
    /// # Errors
    /// Returns the parse error when `base_url` is not an absolute URL
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
        }
        Ok(Self { base_url })
    }
}

impl StorageUrlResolver for PublicStorage {
    fn url_for(&self, path: &str) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|segment| !segment.is_empty()));
        }
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joins_path_under_base() {
        let storage = PublicStorage::new("http://localhost:8080/storage/").unwrap();
        assert_eq!(
            storage.url_for("/profile_photos/ana.jpg"),
            "http://localhost:8080/storage/profile_photos/ana.jpg"
        );
    }

    #[test]
    fn test_encodes_segments() {
        let storage = PublicStorage::new("https://cdn.example.com/storage").unwrap();
        assert_eq!(
            storage.url_for("fotos/mi foto.png"),
            "https://cdn.example.com/storage/fotos/mi%20foto.png"
        );
    }

    #[test]
    fn test_rejects_relative_base() {
        assert!(PublicStorage::new("storage").is_err());
    }
}
