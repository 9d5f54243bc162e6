//! Editor version keys and the revisions they pin.

use crate::error::{CoreError, Result};

/// A version key pinned to one immutable editor revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revision {
    /// Short version key accepted on the command line (e.g. "2018.2").
    pub key: &'static str,
    /// Revision identifier handed to the downloader.
    pub id: &'static str,
}

/// Every editor version this driver knows how to fetch.
pub static REVISIONS: &[Revision] = &[Revision {
    key: "2018.2",
    id: "71b5c3cc60ff7b9f9c4b6d4e4f3ea9c0f1f1d86b",
}];

/// Iterator over the accepted version keys.
pub fn keys() -> impl Iterator<Item = &'static str> {
    REVISIONS.iter().map(|r| r.key)
}

/// Look up the revision pinned to `key`.
pub fn resolve(key: &str) -> Result<&'static Revision> {
    REVISIONS
        .iter()
        .find(|r| r.key == key)
        .ok_or_else(|| CoreError::UnknownVersion {
            key: key.to_string(),
            expected: keys().collect::<Vec<_>>().join(", "),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_2018_2_to_pinned_revision() {
        let rev = resolve("2018.2").unwrap();
        assert_eq!(rev.key, "2018.2");
        assert_eq!(rev.id, "71b5c3cc60ff7b9f9c4b6d4e4f3ea9c0f1f1d86b");
    }

    #[test]
    fn rejects_unknown_key() {
        let err = resolve("2019.1").unwrap_err();
        assert!(matches!(err, CoreError::UnknownVersion { ref key, .. } if key == "2019.1"));
        assert!(err.to_string().contains("2018.2"));
    }

    #[test]
    fn keys_are_unique() {
        let mut all: Vec<_> = keys().collect();
        let total = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), total);
    }
}
