// crates/shared-kernel/src/domain/value_objects/url.rs

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::domain::value_objects::ValueObject;
use crate::errors::{DomainError, Result};

/// URL publique et stable d'un objet dans l'object store.
/// Sert de clé d'identité pour le calcul des orphelins (`old \ new`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Url(String);

impl Url {
    /// Normalise via la crate `url` puis restreint aux schémas http(s)
    pub fn try_new(value: impl Into<String>) -> Result<Self> {
        let raw = value.into();
        let parsed = url::Url::parse(&raw).map_err(|_| invalid(format!("'{raw}' is not a URL")))?;

        let url = Self(parsed.into());
        url.validate()?;
        Ok(url)
    }

    /// Valeur déjà validée à l'écriture (DB, payload d'événement)
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn invalid(reason: String) -> DomainError {
    DomainError::Validation { field: "url", reason }
}

impl ValueObject for Url {
    fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.0).map_err(|_| invalid(format!("'{}' is not a URL", self.0)))?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(invalid(format!("scheme '{other}' is not served to clients"))),
        }
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_scheme() {
        assert!(Url::try_new("ftp://files.example.com/a.png").is_err());
        assert!(Url::try_new("not a url").is_err());
    }

    #[test]
    fn test_normalizes_through_parser() {
        let url = Url::try_new("HTTP://LocalHost:9000/posts/a.png").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/posts/a.png");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let url = Url::new_unchecked("https://objects.test/posts/a.png");

        assert_eq!(serde_json::to_string(&url).unwrap(), "\"https://objects.test/posts/a.png\"");
    }
}
