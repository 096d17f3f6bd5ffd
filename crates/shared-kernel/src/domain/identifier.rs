// crates/shared-kernel/src/domain/identifier.rs

use uuid::Uuid;

/// Identifiant d'agrégat adossé à un UUID.
pub trait Identifier: serde::Serialize + for<'de> serde::Deserialize<'de> + Copy + Send + Sync + Eq {
    fn as_uuid(&self) -> Uuid;
    fn from_uuid(uuid: Uuid) -> Self;
}

/// Newtype UUID v7 : génération triée dans le temps, parsing validé, Display brut.
macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $crate::domain::Identifier for $name {
            fn as_uuid(&self) -> uuid::Uuid {
                self.0
            }

            fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }
        }

        impl $crate::domain::value_objects::ValueObject for $name {
            fn validate(&self) -> $crate::errors::Result<()> {
                if self.0.is_nil() {
                    return Err($crate::errors::DomainError::Validation {
                        field: $field,
                        reason: "identifier cannot be nil".to_string(),
                    });
                }
                Ok(())
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::errors::DomainError;

            fn from_str(s: &str) -> $crate::errors::Result<Self> {
                let uuid = uuid::Uuid::parse_str(s.trim()).map_err(|_| {
                    $crate::errors::DomainError::Validation {
                        field: $field,
                        reason: format!("'{s}' is not a valid UUID"),
                    }
                })?;
                let id = Self(uuid);
                $crate::domain::value_objects::ValueObject::validate(&id)?;
                Ok(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

pub(crate) use uuid_identifier;
