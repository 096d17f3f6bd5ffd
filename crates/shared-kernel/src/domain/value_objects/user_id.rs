// crates/shared-kernel/src/domain/value_objects/user_id.rs

use crate::domain::identifier::uuid_identifier;

uuid_identifier!(
    /// Identité de l'auteur, extraite des claims par la couche transport
    UserId,
    "user_id"
);
