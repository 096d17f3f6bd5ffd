// crates/shared-kernel/src/domain/value_objects/post_id.rs

use crate::domain::identifier::uuid_identifier;

uuid_identifier!(
    /// Identifiant opaque d'un post, sert aussi de clé de partition
    PostId,
    "post_id"
);
