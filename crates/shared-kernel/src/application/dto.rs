// crates/shared-kernel/src/application/dto.rs

/// Projection d'un objet de Domaine vers sa vue sérialisable (réponse, cache).
pub trait ToDto<D> {
    fn to_dto(&self) -> D;
}
