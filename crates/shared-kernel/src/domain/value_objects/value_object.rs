// crates/shared-kernel/src/domain/value_objects/value_object.rs
use crate::errors::Result;

pub trait ValueObject: PartialEq + Clone {
    fn validate(&self) -> Result<()>;
}
