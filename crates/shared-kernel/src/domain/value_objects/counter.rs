// crates/shared_kernel/src/domain/value_objects/counter.rs

use crate::domain::value_objects::ValueObject;
use crate::errors::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Compteur monotone (likes, reposts, commentaires).
/// Muté ailleurs, ce sous-système ne fait que le transporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Counter(u64);

impl Counter {
    pub fn zero() -> Self {
        Self(0)
    }

    /// Pour la reconstruction depuis la DB
    pub fn from_raw(val: u64) -> Self {
        Self(val)
    }

    /// Incrément saturant : on préfère plafonner au Max plutôt que paniquer
    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl ValueObject for Counter {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Postgres stocke les compteurs en BIGINT signé
impl TryFrom<i64> for Counter {
    type Error = DomainError;

    fn try_from(val: i64) -> Result<Self> {
        u64::try_from(val)
            .map(Self)
            .map_err(|_| DomainError::Validation {
                field: "counter",
                reason: format!("Counter cannot be negative: {}", val),
            })
    }
}

impl From<Counter> for u64 {
    fn from(counter: Counter) -> Self {
        counter.0
    }
}

impl From<Counter> for i64 {
    fn from(counter: Counter) -> Self {
        i64::try_from(counter.0).unwrap_or(i64::MAX)
    }
}
