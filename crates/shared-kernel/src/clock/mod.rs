// crates/shared-kernel/src/clock/mod.rs

mod system;

use chrono::{DateTime, Utc};

pub use system::SystemClock;

/// Source de temps injectable (les tests figent l'horloge).
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Horloge figée pour les tests déterministes
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
