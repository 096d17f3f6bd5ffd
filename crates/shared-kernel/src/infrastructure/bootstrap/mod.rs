// crates/shared-kernel/src/infrastructure/bootstrap/mod.rs

mod shutdown;

pub use shutdown::cancel_on_ctrl_c;
