//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod action;
mod activity;
mod encounters;
mod verify;

pub use action::Action;
pub use activity::Activity;
pub use encounters::Encounters;
pub use verify::Verify;
