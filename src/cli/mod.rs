//! CLI command handlers.
//!
//! Testable handlers invoked by main.rs; each implements the business logic
//! for one subcommand.

mod listen;

pub use listen::{run_listen, ListenOptions};
