//! Adapter implementations of the port traits.
//!
//! - `live`: real disk and SMTP delivery
//! - `console`: dry-run delivery that prints letters
//! - `memory`: in-memory files and captured letters for tests

pub mod console;
pub mod live;
pub mod memory;
