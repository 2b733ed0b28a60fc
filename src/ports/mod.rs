//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the draw and an external system
//! (the filesystem holding settings and templates, the mail server).
//! Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod mailer;

pub use filesystem::FileSystem;
pub use mailer::{Letter, Mailer};
