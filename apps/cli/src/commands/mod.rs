//! CLI command implementations.

mod editor;
mod projects;

pub use editor::{launch, stop};
pub use projects::{list, status};
