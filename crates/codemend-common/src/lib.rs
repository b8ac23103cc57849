//! Shared plumbing for codemend crates.
//!
//! Currently this is the resource loading context: an ordered set of root
//! directories searched by relative path, with an identity token used by the
//! configuration pipeline as a cache-invalidation key.

pub mod loader;

pub use loader::{LoaderId, ResourceLoader};
