//! repotree: rebuild a nested tree from a flat repository listing
//!
//! The core is [`domain::TreeBuilder`], a pure function from listing entries
//! and exclusion rules to a sorted forest. Everything else reads listings,
//! loads configuration and presents the result.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{build_forest, Entry, EntryKind, ExclusionConfig, Node, TreeBuilder};
