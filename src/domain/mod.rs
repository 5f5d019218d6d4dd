//! Domain layer: entities and tree reconstruction
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod exclusion;
pub mod listing;
pub mod ordering;
pub mod render;

pub use arena::{TreeArena, TreeNode};
pub use builder::{build_forest, TreeBuilder};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use exclusion::{ExclusionConfig, DEFAULT_EXCLUSIONS};
pub use listing::Listing;
pub use ordering::NameOrder;
pub use render::{render_forest, TreeNodeConvert, DEFAULT_DIR_SUFFIX};
