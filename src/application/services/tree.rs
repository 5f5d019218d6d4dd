//! Tree reconstruction service
//!
//! Reads a listing document, rebuilds the hierarchy and writes the forest back out.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{ExclusionConfig, ForestSummary, Listing, NameOrder, Node, TreeBuilder};
use crate::infrastructure::traits::FileSystem;

/// Per-invocation adjustments on top of [`Settings`].
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Extra exclusion rules, added to the configured ones
    pub extra_exclusions: Vec<String>,
    /// Start from an empty rule set instead of the configured one
    pub no_default_exclusions: bool,
    /// Reject malformed listings instead of degrading to an empty/partial forest
    pub strict: bool,
}

/// Output from rebuilding one listing.
#[derive(Debug, Clone)]
pub struct TreeOutput {
    /// Root nodes, sorted
    pub forest: Vec<Node>,
    pub summary: ForestSummary,
    /// Entries decoded from the listing, before exclusion
    pub entries: usize,
    /// The source reported an incomplete listing
    pub truncated: bool,
}

impl TreeOutput {
    /// Decoded entries that did not make it into the forest (excluded or duplicate).
    pub fn dropped(&self) -> usize {
        self.entries
            .saturating_sub(self.summary.directories + self.summary.files)
    }
}

/// Service for turning listing documents into trees.
pub struct TreeService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl TreeService {
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Effective exclusion rules for one invocation.
    pub fn exclusions(&self, options: &BuildOptions) -> ExclusionConfig {
        let base = if options.no_default_exclusions {
            ExclusionConfig::none()
        } else {
            ExclusionConfig::new(self.settings.exclusions.names.iter().cloned())
        };
        base.with_names(options.extra_exclusions.iter().cloned())
    }

    pub fn builder(&self, options: &BuildOptions) -> TreeBuilder {
        TreeBuilder::new(self.exclusions(options))
            .with_order(NameOrder::from_case_sensitive(self.settings.sort.case_sensitive))
    }

    /// Read and decode a listing document.
    #[instrument(level = "debug", skip(self))]
    pub fn load_listing(&self, input: &Path, strict: bool) -> ApplicationResult<Listing> {
        if !self.fs.is_file(input) {
            return Err(ApplicationError::InputNotFound(input.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(input)
            .with_path_context("read listing", input)?;
        let value: Value =
            serde_json::from_str(&content).map_err(|source| ApplicationError::InvalidJson {
                path: input.to_path_buf(),
                source,
            })?;
        self.decode(&value, strict)
    }

    /// Decode an already parsed listing document.
    pub fn decode(&self, value: &Value, strict: bool) -> ApplicationResult<Listing> {
        let listing = if strict {
            Listing::from_value_strict(value)?
        } else {
            Listing::from_value(value)
        };
        if listing.truncated {
            warn!("listing is truncated, the tree will be incomplete");
        }
        debug!("decoded {} entries", listing.entries.len());
        Ok(listing)
    }

    /// Rebuild the tree of a decoded listing.
    pub fn build_listing(&self, listing: &Listing, options: &BuildOptions) -> TreeOutput {
        let forest = self.builder(options).build(&listing.entries);
        let summary = ForestSummary::of(&forest);
        TreeOutput {
            forest,
            summary,
            entries: listing.entries.len(),
            truncated: listing.truncated,
        }
    }

    /// Read a listing file and rebuild its tree.
    #[instrument(level = "debug", skip(self, options))]
    pub fn build(&self, input: &Path, options: &BuildOptions) -> ApplicationResult<TreeOutput> {
        let listing = self.load_listing(input, options.strict)?;
        let output = self.build_listing(&listing, options);
        info!(
            "built {} roots ({} dirs, {} files) from {} entries",
            output.summary.roots, output.summary.directories, output.summary.files, output.entries
        );
        Ok(output)
    }

    /// Serialize a forest, pretty-printed unless `pretty` is false.
    pub fn to_json(&self, forest: &[Node], pretty: bool) -> ApplicationResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(forest)
        } else {
            serde_json::to_string(forest)
        };
        json.map_err(|e| ApplicationError::OperationFailed {
            context: "serialize forest".to_string(),
            source: Box::new(e),
        })
    }

    /// Write a forest as JSON, creating parent directories as needed.
    #[instrument(level = "debug", skip(self, forest))]
    pub fn write_forest(&self, forest: &[Node], output: &Path, pretty: bool) -> ApplicationResult<()> {
        let json = self.to_json(forest, pretty)?;
        self.fs
            .ensure_parent(output)
            .with_path_context("create output directory", output)?;
        self.fs
            .write(output, &json)
            .with_path_context("write forest", output)?;
        debug!("wrote forest to {}", output.display());
        Ok(())
    }
}
