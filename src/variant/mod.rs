//! Environment-variant file detection and materialization.
//!
//! Variant files carry an environment tag in their name
//! (`<base>.<envTag>.<ext>`, e.g. `config.staging.json`). For the active
//! environment, each matching file is copied over its canonical untagged
//! sibling (`config.json`), with content-aware writes so an unchanged tree
//! produces zero writes.

pub mod matcher;
pub mod router;
pub mod walker;

pub use matcher::{canonical_name, is_variant};
pub use router::DirectCopyRouter;
pub use walker::{walk, SkippedEntry, WalkReport};
