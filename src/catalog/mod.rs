//! Stimulus variation catalog
//!
//! This module contains:
//! - Hatch orientation symbols and per-variation rendering parameters
//! - The immutable catalog resolving variation identifiers to parameters

/// Catalog construction and lookup
pub mod table;
/// Variation parameters, defaults and overrides
pub mod variation;

pub use table::{Catalog, CatalogBuilder};
pub use variation::{Hatch, VariationDefaults, VariationOverride, VariationSpec};
