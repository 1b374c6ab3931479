//! Variation catalog built once from defaults and per-entry overrides

use crate::catalog::variation::{Hatch, VariationDefaults, VariationOverride, VariationSpec};
use crate::io::configuration::PATTERN_ANGLES;
use crate::io::error::{Result, StimulusError, invalid_parameter};
use std::collections::BTreeMap;

/// Immutable lookup table from variation identifier to rendering parameters
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    specs: Vec<VariationSpec>,
}

impl Catalog {
    /// Resolve a variation identifier
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `variation_id` is outside `[0, count)`
    pub fn resolve(&self, variation_id: usize) -> Result<&VariationSpec> {
        self.specs
            .get(variation_id)
            .ok_or(StimulusError::NotFound {
                variation_id,
                count: self.specs.len(),
            })
    }

    /// Number of catalog entries
    pub fn count(&self) -> usize {
        self.specs.len()
    }

    /// Iterate over all entries in identifier order
    pub fn iter(&self) -> impl Iterator<Item = &VariationSpec> {
        self.specs.iter()
    }

    /// Catalog of the three squares illusion
    ///
    /// Four plain hatch variants followed by one tiled variant per entry of
    /// [`PATTERN_ANGLES`].
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in entries fail validation
    pub fn three_squares() -> Result<Self> {
        let mut builder = CatalogBuilder::new(VariationDefaults::default())
            .variation(VariationOverride::new(0))
            .variation(VariationOverride::new(1).with_hatches(Hatch::Backward, Hatch::Forward))
            .variation(VariationOverride::new(2).with_density(2))
            .variation(
                VariationOverride::new(3).with_hatches(Hatch::Vertical, Hatch::Horizontal),
            );

        for (offset, angle) in PATTERN_ANGLES.iter().enumerate() {
            builder =
                builder.variation(VariationOverride::new(4 + offset).with_pattern_angle(*angle));
        }

        builder.build()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntryKind {
    Declare,
    Amend,
}

/// Accumulates overrides and produces a validated [`Catalog`]
#[derive(Clone, Debug)]
pub struct CatalogBuilder {
    defaults: VariationDefaults,
    entries: Vec<(EntryKind, VariationOverride)>,
}

impl CatalogBuilder {
    /// Start a catalog from the given defaults
    pub const fn new(defaults: VariationDefaults) -> Self {
        Self {
            defaults,
            entries: Vec::new(),
        }
    }

    /// Declare a catalog entry
    #[must_use]
    pub fn variation(mut self, entry: VariationOverride) -> Self {
        self.entries.push((EntryKind::Declare, entry));
        self
    }

    /// Override fields of an entry declared earlier
    #[must_use]
    pub fn amend(mut self, entry: VariationOverride) -> Self {
        self.entries.push((EntryKind::Amend, entry));
        self
    }

    /// Resolve every entry against the defaults
    ///
    /// Overrides are applied in insertion order, so a later override of the
    /// same field replaces an earlier one and unset fields keep their value.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - an identifier is declared twice
    /// - an amendment targets an identifier that was not declared before it
    /// - identifiers do not form the contiguous range `[0, count)`
    /// - a resolved entry fails [`VariationSpec::validate`]
    pub fn build(self) -> Result<Catalog> {
        let mut resolved: BTreeMap<usize, VariationSpec> = BTreeMap::new();

        for (kind, entry) in &self.entries {
            match kind {
                EntryKind::Declare => {
                    if resolved.contains_key(&entry.id) {
                        return Err(invalid_parameter(
                            "id",
                            &entry.id,
                            &"duplicate catalog identifier",
                        ));
                    }
                    let mut spec = self.defaults.spec(entry.id);
                    entry.apply_to(&mut spec);
                    resolved.insert(entry.id, spec);
                }
                EntryKind::Amend => {
                    let count = resolved.len();
                    let spec = resolved.get_mut(&entry.id).ok_or(StimulusError::NotFound {
                        variation_id: entry.id,
                        count,
                    })?;
                    entry.apply_to(spec);
                }
            }
        }

        let mut specs = Vec::with_capacity(resolved.len());
        for (expected, (id, spec)) in resolved.into_iter().enumerate() {
            if id != expected {
                return Err(invalid_parameter(
                    "id",
                    &id,
                    &format!("identifiers must be contiguous, expected {expected}"),
                ));
            }
            spec.validate()?;
            specs.push(spec);
        }

        Ok(Catalog { specs })
    }
}
