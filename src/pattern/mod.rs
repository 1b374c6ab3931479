//! Backdrop pattern generation and caching
//!
//! This module contains:
//! - Striped tile generation for the angled variations
//! - The tile cache shared by all render calls

/// Tile cache keyed by rendering parameters
pub mod cache;
/// Striped tile generation
pub mod tiles;

pub use cache::{CachePolicy, PatternCache, TileKey};
pub use tiles::{PatternTile, TileSpec, generate};
