//! Process-wide store of rendered backdrop tiles with optional disk persistence
//!
//! Lookups go memory, then disk, then generation. Files are named after
//! their rendering parameters so later runs pick up earlier renders.

use crate::io::configuration::TILE_FILE_PREFIX;
use crate::io::error::{Result, StimulusError};
use crate::io::image::{load_png, save_png};
use crate::pattern::tiles::{TileSpec, render_tile};
use image::RgbaImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Identifies a cached tile by the parameters it was rendered from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKey {
    angle_millidegrees: i64,
    ring: usize,
    density: u32,
    spacing_micros: i64,
    size_px: u32,
}

impl TileKey {
    /// Key for the tile `spec` of the set drawn at `angle` degrees
    pub fn new(angle: f64, density: u32, spec: &TileSpec) -> Self {
        Self {
            angle_millidegrees: (angle * 1000.0).round() as i64,
            ring: spec.ring,
            density,
            spacing_micros: (spec.spacing * 1_000_000.0).round() as i64,
            size_px: spec.size_px,
        }
    }

    /// Tile set angle in degrees
    pub fn angle(&self) -> f64 {
        self.angle_millidegrees as f64 / 1000.0
    }

    /// Zero-based ring index
    pub const fn ring(&self) -> usize {
        self.ring
    }

    /// Hatch density the tile was rendered for
    pub const fn density(&self) -> u32 {
        self.density
    }

    /// Stripe spacing as a fraction of the tile side
    pub fn spacing(&self) -> f64 {
        self.spacing_micros as f64 / 1_000_000.0
    }

    /// Raster side length in pixels
    pub const fn size_px(&self) -> u32 {
        self.size_px
    }

    /// File name of the persisted tile (ring numbered from one)
    pub fn file_name(&self) -> String {
        format!(
            "{TILE_FILE_PREFIX}_{}_{}_d{}_s{}_{}px.png",
            self.ring + 1,
            self.angle(),
            self.density,
            self.spacing(),
            self.size_px
        )
    }
}

/// How the cache reacts to lookups
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CachePolicy {
    /// Render again on every lookup, overwriting memory and disk
    pub force_regenerate: bool,
    /// Render tiles found neither in memory nor on disk
    pub generate_on_miss: bool,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            force_regenerate: false,
            generate_on_miss: true,
        }
    }
}

/// Lookup counters
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Served from memory
    pub hits: usize,
    /// Not served from memory
    pub misses: usize,
    /// Read back from disk
    pub loaded: usize,
    /// Freshly rendered
    pub generated: usize,
}

/// Tile store keyed by rendering parameters
#[derive(Default)]
pub struct PatternCache {
    root: Option<PathBuf>,
    tiles: HashMap<TileKey, RgbaImage>,
    policy: CachePolicy,

    /// Cache performance statistics
    pub stats: CacheStats,
}

impl PatternCache {
    /// Create an in-memory cache
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Create a cache persisting tiles below `root`
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created
    pub fn with_root(root: &Path, policy: CachePolicy) -> Result<Self> {
        let mut cache = Self::new(policy);
        cache.attach_root(root)?;
        Ok(cache)
    }

    /// Persist tiles below `root` from now on
    ///
    /// Attaching the same directory again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created
    pub fn attach_root(&mut self, root: &Path) -> Result<()> {
        std::fs::create_dir_all(root).map_err(|e| StimulusError::FileSystem {
            path: root.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
        self.root = Some(root.to_path_buf());
        Ok(())
    }

    /// Directory tiles are persisted in, if any
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Active lookup policy
    pub const fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Replace the lookup policy
    pub const fn set_policy(&mut self, policy: CachePolicy) {
        self.policy = policy;
    }

    /// Location a tile is persisted at
    pub fn tile_path(&self, key: &TileKey) -> Option<PathBuf> {
        self.root.as_ref().map(|root| root.join(key.file_name()))
    }

    /// Whether a tile is held in memory
    pub fn contains(&self, key: &TileKey) -> bool {
        self.tiles.contains_key(key)
    }

    /// Tile held in memory
    pub fn get(&self, key: &TileKey) -> Option<&RgbaImage> {
        self.tiles.get(key)
    }

    /// Number of tiles held in memory
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no tile is held in memory
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Drop every tile held in memory; files on disk are kept
    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    /// Retrieve a tile, loading or rendering it when necessary
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the tile is absent and generation on miss is disabled (`MissingAsset`)
    /// - a persisted tile cannot be read
    /// - a rendered tile cannot be written
    pub fn get_or_generate(&mut self, key: TileKey, spec: &TileSpec) -> Result<&RgbaImage> {
        use std::collections::hash_map::Entry;

        if self.policy.force_regenerate {
            self.stats.misses += 1;
            let image = self.generate(&key, spec)?;
            return Ok(match self.tiles.entry(key) {
                Entry::Occupied(mut entry) => {
                    entry.insert(image);
                    entry.into_mut()
                }
                Entry::Vacant(entry) => entry.insert(image),
            });
        }

        if self.tiles.contains_key(&key) {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
            let image = self.load_or_generate(&key, spec)?;
            self.tiles.insert(key, image);
        }

        self.tiles.get(&key).ok_or_else(|| StimulusError::MissingAsset {
            path: self.describe(&key),
        })
    }

    fn load_or_generate(&mut self, key: &TileKey, spec: &TileSpec) -> Result<RgbaImage> {
        if let Some(path) = self.tile_path(key)
            && path.is_file()
        {
            let image = load_png(&path)?;
            self.stats.loaded += 1;
            return Ok(image);
        }

        if !self.policy.generate_on_miss {
            return Err(StimulusError::MissingAsset {
                path: self.describe(key),
            });
        }

        self.generate(key, spec)
    }

    fn generate(&mut self, key: &TileKey, spec: &TileSpec) -> Result<RgbaImage> {
        let image = render_tile(spec)?;
        if let Some(path) = self.tile_path(key) {
            save_png(&image, &path)?;
        }
        self.stats.generated += 1;
        Ok(image)
    }

    fn describe(&self, key: &TileKey) -> PathBuf {
        self.tile_path(key)
            .unwrap_or_else(|| PathBuf::from(key.file_name()))
    }
}
