//! Three nested squares over a hatched backdrop
//!
//! The hatching makes the squares look skewed; participants move the
//! distortion slider until the squares look square again.

use crate::catalog::table::Catalog;
use crate::illusion::Illusion;
use crate::io::configuration::BACKGROUND_DIR;
use crate::io::error::Result;
use crate::pattern::cache::{CachePolicy, PatternCache};
use crate::render::compositor::{Compositor, RenderConfig, RenderedFrame};
use std::path::{Path, PathBuf};

const NAME: &str = "Three Squares Illusion";

const INSTRUCTIONS: &str = "<p>Focus your attention on <b style=\"color:red\">the red cross</b> \
in the centre of the image. Your task is to change the distort slider until all the polygons \
appear square. When they look square or when you can not find a slider position where they look \
square answer the question and press the \"Submit\" button below. Complete this task for each of \
the variations of this illusion listed below and then press \"Save Data\".</p>";

const QUESTION: &str = "Do the squares appear straight?";

/// Three squares illusion backed by a tile cache
pub struct ThreeSquaresIllusion {
    compositor: Compositor,
    background_dir: Option<PathBuf>,
}

impl ThreeSquaresIllusion {
    /// Create the illusion over a catalog
    pub fn new(catalog: Catalog, policy: CachePolicy, config: RenderConfig) -> Self {
        Self {
            compositor: Compositor::new(catalog, PatternCache::new(policy), config),
            background_dir: None,
        }
    }

    /// Create the illusion with the built-in catalog and default settings
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in catalog fails validation
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(
            Catalog::three_squares()?,
            CachePolicy::default(),
            RenderConfig::default(),
        ))
    }

    /// Underlying compositor
    pub const fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Mutable underlying compositor
    pub const fn compositor_mut(&mut self) -> &mut Compositor {
        &mut self.compositor
    }

    /// Folder tiles are persisted in once initialized
    pub fn background_dir(&self) -> Option<&Path> {
        self.background_dir.as_deref()
    }

    /// Attach `<resource_root>/background` as the tile folder
    ///
    /// # Errors
    ///
    /// Returns an error if the folder cannot be created
    pub fn attach_resources(&mut self, resource_root: &Path) -> Result<PathBuf> {
        let background = resource_root.join(BACKGROUND_DIR);
        self.compositor.cache_mut().attach_root(&background)?;
        self.background_dir = Some(background.clone());
        Ok(background)
    }

    /// Distinct `(angle, density)` tile sets the catalog needs
    pub fn pending_tile_sets(&self) -> Vec<(f64, u32)> {
        let mut sets: Vec<(f64, u32)> = Vec::new();
        for spec in self.compositor.catalog().iter() {
            for set in Compositor::tile_sets(spec) {
                if !sets.contains(&set) {
                    sets.push(set);
                }
            }
        }
        sets
    }

    /// Render one tile set ahead of time
    ///
    /// # Errors
    ///
    /// Returns an error if a tile cannot be loaded, rendered or written
    pub fn prepare_tile_set(&mut self, angle: f64, density: u32) -> Result<()> {
        self.compositor.prepare_tile_set(angle, density)
    }
}

impl Illusion for ThreeSquaresIllusion {
    fn name(&self) -> &'static str {
        NAME
    }

    fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    fn question(&self) -> &'static str {
        QUESTION
    }

    fn variation_count(&self) -> usize {
        self.compositor.catalog().count()
    }

    fn init(&mut self, resource_root: &Path) -> Result<()> {
        self.attach_resources(resource_root)?;
        for (angle, density) in self.pending_tile_sets() {
            self.prepare_tile_set(angle, density)?;
        }
        Ok(())
    }

    fn render(&mut self, variation_id: usize, distortion: f64) -> Result<RenderedFrame> {
        self.compositor.render(variation_id, distortion)
    }
}
