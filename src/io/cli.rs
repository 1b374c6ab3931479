//! Command-line interface for rendering stimuli, preparing assets and replaying sessions

use crate::catalog::table::Catalog;
use crate::illusion::{Illusion, ThreeSquaresIllusion};
use crate::io::configuration::{DEFAULT_SEED, DEFAULT_SWEEP_STEPS};
use crate::io::error::{Result, invalid_parameter};
use crate::io::progress::ProgressManager;
use crate::io::session::{Session, load_responses};
use crate::pattern::cache::CachePolicy;
use crate::render::compositor::RenderConfig;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "illusionlab")]
#[command(
    author,
    version,
    about = "Render parameterized three squares illusion stimuli"
)]
/// Command-line arguments for the stimulus tool
pub struct Cli {
    /// Action to perform
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Subcommands of the stimulus tool
#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Print the variation catalog
    List,

    /// Pre-render every backdrop tile into the asset folder
    Init {
        /// Resource root; tiles go to `<ASSETS>/background`
        #[arg(short, long, value_name = "ASSETS")]
        assets: PathBuf,

        /// Render tiles again even if they exist
        #[arg(short, long)]
        force: bool,
    },

    /// Render one variation at one distortion
    Render {
        /// Resource root; tiles go to `<ASSETS>/background`
        #[arg(short, long, value_name = "ASSETS")]
        assets: PathBuf,

        /// Catalog identifier of the variation
        #[arg(short, long, default_value_t = 0)]
        variation: usize,

        /// Normalized distortion in [0, 1]; 0.5 draws true squares
        #[arg(short, long, default_value_t = 0.5)]
        distortion: f64,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// Render tiles again even if they exist
        #[arg(short, long)]
        force: bool,
    },

    /// Render every variation at evenly spaced distortions
    Sweep {
        /// Resource root; tiles go to `<ASSETS>/background`
        #[arg(short, long, value_name = "ASSETS")]
        assets: PathBuf,

        /// Output directory for the frames
        #[arg(short, long)]
        output: PathBuf,

        /// Number of distortion values per variation
        #[arg(short, long, default_value_t = DEFAULT_SWEEP_STEPS)]
        steps: usize,

        /// Render frames even if the output exists
        #[arg(short, long)]
        no_skip: bool,
    },

    /// Replay scripted responses through a participant session
    Session {
        /// Seed of the selector order
        #[arg(short = 's', long, default_value_t = DEFAULT_SEED)]
        variations_seed: u64,

        /// Directory the participant record is written to
        #[arg(short, long)]
        results: PathBuf,

        /// JSON list of `{selector, distortion, inverted}` responses
        #[arg(long)]
        responses: PathBuf,

        /// Show variations in catalog order instead of shuffling
        #[arg(long)]
        ordered: bool,
    },
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Distortion values of a sweep, evenly spaced over `[0, 1]`
///
/// A single step renders the undistorted midpoint.
///
/// # Errors
///
/// Returns an error if `steps` is zero
pub fn sweep_distortions(steps: usize) -> Result<Vec<f64>> {
    match steps {
        0 => Err(invalid_parameter("steps", &steps, &"must be positive")),
        1 => Ok(vec![0.5]),
        _ => {
            let last = (steps - 1) as f64;
            Ok((0..steps).map(|step| step as f64 / last).collect())
        }
    }
}

/// File name of a sweep frame
pub fn sweep_file_name(variation_id: usize, distortion: f64) -> String {
    format!("variation_{variation_id:02}_d{distortion:.3}.png")
}

/// Executes a parsed command line with optional progress display
pub struct CommandRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl CommandRunner {
    /// Create a new runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Run the selected subcommand
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog, rendering, asset storage or session
    /// handling fails
    pub fn run(&mut self) -> Result<()> {
        match self.cli.command.clone() {
            Command::List => Self::list(),
            Command::Init { assets, force } => self.init(&assets, force),
            Command::Render {
                assets,
                variation,
                distortion,
                output,
                force,
            } => self.render(&assets, variation, distortion, &output, force),
            Command::Sweep {
                assets,
                output,
                steps,
                no_skip,
            } => self.sweep(&assets, &output, steps, no_skip),
            Command::Session {
                variations_seed,
                results,
                responses,
                ordered,
            } => self.session(variations_seed, &results, &responses, ordered),
        }
    }

    // Catalog listing is the command's output
    #[allow(clippy::print_stdout)]
    fn list() -> Result<()> {
        let catalog = Catalog::three_squares()?;
        println!("{:>3}  {:>6}  hatches  density", "id", "angle");
        for spec in catalog.iter() {
            let angle = spec
                .pattern_angle
                .map_or_else(|| "-".to_string(), |angle| format!("{angle}"));
            println!(
                "{:>3}  {angle:>6}  {}{}       {:>7}",
                spec.id, spec.hatch_primary, spec.hatch_secondary, spec.density
            );
        }
        Ok(())
    }

    fn illusion(assets: &Path, force: bool) -> Result<ThreeSquaresIllusion> {
        let policy = CachePolicy {
            force_regenerate: force,
            generate_on_miss: true,
        };
        let mut illusion =
            ThreeSquaresIllusion::new(Catalog::three_squares()?, policy, RenderConfig::default());
        illusion.attach_resources(assets)?;
        Ok(illusion)
    }

    // Allow print for user feedback on where tiles were written
    #[allow(clippy::print_stderr)]
    fn init(&mut self, assets: &Path, force: bool) -> Result<()> {
        let mut illusion = Self::illusion(assets, force)?;
        let tile_sets = illusion.pending_tile_sets();

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(tile_sets.len(), "Tile sets");
        }

        for (index, &(angle, density)) in tile_sets.iter().enumerate() {
            if let Some(ref mut pm) = self.progress_manager {
                pm.start_job(index, &format!("angle {angle} density {density}"), 1);
            }
            illusion.prepare_tile_set(angle, density)?;
            if let Some(ref mut pm) = self.progress_manager {
                pm.complete_job(index);
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish("tiles ready");
        }

        if !self.cli.quiet {
            let stats = illusion.compositor().cache().stats;
            let folder = illusion.background_dir().unwrap_or(assets);
            eprintln!(
                "{} tile sets in {} ({} generated, {} reused)",
                tile_sets.len(),
                folder.display(),
                stats.generated,
                stats.loaded
            );
        }
        Ok(())
    }

    // Allow print for user feedback on the written frame
    #[allow(clippy::print_stderr)]
    fn render(
        &self,
        assets: &Path,
        variation: usize,
        distortion: f64,
        output: &Path,
        force: bool,
    ) -> Result<()> {
        let mut illusion = Self::illusion(assets, force)?;
        let frame = illusion.render(variation, distortion)?;
        frame.save(output)?;

        if !self.cli.quiet {
            let angle = frame.rhombus_angle().unwrap_or(90.0);
            eprintln!(
                "{}: variation {variation} at {distortion:.3} (outer angle {angle:.2}°) -> {}",
                illusion.name(),
                output.display()
            );
        }
        Ok(())
    }

    fn sweep(&mut self, assets: &Path, output: &Path, steps: usize, no_skip: bool) -> Result<()> {
        let distortions = sweep_distortions(steps)?;
        let mut illusion = Self::illusion(assets, false)?;
        let count = illusion.variation_count();

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(count, "Variations");
        }

        for variation in 0..count {
            if let Some(ref mut pm) = self.progress_manager {
                pm.start_job(variation, &format!("variation {variation}"), distortions.len());
            }

            for (step, &distortion) in distortions.iter().enumerate() {
                let path = output.join(sweep_file_name(variation, distortion));
                if self.should_render(&path, no_skip) {
                    illusion.render(variation, distortion)?.save(&path)?;
                }
                if let Some(ref mut pm) = self.progress_manager {
                    pm.update_step(variation, step + 1);
                }
            }

            if let Some(ref mut pm) = self.progress_manager {
                pm.complete_job(variation);
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish("sweep complete");
        }
        Ok(())
    }

    fn should_render(&self, output_path: &Path, no_skip: bool) -> bool {
        if no_skip {
            return true;
        }

        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", output_path.display());
            }
            false
        } else {
            true
        }
    }

    // Allow print for user feedback on the saved record
    #[allow(clippy::print_stderr)]
    fn session(&self, seed: u64, results: &Path, responses: &Path, ordered: bool) -> Result<()> {
        let catalog = Catalog::three_squares()?;
        let mut session = Session::new(catalog.count(), seed, !ordered)?;
        session.replay(&load_responses(responses)?)?;
        let path = session.save(results)?;

        if !self.cli.quiet {
            eprintln!(
                "Saved {} results for participant {} to {}",
                session.len(),
                session.participant_id(),
                path.display()
            );
        }
        Ok(())
    }
}
