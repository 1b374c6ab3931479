//! Stimulus constants and runtime configuration defaults

// Frame geometry
/// Width and height of a rendered frame in pixels
pub const FRAME_SIZE: u32 = 500;
/// Resolution the catalog line widths were calibrated at
pub const FIGURE_DPI: f64 = 100.0;
/// Points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

// Scene layout in pattern units
/// Inset between consecutive rings of a backdrop cell
pub const RING_SPACING: f64 = 1.0;
/// Side length of one backdrop cell
pub const PATTERN_SQUARE_WIDTH: f64 = RING_SPACING * 8.0 - RING_SPACING;
/// Number of backdrop cells along each axis
pub const GRID_CELLS: usize = 3;
/// Side length of the complete scene
pub const SCENE_SIZE: f64 = PATTERN_SQUARE_WIDTH * GRID_CELLS as f64;
/// Number of nested rings per backdrop cell
pub const RINGS_PER_CELL: usize = 4;

// Distorted squares
/// Maximum signed distortion relative to the square side
pub const DISTORTION_SCALE: f64 = 0.15;
/// Number of nested distorted squares
pub const DISTORTED_SQUARE_COUNT: usize = 3;
/// Index of the square distorted in reverse mode
pub const REVERSED_SQUARE_INDEX: usize = 1;

// Hatching
/// Hatch lines per inch contributed by each repetition of a hatch symbol
pub const HATCH_LINES_PER_SYMBOL: f64 = 6.0;

// Angled tile defaults
/// Stripe spacing per ring as a fraction of the tile side
pub const TILE_OFFSETS: [f64; RINGS_PER_CELL] = [0.03, 0.05, 0.08, 0.21];
/// Stripe width of the outermost tile in points
pub const TILE_LINE_WIDTH: f64 = 8.0;
/// Stripe width increase for every smaller tile
pub const TILE_LINE_WIDTH_STEP: f64 = 1.0;
/// Density the tile offsets were calibrated for
pub const TILE_REFERENCE_DENSITY: u32 = 4;
/// Pattern angles of the angled variations
pub const PATTERN_ANGLES: [f64; 8] = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0];

// Variation defaults
/// Figure size in inches the line widths refer to
pub const DEFAULT_IMAGE_SCALE: f64 = 5.0;
/// Hatch symbol repetitions
pub const DEFAULT_DENSITY: u32 = 4;
/// Outline width of the distorted squares in points
pub const DEFAULT_PURPLE_WIDTH: f64 = 2.0;
/// Hatch line width in points
pub const DEFAULT_PATTERN_LINE_WIDTH: f64 = 1.8;

// Colours
/// Outline colour of the distorted squares
pub const PURPLE: [u8; 4] = [0x80, 0x00, 0x80, 0xff];
/// Colour of the fixation cross
pub const FIXATION_RED: [u8; 4] = [0xa1, 0x00, 0x00, 0xff];
/// Hatch and stripe colour
pub const INK: [u8; 4] = [0x00, 0x00, 0x00, 0xff];
/// Background colour
pub const PAPER: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

// Fixation marker
/// Arm length of the fixation cross in points
pub const FIXATION_SIZE: f64 = 12.25;
/// Stroke width of the fixation cross in points
pub const FIXATION_LINE_WIDTH: f64 = 2.0;

// Filesystem layout
/// Folder below the resource root holding backdrop tiles
pub const BACKGROUND_DIR: &str = "background";
/// Prefix of cached tile file names
pub const TILE_FILE_PREFIX: &str = "hatch_background";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Session defaults
/// Fixed seed for reproducible variation orders
pub const DEFAULT_SEED: u64 = 42;
/// Lower bound range of the randomized slider start
pub const SLIDER_START_MAX: f64 = 0.2;
/// Lower bound of the randomized slider end
pub const SLIDER_END_MIN: f64 = 0.8;
/// Number of distortion steps rendered by a sweep
pub const DEFAULT_SWEEP_STEPS: usize = 5;
