//! Participant session state and result persistence
//!
//! Variations are presented through selector slots in a shuffled order so
//! participants do not see them in catalog order. Results are stored per
//! variation and written as one JSON document per participant.

use crate::io::configuration::{SLIDER_END_MIN, SLIDER_START_MAX};
use crate::io::error::{Result, StimulusError, WithContext, invalid_parameter};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Judgement collected for one variation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariationResult {
    /// Catalog identifier of the variation
    #[serde(rename = "variationID")]
    pub variation_id: usize,
    /// Selector slot the variation was shown under
    #[serde(rename = "selectorID")]
    pub selector_id: usize,
    /// Whether the participant submitted a judgement
    pub submitted: bool,
    /// Slider value at submission
    pub distortion: Option<f64>,
    /// Whether the participant saw the illusion inverted
    pub inverted: bool,
}

/// One scripted participant judgement, as read from a responses file
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Selector slot the judgement is given under
    pub selector: usize,
    /// Slider value at submission
    pub distortion: f64,
    /// Whether the illusion was seen inverted
    #[serde(default)]
    pub inverted: bool,
}

/// Randomized bounds and start value of the distortion slider
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderRange {
    /// Lowest selectable value
    pub start: f64,
    /// Highest selectable value
    pub end: f64,
    /// Initial slider position
    pub value: f64,
}

impl SliderRange {
    /// Draw new bounds so earlier slider positions cannot be remembered
    pub fn randomized(rng: &mut impl Rng) -> Self {
        let start = rng.random_range(0.0..SLIDER_START_MAX);
        let end = rng.random_range(SLIDER_END_MIN..1.0);
        let value = rng.random_range(start..end);
        Self { start, end, value }
    }

    /// Whether `value` lies within the bounds
    pub fn contains(&self, value: f64) -> bool {
        (self.start..=self.end).contains(&value)
    }
}

/// One participant working through all variations
#[derive(Debug)]
pub struct Session {
    participant_id: String,
    permutation: Vec<usize>,
    inverse: Vec<usize>,
    results: Vec<VariationResult>,
    active_selector: usize,
    slider: SliderRange,
    rng: StdRng,
}

impl Session {
    /// Start a session over `variation_count` variations
    ///
    /// With `randomize` the selector order is shuffled from `seed`; otherwise
    /// selector `i` shows variation `i`.
    ///
    /// # Errors
    ///
    /// Returns an error if `variation_count` is zero
    pub fn new(variation_count: usize, seed: u64, randomize: bool) -> Result<Self> {
        if variation_count == 0 {
            return Err(invalid_parameter(
                "variation_count",
                &variation_count,
                &"a session needs at least one variation",
            ));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut permutation: Vec<usize> = (0..variation_count).collect();
        if randomize {
            permutation.shuffle(&mut rng);
        }

        let mut inverse = vec![0; variation_count];
        for (selector, &variation) in permutation.iter().enumerate() {
            if let Some(slot) = inverse.get_mut(variation) {
                *slot = selector;
            }
        }

        let results = (0..variation_count)
            .map(|variation_id| VariationResult {
                variation_id,
                selector_id: inverse.get(variation_id).copied().unwrap_or(variation_id),
                submitted: false,
                distortion: None,
                inverted: false,
            })
            .collect();

        let participant_id = format!("{:032x}", rand::rng().random::<u128>());
        let slider = SliderRange::randomized(&mut rng);

        Ok(Self {
            participant_id,
            permutation,
            inverse,
            results,
            active_selector: 0,
            slider,
            rng,
        })
    }

    /// Random participant identifier
    pub fn participant_id(&self) -> &str {
        &self.participant_id
    }

    /// Number of variations in the session
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the session holds no variations
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Variation shown under a selector slot
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the selector does not exist
    pub fn variation_for(&self, selector: usize) -> Result<usize> {
        self.permutation
            .get(selector)
            .copied()
            .ok_or(StimulusError::NotFound {
                variation_id: selector,
                count: self.permutation.len(),
            })
    }

    /// Selector slot a variation is shown under
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the variation does not exist
    pub fn selector_for(&self, variation_id: usize) -> Result<usize> {
        self.inverse
            .get(variation_id)
            .copied()
            .ok_or(StimulusError::NotFound {
                variation_id,
                count: self.inverse.len(),
            })
    }

    /// Currently selected slot
    pub const fn active_selector(&self) -> usize {
        self.active_selector
    }

    /// Current slider bounds and position
    pub const fn slider(&self) -> SliderRange {
        self.slider
    }

    /// Switch to another selector slot and redraw the slider bounds
    ///
    /// Returns the variation to render.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the selector does not exist
    pub fn select(&mut self, selector: usize) -> Result<usize> {
        let variation = self.variation_for(selector)?;
        self.active_selector = selector;
        self.slider = SliderRange::randomized(&mut self.rng);
        Ok(variation)
    }

    /// Record a judgement for the variation under `selector`
    ///
    /// Submitting again overwrites the previous judgement.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector does not exist or `distortion` is
    /// outside `[0, 1]`
    pub fn submit(&mut self, selector: usize, distortion: f64, inverted: bool) -> Result<()> {
        if !(0.0..=1.0).contains(&distortion) {
            return Err(invalid_parameter(
                "distortion",
                &distortion,
                &"must lie within [0, 1]",
            ));
        }
        let variation = self.variation_for(selector)?;
        let count = self.results.len();
        let result = self
            .results
            .get_mut(variation)
            .ok_or(StimulusError::NotFound {
                variation_id: variation,
                count,
            })?;
        result.submitted = true;
        result.distortion = Some(distortion);
        result.inverted = inverted;
        Ok(())
    }

    /// Whether the variation under `selector` has been submitted
    pub fn is_submitted(&self, selector: usize) -> bool {
        self.variation_for(selector)
            .ok()
            .and_then(|variation| self.results.get(variation))
            .is_some_and(|result| result.submitted)
    }

    /// Whether every variation has been submitted
    pub fn is_complete(&self) -> bool {
        self.results.iter().all(|result| result.submitted)
    }

    /// Results in variation order
    pub fn results(&self) -> &[VariationResult] {
        &self.results
    }

    /// Select and submit each response in order
    ///
    /// # Errors
    ///
    /// Returns the first selection or submission error
    pub fn replay(&mut self, responses: &[Response]) -> Result<()> {
        for response in responses {
            self.select(response.selector)?;
            self.submit(response.selector, response.distortion, response.inverted)?;
        }
        Ok(())
    }

    /// Write `<results_dir>/<participant_id>.json`
    ///
    /// # Errors
    ///
    /// Returns an error if the session is incomplete or the file cannot be
    /// written
    pub fn save(&self, results_dir: &Path) -> Result<PathBuf> {
        if !self.is_complete() {
            let pending = self.results.iter().filter(|r| !r.submitted).count();
            return Err(invalid_parameter(
                "session",
                &self.participant_id,
                &format!("{pending} variations have not been submitted"),
            ));
        }

        std::fs::create_dir_all(results_dir)
            .with_path(results_dir)
            .with_operation("create directory")?;

        let path = results_dir.join(format!("{}.json", self.participant_id));
        let file = File::create(&path)
            .with_path(&path)
            .with_operation("create file")?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &self.results).with_path(&path)?;
        writer
            .flush()
            .with_path(&path)
            .with_operation("flush file")?;
        Ok(path)
    }
}

/// Read a saved participant record
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed
pub fn load_results(path: &Path) -> Result<Vec<VariationResult>> {
    let file = File::open(path)
        .with_path(path)
        .with_operation("open file")?;
    serde_json::from_reader(BufReader::new(file)).with_path(path)
}

/// Read a scripted list of responses
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed
pub fn load_responses(path: &Path) -> Result<Vec<Response>> {
    let file = File::open(path)
        .with_path(path)
        .with_operation("open file")?;
    serde_json::from_reader(BufReader::new(file)).with_path(path)
}
