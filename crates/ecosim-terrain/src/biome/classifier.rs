//! Biome classifier: three decorrelated climate fields and a radial continent
//! mask reduced to one [`BiomeLabel`] per grid cell.
//!
//! All fields are sampled from a single seeded [`NoiseField`]. Decorrelation
//! comes from large, distinct coordinate offsets plus distinct base
//! frequencies; reusing one field at several frequencies alone would visibly
//! tie elevation to moisture.

use std::fmt;

use noise::{NoiseFn, ScalePoint, TranslatePoint};

use super::BiomeLabel;
use crate::noise_field::{DEFAULT_OCTAVES, FbmField, NoiseField};

/// Continent radius as a fraction of the shorter grid side.
const CONTINENT_RADIUS_FRACTION: f64 = 0.35;
/// Falloff applied to the normalized distance from the grid center.
const CONTINENT_FALLOFF: f64 = 0.8;
/// Weight of the low-frequency island field in the land-mass sum.
const ISLAND_WEIGHT: f64 = 0.3;
/// Weight of elevation in the land-mass sum.
const ELEVATION_WEIGHT: f64 = 0.2;

const OCEAN_BELOW: f64 = 0.3;
const MOUNTAIN_ELEVATION: f64 = 0.7;
const MOUNTAIN_LAND_MASS: f64 = 0.5;

/// Sampling parameters for the climate fields.
///
/// Field coordinates are `(cell + offset) * frequency` in grid units.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifierParams {
    /// fBm octaves for every field.
    pub octaves: u32,
    pub elevation_frequency: f64,
    pub elevation_offset: f64,
    pub moisture_frequency: f64,
    pub moisture_offset: f64,
    pub temperature_frequency: f64,
    pub temperature_offset: f64,
    /// Frequency of the signed island field; kept low so islands are broad.
    pub island_frequency: f64,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            octaves: DEFAULT_OCTAVES,
            elevation_frequency: 0.1,
            elevation_offset: 0.0,
            moisture_frequency: 0.08,
            moisture_offset: 1000.0,
            temperature_frequency: 0.06,
            temperature_offset: 2000.0,
            island_frequency: 0.05,
        }
    }
}

/// Per-cell climate values feeding the decision table.
///
/// `elevation`, `moisture` and `temperature` are in `[0, 1]`; `land_mass` is
/// unbounded (roughly `[-0.3, 1.5]`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClimateSample {
    pub elevation: f64,
    pub moisture: f64,
    pub temperature: f64,
    pub land_mass: f64,
}

/// Remap a signed fBm value onto `[0, 1]`.
#[inline]
fn unit(v: f64) -> f64 {
    (v + 1.0) * 0.5
}

/// One climate field: fBm sampled at `(cell + offset) * frequency`.
type ClimateField = TranslatePoint<ScalePoint<FbmField>>;

fn climate_field(source: FbmField, frequency: f64, offset: f64) -> ClimateField {
    let scaled = ScalePoint::new(source)
        .set_x_scale(frequency)
        .set_y_scale(frequency);
    TranslatePoint::new(scaled)
        .set_x_translation(offset)
        .set_y_translation(offset)
}

/// Classifier bound to one seed and one grid size.
#[derive(Clone)]
pub struct BiomeClassifier {
    seed: u64,
    params: ClassifierParams,
    elevation: ClimateField,
    moisture: ClimateField,
    temperature: ClimateField,
    island: ScalePoint<FbmField>,
    width: f64,
    height: f64,
    radius: f64,
}

impl BiomeClassifier {
    /// Create a classifier for a `width x height` cell grid.
    pub fn new(seed: u64, width: usize, height: usize, params: ClassifierParams) -> Self {
        let width = width as f64;
        let height = height as f64;
        let source = FbmField::new(NoiseField::new(seed), params.octaves);
        Self {
            seed,
            elevation: climate_field(source, params.elevation_frequency, params.elevation_offset),
            moisture: climate_field(source, params.moisture_frequency, params.moisture_offset),
            temperature: climate_field(
                source,
                params.temperature_frequency,
                params.temperature_offset,
            ),
            island: ScalePoint::new(source)
                .set_x_scale(params.island_frequency)
                .set_y_scale(params.island_frequency),
            params,
            width,
            height,
            radius: width.min(height) * CONTINENT_RADIUS_FRACTION,
        }
    }

    /// Sample the climate fields at cell `(x, y)`.
    pub fn sample(&self, x: usize, y: usize) -> ClimateSample {
        let x = x as f64;
        let y = y as f64;
        let point = [x, y];

        let dx = (x - self.width / 2.0) / self.radius;
        let dy = (y - self.height / 2.0) / self.radius;
        let dist_from_center = libm::sqrt(dx * dx + dy * dy);

        let elevation = unit(self.elevation.get(point));
        let moisture = unit(self.moisture.get(point));
        let temperature = unit(self.temperature.get(point));

        let continent_shape = (1.0 - dist_from_center * CONTINENT_FALLOFF).max(0.0);
        let island_noise = self.island.get(point) * ISLAND_WEIGHT;

        ClimateSample {
            elevation,
            moisture,
            temperature,
            land_mass: continent_shape + island_noise + elevation * ELEVATION_WEIGHT,
        }
    }

    /// Classify cell `(x, y)`.
    #[inline]
    pub fn classify(&self, x: usize, y: usize) -> BiomeLabel {
        classify_climate(&self.sample(x, y))
    }

    pub fn params(&self) -> &ClassifierParams {
        &self.params
    }
}

impl fmt::Debug for BiomeClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BiomeClassifier")
            .field("seed", &self.seed)
            .field("params", &self.params)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Decision table; the first matching rule wins.
pub fn classify_climate(s: &ClimateSample) -> BiomeLabel {
    if s.land_mass < OCEAN_BELOW {
        BiomeLabel::Ocean
    } else if s.elevation > MOUNTAIN_ELEVATION && s.land_mass > MOUNTAIN_LAND_MASS {
        BiomeLabel::Mountain
    } else if s.moisture > 0.6 && s.temperature > 0.4 {
        BiomeLabel::Forest
    } else if s.moisture < 0.3 && s.temperature > 0.6 {
        BiomeLabel::Desert
    } else if s.moisture > 0.4 && s.temperature > 0.5 {
        BiomeLabel::Savanna
    } else {
        BiomeLabel::Grassland
    }
}

/// One-shot classification of a single cell.
///
/// Prefer [`BiomeClassifier`] when classifying many cells of the same grid.
pub fn classify_cell(
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    seed: u64,
    params: &ClassifierParams,
) -> BiomeLabel {
    BiomeClassifier::new(seed, width, height, params.clone()).classify(x, y)
}
