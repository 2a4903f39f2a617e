//! Hash-based value noise with fractal Brownian motion (fBm) synthesis.
//!
//! Every sample is a pure function of `(seed, coordinate)`: lattice values come
//! from an integer hash, so there are no permutation tables or hidden state and
//! two fields built from the same seed agree bit-for-bit.

use noise::NoiseFn;

/// Octave count used when callers do not pick one.
pub const DEFAULT_OCTAVES: u32 = 4;

const MIX_X: u64 = 0x9E37_79B9_7F4A_7C15;
const MIX_Y: u64 = 0xBF58_476D_1CE4_E5B9;
const MIX_FINAL: u64 = 0x94D0_49BB_1331_11EB;

/// Hash an integer lattice point into `[0, 1)`.
///
/// SplitMix64-style finalizer over the seed and both coordinates. The top 53
/// bits of the mixed word become the mantissa, so every output is exactly
/// representable and strictly below 1.
#[inline]
pub fn lattice_hash(ix: i64, iy: i64, seed: u64) -> f64 {
    let mut v = seed ^ (ix as u64).wrapping_mul(MIX_X) ^ (iy as u64).wrapping_mul(MIX_Y);
    v ^= v >> 30;
    v = v.wrapping_mul(MIX_Y);
    v ^= v >> 27;
    v = v.wrapping_mul(MIX_FINAL);
    v ^= v >> 31;
    (v >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
}

/// Cubic Hermite easing `3t² − 2t³`.
#[inline]
fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Seeded 2D value-noise field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoiseField {
    seed: u64,
}

impl NoiseField {
    /// Create a field for the given seed.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// The seed this field was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Lattice hash in `[0, 1)` at integer coordinates.
    #[inline]
    pub fn hash(&self, ix: i64, iy: i64) -> f64 {
        lattice_hash(ix, iy, self.seed)
    }

    /// Lattice value remapped to `[-1, 1)`.
    #[inline]
    fn lattice_value(&self, ix: i64, iy: i64) -> f64 {
        self.hash(ix, iy) * 2.0 - 1.0
    }

    /// Smoothly interpolated noise in `[-1, 1]`.
    ///
    /// The four surrounding lattice values are blended with smoothstep weights
    /// on both axes, so the field has a continuous first derivative across
    /// lattice lines.
    pub fn value_noise(&self, x: f64, y: f64) -> f64 {
        let x0 = libm::floor(x);
        let y0 = libm::floor(y);
        let sx = smoothstep(x - x0);
        let sy = smoothstep(y - y0);

        let ix = x0 as i64;
        let iy = y0 as i64;
        let ix1 = ix.wrapping_add(1);
        let iy1 = iy.wrapping_add(1);

        let bottom = lerp(self.lattice_value(ix, iy), self.lattice_value(ix1, iy), sx);
        let top = lerp(self.lattice_value(ix, iy1), self.lattice_value(ix1, iy1), sx);
        lerp(bottom, top, sy)
    }

    /// Fractal Brownian motion over [`value_noise`](Self::value_noise).
    ///
    /// Starts at amplitude 1 and frequency 1, halving amplitude and doubling
    /// frequency per octave. The sum is divided by the total amplitude used, so
    /// the result stays in `[-1, 1]`. Zero octaves yields `0.0`.
    pub fn fbm(&self, x: f64, y: f64, octaves: u32) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut amplitude_sum = 0.0;

        for _ in 0..octaves {
            total += amplitude * self.value_noise(x * frequency, y * frequency);
            amplitude_sum += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        if amplitude_sum > 0.0 {
            total / amplitude_sum
        } else {
            0.0
        }
    }
}

/// [`NoiseField::fbm`] at a fixed octave count, as a composable noise source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FbmField {
    field: NoiseField,
    octaves: u32,
}

impl FbmField {
    pub fn new(field: NoiseField, octaves: u32) -> Self {
        Self { field, octaves }
    }

    pub fn octaves(&self) -> u32 {
        self.octaves
    }
}

impl NoiseFn<f64, 2> for FbmField {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.field.fbm(point[0], point[1], self.octaves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_in_unit_interval() {
        for seed in [0_u64, 1, 42, u64::MAX] {
            for ix in -50..50 {
                for iy in -50..50 {
                    let h = lattice_hash(ix, iy, seed);
                    assert!((0.0..1.0).contains(&h), "hash {h} out of [0,1)");
                }
            }
        }
    }

    #[test]
    fn test_hash_deterministic() {
        let a = NoiseField::new(1234);
        let b = NoiseField::new(1234);
        for i in -20..20 {
            assert_eq!(a.hash(i, i * 3).to_bits(), b.hash(i, i * 3).to_bits());
        }
    }

    #[test]
    fn test_hash_depends_on_seed() {
        let differing = (0..100)
            .filter(|&i| lattice_hash(i, 7, 1) != lattice_hash(i, 7, 2))
            .count();
        assert!(differing > 95, "only {differing}/100 lattice points changed");
    }

    #[test]
    fn test_hash_not_symmetric_in_axes() {
        assert_ne!(lattice_hash(3, 9, 5), lattice_hash(9, 3, 5));
    }

    #[test]
    fn test_value_noise_matches_lattice_at_integers() {
        let field = NoiseField::new(77);
        for ix in -5..5 {
            for iy in -5..5 {
                let expected = field.hash(ix, iy) * 2.0 - 1.0;
                let got = field.value_noise(ix as f64, iy as f64);
                assert!(
                    (got - expected).abs() < 1e-12,
                    "lattice ({ix},{iy}): {got} vs {expected}"
                );
            }
        }
    }

    #[test]
    fn test_value_noise_range() {
        let field = NoiseField::new(9);
        for i in 0..200 {
            for j in 0..200 {
                let v = field.value_noise(i as f64 * 0.173 - 17.0, j as f64 * 0.191 - 19.0);
                assert!((-1.0..=1.0).contains(&v), "value {v} out of range");
            }
        }
    }

    #[test]
    fn test_value_noise_continuous_across_lattice_lines() {
        let field = NoiseField::new(3);
        let eps = 1e-9;
        for i in -10..10 {
            let x = i as f64;
            let left = field.value_noise(x - eps, 0.37);
            let right = field.value_noise(x + eps, 0.37);
            assert!((left - right).abs() < 1e-6, "crease at x={x}");
        }
    }

    #[test]
    fn test_fbm_range_and_determinism() {
        let field = NoiseField::new(1234);
        for i in 0..100 {
            let x = i as f64 * 0.37;
            let y = i as f64 * 0.11;
            let v = field.fbm(x, y, DEFAULT_OCTAVES);
            assert!((-1.0..=1.0).contains(&v));
            assert_eq!(v.to_bits(), NoiseField::new(1234).fbm(x, y, 4).to_bits());
        }
    }

    #[test]
    fn test_fbm_single_octave_is_value_noise() {
        let field = NoiseField::new(55);
        let v = field.fbm(2.25, 7.5, 1);
        assert_eq!(v.to_bits(), field.value_noise(2.25, 7.5).to_bits());
    }

    #[test]
    fn test_fbm_zero_octaves_is_zero() {
        assert_eq!(NoiseField::new(1).fbm(3.3, 4.4, 0), 0.0);
    }

    #[test]
    fn test_fbm_source_matches_fbm() {
        let field = NoiseField::new(8);
        let source = FbmField::new(field, 3);
        assert_eq!(source.get([1.5, -2.25]).to_bits(), field.fbm(1.5, -2.25, 3).to_bits());
    }
}
