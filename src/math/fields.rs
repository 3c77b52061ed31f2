//! Value fields that assign a small integer to each planar cell
//!
//! Fields are indexed `[x, y]` and hold values in `1..=range`. Biased collapse
//! favours labels whose value matches the cell's value, which lets a field
//! sketch coarse regions that the rules then fill in.

use ndarray::Array2;
use num_traits::{Float, NumCast};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Shape of a value field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueField {
    /// Bands that increase from left to right
    Horizontal,
    /// Rings that increase away from the centre
    Radial,
    /// Regions grown outward from one random seed per value
    GrowingRegions {
        /// Seed for seed placement and growth order
        seed: u64,
    },
}

/// Linear interpolation between `a` and `b`
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// Map a fraction in `[0, 1]` onto one of `range` bands numbered from 1
pub fn band<T: Float>(fraction: T, range: u32) -> u32 {
    let range_f = <T as NumCast>::from(range).unwrap_or_else(T::one);
    let scaled = lerp(T::zero(), range_f, fraction.max(T::zero()).min(T::one()));
    let index = scaled.floor().to_u32().unwrap_or(0);
    index.min(range.saturating_sub(1)) + 1
}

impl ValueField {
    /// Sample the field over a `width x height` grid
    pub fn generate(self, width: usize, height: usize, range: u32) -> Array2<u32> {
        let range = range.max(1);
        match self {
            Self::Horizontal => Array2::from_shape_fn((width, height), |(x, _)| {
                let fraction = if width > 1 {
                    x as f64 / (width - 1) as f64
                } else {
                    0.0
                };
                band(fraction, range)
            }),
            Self::Radial => {
                let centre = [(width as f64 - 1.0) / 2.0, (height as f64 - 1.0) / 2.0];
                let reach = centre[0].hypot(centre[1]).max(f64::EPSILON);
                Array2::from_shape_fn((width, height), |(x, y)| {
                    let distance = (x as f64 - centre[0]).hypot(y as f64 - centre[1]);
                    band(distance / reach, range)
                })
            }
            Self::GrowingRegions { seed } => grow_regions(width, height, range, seed),
        }
    }
}

fn grow_regions(width: usize, height: usize, range: u32, seed: u64) -> Array2<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut field = Array2::<u32>::zeros((width, height));
    let mut frontier: Vec<[usize; 2]> = Vec::new();

    for value in 1..=range {
        let x = rng.random_range(0..width.max(1));
        let y = rng.random_range(0..height.max(1));
        if let Some(cell) = field.get_mut([x, y]) {
            if *cell == 0 {
                *cell = value;
                frontier.push([x, y]);
            }
        }
    }

    while !frontier.is_empty() {
        let pick = rng.random_range(0..frontier.len());
        let [x, y] = frontier.swap_remove(pick);
        let value = field.get([x, y]).copied().unwrap_or(0);

        let candidates = [
            x.checked_add(1).map(|nx| [nx, y]),
            x.checked_sub(1).map(|nx| [nx, y]),
            y.checked_add(1).map(|ny| [x, ny]),
            y.checked_sub(1).map(|ny| [x, ny]),
        ];
        for next in candidates.into_iter().flatten() {
            if let Some(cell) = field.get_mut(next) {
                if *cell == 0 {
                    *cell = value;
                    frontier.push(next);
                }
            }
        }
    }

    field.mapv_inplace(|value| value.max(1));
    field
}
