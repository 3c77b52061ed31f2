//! Splatmap export: one colour channel per label value
//!
//! Values 1 to 4 map to red, green, blue and black squares so the image can
//! drive a four-layer terrain blend. Cells without a value stay transparent.

use crate::io::error::{Result, invalid_parameter};
use crate::io::image::save_image;
use crate::spatial::grid::{Grid, Topology};
use image::{ImageBuffer, Rgba, RgbaImage};
use ndarray::Array2;
use std::path::Path;

/// Splatmap colour of a value
pub const fn splat_color(value: u32) -> Option<[u8; 4]> {
    match value {
        1 => Some([255, 0, 0, 255]),
        2 => Some([0, 255, 0, 255]),
        3 => Some([0, 0, 255, 255]),
        4 => Some([0, 0, 0, 255]),
        _ => None,
    }
}

/// Value per map cell, indexed `[x, y]` for planar grids and `[x, z]` for
/// volumetric grids
///
/// Volumetric grids are seen from above: each column takes the value of its
/// highest collapsed cell whose label has one.
pub fn value_map(grid: &Grid, label_values: &[Option<u32>]) -> Array2<Option<u32>> {
    let [width, height, depth] = grid.dimensions();
    let value_at = |position| {
        grid.cell(position)
            .and_then(|cell| cell.chosen)
            .and_then(|index| label_values.get(index).copied().flatten())
    };

    match grid.topology() {
        Topology::Planar => Array2::from_shape_fn((width, height), |(x, y)| value_at([x, y, 0])),
        Topology::Volumetric => Array2::from_shape_fn((width, depth), |(x, z)| {
            (0..height).rev().find_map(|y| value_at([x, y, z]))
        }),
    }
}

/// Draw a value map as coloured squares
///
/// The map's second axis grows upwards, so its highest index is the top row.
pub fn render_splatmap(values: &Array2<Option<u32>>, square_size: u32) -> RgbaImage {
    let (width, rows) = values.dim();
    let mut img: RgbaImage =
        ImageBuffer::new(width as u32 * square_size, rows as u32 * square_size);

    for ((x, row), value) in values.indexed_iter() {
        let Some(color) = value.and_then(splat_color) else {
            continue;
        };
        let top = (rows - 1 - row) as u32 * square_size;
        let left = x as u32 * square_size;
        for dy in 0..square_size {
            for dx in 0..square_size {
                img.put_pixel(left + dx, top + dy, Rgba(color));
            }
        }
    }

    img
}

/// Export a grid's label values as a splatmap PNG
///
/// # Errors
///
/// Returns an error if the square size is zero or the image cannot be saved
pub fn export_splatmap<P: AsRef<Path>>(
    grid: &Grid,
    label_values: &[Option<u32>],
    square_size: u32,
    output_path: P,
) -> Result<()> {
    if square_size == 0 {
        return Err(invalid_parameter(
            "square_size",
            &square_size,
            &"must be positive",
        ));
    }
    let img = render_splatmap(&value_map(grid, label_values), square_size);
    save_image(&img, output_path.as_ref())
}
