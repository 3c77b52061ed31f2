//! PNG export of planar solve results

use crate::io::error::{Result, SolverError, invalid_parameter};
use crate::rules::catalog::Catalog;
use crate::rules::table::RuleSet;
use crate::spatial::grid::{Grid, Topology};
use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

/// Fallback colour for labels without one, spread around the hue circle
pub fn palette_color(index: usize) -> [u8; 4] {
    // Golden-angle steps keep neighbouring indices visually apart
    let hue = (index as f64 * 137.508) % 360.0;
    let sector = hue / 60.0;
    let fraction = sector.fract();
    let high = 230.0;
    let low = 60.0;
    let rising = fraction.mul_add(high - low, low);
    let falling = (1.0 - fraction).mul_add(high - low, low);
    let (r, g, b) = match sector as u32 {
        0 => (high, rising, low),
        1 => (falling, high, low),
        2 => (low, high, rising),
        3 => (low, falling, high),
        4 => (rising, low, high),
        _ => (high, low, falling),
    };
    [r as u8, g as u8, b as u8, 255]
}

/// Colour of a catalog index, preferring the rule set's own colours
pub fn label_color(rule_set: &RuleSet, catalog: &Catalog, index: usize) -> [u8; 4] {
    catalog
        .label(index)
        .and_then(|label| rule_set.color_of(label))
        .unwrap_or_else(|| palette_color(index))
}

/// Render a planar grid into an image
///
/// Sample-derived rule sets draw each cell with its tile's pixels; other rule
/// sets draw `cell_size` squares of the label colour. Uncollapsed cells stay
/// transparent. Grid y grows upwards, so the top image row is the highest y.
///
/// # Errors
///
/// Returns an error if the grid is volumetric or `cell_size` is zero
pub fn render_grid(
    grid: &Grid,
    catalog: &Catalog,
    rule_set: &RuleSet,
    cell_size: usize,
) -> Result<RgbaImage> {
    if grid.topology() != Topology::Planar {
        return Err(invalid_parameter(
            "grid",
            &"volumetric",
            &"only planar grids render to images",
        ));
    }
    let tile = rule_set.art.as_ref().map_or(cell_size, |art| art.tile_size);
    if tile == 0 {
        return Err(invalid_parameter("cell_size", &tile, &"must be positive"));
    }

    let [width, height, _] = grid.dimensions();
    let mut img: RgbaImage = ImageBuffer::new((width * tile) as u32, (height * tile) as u32);

    for cell in grid.cells() {
        let Some(index) = cell.chosen else {
            continue;
        };
        let [x, y, _] = cell.position;
        let top = (height - 1 - y) * tile;
        let left = x * tile;
        let label = catalog.label(index);

        for dy in 0..tile {
            for dx in 0..tile {
                let art_pixel = rule_set
                    .art
                    .as_ref()
                    .zip(label)
                    .and_then(|(art, label)| art.pixel(label, dx, dy));
                let color = art_pixel.unwrap_or_else(|| label_color(rule_set, catalog, index));
                img.put_pixel((left + dx) as u32, (top + dy) as u32, Rgba(color));
            }
        }
    }

    Ok(img)
}

/// Export a planar grid as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The grid cannot be rendered
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png<P: AsRef<Path>>(
    grid: &Grid,
    catalog: &Catalog,
    rule_set: &RuleSet,
    cell_size: usize,
    output_path: P,
) -> Result<()> {
    let img = render_grid(grid, catalog, rule_set, cell_size)?;
    save_image(&img, output_path.as_ref())
}

pub(crate) fn save_image(img: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| SolverError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    img.save(output_path)
        .map_err(|e| SolverError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
