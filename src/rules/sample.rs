//! Rule extraction from sample images

use crate::io::error::{Result, SolverError, invalid_parameter};
use crate::rules::catalog::{Catalog, Label, WeightTable};
use crate::rules::table::{RuleSet, RuleTable};
use crate::spatial::grid::Direction;
use image::RgbaImage;
use ndarray::Array2;
use std::collections::HashMap;
use std::path::Path;

/// Pixel art of sample-derived labels
#[derive(Clone, Debug, Default)]
pub struct TileArt {
    /// Edge length of every tile in pixels
    pub tile_size: usize,
    /// Row-major RGBA pixels per label, top row first
    pub pixels: HashMap<Label, Vec<[u8; 4]>>,
}

impl TileArt {
    /// Pixel at `(column, row)` of a label's tile, top row first
    pub fn pixel(&self, label: &Label, column: usize, row: usize) -> Option<[u8; 4]> {
        if column >= self.tile_size {
            return None;
        }
        self.pixels
            .get(label)
            .and_then(|pixels| pixels.get(row * self.tile_size + column))
            .copied()
    }
}

/// Load a PNG sample and extract its rule set
///
/// # Errors
///
/// Returns an error if the file cannot be decoded or is too small for
/// one tile
pub fn load_sample<P: AsRef<Path>>(path: P, tile_size: usize) -> Result<RuleSet> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| SolverError::SampleLoad {
        path: path_buf,
        source: e,
    })?;
    rules_from_image(&img.to_rgba8(), tile_size)
}

/// Cut an image into tiles and record which tiles touch
///
/// Identical pixel blocks share a label named `t0`, `t1`, ... in reading
/// order of first appearance. A label's weight is its occurrence count. The
/// tile above another in the image is its `Up` neighbour, since grid y grows
/// upwards while image rows grow downwards.
///
/// # Errors
///
/// Returns an error if the tile size is zero or the image holds no
/// complete tile
pub fn rules_from_image(img: &RgbaImage, tile_size: usize) -> Result<RuleSet> {
    if tile_size == 0 {
        return Err(invalid_parameter(
            "tile_size",
            &tile_size,
            &"tiles need at least one pixel",
        ));
    }
    let columns = img.width() as usize / tile_size;
    let rows = img.height() as usize / tile_size;
    if columns == 0 || rows == 0 {
        return Err(SolverError::InvalidSourceData {
            reason: format!(
                "{}x{} sample holds no complete {tile_size}px tile",
                img.width(),
                img.height()
            ),
        });
    }

    let mut catalog = Catalog::default();
    let mut block_keys: HashMap<Vec<[u8; 4]>, usize> = HashMap::new();
    let mut counts: Vec<usize> = Vec::new();
    let mut art = TileArt {
        tile_size,
        pixels: HashMap::new(),
    };
    // Indexed (column, image row)
    let mut layout = Array2::zeros((columns, rows));

    for row in 0..rows {
        for column in 0..columns {
            let block = read_block(img, column, row, tile_size);
            let index = if let Some(&index) = block_keys.get(&block) {
                index
            } else {
                let label = Label::new(format!("t{}", catalog.len()));
                let index = catalog.push(label.clone());
                art.pixels.insert(label, block.clone());
                block_keys.insert(block, index);
                counts.push(0);
                index
            };
            if let Some(count) = counts.get_mut(index) {
                *count += 1;
            }
            if let Some(slot) = layout.get_mut((column, row)) {
                *slot = index;
            }
        }
    }

    let mut rules = RuleTable::new();
    let steps = [
        (Direction::Right, 1_isize, 0_isize),
        (Direction::Left, -1, 0),
        (Direction::Up, 0, -1),
        (Direction::Down, 0, 1),
    ];
    for ((column, row), &index) in layout.indexed_iter() {
        let Some(label) = catalog.label(index).cloned() else {
            continue;
        };
        for &(direction, dc, dr) in &steps {
            let neighbor = column
                .checked_add_signed(dc)
                .zip(row.checked_add_signed(dr))
                .and_then(|(c, r)| layout.get((c, r)))
                .and_then(|&n| catalog.label(n));
            if let Some(neighbor) = neighbor {
                rules.add(label.clone(), direction, neighbor.clone());
            } else {
                rules.declare(label.clone(), direction);
            }
        }
    }

    let mut weights = WeightTable::new();
    let mut colors = HashMap::new();
    for (index, label) in catalog.labels().iter().enumerate() {
        let count = counts.get(index).copied().unwrap_or(1);
        weights.set(label.clone(), count as f64)?;
        if let Some(pixels) = art.pixels.get(label) {
            colors.insert(label.clone(), average_color(pixels));
        }
    }

    Ok(RuleSet {
        catalog,
        rules,
        weights,
        values: HashMap::new(),
        colors,
        art: Some(art),
    })
}

fn read_block(img: &RgbaImage, column: usize, row: usize, tile_size: usize) -> Vec<[u8; 4]> {
    let mut block = Vec::with_capacity(tile_size * tile_size);
    for dy in 0..tile_size {
        for dx in 0..tile_size {
            let x = (column * tile_size + dx) as u32;
            let y = (row * tile_size + dy) as u32;
            block.push(img.get_pixel_checked(x, y).map_or([0; 4], |p| p.0));
        }
    }
    block
}

fn average_color(pixels: &[[u8; 4]]) -> [u8; 4] {
    if pixels.is_empty() {
        return [128, 128, 128, 255];
    }
    let mut sums = [0u64; 4];
    for pixel in pixels {
        for (sum, &channel) in sums.iter_mut().zip(pixel) {
            *sum += u64::from(channel);
        }
    }
    let count = pixels.len() as u64;
    sums.map(|sum| (sum / count) as u8)
}
