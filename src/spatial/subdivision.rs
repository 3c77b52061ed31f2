//! Upsampling of coarse planar maps onto finer grids

use crate::spatial::regions::CellGroup;
use ndarray::Array2;

/// Repeat every cell of a `[x, y]` map into a `factor x factor` block
pub fn upsample<T: Clone>(coarse: &Array2<T>, factor: usize) -> Option<Array2<T>> {
    if factor == 0 {
        return None;
    }
    let (width, height) = coarse.dim();
    let mut cells = Vec::with_capacity(width * height * factor * factor);
    for x in 0..width * factor {
        for y in 0..height * factor {
            cells.push(coarse.get([x / factor, y / factor])?.clone());
        }
    }
    Array2::from_shape_vec((width * factor, height * factor), cells).ok()
}

/// Boolean `[x, y]` map marking the members of some groups
pub fn group_mask(width: usize, height: usize, groups: &[CellGroup]) -> Array2<bool> {
    let mut mask = Array2::from_elem((width, height), false);
    for group in groups {
        for &cell in &group.cells {
            if let Some(flag) = mask.get_mut(cell) {
                *flag = true;
            }
        }
    }
    mask
}
