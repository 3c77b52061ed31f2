//! Spatial data structures and grid analysis
//!
//! This module contains spatial-related functionality including:
//! - The solver grid, cells and neighbour directions
//! - Connected-group analysis of occupancy maps
//! - Upsampling of coarse maps for chained passes

/// Solver grid, cells and directions
pub mod grid;
/// Flood fill over planar occupancy maps
pub mod regions;
/// Upsampling of coarse planar maps
pub mod subdivision;

pub use grid::{Direction, Grid, Position};
