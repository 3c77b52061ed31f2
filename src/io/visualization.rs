//! Frame capture and GIF generation for solver visualization

use crate::algorithm::executor::CollapseObserver;
use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{Result, SolverError};
use crate::rules::catalog::Label;
use crate::spatial::grid::Position;
use image::{Frame, Rgba, RgbaImage};
use std::collections::HashMap;
use std::path::Path;

/// Represents a single collapse or reset event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEvent {
    /// Column of the cell
    pub x: usize,
    /// Row of the cell, growing upwards
    pub y: usize,
    /// Colour shown after the event (None for resets)
    pub color: Option<[u8; 4]>,
}

/// Records collapse and reset events for animation
///
/// Volumetric grids are drawn from the front: events at every depth land on
/// the same `[x, y]` pixel and the latest one wins.
pub struct VisualizationCapture {
    pub(crate) events: Vec<CellEvent>,
    dimensions: (usize, usize),
    colors: HashMap<Label, [u8; 4]>,
    empty_color: [u8; 4],
}

impl VisualizationCapture {
    /// The average of all label colors is used as the empty color
    pub fn new(width: usize, height: usize, colors: HashMap<Label, [u8; 4]>) -> Self {
        let empty_color = if colors.is_empty() {
            [128, 128, 128, 255]
        } else {
            let mut sums = [0u32; 4];
            for color in colors.values() {
                for (sum, &channel) in sums.iter_mut().zip(color) {
                    *sum += u32::from(channel);
                }
            }
            let count = colors.len() as u32;
            sums.map(|sum| (sum / count) as u8)
        };

        Self {
            events: Vec::new(),
            dimensions: (width, height),
            colors,
            empty_color,
        }
    }

    /// Returns all recorded events
    pub fn events(&self) -> &[CellEvent] {
        &self.events
    }

    /// Returns the total number of events
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Export the captured frames as a GIF with automatic frame skipping
    ///
    /// Frame delays below what viewers support are raised, and frames are
    /// skipped so the animation keeps its apparent speed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No events were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif<P: AsRef<Path>>(&self, output_path: P, frame_delay_ms: u32) -> Result<()> {
        let output_path = output_path.as_ref();
        if self.events.is_empty() {
            return Err(SolverError::InvalidSourceData {
                reason: "No events captured for visualization".to_string(),
            });
        }

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms)
        } else {
            1
        };

        let frames = self.generate_frames(effective_delay_ms, skip_factor as usize);

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| SolverError::FileSystem {
                    path: parent.to_path_buf(),
                    operation: "create directory",
                    source: e,
                })?;
            }
        }

        let file = std::fs::File::create(output_path).map_err(|e| SolverError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| SolverError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(&self, delay_ms: u32, skip_factor: usize) -> Vec<Frame> {
        let (width, height) = self.dimensions;
        let mut canvas = vec![None; width * height];
        let mut frames = vec![self.render_frame(&canvas, delay_ms)];
        let skip_factor = skip_factor.max(1);

        let mut frame_count = 0;
        for event in &self.events {
            if event.x < width && event.y < height {
                if let Some(slot) = canvas.get_mut(event.y * width + event.x) {
                    *slot = event.color;
                }
                frame_count += 1;
                if frame_count % skip_factor == 0 {
                    frames.push(self.render_frame(&canvas, delay_ms));
                }
            }
        }

        if frame_count % skip_factor != 0 {
            frames.push(self.render_frame(&canvas, delay_ms));
        }

        // Final frame displays longer for better visibility
        if let Some(last_frame_img) = frames.last().map(|f| f.buffer().clone()) {
            frames.push(Frame::from_parts(
                last_frame_img,
                0,
                0,
                image::Delay::from_numer_denom_ms(delay_ms * 25, 1),
            ));
        }

        frames
    }

    fn render_frame(&self, canvas: &[Option<[u8; 4]>], delay_ms: u32) -> Frame {
        let (width, height) = self.dimensions;
        let mut img = RgbaImage::new(width as u32, height as u32);

        for (slot, color) in canvas.iter().enumerate() {
            let x = slot % width.max(1);
            let y = slot / width.max(1);
            if y >= height {
                continue;
            }
            let pixel = color.unwrap_or(self.empty_color);
            img.put_pixel(x as u32, (height - 1 - y) as u32, Rgba(pixel));
        }

        Frame::from_parts(img, 0, 0, image::Delay::from_numer_denom_ms(delay_ms, 1))
    }
}

impl CollapseObserver for VisualizationCapture {
    fn on_collapse(&mut self, position: Position, label: &Label) {
        let color = self
            .colors
            .get(label)
            .copied()
            .unwrap_or(self.empty_color);
        self.events.push(CellEvent {
            x: position[0],
            y: position[1],
            color: Some(color),
        });
    }

    fn on_reset(&mut self, position: Position) {
        self.events.push(CellEvent {
            x: position[0],
            y: position[1],
            color: None,
        });
    }
}
