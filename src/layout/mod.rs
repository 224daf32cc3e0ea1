//! Layout engine: column partitioning/offsets and viewport window math.
//!
//! This module handles:
//! - The column display order, pin/scroll partition, widths and left offsets
//! - Viewport state (scroll position, container size)
//! - Row and column windowing with overscan

mod columns;
mod viewport;

pub use columns::{ColumnBand, ColumnLayout};
pub use viewport::{Viewport, OVERSCAN_ROWS, ROW_HEIGHT};
