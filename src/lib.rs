/*!
# Splat Grid

Uniform spatial grid index for oriented, scaled point primitives.

This crate answers "which primitives overlap this location" queries in
roughly constant time. A cubic bounding region is derived once from the
initial primitive positions and partitioned into a uniform grid of cubic
cells whose edge length respects a caller-supplied minimum. Each primitive
is registered in every cell its conservative bounding box overlaps.

## Architecture

- **SpatialGrid**: the index itself — construction, insert/update/remove
  lifecycle, and point queries
- **GridBounds**: the immutable cubic region and resolution parameters
- **PrimitiveStore**: the position/scale/rotation attribute arrays
- **PrimitiveHandle**: stable integer handle assigned at insertion

The grid parameters never change after construction: inserting a primitive
outside the original region clamps it into the nearest boundary cell
instead of growing the grid.
*/

// Internal modules
mod error;
pub mod log;
pub mod grid;

// Main splatgrid namespace module
pub mod splatgrid {
    // Error types
    pub use crate::error::{Error, Result};

    // Grid index types
    pub use crate::grid::{
        CellCoord, GridBounds, PrimitiveHandle, PrimitiveStore, SpatialGrid,
        DEFAULT_MIN_CELL_SIZE,
    };

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Log, LogEntry, LogSeverity, Logger, DefaultLogger};
        // Note: grid_* macros are NOT re-exported here - they are crate-root exports
    }
}

// Re-export math library at crate root
pub use glam;
