//! Spatial grid module
//!
//! Provides the uniform grid index over point primitives: attribute
//! storage, cubic bounding region derivation, and the cell membership
//! lifecycle (insert, update, remove, query).

mod primitive;
mod bounds;
mod spatial_grid;

pub use primitive::{PrimitiveHandle, PrimitiveStore};
pub use bounds::{CellCoord, GridBounds};
pub use spatial_grid::{SpatialGrid, DEFAULT_MIN_CELL_SIZE};
