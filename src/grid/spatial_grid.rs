/// SpatialGrid — uniform grid index over oriented, scaled point primitives.
///
/// Partitions a cubic region into `resolution^3` cubic cells and registers
/// each primitive in every cell overlapped by its fixed-margin bounding box
/// (`position ± cell_size / 4`). Queries return the membership of the single
/// cell containing the query point, giving roughly constant-time lookups.
///
/// Two mirrored maps are maintained for every primitive:
/// - `cells`: cell coordinate → ordered handle sequence (arrival order)
/// - `primitive_cells`: handle → cells it currently occupies
///
/// The grid parameters are fixed at construction and never re-derived;
/// primitives inserted outside the original region clamp into boundary
/// cells. Not safe for unsynchronized concurrent mutation — callers must
/// serialize lifecycle operations externally.

use rustc_hash::FxHashMap;
use glam::{Vec3, Mat3};
use crate::error::{Error, Result};
use crate::{grid_debug, grid_error, grid_info, grid_trace};
use super::bounds::{CellCoord, GridBounds};
use super::primitive::{PrimitiveHandle, PrimitiveStore};

/// Minimum cell size used by `with_default_cell_size`.
///
/// Matches the default of the original scene system this index serves.
pub const DEFAULT_MIN_CELL_SIZE: f32 = 0.6;

/// Uniform grid spatial index.
///
/// Owns the primitive attribute arrays, the immutable grid parameters, and
/// the two mirrored membership indexes. All lifecycle operations keep the
/// mirror invariant: a (handle, cell) pair present in one index is present
/// in the other.
pub struct SpatialGrid {
    /// Primitive attribute storage (positions, scales, rotations)
    store: PrimitiveStore,
    /// Immutable geometric parameters (region, resolution, cell size)
    bounds: GridBounds,
    /// Cell coordinate → handles whose bounding box overlaps that cell,
    /// in arrival order
    cells: FxHashMap<CellCoord, Vec<PrimitiveHandle>>,
    /// Reverse index: handle → cells it currently occupies
    primitive_cells: FxHashMap<PrimitiveHandle, Vec<CellCoord>>,
}

impl SpatialGrid {
    /// Build a grid from the initial primitive set.
    ///
    /// Derives the cubic region and resolution from `positions`, then
    /// inserts primitives in index order: handle `i` is the i-th record of
    /// the input arrays.
    ///
    /// # Arguments
    ///
    /// * `positions` - Primitive positions (world space)
    /// * `scales` - Per-axis scales, same length as `positions`
    /// * `rotations` - Orientation matrices, same length as `positions`
    /// * `min_cell_size` - Smallest allowed cell edge length (positive)
    ///
    /// # Errors
    ///
    /// `InvalidConstruction` if the primitive set is empty, the attribute
    /// lengths differ, or `min_cell_size` is not positive. Fails before any
    /// index state is built.
    pub fn new(
        positions: &[Vec3],
        scales: &[Vec3],
        rotations: &[Mat3],
        min_cell_size: f32,
    ) -> Result<Self> {
        if positions.is_empty() {
            return Err(Self::construction_error("empty primitive set".to_string()));
        }
        if positions.len() != scales.len() || positions.len() != rotations.len() {
            return Err(Self::construction_error(format!(
                "mismatched attribute lengths: {} positions, {} scales, {} rotations",
                positions.len(),
                scales.len(),
                rotations.len()
            )));
        }
        if !(min_cell_size > 0.0) {
            return Err(Self::construction_error(format!(
                "min_cell_size must be positive, got {}",
                min_cell_size
            )));
        }

        let bounds = GridBounds::derive(positions, min_cell_size);

        let mut grid = Self {
            store: PrimitiveStore::with_capacity(positions.len()),
            bounds,
            cells: FxHashMap::default(),
            primitive_cells: FxHashMap::default(),
        };

        for i in 0..positions.len() {
            grid.insert(positions[i], scales[i], rotations[i]);
        }

        grid_info!(
            "splatgrid::SpatialGrid",
            "Grid constructed: {} primitives, resolution {}, cell size {}",
            grid.store.len(),
            grid.bounds.resolution(),
            grid.bounds.cell_size()
        );
        Ok(grid)
    }

    /// Build a grid with the default minimum cell size
    /// ([`DEFAULT_MIN_CELL_SIZE`]).
    pub fn with_default_cell_size(
        positions: &[Vec3],
        scales: &[Vec3],
        rotations: &[Mat3],
    ) -> Result<Self> {
        Self::new(positions, scales, rotations, DEFAULT_MIN_CELL_SIZE)
    }

    /// Log and return a construction error
    fn construction_error(message: String) -> Error {
        grid_error!("splatgrid::SpatialGrid", "Construction failed: {}", message);
        Error::InvalidConstruction(message)
    }

    // ===== LIFECYCLE =====

    /// Insert a new primitive and return its handle.
    ///
    /// The handle is the current primitive count; handles are never
    /// recycled. A position outside the original region is clamped into
    /// the nearest boundary cells — the grid does not resize.
    pub fn insert(&mut self, position: Vec3, scale: Vec3, rotation: Mat3) -> PrimitiveHandle {
        let handle = self.store.push(position, scale, rotation);
        self.link_cells(handle, position);
        grid_trace!("splatgrid::SpatialGrid", "Inserted primitive {}", handle);
        handle
    }

    /// Update a primitive's attributes and re-index it.
    ///
    /// Clears the handle's old cell memberships, overwrites its stored
    /// attributes in place, and re-links it from the new position. No new
    /// handle is allocated. Updating a previously removed handle re-links
    /// it, since its storage slot is still in place.
    ///
    /// # Errors
    ///
    /// `UnknownHandle` if the handle was never assigned.
    pub fn update(
        &mut self,
        handle: PrimitiveHandle,
        position: Vec3,
        scale: Vec3,
        rotation: Mat3,
    ) -> Result<()> {
        if !self.store.contains(handle) {
            grid_error!(
                "splatgrid::SpatialGrid",
                "Update on unknown primitive handle {}",
                handle
            );
            return Err(Error::UnknownHandle(handle.index()));
        }

        self.remove(handle);
        self.store.set(handle, position, scale, rotation);
        self.link_cells(handle, position);
        grid_trace!("splatgrid::SpatialGrid", "Updated primitive {}", handle);
        Ok(())
    }

    /// Remove a primitive from the index.
    ///
    /// Clears the handle from every cell it occupied and drops its reverse
    /// index entry. No-op on an unknown or already removed handle. The
    /// attribute slot stays in storage — cell lookups are the only path to
    /// spatial iteration, so the slot is unreachable until a later update
    /// re-links the handle.
    pub fn remove(&mut self, handle: PrimitiveHandle) {
        let Some(occupied) = self.primitive_cells.remove(&handle) else {
            return;
        };

        for cell in occupied {
            if let Some(members) = self.cells.get_mut(&cell) {
                // Exact single removal, preserving arrival order.
                // Tolerate an already absent handle.
                if let Some(pos) = members.iter().position(|&h| h == handle) {
                    members.remove(pos);
                }
            }
        }
        grid_trace!("splatgrid::SpatialGrid", "Removed primitive {}", handle);
    }

    /// Register a handle in every cell its bounding box overlaps.
    ///
    /// The full cell set is computed before any index mutation, so the
    /// membership update is all-or-nothing.
    fn link_cells(&mut self, handle: PrimitiveHandle, position: Vec3) {
        if !self.bounds.contains(position) {
            grid_debug!(
                "splatgrid::SpatialGrid",
                "Primitive {} at {:?} is outside the grid region, clamping to boundary cells",
                handle,
                position
            );
        }

        let occupied = self.bounds.cells_overlapping(position);
        for &cell in &occupied {
            self.cells.entry(cell).or_default().push(handle);
        }
        self.primitive_cells.insert(handle, occupied);
    }

    // ===== QUERY =====

    /// Map a position to the single cell containing it
    pub fn locate_cell(&self, position: Vec3) -> CellCoord {
        self.bounds.locate_cell(position)
    }

    /// Handles registered in the cell containing `position`.
    ///
    /// Returns the membership sequence of that one cell, in arrival order,
    /// or an empty slice if the cell was never populated. Neighboring cells
    /// are not searched: a point near a cell boundary can miss primitives
    /// registered only in the adjacent cell.
    pub fn query(&self, position: Vec3) -> &[PrimitiveHandle] {
        self.cells
            .get(&self.locate_cell(position))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Cells currently occupied by a handle (reverse index), if indexed
    pub fn occupied_cells(&self, handle: PrimitiveHandle) -> Option<&[CellCoord]> {
        self.primitive_cells.get(&handle).map(Vec::as_slice)
    }

    // ===== ACCESSORS =====

    /// Immutable geometric parameters of the grid
    pub fn bounds(&self) -> &GridBounds {
        &self.bounds
    }

    /// Number of handles ever assigned (removed primitives keep their slot)
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True if no primitive was ever inserted
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Get a primitive's position
    pub fn position(&self, handle: PrimitiveHandle) -> Option<Vec3> {
        self.store.position(handle)
    }

    /// Get a primitive's scale
    pub fn scale(&self, handle: PrimitiveHandle) -> Option<Vec3> {
        self.store.scale(handle)
    }

    /// Get a primitive's rotation matrix
    pub fn rotation(&self, handle: PrimitiveHandle) -> Option<Mat3> {
        self.store.rotation(handle)
    }
}

#[cfg(test)]
#[path = "spatial_grid_tests.rs"]
mod tests;
