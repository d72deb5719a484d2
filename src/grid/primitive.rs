/// Primitive attribute storage for the spatial grid.
///
/// Each primitive carries a position, a per-axis scale, and a 3x3 rotation
/// matrix. The three attributes live in parallel arrays indexed by a dense
/// integer handle assigned in arrival order.

use std::fmt;
use glam::{Vec3, Mat3};

// ===== PRIMITIVE HANDLE =====

/// Stable handle for a primitive within a SpatialGrid.
///
/// Handles are dense integers starting at 0, assigned in arrival order and
/// never recycled. Removing a primitive does not free its handle for reuse;
/// the next insertion always takes the next integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrimitiveHandle(usize);

impl PrimitiveHandle {
    /// Create a handle from a raw storage index (internal: only the store
    /// assigns handles)
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the underlying storage index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PrimitiveHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ===== PRIMITIVE STORE =====

/// Parallel attribute arrays for all primitives ever inserted.
///
/// Storage only grows: `push` appends at the next handle, `set` overwrites
/// in place. Removal from the grid leaves the slot untouched — cell lookups
/// are the only path to spatial iteration, so an unindexed slot is never
/// read again unless the same handle is re-linked by an update.
#[derive(Debug, Default, Clone)]
pub struct PrimitiveStore {
    /// Primitive positions (world space)
    positions: Vec<Vec3>,
    /// Per-axis scales
    scales: Vec<Vec3>,
    /// Orientation matrices
    rotations: Vec<Mat3>,
}

impl PrimitiveStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            scales: Vec::new(),
            rotations: Vec::new(),
        }
    }

    /// Create an empty store with capacity for `capacity` primitives
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            scales: Vec::with_capacity(capacity),
            rotations: Vec::with_capacity(capacity),
        }
    }

    /// Append a primitive and return its handle (the previous length)
    pub fn push(&mut self, position: Vec3, scale: Vec3, rotation: Mat3) -> PrimitiveHandle {
        let handle = PrimitiveHandle::new(self.positions.len());
        self.positions.push(position);
        self.scales.push(scale);
        self.rotations.push(rotation);
        handle
    }

    /// Overwrite the attributes of an existing primitive in place.
    ///
    /// Returns false if the handle was never assigned.
    pub fn set(
        &mut self,
        handle: PrimitiveHandle,
        position: Vec3,
        scale: Vec3,
        rotation: Mat3,
    ) -> bool {
        let index = handle.index();
        if index >= self.positions.len() {
            return false;
        }
        self.positions[index] = position;
        self.scales[index] = scale;
        self.rotations[index] = rotation;
        true
    }

    /// Check whether a handle was ever assigned by this store
    pub fn contains(&self, handle: PrimitiveHandle) -> bool {
        handle.index() < self.positions.len()
    }

    /// Get a primitive's position
    pub fn position(&self, handle: PrimitiveHandle) -> Option<Vec3> {
        self.positions.get(handle.index()).copied()
    }

    /// Get a primitive's scale
    pub fn scale(&self, handle: PrimitiveHandle) -> Option<Vec3> {
        self.scales.get(handle.index()).copied()
    }

    /// Get a primitive's rotation matrix
    pub fn rotation(&self, handle: PrimitiveHandle) -> Option<Mat3> {
        self.rotations.get(handle.index()).copied()
    }

    /// All positions, in handle order
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Number of slots ever allocated (removed primitives keep their slot)
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True if no primitive was ever inserted
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
#[path = "primitive_tests.rs"]
mod tests;
