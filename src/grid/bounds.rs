/// Cubic bounding region and cell arithmetic for the spatial grid.
///
/// GridBounds holds the geometric parameters derived once at construction:
/// the cubic region enclosing the initial positions, the power-of-two
/// resolution respecting the minimum cell size, and the fixed bounding
/// margin assumed around every primitive. All cell computations are pure
/// functions of a position and these parameters.

use glam::Vec3;

// ===== CELL COORDINATE =====

/// Coordinate of one grid cell along the three axes.
///
/// Each component is in `[0, resolution)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    /// Cell index along X
    pub x: u32,
    /// Cell index along Y
    pub y: u32,
    /// Cell index along Z
    pub z: u32,
}

impl CellCoord {
    /// Create a cell coordinate
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

// ===== GRID BOUNDS =====

/// Immutable geometric parameters of the grid.
///
/// Derived once from the initial primitive positions and never recomputed:
/// re-deriving the region would change the meaning of every stored cell
/// index. Positions outside the region are clamped into boundary cells.
#[derive(Debug, Clone, Copy)]
pub struct GridBounds {
    /// Minimum corner of the cubic region
    global_min: Vec3,
    /// Maximum corner of the cubic region
    global_max: Vec3,
    /// Subdivision depth (resolution = 2^depth)
    depth: u32,
    /// Number of cells along each axis
    resolution: u32,
    /// Edge length of one cubic cell
    cell_size: f32,
    /// Half-width of the bounding margin assumed around every primitive
    /// (cell_size / 4, independent of the primitive's own scale)
    default_extent: f32,
}

impl GridBounds {
    /// Derive the grid parameters from the initial positions.
    ///
    /// The region is a cube centered on the positions' bounding-box center
    /// with edge length equal to the largest axis extent. The depth is the
    /// largest value such that `range / 2^depth >= min_cell_size`, clamped
    /// to 0 when the region is already smaller than `min_cell_size`.
    ///
    /// Input validation (non-empty, positive `min_cell_size`) is the
    /// caller's responsibility; see `SpatialGrid::new`.
    pub(crate) fn derive(positions: &[Vec3], min_cell_size: f32) -> Self {
        debug_assert!(!positions.is_empty(), "derive requires at least one position");
        debug_assert!(min_cell_size > 0.0, "min_cell_size must be positive");

        let mut basic_min = positions[0];
        let mut basic_max = positions[0];
        for &position in &positions[1..] {
            basic_min = basic_min.min(position);
            basic_max = basic_max.max(position);
        }

        let center = (basic_min + basic_max) * 0.5;
        // Largest axis extent forces cubic cells
        let range_val = (basic_max - basic_min).max_element();
        let half_range = Vec3::splat(range_val * 0.5);

        let depth = if range_val > min_cell_size {
            (range_val / min_cell_size).log2().floor() as u32
        } else {
            0
        };
        let resolution = 1u32 << depth;
        let cell_size = range_val / resolution as f32;

        Self {
            global_min: center - half_range,
            global_max: center + half_range,
            depth,
            resolution,
            cell_size,
            default_extent: cell_size / 4.0,
        }
    }

    // ===== CELL COMPUTATIONS =====

    /// Compute all cells overlapped by a primitive's bounding box.
    ///
    /// The box is `position ± default_extent` (isotropic, independent of
    /// the primitive's own scale and rotation). Returns the Cartesian
    /// product of the inclusive per-axis `[start, end]` ranges, each bound
    /// clamped into `[0, resolution - 1]`. Always yields at least one cell;
    /// more when the box straddles a cell boundary.
    pub fn cells_overlapping(&self, position: Vec3) -> Vec<CellCoord> {
        let p_min = position - Vec3::splat(self.default_extent);
        let p_max = position + Vec3::splat(self.default_extent);

        let start = [
            self.axis_cell(p_min.x, self.global_min.x),
            self.axis_cell(p_min.y, self.global_min.y),
            self.axis_cell(p_min.z, self.global_min.z),
        ];
        let end = [
            self.axis_cell(p_max.x, self.global_min.x),
            self.axis_cell(p_max.y, self.global_min.y),
            self.axis_cell(p_max.z, self.global_min.z),
        ];

        let count = (end[0] - start[0] + 1) as usize
            * (end[1] - start[1] + 1) as usize
            * (end[2] - start[2] + 1) as usize;
        let mut cells = Vec::with_capacity(count);

        for x in start[0]..=end[0] {
            for y in start[1]..=end[1] {
                for z in start[2]..=end[2] {
                    cells.push(CellCoord::new(x, y, z));
                }
            }
        }
        cells
    }

    /// Map a position to the single cell containing it.
    ///
    /// Uses the point itself (no bounding margin) via normalized
    /// coordinates, clamped per axis into `[0, resolution - 1]`.
    pub fn locate_cell(&self, position: Vec3) -> CellCoord {
        let extent = self.global_max - self.global_min;
        let scaled = (position - self.global_min) / extent * self.resolution as f32;
        CellCoord::new(
            self.clamp_index(scaled.x),
            self.clamp_index(scaled.y),
            self.clamp_index(scaled.z),
        )
    }

    /// Test whether a position lies inside the cubic region
    pub fn contains(&self, position: Vec3) -> bool {
        position.cmpge(self.global_min).all() && position.cmple(self.global_max).all()
    }

    /// Cell index along one axis for a world-space value, clamped into range
    fn axis_cell(&self, value: f32, origin: f32) -> u32 {
        self.clamp_index((value - origin) / self.cell_size)
    }

    /// Floor and clamp a fractional cell index into `[0, resolution - 1]`
    fn clamp_index(&self, value: f32) -> u32 {
        (value.floor() as i64).clamp(0, (self.resolution - 1) as i64) as u32
    }

    // ===== ACCESSORS =====

    /// Minimum corner of the cubic region
    pub fn global_min(&self) -> Vec3 {
        self.global_min
    }

    /// Maximum corner of the cubic region
    pub fn global_max(&self) -> Vec3 {
        self.global_max
    }

    /// Subdivision depth (0 = single cell)
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of cells along each axis (2^depth)
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Edge length of one cubic cell
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Half-width of the fixed bounding margin (cell_size / 4)
    pub fn default_extent(&self) -> f32 {
        self.default_extent
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
