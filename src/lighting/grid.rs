//! Light grid layout: tile/cluster sizing shared by the resource planner
//! and the CPU-fallback binner.

/// Default screen-space tile edge length, in pixels, for tiled light
/// culling (§4.2/§4.5).
pub const DEFAULT_TILE_SIZE: u32 = 16;

/// Default number of Z slices for clustered light culling (§4.5, scenario 2:
/// "`ClusteredForward`, 16 Z slices, 384 lights").
pub const DEFAULT_CLUSTER_Z_SLICES: u32 = 16;

/// Hard cap on lights recorded per tile/cluster cell; beyond this the
/// binner drops the dimmest remaining candidates rather than growing the
/// index list unbounded (§4.5 invariant).
pub const MAX_LIGHTS_PER_TILE: usize = 128;

/// Resolved tile-grid dimensions for one frame's swapchain extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightGridLayout {
    pub tile_size: u32,
    pub tiles_x: u32,
    pub tiles_y: u32,
    pub cluster_z_slices: u32,
}

impl LightGridLayout {
    /// Builds the layout for a `(width, height)` swapchain extent. Tile
    /// counts round up so the grid always fully covers the screen, even
    /// when the extent isn't a multiple of `tile_size`.
    #[must_use]
    pub fn new(width: u32, height: u32, tile_size: u32, cluster_z_slices: u32) -> Self {
        let tile_size = tile_size.max(1);
        Self {
            tile_size,
            tiles_x: width.div_ceil(tile_size),
            tiles_y: height.div_ceil(tile_size),
            cluster_z_slices: cluster_z_slices.max(1),
        }
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        (self.tiles_x * self.tiles_y) as usize
    }

    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.tile_count() * self.cluster_z_slices as usize
    }

    #[must_use]
    pub fn tile_index(&self, tile_x: u32, tile_y: u32) -> usize {
        (tile_y * self.tiles_x + tile_x) as usize
    }

    #[must_use]
    pub fn cluster_index(&self, tile_x: u32, tile_y: u32, z_slice: u32) -> usize {
        self.tile_index(tile_x, tile_y) * self.cluster_z_slices as usize + z_slice as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_grid_rounds_up_to_cover_the_full_extent() {
        let layout = LightGridLayout::new(1920, 1080, DEFAULT_TILE_SIZE, DEFAULT_CLUSTER_Z_SLICES);
        assert_eq!(layout.tiles_x, 120);
        assert_eq!(layout.tiles_y, 68); // 1080 / 16 = 67.5 -> 68
    }

    #[test]
    fn cluster_count_multiplies_tiles_by_z_slices_scenario_2() {
        let layout = LightGridLayout::new(1920, 1080, DEFAULT_TILE_SIZE, 16);
        assert_eq!(layout.cluster_z_slices, 16);
        assert_eq!(layout.cluster_count(), layout.tile_count() * 16);
    }

    #[test]
    fn tile_size_one_matches_surface_extent() {
        let layout = LightGridLayout::new(1280, 720, 1, 1);
        assert_eq!(layout.tiles_x, 1280);
        assert_eq!(layout.tiles_y, 720);
        assert_eq!(layout.tile_count(), 1280 * 720);
    }

    #[test]
    fn composition_deferred_pbr_default_tile_grid_scenario_1() {
        let layout = LightGridLayout::new(1280, 720, DEFAULT_TILE_SIZE, DEFAULT_CLUSTER_Z_SLICES);
        assert_eq!(layout.tiles_x, 80);
        assert_eq!(layout.tiles_y, 45);
        assert_eq!(layout.tile_count(), 3600);
    }
}
