//! CPU-fallback tiled/clustered light binner (§4.5).
//!
//! A real backend dispatches this work as a compute shader over the
//! [`PassId::LightCulling`](crate::render_path::PassId::LightCulling) /
//! [`PassId::ClusterLightAssign`](crate::render_path::PassId::ClusterLightAssign)
//! contracts; this module is the CPU path used when no compute backend is
//! available (the `Software` backend, and unit tests). Cells are caller-
//! supplied view-space AABBs — tiled binning passes one full-depth-range
//! cell per screen tile, clustered binning passes one cell per (tile, Z
//! slice) pair.

use super::grid::MAX_LIGHTS_PER_TILE;
use super::light::Light;
use crate::config::CullerBackend;
use crate::math::Aabb;

/// Offset/count pair into a shared light index list, one per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightTileEntry {
    pub offset: u32,
    pub count: u32,
}

/// Output of a binning pass: one entry per cell, plus the flat index list
/// all entries slice into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightBinResult {
    pub grid: Vec<LightTileEntry>,
    pub index_list: Vec<u32>,
    /// Number of (cell, light) overlaps dropped because a cell already held
    /// [`MAX_LIGHTS_PER_TILE`] entries. Surfaced to telemetry, never an error.
    pub overflow_count: u64,
}

/// Bins `lights` against `cells` (one AABB per grid cell, in the same
/// space as each light's bounding sphere — typically view space). Within
/// a cell, lights are ranked by intensity descending before the
/// `MAX_LIGHTS_PER_TILE` cap is applied, so the cap always drops the
/// dimmest overlapping lights first.
#[must_use]
pub fn bin_lights(cells: &[Aabb], lights: &[Light]) -> LightBinResult {
    let mut grid = Vec::with_capacity(cells.len());
    let mut index_list = Vec::new();
    let mut overflow_count = 0u64;

    for cell in cells {
        let mut overlapping: Vec<(usize, f32)> = lights
            .iter()
            .enumerate()
            .filter(|(_, light)| light.bounding_sphere().intersects_aabb(cell))
            .map(|(i, light)| (i, light.intensity()))
            .collect();

        overlapping.sort_by(|a, b| b.1.total_cmp(&a.1));

        let offset = index_list.len() as u32;
        let keep = overlapping.len().min(MAX_LIGHTS_PER_TILE);
        overflow_count += (overlapping.len() - keep) as u64;

        for &(light_index, _) in &overlapping[..keep] {
            index_list.push(light_index as u32);
        }

        grid.push(LightTileEntry {
            offset,
            count: keep as u32,
        });
    }

    LightBinResult { grid, index_list, overflow_count }
}

/// Bins lights respecting the configured [`CullerBackend`]: `Off` skips
/// binning entirely and reports every cell empty, matching "disabling GPU
/// culler sets all counts to 0" (§8, scenario 2).
#[must_use]
pub fn bin_lights_for_backend(cells: &[Aabb], lights: &[Light], backend: CullerBackend) -> LightBinResult {
    match backend {
        CullerBackend::Off => LightBinResult {
            grid: vec![LightTileEntry { offset: 0, count: 0 }; cells.len()],
            index_list: Vec::new(),
            overflow_count: 0,
        },
        CullerBackend::Gpu => bin_lights(cells, lights),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn unit_cell() -> Aabb {
        Aabb::new(Vec3::new(-10.0, -10.0, -10.0), Vec3::new(10.0, 10.0, 10.0))
    }

    #[test]
    fn lights_outside_every_cell_produce_empty_entries() {
        let cells = vec![Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0))];
        let lights = vec![Light::Point { position: Vec3::new(1000.0, 0.0, 0.0), radius: 1.0, intensity: 5.0 }];
        let result = bin_lights(&cells, &lights);
        assert_eq!(result.grid[0].count, 0);
        assert!(result.index_list.is_empty());
    }

    #[test]
    fn zero_active_lights_yields_all_zero_counts() {
        let cells = vec![unit_cell(), unit_cell()];
        let result = bin_lights(&cells, &[]);
        assert!(result.grid.iter().all(|e| e.count == 0));
        assert!(result.index_list.is_empty());
    }

    #[test]
    fn disabling_gpu_culler_zeroes_every_cell_scenario_2() {
        let cells = vec![unit_cell()];
        let lights = vec![Light::Point { position: Vec3::ZERO, radius: 5.0, intensity: 1.0 }];
        let result = bin_lights_for_backend(&cells, &lights, CullerBackend::Off);
        assert_eq!(result.grid[0].count, 0);
        assert!(result.index_list.is_empty());
    }

    #[test]
    fn overflow_beyond_cap_drops_dimmest_first() {
        let cells = vec![unit_cell()];
        let mut lights = Vec::new();
        for i in 0..(MAX_LIGHTS_PER_TILE + 10) {
            lights.push(Light::Point {
                position: Vec3::ZERO,
                radius: 1.0,
                intensity: i as f32,
            });
        }
        let result = bin_lights(&cells, &lights);
        assert_eq!(result.grid[0].count as usize, MAX_LIGHTS_PER_TILE);
        assert_eq!(result.overflow_count, 10);

        // The brightest lights (highest intensity == highest index here) survive.
        let kept: std::collections::HashSet<u32> = result.index_list.iter().copied().collect();
        assert!(kept.contains(&((MAX_LIGHTS_PER_TILE + 9) as u32)));
        assert!(!kept.contains(&0));
    }

    #[test]
    fn clustered_384_lights_across_16_z_slices_scenario_2() {
        use super::super::grid::{LightGridLayout, DEFAULT_CLUSTER_Z_SLICES, DEFAULT_TILE_SIZE};
        let layout = LightGridLayout::new(1920, 1080, DEFAULT_TILE_SIZE, DEFAULT_CLUSTER_Z_SLICES);
        assert_eq!(layout.cluster_z_slices, 16);

        // One coarse cell per Z slice spanning the whole screen in X/Y, so
        // every light lands in exactly one slice based on its Z position.
        let mut cells = Vec::new();
        for slice in 0..layout.cluster_z_slices {
            let z0 = slice as f32 * 10.0;
            let z1 = z0 + 10.0;
            cells.push(Aabb::new(
                Vec3::new(-1_000.0, -1_000.0, z0),
                Vec3::new(1_000.0, 1_000.0, z1),
            ));
        }

        let lights: Vec<Light> = (0..384)
            .map(|i| Light::Point {
                position: Vec3::new(0.0, 0.0, (i % 16) as f32 * 10.0 + 1.0),
                radius: 0.5,
                intensity: 1.0,
            })
            .collect();

        let result = bin_lights(&cells, &lights);
        assert_eq!(result.grid.len(), 16);
        let total: u32 = result.grid.iter().map(|e| e.count).sum();
        assert_eq!(total, 384);
    }
}
