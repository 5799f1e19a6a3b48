//! GPU-visible per-frame camera constants: the fixed-layout struct uploaded
//! into the camera uniform buffer binding each frame.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4};

use super::RuntimeState;

/// Per-frame camera/lighting/temporal constants shared by every pass that
/// samples the scene. `#[repr(C)]` plus `Pod + Zeroable` makes this safe to
/// reinterpret as raw bytes for the uniform buffer upload; every field is
/// therefore a plain float/vector/matrix, never a pointer or enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUboData {
    pub view: Mat4,
    pub proj: Mat4,
    pub view_proj: Mat4,
    /// `xyz` = world-space camera position, `w` = elapsed time in seconds.
    pub camera_pos_time: Vec4,
    /// `xyz` = normalized world-space sun direction, `w` = sun intensity.
    pub sun_dir_intensity: Vec4,
    /// `x,y` = screen width/height in pixels, `z` = tile_size, `w` = visible
    /// light count.
    pub screen_tile_light_count: Vec4,
    /// `x` = near, `y` = far, `z,w` reserved for future culling parameters.
    pub culling_params: Vec4,
    /// `x` = depth near, `y` = depth far, `z` = exposure, `w` = gamma.
    pub depth_exposure_gamma: Vec4,
    pub sun_shadow_view_proj: Mat4,
    /// `x` = filter radius (texels), `y` = depth bias, `z` = PCF sample
    /// count, `w` reserved.
    pub sun_shadow_filter: Vec4,
    /// `x` = TAA enabled (0/1), `y` = history valid (0/1), `z` = history
    /// blend factor, `w` reserved.
    pub temporal_params: Vec4,
}

impl Default for CameraUboData {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
            view_proj: Mat4::IDENTITY,
            camera_pos_time: Vec4::ZERO,
            sun_dir_intensity: Vec4::new(0.0, -1.0, 0.0, 1.0),
            screen_tile_light_count: Vec4::ZERO,
            culling_params: Vec4::ZERO,
            depth_exposure_gamma: Vec4::new(0.1, 1000.0, 1.0, 2.2),
            sun_shadow_view_proj: Mat4::IDENTITY,
            sun_shadow_filter: Vec4::ZERO,
            temporal_params: Vec4::ZERO,
        }
    }
}

impl CameraUboData {
    /// Builds the per-frame constants from a camera's runtime state plus the
    /// values every caller otherwise has to thread through by hand. `time`
    /// is elapsed seconds since startup; `history_valid` and `taa_blend`
    /// come from the frame executor's [`crate::frame::HistoryManager`].
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        state: &RuntimeState,
        proj: Mat4,
        time: f32,
        sun_direction: Vec3,
        sun_intensity: f32,
        screen: (u32, u32),
        tile_size: u32,
        visible_light_count: u32,
        depth_near_far: Vec2,
        exposure: f32,
        gamma: f32,
        sun_shadow_view_proj: Mat4,
        taa_enabled: bool,
        history_valid: bool,
        taa_blend: f32,
    ) -> Self {
        let view = super::view_matrix(state);
        Self {
            view,
            proj,
            view_proj: proj * view,
            camera_pos_time: state.position.extend(time),
            sun_dir_intensity: sun_direction.normalize_or_zero().extend(sun_intensity),
            screen_tile_light_count: Vec4::new(
                screen.0 as f32,
                screen.1 as f32,
                tile_size as f32,
                visible_light_count as f32,
            ),
            culling_params: Vec4::ZERO,
            depth_exposure_gamma: Vec4::new(depth_near_far.x, depth_near_far.y, exposure, gamma),
            sun_shadow_view_proj,
            sun_shadow_filter: Vec4::new(1.5, 0.002, 4.0, 0.0),
            temporal_params: Vec4::new(
                if taa_enabled { 1.0 } else { 0.0 },
                if history_valid { 1.0 } else { 0.0 },
                taa_blend,
                0.0,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_plain_old_data_at_the_expected_size() {
        // 4 Mat4 (64 bytes each) + 7 Vec4 (16 bytes each).
        assert_eq!(std::mem::size_of::<CameraUboData>(), 4 * 64 + 7 * 16);
        let bytes = bytemuck::bytes_of(&CameraUboData::default());
        assert_eq!(bytes.len(), std::mem::size_of::<CameraUboData>());
    }

    #[test]
    fn build_packs_position_and_time_into_one_vector() {
        let state = RuntimeState { position: Vec3::new(1.0, 2.0, 3.0), yaw: 0.0, pitch: 0.0, speed: 10.0 };
        let ubo = CameraUboData::build(
            &state,
            Mat4::IDENTITY,
            5.0,
            Vec3::new(0.0, -1.0, 0.0),
            2.0,
            (1280, 720),
            16,
            42,
            Vec2::new(0.1, 1000.0),
            1.0,
            2.2,
            Mat4::IDENTITY,
            true,
            false,
            0.1,
        );
        assert_eq!(ubo.camera_pos_time, Vec4::new(1.0, 2.0, 3.0, 5.0));
        assert_eq!(ubo.screen_tile_light_count, Vec4::new(1280.0, 720.0, 16.0, 42.0));
        assert_eq!(ubo.temporal_params, Vec4::new(1.0, 0.0, 0.1, 0.0));
    }
}
