//! Free-fly camera: pure input reducer plus the view/projection matrices
//! derived from its state.

pub mod reducer;
pub mod ubo;

pub use reducer::{forward_vector, right_vector, reduce, RuntimeInputLatch, RuntimeState};
pub use ubo::CameraUboData;

use glam::Mat4;

/// Builds the view matrix for a [`RuntimeState`].
#[must_use]
pub fn view_matrix(state: &RuntimeState) -> Mat4 {
    let forward = forward_vector(state.yaw, state.pitch);
    Mat4::look_to_rh(state.position, forward, glam::Vec3::Y)
}

/// Builds a standard right-handed infinite-far perspective projection.
#[must_use]
pub fn projection_matrix(fov_y_radians: f32, aspect_ratio: f32, z_near: f32) -> Mat4 {
    Mat4::perspective_infinite_reverse_rh(fov_y_radians, aspect_ratio, z_near)
}
