//! Pure input-latch -> state reducer for the free-fly camera (§4, runtime
//! input handling). No I/O, no time source — the caller owns both and
//! passes the elapsed `dt` explicitly, which is what makes this reducer
//! trivially unit-testable and replay-deterministic.

use glam::Vec3;

/// One frame's worth of accumulated input, captured before the reducer
/// runs so input polling never races frame simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuntimeInputLatch {
    /// Forward/back axis, positive is forward.
    pub forward: f32,
    /// Strafe axis, positive is right.
    pub right: f32,
    /// Vertical axis, positive is up.
    pub up: f32,
    pub yaw_delta: f32,
    pub pitch_delta: f32,
    pub dt: f32,
}

impl Default for RuntimeInputLatch {
    fn default() -> Self {
        Self { forward: 0.0, right: 0.0, up: 0.0, yaw_delta: 0.0, pitch_delta: 0.0, dt: 0.0 }
    }
}

/// Free-fly camera state: world position plus orientation in yaw/pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuntimeState {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
}

impl Default for RuntimeState {
    fn default() -> Self {
        Self { position: Vec3::ZERO, yaw: 0.0, pitch: 0.0, speed: 10.0 }
    }
}

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Forward-facing unit vector for a given yaw/pitch, in a right-handed
/// world where yaw=0, pitch=0 looks down -Z.
#[must_use]
pub fn forward_vector(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(yaw.sin() * pitch.cos(), pitch.sin(), -yaw.cos() * pitch.cos())
}

/// Right-facing unit vector for a given yaw (independent of pitch — strafe
/// stays in the horizontal plane).
#[must_use]
pub fn right_vector(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, yaw.sin())
}

/// Advances `state` by one frame of `latch` input. Pure function: same
/// inputs always produce the same output, which is what lets the frame
/// executor replay a recorded input stream deterministically.
#[must_use]
pub fn reduce(state: RuntimeState, latch: &RuntimeInputLatch) -> RuntimeState {
    let yaw = state.yaw + latch.yaw_delta;
    let pitch = (state.pitch + latch.pitch_delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);

    let forward = forward_vector(yaw, pitch);
    let right = right_vector(yaw);

    let movement =
        (forward * latch.forward + right * latch.right + Vec3::Y * latch.up) * state.speed * latch.dt;

    RuntimeState {
        position: state.position + movement,
        yaw,
        pitch,
        speed: state.speed,
    }
}
