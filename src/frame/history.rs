//! Temporal/History Manager: the TAA jitter schedule and the history
//! color image's single-writer/single-reader lifecycle (§5: "History
//! color images have a single writer ... and single reader ...; their
//! layout is tracked explicitly and asserted").

/// Sub-pixel jitter state for one frame, as a fraction of one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterOffset {
    pub x: f32,
    pub y: f32,
}

/// Tracks whether the history color image was written this frame and is
/// therefore readable by the next frame's TAA pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryColorState {
    /// Never written; TAA must treat this frame as a history miss.
    Uninitialized,
    WrittenThisFrame,
    ReadableByNextFrame,
}

/// Owns the jitter sequence and the history color image's read/write
/// discipline across frames.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    pub enabled: bool,
    state: HistoryColorState,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self { enabled: true, state: HistoryColorState::Uninitialized }
    }
}

impl HistoryManager {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self { enabled, state: HistoryColorState::Uninitialized }
    }

    /// Low-discrepancy 2D jitter for `frame_index`, a Halton(2,3) sequence
    /// matching the reference implementation's TAA jitter schedule.
    #[must_use]
    pub fn jitter_offset(frame_index: u64) -> JitterOffset {
        JitterOffset {
            x: halton(frame_index + 1, 2) - 0.5,
            y: halton(frame_index + 1, 3) - 0.5,
        }
    }

    /// Call at the start of a frame, before TAA runs. Returns `true` if
    /// history is readable this frame (step 9 of §4.6 only copies into
    /// history when TAA exists *and* history is enabled; reading happens
    /// the frame after a write).
    #[must_use]
    pub fn history_readable(&self) -> bool {
        self.enabled && self.state == HistoryColorState::ReadableByNextFrame
    }

    /// Marks the history color image written this frame (§4.6 step 9).
    /// Asserts the previous state wasn't already `WrittenThisFrame` without
    /// an intervening frame boundary — a double-write within one frame is
    /// a logic error in the caller, not a recoverable condition.
    pub fn mark_written(&mut self) {
        assert_ne!(
            self.state,
            HistoryColorState::WrittenThisFrame,
            "history color written twice in the same frame"
        );
        self.state = HistoryColorState::WrittenThisFrame;
    }

    /// Call once per frame boundary, after dispatch completes, to promote
    /// this frame's write into next frame's read.
    pub fn advance_frame(&mut self) {
        if self.state == HistoryColorState::WrittenThisFrame {
            self.state = HistoryColorState::ReadableByNextFrame;
        }
    }
}

/// The `base`-ary Van der Corput / Halton radical inverse of `index`.
fn halton(mut index: u64, base: u64) -> f32 {
    let mut result = 0.0f64;
    let mut f = 1.0f64 / base as f64;
    while index > 0 {
        result += f * (index % base) as f64;
        index /= base;
        f /= base as f64;
    }
    result as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_not_readable_before_any_write() {
        let manager = HistoryManager::default();
        assert!(!manager.history_readable());
    }

    #[test]
    fn write_then_advance_makes_history_readable_next_frame() {
        let mut manager = HistoryManager::default();
        manager.mark_written();
        assert!(!manager.history_readable());
        manager.advance_frame();
        assert!(manager.history_readable());
    }

    #[test]
    #[should_panic(expected = "written twice")]
    fn double_write_within_one_frame_panics() {
        let mut manager = HistoryManager::default();
        manager.mark_written();
        manager.mark_written();
    }

    #[test]
    fn jitter_sequence_is_deterministic_and_bounded() {
        for i in 0..8 {
            let j = HistoryManager::jitter_offset(i);
            assert!(j.x >= -0.5 && j.x < 0.5);
            assert!(j.y >= -0.5 && j.y < 0.5);
        }
        assert_eq!(HistoryManager::jitter_offset(3), HistoryManager::jitter_offset(3));
    }
}
