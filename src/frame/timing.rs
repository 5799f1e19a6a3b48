//! Per-pass CPU/GPU timing collection.

use crate::render_path::PassId;

/// CPU and (when query pools are available) GPU duration for one executed
/// pass, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassTiming {
    pub pass_id: PassId,
    pub cpu_micros: f64,
    /// `None` when GPU timestamp queries are unsupported (§7: "query pool
    /// unavailability (timing disabled)" degrades to a warning, not an
    /// error).
    pub gpu_micros: Option<f64>,
}

/// Aggregated timings for one executed frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameTimings {
    pub passes: Vec<PassTiming>,
}

impl FrameTimings {
    #[must_use]
    pub fn slowest_cpu_pass(&self) -> Option<&PassTiming> {
        self.passes.iter().max_by(|a, b| a.cpu_micros.total_cmp(&b.cpu_micros))
    }

    #[must_use]
    pub fn slowest_gpu_pass(&self) -> Option<&PassTiming> {
        self.passes
            .iter()
            .filter_map(|p| p.gpu_micros.map(|g| (p, g)))
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(p, _)| p)
    }

    #[must_use]
    pub fn total_cpu_micros(&self) -> f64 {
        self.passes.iter().map(|p| p.cpu_micros).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slowest_cpu_pass_picks_the_max() {
        let timings = FrameTimings {
            passes: vec![
                PassTiming { pass_id: PassId::ShadowMap, cpu_micros: 100.0, gpu_micros: Some(50.0) },
                PassTiming { pass_id: PassId::Tonemap, cpu_micros: 400.0, gpu_micros: None },
            ],
        };
        assert_eq!(timings.slowest_cpu_pass().unwrap().pass_id, PassId::Tonemap);
        assert_eq!(timings.slowest_gpu_pass().unwrap().pass_id, PassId::ShadowMap);
    }
}
