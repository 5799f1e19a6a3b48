//! Engine configuration, assembled from environment variables (§6
//! "CLI / environment variables"). Every toggle defaults to off so a
//! plain `EngineConfig::default()` runs the engine with no benchmark,
//! soak, or parity-report overhead.

use std::env;

/// Which implementation the light binner dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullerBackend {
    Gpu,
    Off,
}

impl Default for CullerBackend {
    fn default() -> Self {
        CullerBackend::Gpu
    }
}

/// Composition benchmark: runs a fixed warmup + sample window per
/// composition and writes JSONL (plus optional PPM snapshots).
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkConfig {
    pub warmup_frames: u32,
    pub sample_frames: u32,
    pub include_post_variants: bool,
    pub capture_snapshots: bool,
    pub output_path: String,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            warmup_frames: 30,
            sample_frames: 120,
            include_post_variants: false,
            capture_snapshots: false,
            output_path: "artifacts/benchmark_metrics.jsonl".to_string(),
        }
    }
}

/// Soak mode: cycles compositions for a fixed duration and emits a
/// pass/fail verdict against a frame-time acceptance threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct SoakConfig {
    pub duration_secs: u64,
    pub cycle_frames: u32,
    pub log_path: String,
    pub toggle_shadows: bool,
    pub max_frame_time_millis: f64,
}

impl Default for SoakConfig {
    fn default() -> Self {
        Self {
            duration_secs: 300,
            cycle_frames: 30,
            log_path: "artifacts/soak_log.jsonl".to_string(),
            toggle_shadows: true,
            max_frame_time_millis: 33.3,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub culler_backend: CullerBackend,
    pub benchmark: Option<BenchmarkConfig>,
    pub soak: Option<SoakConfig>,
    pub parity_report_enabled: bool,
}

fn env_flag(name: &str) -> bool {
    env::var(name).map(|v| v == "1").unwrap_or(false)
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl EngineConfig {
    /// Reads configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        let culler_backend = match env::var("SHS_VK_CULLER_BACKEND").as_deref() {
            Ok("off") => CullerBackend::Off,
            _ => CullerBackend::Gpu,
        };

        let benchmark = env_flag("SHS_PHASE_F").then(|| {
            let defaults = BenchmarkConfig::default();
            BenchmarkConfig {
                warmup_frames: env_parse("SHS_PHASE_F_WARMUP_FRAMES", defaults.warmup_frames),
                sample_frames: env_parse("SHS_PHASE_F_SAMPLE_FRAMES", defaults.sample_frames),
                include_post_variants: env_flag("SHS_PHASE_F_INCLUDE_POST_VARIANTS"),
                capture_snapshots: env_flag("SHS_PHASE_F_CAPTURE_SNAPSHOTS"),
                output_path: env_string("SHS_PHASE_F_OUTPUT", &defaults.output_path),
            }
        });

        let soak = env_flag("SHS_PHASE_G").then(|| {
            let defaults = SoakConfig::default();
            SoakConfig {
                duration_secs: env_parse("SHS_PHASE_G_DURATION_SECS", defaults.duration_secs),
                cycle_frames: env_parse("SHS_PHASE_G_CYCLE_FRAMES", defaults.cycle_frames),
                log_path: env_string("SHS_PHASE_G_LOG", &defaults.log_path),
                toggle_shadows: env_parse("SHS_PHASE_G_TOGGLE_SHADOWS", defaults.toggle_shadows),
                max_frame_time_millis: env_parse("SHS_PHASE_G_MAX_FRAME_TIME_MS", defaults.max_frame_time_millis),
            }
        });

        Self {
            culler_backend,
            benchmark,
            soak,
            parity_report_enabled: env_flag("SHS_PHASE_I"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_every_optional_mode_disabled() {
        let config = EngineConfig::default();
        assert_eq!(config.culler_backend, CullerBackend::Gpu);
        assert!(config.benchmark.is_none());
        assert!(config.soak.is_none());
        assert!(!config.parity_report_enabled);
    }
}
