use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Where the simulator gets its head poses from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub enum PoseSourceKind {
    /// JSON pose packets on a UDP socket
    #[default]
    #[serde(alias = "udp", alias = "UDP")]
    Udp,
    /// Generated idle head motion, no external input
    #[serde(alias = "sway")]
    Sway,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Path of the bridge shared library to load.
    pub bridge_library: String,
    pub pose_source: PoseSourceKind,
    pub listen_address: String,
    pub listen_port: u16,
    pub max_fps: Option<f32>,
    pub near_clip: f32,
    pub far_clip: f32,
    pub smoothing_enabled: bool,
    pub smoothing_min_cutoff: f32,
    pub smoothing_beta: f32,
}

fn default_bridge_library() -> String {
    format!(
        "{}questvr{}",
        std::env::consts::DLL_PREFIX,
        std::env::consts::DLL_SUFFIX
    )
}

fn default_listen_address() -> String {
    "0.0.0.0".to_string()
}

fn default_listen_port() -> u16 {
    9000
}

fn default_max_fps() -> Option<f32> {
    Some(72.0)
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            bridge_library: default_bridge_library(),
            pose_source: PoseSourceKind::default(),
            listen_address: default_listen_address(),
            listen_port: default_listen_port(),
            max_fps: default_max_fps(),
            near_clip: 0.1,
            far_clip: 100.0,
            smoothing_enabled: false,
            smoothing_min_cutoff: 1.0,
            smoothing_beta: 0.5,
        }
    }
}

impl SimConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.listen_address, self.listen_port)
    }

    /// Frame budget for the configured rate. `None` runs unpaced; so does a
    /// non-positive rate.
    pub fn target_frame_duration(&self) -> Option<Duration> {
        self.max_fps
            .filter(|fps| *fps > 0.0 && fps.is_finite())
            .map(|fps| Duration::from_secs_f32(1.0 / fps))
    }
}

/// Reads the config at `path`, writing out the defaults first if the file does
/// not exist yet.
pub fn load_config(path: &Path) -> Result<SimConfig> {
    if path.exists() {
        info!("Loading config from {:?}", path);
        let file = fs::File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
        let reader = std::io::BufReader::new(file);
        let config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    } else {
        info!("Config not found. Creating default at {:?}", path);
        let config = SimConfig::default();
        let file =
            fs::File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &config).context("Failed to write default config")?;
        Ok(config)
    }
}
