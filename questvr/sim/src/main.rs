use anyhow::{bail, Result};
use api::{Eye, Hand, HostContext, TrackingSource};
use common::{load_config, PoseFilter, SimConfig};
use log::{debug, error, info, trace, warn};
use questvr_sim::bridge::{forward_bridge_log, BridgeLibrary};
use questvr_sim::frame::apply_packet;
use questvr_sim::sources::create_source;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const DEFAULT_CONFIG_PATH: &str = "questvr_sim.json";
const STATUS_LOG_INTERVAL: Duration = Duration::from_secs(10);

fn config_path(args: &[String]) -> PathBuf {
    args.iter()
        .position(|arg| arg == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// What an engine does per frame: read tracking, then set up both eye cameras.
fn render_frame(bridge: &BridgeLibrary, config: &SimConfig) {
    let head = bridge.head_pose();
    trace!(
        "Head pos {:?} rot {:?}",
        head.position.to_array(),
        head.rotation.to_array()
    );

    for hand in [Hand::Left, Hand::Right] {
        let c = bridge.controller(hand);
        trace!(
            "{:?} controller pos {:?} trigger {} grip {} stick {:?}",
            hand,
            c.position.to_array(),
            c.trigger,
            c.grip,
            c.thumbstick.to_array()
        );
    }

    for eye in Eye::BOTH {
        let offset = bridge.eye_offset(eye);
        let projection = bridge.projection_matrix(eye, config.near_clip, config.far_clip);
        trace!(
            "{:?} eye offset {:.4} projection {:?}",
            eye,
            offset,
            projection.cols
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting...");
    debug!("Debug logging is active");

    let args: Vec<String> = std::env::args().collect();
    let config_path = config_path(&args);
    let config = load_config(&config_path).unwrap_or_else(|e| {
        error!("Failed to load config: {:#}. Using defaults.", e);
        SimConfig::default()
    });
    info!("Loaded Config: {:?}", config);

    if !(config.near_clip > 0.0 && config.far_clip > config.near_clip) {
        warn!(
            "Clip planes near={} far={} are degenerate; projections will not be finite",
            config.near_clip, config.far_clip
        );
    }

    let mut bridge = BridgeLibrary::load(Path::new(&config.bridge_library))?;
    let context = HostContext {
        log_callback: Some(forward_bridge_log),
    };
    if !bridge.initialize(&context) {
        bail!("Bridge initialization failed");
    }

    let (eye_width, eye_height) = bridge.eye_size();
    info!(
        "Eye target {}x{}, IPD {:.4} m",
        eye_width,
        eye_height,
        bridge.ipd()
    );

    let mut source = create_source(&config);
    source.initialize()?;

    let mut filter = config
        .smoothing_enabled
        .then(|| PoseFilter::new(config.smoothing_min_cutoff, config.smoothing_beta));

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received Ctrl-C, shutting down...");
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");

    info!("Entering frame loop...");

    let target_frame_duration = config.target_frame_duration();
    let mut frame_count: u64 = 0;
    let mut frames_since_log: u64 = 0;
    let mut last_log = Instant::now();
    let mut last_frame_time = Instant::now();
    let mut last_pose_time: Option<Instant> = None;

    while running.load(Ordering::SeqCst) {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last_frame_time).as_secs_f32();
        last_frame_time = frame_start;

        match source.poll(dt) {
            Ok(Some(packet)) => {
                let pose_dt = last_pose_time
                    .map(|t| frame_start.duration_since(t).as_secs_f32())
                    .unwrap_or(dt);
                last_pose_time = Some(frame_start);
                apply_packet(&mut bridge, &packet, filter.as_mut(), pose_dt);
            }
            Ok(None) => {}
            Err(e) => warn!("Pose source error: {:#}", e),
        }

        if bridge.begin_frame() {
            render_frame(&bridge, &config);
            bridge.end_frame();
            frame_count += 1;
            frames_since_log += 1;
        }

        if last_log.elapsed() >= STATUS_LOG_INTERVAL {
            let fps = frames_since_log as f32 / last_log.elapsed().as_secs_f32();
            info!(
                "Rendered {} frames (approx {:.1} FPS), head at {:?}",
                frame_count,
                fps,
                bridge.head_pose().position.to_array()
            );
            frames_since_log = 0;
            last_log = Instant::now();
        }

        if let Some(target_duration) = target_frame_duration {
            let elapsed = frame_start.elapsed();
            if elapsed < target_duration {
                thread::sleep(target_duration - elapsed);
            }
        }
    }

    info!("Shutting down...");
    source.unload();
    bridge.shutdown();
    debug!("Bridge initialized after shutdown: {}", bridge.is_initialized());
    Ok(())
}
