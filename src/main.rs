//! Controller bridge replay runner
//!
//! Replays a recorded trace of vendor session activity through the device
//! manager and prints every host input event it raises.
//!
//! Usage: mlctl-bridge [config.toml] [trace.json]

use anyhow::Context;
use glam::{Quat, Vec3};
use log::{info, warn};
use mlctl_bridge::controller::Pose;
use mlctl_bridge::sdk::{MockSession, Trace};
use mlctl_bridge::{ChannelInputSink, Config, DeferredPlacement, DeviceManager, InputEvent};
use std::thread;
use std::time::Instant;

const DEFAULT_TRACE: &str = "traces/demo.json";

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next();
    let trace_path = args.next().unwrap_or_else(|| DEFAULT_TRACE.to_string());

    let config = match config_path {
        Some(path) => Config::load(&path).with_context(|| format!("loading config {}", path))?,
        None => Config::load_default().unwrap_or_else(|e| {
            warn!("Using built-in defaults ({})", e);
            Config::default()
        }),
    };

    let trace = Trace::load(&trace_path).with_context(|| format!("loading trace {}", trace_path))?;
    info!("Replaying {} step(s), {} tick(s)", trace.steps.len(), trace.tick_count());

    let (sink, receiver) = ChannelInputSink::new(
        config.settings.event_channel_capacity,
        config.settings.pointers_per_controller,
    );

    let printer = thread::Builder::new()
        .name("printer".to_string())
        .spawn(move || {
            let mut count = 0usize;
            for event in receiver.iter() {
                print_event(&event);
                count += 1;
            }
            count
        })?;

    let mut manager = DeviceManager::new(&config, MockSession::new(), sink);
    let mut placement = DeferredPlacement::schedule(
        Pose::new(Vec3::new(0.0, 0.0, 1.5), Quat::IDENTITY),
        config.placement_delay(),
        Instant::now(),
    );

    for step in &trace.steps {
        if step.apply(manager.session_mut()) {
            continue;
        }
        manager.tick();
        if let Some(pose) = placement.poll(Instant::now(), &Pose::ZERO_IDENTITY) {
            println!("placed object at {:?}", pose.position);
        }
        thread::sleep(config.tick_interval());
    }

    manager.shutdown();
    let dropped = manager.sink().dropped();
    drop(manager);

    let count = printer.join().map_err(|_| anyhow::anyhow!("printer thread panicked"))?;
    info!("✓ Replay finished: {} event(s) raised, {} dropped", count, dropped);

    Ok(())
}

fn print_event(event: &InputEvent) {
    match event {
        InputEvent::SourceDetected { source, device, handedness } => {
            println!("[{:?}] source detected: device {} ({})", source, device, handedness)
        }
        InputEvent::SourceLost { source, device, handedness } => {
            println!("[{:?}] source lost: device {} ({})", source, device, handedness)
        }
        InputEvent::SourcePoseChanged { source, pose, .. } => {
            println!("[{:?}] pose {:?}", source, pose.position)
        }
        InputEvent::PoseInputChanged { source, action, pose, .. } => {
            println!("[{:?}] {} -> {:?}", source, action.description, pose.position)
        }
        InputEvent::InputDown { source, action, .. } => println!("[{:?}] {} down", source, action.description),
        InputEvent::InputUp { source, action, .. } => println!("[{:?}] {} up", source, action.description),
    }
}
