//! Replays the bundled demo trace with logging enabled

use mlctl_bridge::input::{InputEvent, MockInputSink};
use mlctl_bridge::sdk::{MockSession, Trace};
use mlctl_bridge::{ChannelInputSink, Config, DeviceManager};

const DEMO_TRACE: &str = include_str!("../traces/demo.json");
const DEFAULT_CONFIG: &str = include_str!("../configs/default.toml");

fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

#[test]
fn test_bundled_config_is_valid() {
    let config = Config::parse(DEFAULT_CONFIG).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_demo_trace_through_mock_sink() {
    init_logging();

    let trace = Trace::parse(DEMO_TRACE).unwrap();
    let mut manager = DeviceManager::new(&Config::default(), MockSession::new(), MockInputSink::new());

    for step in &trace.steps {
        if !step.apply(manager.session_mut()) {
            manager.tick();
        }
    }
    manager.shutdown();

    let sink = manager.sink();
    assert_eq!(sink.count(|e| matches!(e, InputEvent::SourceDetected { .. })), 2);
    assert_eq!(sink.count(|e| matches!(e, InputEvent::SourceLost { .. })), 2);
    assert_eq!(sink.count(|e| matches!(e, InputEvent::InputDown { .. })), 2);
    assert_eq!(sink.count(|e| matches!(e, InputEvent::InputUp { .. })), 1);
    assert!(matches!(sink.events().first(), Some(InputEvent::SourceDetected { device: 1, .. })));
}

#[test]
fn test_demo_trace_through_channel_sink() {
    init_logging();

    let trace = Trace::parse(DEMO_TRACE).unwrap();
    let (sink, receiver) = ChannelInputSink::new(1024, 2);
    let mut manager = DeviceManager::new(&Config::default(), MockSession::new(), sink);

    for step in &trace.steps {
        if !step.apply(manager.session_mut()) {
            manager.tick();
        }
    }
    manager.shutdown();
    assert_eq!(manager.sink().dropped(), 0);
    drop(manager);

    let events: Vec<InputEvent> = receiver.iter().collect();
    assert!(matches!(events.first(), Some(InputEvent::SourceDetected { .. })));
    assert!(matches!(events.last(), Some(InputEvent::SourceLost { device: 2, .. })));
}
