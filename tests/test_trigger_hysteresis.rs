//! Integration tests for select debouncing and pose publication

use glam::{Quat, Vec3};
use mlctl_bridge::input::{InputEvent, MockInputSink};
use mlctl_bridge::sdk::{ControllerKind, DeviceInfo, Hand, MockSession};
use mlctl_bridge::{Config, DeviceManager};

#[derive(Debug, PartialEq)]
enum Select {
    Down,
    Up,
}

/// Feed trigger values one tick at a time and collect the select edge each raised
fn select_per_tick(config: &Config, values: &[f32]) -> Vec<Option<Select>> {
    let mut manager = DeviceManager::new(config, MockSession::new(), MockInputSink::new());
    manager.tick();
    manager
        .session_mut()
        .connect(DeviceInfo { id: 1, kind: ControllerKind::Control, hand: Hand::Right });
    manager.tick();
    manager.sink_mut().take_events();

    values
        .iter()
        .map(|value| {
            manager.session_mut().set_trigger(1, *value);
            manager.tick();
            let events = manager.sink_mut().take_events();
            let selects: Vec<Select> = events
                .iter()
                .filter_map(|e| match e {
                    InputEvent::InputDown { .. } => Some(Select::Down),
                    InputEvent::InputUp { .. } => Some(Select::Up),
                    _ => None,
                })
                .collect();
            assert!(selects.len() <= 1);
            selects.into_iter().next()
        })
        .collect()
}

#[test]
fn test_press_then_release() {
    assert_eq!(
        select_per_tick(&Config::default(), &[0.25, 0.18, 0.1]),
        vec![Some(Select::Down), None, Some(Select::Up)]
    );
}

#[test]
fn test_dead_zone_holds_press() {
    assert_eq!(
        select_per_tick(&Config::default(), &[0.1, 0.25, 0.19, 0.05]),
        vec![None, Some(Select::Down), None, Some(Select::Up)]
    );
}

#[test]
fn test_configured_thresholds() {
    let config = Config::parse(
        r#"
        [settings]
        trigger_press_threshold = 0.6
        trigger_release_threshold = 0.4
        "#,
    )
    .unwrap();

    assert_eq!(
        select_per_tick(&config, &[0.5, 0.7, 0.45, 0.3]),
        vec![None, Some(Select::Down), None, Some(Select::Up)]
    );
}

#[test]
fn test_identical_sample_publishes_pose_input_once() {
    let mut manager = DeviceManager::new(&Config::default(), MockSession::new(), MockInputSink::new());
    manager.tick();
    manager
        .session_mut()
        .connect(DeviceInfo { id: 2, kind: ControllerKind::Control, hand: Hand::Left });
    manager.session_mut().update(2, Vec3::new(0.2, 1.1, -0.3), Quat::from_rotation_y(0.5), 0.0);

    manager.tick();
    manager.tick();

    let sink = manager.sink();
    assert_eq!(sink.count(|e| matches!(e, InputEvent::SourcePoseChanged { device: 2, .. })), 2);
    assert_eq!(sink.count(|e| matches!(e, InputEvent::PoseInputChanged { .. })), 1);

    manager.session_mut().update(2, Vec3::new(0.2, 1.2, -0.3), Quat::from_rotation_y(0.5), 0.0);
    manager.tick();
    assert_eq!(manager.sink().count(|e| matches!(e, InputEvent::PoseInputChanged { .. })), 2);
}

#[test]
fn test_mobile_app_samples_raise_nothing() {
    let mut manager = DeviceManager::new(&Config::default(), MockSession::new(), MockInputSink::new());
    manager.tick();
    manager
        .session_mut()
        .connect(DeviceInfo { id: 3, kind: ControllerKind::MobileApp, hand: Hand::Right });
    manager.tick();
    manager.sink_mut().take_events();

    manager.session_mut().set_trigger(3, 1.0);
    manager.tick();

    assert!(manager.sink().events().is_empty());
    assert!(!manager.controller(3).unwrap().is_select_pressed());
}
