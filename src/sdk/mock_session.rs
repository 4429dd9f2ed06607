//! Mock device session for testing.
//!
//! This session keeps devices in memory and queues callbacks only while
//! subscribed, like the vendor SDK does. Useful for exercising the manager
//! without hardware.

use super::types::{ControllerButton, DeviceId, DeviceInfo, Hand, RawSample, SdkEvent, SessionConfig};
use super::{DeviceSession, SdkError};
use glam::{Quat, Vec3};
use log::{debug, info};
use std::collections::BTreeMap;

/// In-memory session driven by test code or a replay trace.
#[derive(Debug, Default)]
pub struct MockSession {
    devices: BTreeMap<DeviceId, RawSample>,
    events: Vec<SdkEvent>,
    started: bool,
    subscribed: bool,
    /// Status code returned by the next `start`, if it should fail
    fail_start: Option<i32>,
    start_calls: usize,
    last_config: Option<SessionConfig>,
}

impl MockSession {
    /// Create a new mock session with no devices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `start` call fail with the given status code.
    pub fn fail_next_start(&mut self, status: i32) {
        self.fail_start = Some(status);
    }

    /// Number of times `start` has been called.
    pub fn start_calls(&self) -> usize {
        self.start_calls
    }

    /// Configuration passed to the last successful `start`.
    pub fn last_config(&self) -> Option<SessionConfig> {
        self.last_config
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Connect a device. A callback is queued only while subscribed.
    pub fn connect(&mut self, info: DeviceInfo) {
        info!("[MOCK SESSION] Device {} connected ({:?}, {:?})", info.id, info.kind, info.hand);
        self.devices.insert(info.id, RawSample::at_rest(info));
        self.queue(SdkEvent::Connected(info.id));
    }

    /// Disconnect a device. Unknown ids are ignored.
    pub fn disconnect(&mut self, id: DeviceId) {
        if self.devices.remove(&id).is_some() {
            info!("[MOCK SESSION] Device {} disconnected", id);
            self.queue(SdkEvent::Disconnected(id));
        }
    }

    /// Update the tracked state of a connected device.
    pub fn update(&mut self, id: DeviceId, position: Vec3, orientation: Quat, trigger: f32) {
        if let Some(sample) = self.devices.get_mut(&id) {
            sample.position = position;
            sample.orientation = orientation;
            sample.trigger = trigger;
        } else {
            debug!("[MOCK SESSION] Ignoring update for unknown device {}", id);
        }
    }

    /// Set only the trigger value of a connected device.
    pub fn set_trigger(&mut self, id: DeviceId, trigger: f32) {
        if let Some(sample) = self.devices.get_mut(&id) {
            sample.trigger = trigger;
        }
    }

    /// Queue a button callback for a device.
    pub fn button(&mut self, id: DeviceId, button: ControllerButton, pressed: bool) {
        let event = if pressed {
            SdkEvent::ButtonDown(id, button)
        } else {
            SdkEvent::ButtonUp(id, button)
        };
        self.queue(event);
    }

    /// Queue an arbitrary callback, regardless of device state.
    pub fn inject(&mut self, event: SdkEvent) {
        self.queue(event);
    }

    fn queue(&mut self, event: SdkEvent) {
        if self.subscribed {
            self.events.push(event);
        }
    }
}

impl DeviceSession for MockSession {
    fn is_started(&self) -> bool {
        self.started
    }

    fn start(&mut self, config: &SessionConfig) -> Result<(), SdkError> {
        self.start_calls += 1;
        if let Some(status) = self.fail_start.take() {
            return Err(SdkError::StartFailed(status));
        }
        info!("[MOCK SESSION] Started (cfuid={})", config.request_cfuid);
        self.started = true;
        self.last_config = Some(*config);
        Ok(())
    }

    fn stop(&mut self) {
        if self.started {
            info!("[MOCK SESSION] Stopped");
        }
        self.started = false;
    }

    fn subscribe(&mut self) {
        self.subscribed = true;
    }

    fn unsubscribe(&mut self) {
        self.subscribed = false;
        self.events.clear();
    }

    fn poll_events(&mut self) -> Vec<SdkEvent> {
        std::mem::take(&mut self.events)
    }

    fn device(&self, id: DeviceId) -> Option<DeviceInfo> {
        self.devices.get(&id).map(RawSample::info)
    }

    fn device_by_hand(&self, hand: Hand) -> Option<DeviceInfo> {
        self.devices.values().find(|s| s.hand == hand).map(RawSample::info)
    }

    fn connected_devices(&self) -> Vec<DeviceInfo> {
        self.devices.values().map(RawSample::info).collect()
    }

    fn samples(&self) -> Vec<RawSample> {
        if !self.started {
            return Vec::new();
        }
        self.devices.values().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::ControllerKind;

    fn right() -> DeviceInfo {
        DeviceInfo { id: 1, kind: ControllerKind::Control, hand: Hand::Right }
    }

    #[test]
    fn callbacks_only_queued_while_subscribed() {
        let mut session = MockSession::new();
        session.connect(right());
        assert!(session.poll_events().is_empty());

        session.subscribe();
        session.disconnect(1);
        assert_eq!(session.poll_events(), vec![SdkEvent::Disconnected(1)]);
        assert!(session.poll_events().is_empty());
    }

    #[test]
    fn failing_start_reports_status_once() {
        let mut session = MockSession::new();
        session.fail_next_start(-3);
        assert_eq!(session.start(&SessionConfig::default()), Err(SdkError::StartFailed(-3)));
        assert!(!session.is_started());
        assert!(session.start(&SessionConfig::default()).is_ok());
        assert_eq!(session.start_calls(), 2);
    }

    #[test]
    fn samples_empty_until_started() {
        let mut session = MockSession::new();
        session.connect(right());
        assert!(session.samples().is_empty());
        session.start(&SessionConfig::default()).unwrap();
        assert_eq!(session.samples().len(), 1);
        assert_eq!(session.device_by_hand(Hand::Right), Some(right()));
        assert_eq!(session.device_by_hand(Hand::Left), None);
    }
}
