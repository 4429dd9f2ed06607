//! High-level device manager
//!
//! This module keeps the registry of logical controllers in lockstep with the
//! vendor session's connect/disconnect callbacks, and on every tick forwards
//! the freshest samples to the matching controller.
//!
//! Everything runs on the caller's thread: callbacks are queued by the
//! session and dispatched from [`DeviceManager::tick`], so the registry needs
//! no locking. Moving to a multi-threaded host requires mutual exclusion
//! around registry insert/remove/iterate.

use crate::config::Config;
use crate::controller::{LogicalController, PlayspaceTransform, TriggerThresholds};
use crate::input::{
    Capability, Handedness, InputSink, InputSourceType, SupportedControllerType, TrackingState,
};
use crate::sdk::{ControllerButton, ControllerKind, DeviceId, DeviceInfo, DeviceSession, Hand, SdkEvent, SessionConfig};
use log::{debug, error, info, trace, warn};
use std::collections::HashMap;

/// Controller type requested from the host for every device
const CONTROLLER_TYPE: SupportedControllerType = SupportedControllerType::GenericOpenVr;

/// Lifecycle of the vendor session as seen by the manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not started yet; the next tick starts it
    Idle,
    /// Started and subscribed to callbacks
    Running,
    /// Start failed; the manager ignores further ticks
    Inert,
    /// Shut down
    Stopped,
}

/// Map the SDK's reported kind/hand to a host handedness
pub fn handedness_for(info: &DeviceInfo) -> Handedness {
    match (info.kind, info.hand) {
        (ControllerKind::Control, Hand::Left) => Handedness::Left,
        (ControllerKind::Control, Hand::Right) => Handedness::Right,
        _ => Handedness::Other,
    }
}

/// Manager for the controllers of one vendor session
pub struct DeviceManager<D, S>
where
    D: DeviceSession,
    S: InputSink,
{
    session: D,
    sink: S,
    session_config: SessionConfig,
    thresholds: TriggerThresholds,
    playspace: PlayspaceTransform,
    /// Logical controllers by device id
    registry: HashMap<DeviceId, LogicalController>,
    state: SessionState,
}

impl<D, S> DeviceManager<D, S>
where
    D: DeviceSession,
    S: InputSink,
{
    /// Create a new manager; the session is started on the first tick
    pub fn new(config: &Config, session: D, sink: S) -> Self {
        Self {
            session,
            sink,
            session_config: config.session_config(),
            thresholds: config.trigger_thresholds(),
            playspace: PlayspaceTransform::IDENTITY,
            registry: HashMap::new(),
            state: SessionState::Idle,
        }
    }

    /// Run one polling tick
    pub fn tick(&mut self) {
        match self.state {
            SessionState::Idle => self.start_session(),
            SessionState::Running => {}
            SessionState::Inert | SessionState::Stopped => return,
        }

        if self.state != SessionState::Running {
            return;
        }

        for event in self.session.poll_events() {
            self.handle_event(event);
        }

        for sample in self.session.samples() {
            match self.registry.get_mut(&sample.id) {
                Some(controller) => {
                    controller.apply_sample(&sample, &self.playspace, &mut self.sink);
                }
                None => trace!("Dropping sample for unregistered device {}", sample.id),
            }
        }
    }

    /// Start the session, synchronize already-connected controllers and
    /// subscribe to callbacks
    fn start_session(&mut self) {
        if !self.session.is_started() {
            if let Err(e) = self.session.start(&self.session_config) {
                error!("Failed starting device session, disabling manager: {}", e);
                self.state = SessionState::Inert;
                return;
            }
            info!("✓ Device session started");

            // Controllers connected before the session started never get a
            // connect callback.
            self.sync_connected();
        }

        self.session.subscribe();
        self.state = SessionState::Running;
    }

    /// Register every device the session already reports as connected
    fn sync_connected(&mut self) {
        let mut pending: Vec<DeviceId> = [Hand::Right, Hand::Left]
            .iter()
            .filter_map(|hand| self.session.device_by_hand(*hand))
            .map(|info| info.id)
            .collect();

        for info in self.session.connected_devices() {
            if !pending.contains(&info.id) {
                pending.push(info.id);
            }
        }

        if !pending.is_empty() {
            info!("Synchronizing {} already-connected controller(s)", pending.len());
        }

        for id in pending {
            if !self.registry.contains_key(&id) {
                self.on_connected(id);
            }
        }
    }

    /// Dispatch one session callback
    pub fn handle_event(&mut self, event: SdkEvent) {
        match event {
            SdkEvent::Connected(id) => self.on_connected(id),
            SdkEvent::Disconnected(id) => self.on_disconnected(id),
            SdkEvent::ButtonDown(id, button) => self.on_button_down(id, button),
            SdkEvent::ButtonUp(id, button) => self.on_button_up(id, button),
        }
    }

    /// Device connected callback
    pub fn on_connected(&mut self, id: DeviceId) {
        if self.registry.contains_key(&id) {
            warn!("Connected controller with id {} already connected", id);
            return;
        }

        let Some(info) = self.session.device(id) else {
            warn!("Controller {} connected but the session does not report it", id);
            return;
        };

        let handedness = handedness_for(&info);
        let pointers = self.sink.request_pointers(CONTROLLER_TYPE, handedness);
        let name = format!("{} Controller {}", CONTROLLER_TYPE, handedness);
        let source = self.sink.request_input_source(&name, pointers, InputSourceType::Controller);

        let controller = LogicalController::new(id, handedness, TrackingState::Tracked, source, self.thresholds);
        controller.bind_pointers();

        info!("✓ Controller {} connected as {} ({:?})", id, handedness, info.kind);

        let controller = self.registry.entry(id).or_insert(controller);
        self.sink.raise_source_detected(controller.input_source(), controller);
    }

    /// Device disconnected callback
    pub fn on_disconnected(&mut self, id: DeviceId) {
        let Some(controller) = self.registry.remove(&id) else {
            debug!("Disconnect for unregistered device {}", id);
            return;
        };

        self.sink.raise_source_lost(controller.input_source(), &controller);
        controller.release_pointers();

        info!("Controller {} ({}) disconnected", id, controller.handedness());
    }

    /// Button down callback; unknown ids are dropped
    pub fn on_button_down(&mut self, id: DeviceId, button: ControllerButton) {
        if let Some(controller) = self.registry.get_mut(&id) {
            controller.on_button_down(button);
        }
    }

    /// Button up callback; unknown ids are dropped
    pub fn on_button_up(&mut self, id: DeviceId, button: ControllerButton) {
        if let Some(controller) = self.registry.get_mut(&id) {
            controller.on_button_up(button);
        }
    }

    /// Unsubscribe, stop the session and lose every registered controller
    pub fn shutdown(&mut self) {
        if self.state == SessionState::Running {
            self.session.unsubscribe();
        }
        if self.session.is_started() {
            self.session.stop();
        }

        if !self.registry.is_empty() {
            info!("Releasing {} controller(s)", self.registry.len());
        }
        for (_, controller) in self.registry.drain() {
            self.sink.raise_source_lost(controller.input_source(), &controller);
            controller.release_pointers();
        }

        self.state = SessionState::Stopped;
    }

    /// Update the play-space transform applied to every sample
    pub fn set_playspace(&mut self, playspace: PlayspaceTransform) {
        self.playspace = playspace;
    }

    pub fn playspace(&self) -> PlayspaceTransform {
        self.playspace
    }

    /// The platform only supports motion controllers
    pub fn check_capability(&self, capability: Capability) -> bool {
        capability == Capability::MotionController
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn controller(&self, id: DeviceId) -> Option<&LogicalController> {
        self.registry.get(&id)
    }

    /// Iterate over every registered controller
    pub fn active_controllers(&self) -> impl Iterator<Item = &LogicalController> {
        self.registry.values()
    }

    pub fn controller_count(&self) -> usize {
        self.registry.len()
    }

    pub fn session(&self) -> &D {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut D {
        &mut self.session
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

/// Shut the session down if the manager is dropped while running
impl<D, S> Drop for DeviceManager<D, S>
where
    D: DeviceSession,
    S: InputSink,
{
    fn drop(&mut self) {
        if self.state == SessionState::Running {
            info!("Shutting down device manager (Drop trait)...");
            self.shutdown();
        }
    }
}
