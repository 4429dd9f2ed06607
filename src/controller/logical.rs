//! Logical controller state
//!
//! One [`LogicalController`] exists per connected device. It turns raw SDK
//! samples into play-space poses and select edges, and raises the matching
//! host events.

use super::pose::{PlayspaceTransform, Pose};
use super::trigger::{TriggerDebouncer, TriggerEdge, TriggerThresholds};
use crate::input::{Handedness, InputAction, InputSink, InputSource, TrackingState};
use crate::sdk::{ControllerButton, ControllerKind, DeviceId, RawSample};
use log::{debug, trace};

/// Processed state of one physical controller
#[derive(Debug)]
pub struct LogicalController {
    device_id: DeviceId,
    handedness: Handedness,
    tracking_state: TrackingState,
    input_source: InputSource,
    /// Pose in play space from the last accepted sample
    pose: Pose,
    /// Last pose raised as pointer pose input
    published_pose: Option<Pose>,
    trigger: TriggerDebouncer,
    bumper_held: bool,
}

impl LogicalController {
    pub fn new(
        device_id: DeviceId,
        handedness: Handedness,
        tracking_state: TrackingState,
        input_source: InputSource,
        thresholds: TriggerThresholds,
    ) -> Self {
        Self {
            device_id,
            handedness,
            tracking_state,
            input_source,
            pose: Pose::ZERO_IDENTITY,
            published_pose: None,
            trigger: TriggerDebouncer::new(thresholds),
            bumper_held: false,
        }
    }

    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    pub fn tracking_state(&self) -> TrackingState {
        self.tracking_state
    }

    pub fn input_source(&self) -> &InputSource {
        &self.input_source
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn trigger(&self) -> &TriggerDebouncer {
        &self.trigger
    }

    pub fn is_select_pressed(&self) -> bool {
        self.trigger.is_pressed()
    }

    pub fn is_bumper_held(&self) -> bool {
        self.bumper_held
    }

    /// Point every pointer of the input source back at this controller
    pub fn bind_pointers(&self) {
        for pointer in &self.input_source.pointers {
            pointer.set_controller(Some(self.device_id));
        }
    }

    /// Clear the back-reference of every pointer
    pub fn release_pointers(&self) {
        for pointer in &self.input_source.pointers {
            pointer.set_controller(None);
        }
    }

    /// Apply one raw sample. Returns false if the sample kind was ignored.
    pub fn apply_sample<S>(&mut self, sample: &RawSample, playspace: &PlayspaceTransform, sink: &mut S) -> bool
    where
        S: InputSink + ?Sized,
    {
        if sample.kind != ControllerKind::Control {
            trace!("Ignoring {:?} sample for device {}", sample.kind, sample.id);
            return false;
        }

        self.pose = playspace.transform_pose(sample.position, sample.orientation);
        sink.raise_source_pose_changed(&self.input_source, self, self.pose);

        if self.published_pose != Some(self.pose) {
            self.published_pose = Some(self.pose);
            sink.raise_pose_input_changed(
                &self.input_source,
                self.handedness,
                InputAction::POINTER_POSE,
                self.pose,
            );
        }

        match self.trigger.update(sample.trigger) {
            Some(TriggerEdge::Down) => {
                debug!("Device {} select down ({:.2})", self.device_id, sample.trigger);
                sink.raise_input_down(&self.input_source, self.handedness, InputAction::SELECT);
            }
            Some(TriggerEdge::Up) => {
                debug!("Device {} select up ({:.2})", self.device_id, sample.trigger);
                sink.raise_input_up(&self.input_source, self.handedness, InputAction::SELECT);
            }
            None => {}
        }

        true
    }

    /// Button press callback. Only the bumper is recognized and it raises
    /// no host event; application bindings hook in here.
    pub fn on_button_down(&mut self, button: ControllerButton) {
        if button == ControllerButton::Bumper {
            self.bumper_held = true;
            debug!("Device {} bumper down", self.device_id);
        }
    }

    pub fn on_button_up(&mut self, button: ControllerButton) {
        if button == ControllerButton::Bumper {
            self.bumper_held = false;
            debug!("Device {} bumper up", self.device_id);
        }
    }
}
