//! Host input system abstraction
//!
//! This module provides the interface the bridge raises events through, and
//! the handles (input sources, pointers) the host hands out for a controller.

pub mod channel_sink;
pub mod mock_sink;

pub use channel_sink::ChannelInputSink;
pub use mock_sink::MockInputSink;

use crate::controller::{LogicalController, Pose};
use crate::sdk::DeviceId;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Which hand a logical controller is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
    Other,
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Handedness::Left => "Left",
            Handedness::Right => "Right",
            Handedness::Other => "Other",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    Tracked,
    NotTracked,
}

/// Controller type the host uses to pick pointer prefabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportedControllerType {
    GenericOpenVr,
}

impl fmt::Display for SupportedControllerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupportedControllerType::GenericOpenVr => f.write_str("GenericOpenVR"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSourceType {
    Controller,
}

/// Host capabilities a device manager can be queried for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    MotionController,
    ArticulatedHand,
    EyeTracking,
    VoiceCommand,
}

/// Opaque id of an input source handed out by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(pub u32);

/// Input action raised alongside pose and button events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputAction {
    pub id: u32,
    pub description: &'static str,
}

impl InputAction {
    pub const POINTER_POSE: InputAction = InputAction { id: 4, description: "Pointer Pose" };
    pub const SELECT: InputAction = InputAction { id: 1, description: "Select" };
}

/// Host pointer with a non-owning link back to its controller.
///
/// Clones share the same link, so the host sees the bridge set and clear it.
#[derive(Debug, Clone)]
pub struct PointerHandle {
    id: u32,
    controller: Rc<Cell<Option<DeviceId>>>,
}

impl PointerHandle {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            controller: Rc::new(Cell::new(None)),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Device id of the controller this pointer belongs to, if any
    pub fn controller(&self) -> Option<DeviceId> {
        self.controller.get()
    }

    pub fn set_controller(&self, controller: Option<DeviceId>) {
        self.controller.set(controller);
    }
}

/// Input source handed out by the host for one controller
#[derive(Debug, Clone)]
pub struct InputSource {
    pub id: SourceId,
    pub name: String,
    pub source_type: InputSourceType,
    pub pointers: Vec<PointerHandle>,
}

/// Every event the bridge can raise, in recorded form
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    SourceDetected { source: SourceId, device: DeviceId, handedness: Handedness },
    SourceLost { source: SourceId, device: DeviceId, handedness: Handedness },
    SourcePoseChanged { source: SourceId, device: DeviceId, pose: Pose },
    PoseInputChanged { source: SourceId, handedness: Handedness, action: InputAction, pose: Pose },
    InputDown { source: SourceId, handedness: Handedness, action: InputAction },
    InputUp { source: SourceId, handedness: Handedness, action: InputAction },
}

impl InputEvent {
    pub fn source(&self) -> SourceId {
        match *self {
            InputEvent::SourceDetected { source, .. }
            | InputEvent::SourceLost { source, .. }
            | InputEvent::SourcePoseChanged { source, .. }
            | InputEvent::PoseInputChanged { source, .. }
            | InputEvent::InputDown { source, .. }
            | InputEvent::InputUp { source, .. } => source,
        }
    }
}

/// Unified interface to the host input system
pub trait InputSink {
    /// Request pointer handles for a controller of the given type and hand
    fn request_pointers(
        &mut self,
        controller_type: SupportedControllerType,
        handedness: Handedness,
    ) -> Vec<PointerHandle>;

    /// Request a new generic input source owning the given pointers
    fn request_input_source(
        &mut self,
        name: &str,
        pointers: Vec<PointerHandle>,
        source_type: InputSourceType,
    ) -> InputSource;

    /// Deliver a raised event to the host
    fn raise(&mut self, event: InputEvent);

    fn raise_source_detected(&mut self, source: &InputSource, controller: &LogicalController) {
        self.raise(InputEvent::SourceDetected {
            source: source.id,
            device: controller.device_id(),
            handedness: controller.handedness(),
        });
    }

    fn raise_source_lost(&mut self, source: &InputSource, controller: &LogicalController) {
        self.raise(InputEvent::SourceLost {
            source: source.id,
            device: controller.device_id(),
            handedness: controller.handedness(),
        });
    }

    fn raise_source_pose_changed(&mut self, source: &InputSource, controller: &LogicalController, pose: Pose) {
        self.raise(InputEvent::SourcePoseChanged {
            source: source.id,
            device: controller.device_id(),
            pose,
        });
    }

    fn raise_pose_input_changed(
        &mut self,
        source: &InputSource,
        handedness: Handedness,
        action: InputAction,
        pose: Pose,
    ) {
        self.raise(InputEvent::PoseInputChanged { source: source.id, handedness, action, pose });
    }

    fn raise_input_down(&mut self, source: &InputSource, handedness: Handedness, action: InputAction) {
        self.raise(InputEvent::InputDown { source: source.id, handedness, action });
    }

    fn raise_input_up(&mut self, source: &InputSource, handedness: Handedness, action: InputAction) {
        self.raise(InputEvent::InputUp { source: source.id, handedness, action });
    }
}

/// Hands out source and pointer ids for the in-crate sinks
#[derive(Debug)]
pub(crate) struct HandleAllocator {
    next_source: u32,
    next_pointer: u32,
    pointers_per_controller: usize,
}

impl HandleAllocator {
    pub(crate) fn new(pointers_per_controller: usize) -> Self {
        Self {
            next_source: 1,
            next_pointer: 1,
            pointers_per_controller,
        }
    }

    pub(crate) fn pointers(&mut self) -> Vec<PointerHandle> {
        (0..self.pointers_per_controller)
            .map(|_| {
                let pointer = PointerHandle::new(self.next_pointer);
                self.next_pointer += 1;
                pointer
            })
            .collect()
    }

    pub(crate) fn source(
        &mut self,
        name: &str,
        pointers: Vec<PointerHandle>,
        source_type: InputSourceType,
    ) -> InputSource {
        let id = SourceId(self.next_source);
        self.next_source += 1;
        InputSource {
            id,
            name: name.to_string(),
            source_type,
            pointers,
        }
    }
}
