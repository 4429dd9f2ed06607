//! Device SDK type definitions
//!
//! This module defines the data the vendor session reports: device identity,
//! per-tick raw samples and the callback events delivered to the manager.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Device id assigned by the SDK when a controller connects
pub type DeviceId = u8;

/// Hand reported by the SDK for a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Left,
    Right,
}

/// Kind of device reported by the SDK
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerKind {
    /// Physical handheld controller
    Control,
    /// Phone companion app acting as a controller
    MobileApp,
}

/// Buttons reported through the button callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerButton {
    Bumper,
    HomeTap,
}

/// Static description of a connected device
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceInfo {
    pub id: DeviceId,
    pub kind: ControllerKind,
    pub hand: Hand,
}

/// Per-tick raw state of one device, in device-local tracking space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    pub id: DeviceId,
    pub kind: ControllerKind,
    pub hand: Hand,
    pub position: Vec3,
    pub orientation: Quat,
    /// Analog trigger value (0.0 released, 1.0 fully pulled)
    pub trigger: f32,
}

impl RawSample {
    /// Sample at the tracking origin with the trigger released
    pub fn at_rest(info: DeviceInfo) -> Self {
        Self {
            id: info.id,
            kind: info.kind,
            hand: info.hand,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            trigger: 0.0,
        }
    }

    pub fn info(&self) -> DeviceInfo {
        DeviceInfo {
            id: self.id,
            kind: self.kind,
            hand: self.hand,
        }
    }
}

/// Callback notifications queued by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdkEvent {
    Connected(DeviceId),
    Disconnected(DeviceId),
    ButtonDown(DeviceId, ControllerButton),
    ButtonUp(DeviceId, ControllerButton),
}

/// Parameters passed to the session on start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// SDK-side trigger down threshold
    pub trigger_down_threshold: f32,
    /// SDK-side trigger up threshold
    pub trigger_up_threshold: f32,
    /// Request coordinate-frame UIDs for the controllers
    pub request_cfuid: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            trigger_down_threshold: 0.8,
            trigger_up_threshold: 0.2,
            request_cfuid: true,
        }
    }
}
