//! mlctl-bridge: motion controller to mixed-reality input bridge
//!
//! This library tracks the controllers reported by a vendor device session and
//! translates their poses and trigger into host input events.

pub mod config;
pub mod controller;
pub mod input;
pub mod manager;
pub mod placement;
pub mod sdk;

// Re-export commonly used items
pub use config::{Config, ConfigError};
pub use controller::{LogicalController, PlayspaceTransform, Pose};
pub use input::{ChannelInputSink, Handedness, InputEvent, InputSink, MockInputSink};
pub use manager::DeviceManager;
pub use placement::DeferredPlacement;
pub use sdk::{DeviceSession, MockSession, SdkError};
