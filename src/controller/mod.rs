//! Logical controller support
//!
//! This module provides the per-device state the manager keeps:
//! - Play-space pose transformation
//! - Trigger debouncing
//! - Host event translation

pub mod logical;
pub mod pose;
pub mod trigger;

pub use logical::LogicalController;
pub use pose::{PlayspaceTransform, Pose};
pub use trigger::{TriggerDebouncer, TriggerEdge, TriggerState, TriggerThresholds};
