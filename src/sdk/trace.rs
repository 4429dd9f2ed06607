//! Recorded SDK activity for replay
//!
//! A trace is a JSON document listing what the vendor session did, one step at
//! a time. The replay binary feeds it into a [`MockSession`] and ticks the
//! manager whenever a `tick` step is reached.
//!
//! ```json
//! { "steps": [
//!     { "type": "connect", "id": 1, "kind": "control", "hand": "right" },
//!     { "type": "tick" },
//!     { "type": "sample", "id": 1, "position": [0.0, 1.2, 0.3], "trigger": 0.25 },
//!     { "type": "tick" }
//! ] }
//! ```

use super::mock_session::MockSession;
use super::types::{ControllerButton, ControllerKind, DeviceId, DeviceInfo, Hand};
use glam::{Quat, Vec3};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("Failed to read trace file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse trace file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One recorded step of session activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceStep {
    Connect {
        id: DeviceId,
        #[serde(default = "default_kind")]
        kind: ControllerKind,
        hand: Hand,
    },
    Disconnect {
        id: DeviceId,
    },
    Sample {
        id: DeviceId,
        #[serde(default)]
        position: Vec3,
        #[serde(default = "default_orientation")]
        orientation: Quat,
        #[serde(default)]
        trigger: f32,
    },
    Button {
        id: DeviceId,
        button: ControllerButton,
        pressed: bool,
    },
    /// Make the next session start fail with this status
    FailStart {
        status: i32,
    },
    /// Run one manager tick
    Tick,
}

fn default_kind() -> ControllerKind { ControllerKind::Control }
fn default_orientation() -> Quat { Quat::IDENTITY }

impl TraceStep {
    /// Apply a non-tick step to the session; returns false for `Tick`.
    pub fn apply(&self, session: &mut MockSession) -> bool {
        match *self {
            TraceStep::Connect { id, kind, hand } => {
                session.connect(DeviceInfo { id, kind, hand });
            }
            TraceStep::Disconnect { id } => session.disconnect(id),
            TraceStep::Sample { id, position, orientation, trigger } => {
                session.update(id, position, orientation, trigger);
            }
            TraceStep::Button { id, button, pressed } => session.button(id, button, pressed),
            TraceStep::FailStart { status } => session.fail_next_start(status),
            TraceStep::Tick => return false,
        }
        true
    }
}

/// A full replay trace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub steps: Vec<TraceStep>,
}

impl Trace {
    /// Load a trace from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TraceError> {
        let path_ref = path.as_ref();
        info!("Loading trace from: {}", path_ref.display());

        let content = std::fs::read_to_string(path_ref)?;
        let trace = Self::parse(&content)?;

        debug!("  - Steps: {}", trace.steps.len());
        Ok(trace)
    }

    /// Parse a trace from a JSON string
    pub fn parse(content: &str) -> Result<Self, TraceError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Number of `tick` steps in the trace
    pub fn tick_count(&self) -> usize {
        self.steps.iter().filter(|s| matches!(s, TraceStep::Tick)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_steps_with_defaults() {
        let trace = Trace::parse(
            r#"{ "steps": [
                { "type": "connect", "id": 2, "hand": "left" },
                { "type": "sample", "id": 2, "trigger": 0.5 },
                { "type": "button", "id": 2, "button": "bumper", "pressed": true },
                { "type": "tick" }
            ] }"#,
        )
        .unwrap();

        assert_eq!(trace.steps.len(), 4);
        assert_eq!(
            trace.steps[0],
            TraceStep::Connect { id: 2, kind: ControllerKind::Control, hand: Hand::Left }
        );
        match &trace.steps[1] {
            TraceStep::Sample { position, orientation, trigger, .. } => {
                assert_eq!(*position, Vec3::ZERO);
                assert_eq!(*orientation, Quat::IDENTITY);
                assert_eq!(*trigger, 0.5);
            }
            other => panic!("unexpected step {:?}", other),
        }
        assert_eq!(trace.tick_count(), 1);
    }

    #[test]
    fn unknown_step_type_is_rejected() {
        let err = Trace::parse(r#"{ "steps": [ { "type": "warp" } ] }"#);
        assert!(matches!(err, Err(TraceError::Parse(_))));
    }

    #[test]
    fn apply_drives_mock_session() {
        let mut session = MockSession::new();
        let connect = TraceStep::Connect { id: 1, kind: ControllerKind::Control, hand: Hand::Right };
        assert!(connect.apply(&mut session));
        assert!(!TraceStep::Tick.apply(&mut session));

        use crate::sdk::DeviceSession;
        assert!(session.device(1).is_some());
    }
}
