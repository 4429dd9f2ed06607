//! Deferred placement relative to the camera start pose
//!
//! Right after startup the camera pose is not trustworthy yet. A
//! [`DeferredPlacement`] waits for a fixed delay, then places an object
//! (given in camera-local coordinates) in front of the camera once, keeping
//! only the camera's yaw so the object stays upright.

use crate::controller::Pose;
use glam::{Quat, Vec3};
use log::debug;
use std::time::{Duration, Instant};

/// Yaw-only rotation that looks along `forward` projected on the ground plane
pub fn yaw_rotation(forward: Vec3) -> Quat {
    let flat = Vec3::new(forward.x, 0.0, forward.z);
    if flat.length_squared() <= f32::EPSILON {
        return Quat::IDENTITY;
    }
    let flat = flat.normalize();
    Quat::from_rotation_y(flat.x.atan2(flat.z))
}

/// Place a camera-local pose in the world
pub fn place_relative(camera: &Pose, local: &Pose) -> Pose {
    let position = camera.position + camera.rotation * local.position;
    let forward = camera.rotation * Vec3::Z;
    Pose {
        position,
        rotation: yaw_rotation(forward) * local.rotation,
    }
}

/// One-time task that fires once its delay has elapsed
#[derive(Debug, Clone)]
pub struct DeferredPlacement {
    local: Pose,
    due: Instant,
    fired: bool,
}

impl DeferredPlacement {
    /// Schedule a placement `delay` after `now`
    pub fn schedule(local: Pose, delay: Duration, now: Instant) -> Self {
        Self {
            local,
            due: now + delay,
            fired: false,
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.fired
    }

    /// Returns the world pose the first time it is polled at or after the
    /// due time, and `None` otherwise
    pub fn poll(&mut self, now: Instant, camera: &Pose) -> Option<Pose> {
        if self.fired || now < self.due {
            return None;
        }
        self.fired = true;
        let placed = place_relative(camera, &self.local);
        debug!("Placed object at {:?}", placed.position);
        Some(placed)
    }
}
