//! Poses and the play-space transform

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position and orientation in a single reference frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const ZERO_IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::ZERO_IDENTITY
    }
}

/// Maps device-local tracking coordinates into the world frame.
///
/// The host owns the play space and may move it between ticks; the manager
/// applies whatever transform was last set to every sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayspaceTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl PlayspaceTransform {
    pub const IDENTITY: PlayspaceTransform = PlayspaceTransform {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Rotate a local point into the play space, then offset it
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * point
    }

    pub fn transform_rotation(&self, rotation: Quat) -> Quat {
        self.rotation * rotation
    }

    pub fn transform_pose(&self, position: Vec3, rotation: Quat) -> Pose {
        Pose {
            position: self.transform_point(position),
            rotation: self.transform_rotation(rotation),
        }
    }
}

impl Default for PlayspaceTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identity_leaves_pose_untouched() {
        let p = Vec3::new(0.1, 1.5, -0.4);
        let r = Quat::from_rotation_x(0.3);
        let pose = PlayspaceTransform::IDENTITY.transform_pose(p, r);
        assert_eq!(pose, Pose::new(p, r));
    }

    #[test]
    fn rotation_applies_before_offset() {
        let playspace = PlayspaceTransform::new(Vec3::new(1.0, 0.0, 0.0), Quat::from_rotation_y(FRAC_PI_2));
        let world = playspace.transform_point(Vec3::Z);
        assert!(world.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-5));

        let rot = playspace.transform_rotation(Quat::IDENTITY);
        assert!(rot.abs_diff_eq(Quat::from_rotation_y(FRAC_PI_2), 1e-6));
    }
}
