//! Billboard placement in front of the viewer
//!
//! The note is put `distance` units along the viewer's forward vector and
//! oriented with its +Z pointing away from the viewer, so the readable face
//! of the text looks back at the camera.

use glam::{Mat3, Quat, Vec3};

/// World pose of the note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Compute the note pose for a viewer
pub fn place_note(viewer_position: Vec3, viewer_forward: Vec3, distance: f32) -> Pose {
    let position = viewer_position + viewer_forward * distance;
    Pose {
        position,
        rotation: look_rotation(position - viewer_position, Vec3::Y),
    }
}

/// Rotation whose +Z axis points along `direction` with +Y as close to `up` as possible
pub fn look_rotation(direction: Vec3, up: Vec3) -> Quat {
    let Some(forward) = direction.try_normalize() else {
        return Quat::IDENTITY;
    };

    match up.cross(forward).try_normalize() {
        Some(right) => {
            let true_up = forward.cross(right);
            Quat::from_mat3(&Mat3::from_cols(right, true_up, forward)).normalize()
        }
        // Looking straight up or down
        None => Quat::from_rotation_arc(Vec3::Z, forward),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_position_along_forward() {
        let pose = place_note(Vec3::new(1.0, 1.6, 0.0), Vec3::Z, 2.0);
        assert!(pose.position.abs_diff_eq(Vec3::new(1.0, 1.6, 2.0), EPS));
    }

    #[test]
    fn test_identity_when_viewer_faces_z() {
        let pose = place_note(Vec3::ZERO, Vec3::Z, 1.0);
        assert!(pose.rotation.abs_diff_eq(Quat::IDENTITY, EPS));
    }

    #[test]
    fn test_note_axis_points_away_from_viewer() {
        let viewer = Vec3::new(0.0, 1.7, 0.0);
        let forward = Vec3::new(1.0, -0.3, 0.5).normalize();
        let pose = place_note(viewer, forward, 0.8);

        let note_forward = pose.rotation * Vec3::Z;
        let away = (pose.position - viewer).normalize();
        assert!(note_forward.abs_diff_eq(away, EPS));

        // Upright: the note's right axis stays horizontal
        let right = pose.rotation * Vec3::X;
        assert!(right.y.abs() < EPS);
    }

    #[test]
    fn test_looking_straight_down() {
        let pose = place_note(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y, 1.0);
        assert!(pose.position.abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), EPS));
        assert!((pose.rotation * Vec3::Z).abs_diff_eq(Vec3::NEG_Y, EPS));
    }

    #[test]
    fn test_degenerate_forward_is_identity() {
        let pose = place_note(Vec3::ONE, Vec3::ZERO, 1.0);
        assert_eq!(pose.position, Vec3::ONE);
        assert_eq!(pose.rotation, Quat::IDENTITY);
    }
}
