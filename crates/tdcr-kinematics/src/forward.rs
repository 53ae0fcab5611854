use glam::DVec3;
use tdcr_pose::Pose;

use crate::error::KinematicsError;
use crate::geometry::{broadcast_elements, check_same_len};
use crate::segment::{arc_transform, ArcParams};

/// Discretized backbone curve of the robot.
///
/// Poses are expressed in the robot base frame and ordered segment by segment.
/// The last pose of a segment is the base frame of the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct Backbone {
    poses: Vec<Pose>,
    segment_ends: Vec<usize>,
}

impl Backbone {
    /// All poses of the backbone.
    pub fn poses(&self) -> &[Pose] {
        &self.poses
    }

    /// Total number of poses.
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Whether the backbone holds no pose.
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Number of segments.
    pub fn num_segments(&self) -> usize {
        self.segment_ends.len()
    }

    /// Cumulative element count at the end of each segment.
    pub fn segment_end_indices(&self) -> &[usize] {
        &self.segment_ends
    }

    /// Poses of the `index`-th segment.
    pub fn segment(&self, index: usize) -> Option<&[Pose]> {
        let end = *self.segment_ends.get(index)?;
        let start = match index {
            0 => 0,
            _ => self.segment_ends[index - 1],
        };
        Some(&self.poses[start..end])
    }

    /// The end-effector pose.
    pub fn tip(&self) -> Option<&Pose> {
        self.poses.last()
    }

    /// One row of 16 column-major values per pose.
    pub fn to_column_major(&self) -> Vec<[f64; 16]> {
        self.poses.iter().map(Pose::to_column_major).collect()
    }
}

fn check_configuration(
    theta: &[f64],
    phi: &[f64],
    seg_len: &[f64],
) -> Result<(), KinematicsError> {
    check_same_len("theta", theta.len(), "phi", phi.len())?;
    check_same_len("theta", theta.len(), "seg_len", seg_len.len())
}

/// Compute the full backbone curve of the robot.
///
/// # Arguments
///
/// * `theta` - Bending parameter of each segment.
/// * `phi` - Bending plane orientation of each segment [rad].
/// * `seg_len` - Length of each segment [m].
/// * `tendon_radius` - Tendon connection radius [m].
/// * `elements` - Elements per segment, or a single value for all segments.
///
/// # Returns
///
/// The backbone with `elements[i]` poses for the i-th segment.
pub fn compute_backbone(
    theta: &[f64],
    phi: &[f64],
    seg_len: &[f64],
    tendon_radius: f64,
    elements: &[usize],
) -> Result<Backbone, KinematicsError> {
    check_configuration(theta, phi, seg_len)?;
    let elements = broadcast_elements(theta.len(), elements)?;

    let total = elements.iter().sum();
    let mut poses = Vec::with_capacity(total);
    let mut segment_ends = Vec::with_capacity(elements.len());
    let mut base = Pose::IDENTITY;

    for (i, &num_el) in elements.iter().enumerate() {
        let step = seg_len[i] / num_el as f64;
        for j in 1..=num_el {
            let element = arc_transform(&ArcParams::new(
                theta[i],
                phi[i],
                step * j as f64,
                tendon_radius,
            ));
            poses.push(base * element);
        }
        segment_ends.push(poses.len());

        // the last pose of the segment becomes the base of the next one
        if let Some(last) = poses.last() {
            base = *last;
        }
    }

    log::debug!(
        "Computed backbone with {} poses over {} segments",
        poses.len(),
        segment_ends.len()
    );

    Ok(Backbone {
        poses,
        segment_ends,
    })
}

/// Compute only the end-effector pose, one transform per segment.
pub fn compute_end_effector_pose(
    theta: &[f64],
    phi: &[f64],
    seg_len: &[f64],
    tendon_radius: f64,
) -> Result<Pose, KinematicsError> {
    check_configuration(theta, phi, seg_len)?;

    let tip = theta
        .iter()
        .zip(phi)
        .zip(seg_len)
        .fold(Pose::IDENTITY, |base, ((&theta, &phi), &len)| {
            base * arc_transform(&ArcParams::new(theta, phi, len, tendon_radius))
        });

    Ok(tip)
}

/// Compute the end-effector position in the robot base frame.
///
/// This is the fast evaluation used inside search loops: every segment is
/// collapsed into a single transform.
pub fn compute_end_effector(
    theta: &[f64],
    phi: &[f64],
    seg_len: &[f64],
    tendon_radius: f64,
) -> Result<DVec3, KinematicsError> {
    compute_end_effector_pose(theta, phi, seg_len, tendon_radius).map(|p| p.translation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::DMat3;

    #[test]
    fn test_straight_robot() -> Result<(), KinematicsError> {
        let position = compute_end_effector(&[0.0], &[0.0], &[0.025], 0.003)?;
        assert_eq!(position, DVec3::new(0.0, 0.0, 0.025));
        Ok(())
    }

    #[test]
    fn test_straight_backbone_is_evenly_spaced() -> Result<(), KinematicsError> {
        let backbone = compute_backbone(&[0.0, 0.0], &[0.3, 1.2], &[0.02, 0.04], 0.003, &[4])?;
        assert_eq!(backbone.len(), 8);
        assert_eq!(backbone.segment_end_indices(), &[4, 8]);
        for pose in backbone.poses() {
            assert_eq!(pose.rotation(), DMat3::IDENTITY);
        }
        let z: Vec<f64> = backbone.poses().iter().map(|p| p.translation().z).collect();
        let expected = [0.005, 0.01, 0.015, 0.02, 0.03, 0.04, 0.05, 0.06];
        for (a, b) in z.iter().zip(expected) {
            assert_relative_eq!(*a, b, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_dimension_mismatch() {
        let res = compute_backbone(&[0.0, 1.0], &[0.0], &[0.025, 0.025], 0.003, &[10]);
        assert_eq!(
            res,
            Err(KinematicsError::DimensionMismatch {
                left_name: "theta",
                left_len: 2,
                right_name: "phi",
                right_len: 1,
            })
        );

        let res = compute_end_effector(&[0.0], &[0.0], &[0.025, 0.025], 0.003);
        assert_eq!(
            res,
            Err(KinematicsError::DimensionMismatch {
                left_name: "theta",
                left_len: 1,
                right_name: "seg_len",
                right_len: 2,
            })
        );
    }

    #[test]
    fn test_backbone_tip_matches_fast_mode() -> Result<(), KinematicsError> {
        let theta = [20.0, 35.0, 10.0];
        let phi = [0.4, 2.5, 4.0];
        let seg_len = [0.025, 0.02, 0.03];

        let backbone = compute_backbone(&theta, &phi, &seg_len, 0.003, &[10, 7, 3])?;
        let tip = backbone.tip().map(|p| p.translation()).unwrap_or_default();
        let fast = compute_end_effector(&theta, &phi, &seg_len, 0.003)?;

        assert!(tip.abs_diff_eq(fast, 1e-12));
        Ok(())
    }

    #[test]
    fn test_segment_slices() -> Result<(), KinematicsError> {
        let backbone = compute_backbone(&[10.0, 10.0], &[0.0, 0.0], &[0.02, 0.02], 0.003, &[3, 5])?;
        assert_eq!(backbone.num_segments(), 2);
        assert_eq!(backbone.segment(0).map(|s| s.len()), Some(3));
        assert_eq!(backbone.segment(1).map(|s| s.len()), Some(5));
        assert!(backbone.segment(2).is_none());
        assert_eq!(backbone.to_column_major().len(), 8);
        Ok(())
    }
}
