use serde::{Deserialize, Serialize};

use crate::error::KinematicsError;

/// Static description of a tendon-driven continuum robot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotGeometry {
    /// Length of each segment [m].
    pub seg_len: Vec<f64>,
    /// Number of elements per segment. A single value applies to every segment.
    pub elements: Vec<usize>,
    /// Distance from the backbone to the tendon routing holes [m].
    pub tendon_radius: f64,
}

impl RobotGeometry {
    /// Create a new robot description.
    pub fn new(seg_len: Vec<f64>, elements: Vec<usize>, tendon_radius: f64) -> Self {
        Self {
            seg_len,
            elements,
            tendon_radius,
        }
    }

    /// Number of segments.
    pub fn num_segments(&self) -> usize {
        self.seg_len.len()
    }

    /// Element count of every segment, with a single value broadcast.
    pub fn elements_per_segment(&self) -> Result<Vec<usize>, KinematicsError> {
        broadcast_elements(self.num_segments(), &self.elements)
    }

    /// Sum of the segment lengths [m].
    pub fn total_length(&self) -> f64 {
        self.seg_len.iter().sum()
    }
}

/// Expand the element counts to one value per segment.
///
/// A single count is repeated for every segment, otherwise there must be exactly
/// one count per segment. Zero counts are rejected.
pub fn broadcast_elements(
    num_seg: usize,
    elements: &[usize],
) -> Result<Vec<usize>, KinematicsError> {
    let expanded = match elements.len() {
        1 => vec![elements[0]; num_seg],
        n if n == num_seg => elements.to_vec(),
        n => {
            return Err(KinematicsError::ElementCountMismatch {
                expected: num_seg,
                actual: n,
            })
        }
    };

    if let Some(segment) = expanded.iter().position(|&n| n == 0) {
        return Err(KinematicsError::ZeroElements(segment));
    }

    Ok(expanded)
}

/// Fail with [`KinematicsError::DimensionMismatch`] when the lengths differ.
pub(crate) fn check_same_len(
    left_name: &'static str,
    left_len: usize,
    right_name: &'static str,
    right_len: usize,
) -> Result<(), KinematicsError> {
    if left_len != right_len {
        return Err(KinematicsError::DimensionMismatch {
            left_name,
            left_len,
            right_name,
            right_len,
        });
    }
    Ok(())
}
