//! Mapping between actuator space (tendon length changes) and configuration
//! space (bending angles).
//!
//! Tendon 1 lies in the bending plane `phi = 0` and shortens when the segment
//! bends towards it.

use serde::{Deserialize, Serialize};

use crate::error::KinematicsError;
use crate::geometry::{check_same_len, RobotGeometry};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Number of tendons routed through each segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TendonCount {
    /// Three tendons spaced by 120 degrees.
    Three,
    /// Four tendons spaced by 90 degrees.
    Four,
}

impl TendonCount {
    /// Number of tendons as an integer.
    pub fn count(self) -> usize {
        match self {
            TendonCount::Three => 3,
            TendonCount::Four => 4,
        }
    }
}

impl TryFrom<usize> for TendonCount {
    type Error = KinematicsError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(TendonCount::Three),
            4 => Ok(TendonCount::Four),
            n => Err(KinematicsError::UnsupportedTendonCount(n)),
        }
    }
}

/// Configuration space angles of one segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Bending angle [deg].
    pub theta: f64,
    /// Bending plane orientation [deg].
    pub phi: f64,
}

impl Configuration {
    /// Create a new configuration.
    pub fn new(theta: f64, phi: f64) -> Self {
        Self { theta, phi }
    }
}

/// Round to 6 decimal places.
fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

/// Resolve the bending plane angle [deg] from the curvature components.
///
/// `atan` only covers half a turn, the rules below pick the quadrant:
///
/// | condition               | phi                      |
/// |-------------------------|--------------------------|
/// | `theta == 0`            | `0`                      |
/// | `v == 0`                | `90`                     |
/// | otherwise               | `atan(-u / v)`           |
/// | result `< 0`            | add `180`                |
/// | `v < 0`                 | add another `180`        |
pub fn resolve_phi(u: f64, v: f64, theta: f64) -> f64 {
    let mut phi = if theta != 0.0 {
        if v != 0.0 {
            let phi = (-u / v).atan().to_degrees();
            if phi < 0.0 {
                phi + 180.0
            } else {
                phi
            }
        } else {
            90.0
        }
    } else {
        0.0
    };

    if v < 0.0 {
        phi += 180.0;
    }
    phi
}

/// Recover the configuration of a segment from its full tendon lengths.
fn angles_from_lengths(
    tendons: TendonCount,
    lengths: &[f64],
    segment_length: f64,
    d: f64,
) -> Configuration {
    let (u, v) = match tendons {
        TendonCount::Three => (
            (lengths[1] - lengths[2]) / (SQRT_3 * d),
            (segment_length - lengths[0]) / d,
        ),
        TendonCount::Four => (
            (lengths[1] - lengths[3]) / (2.0 * d),
            (lengths[2] - lengths[0]) / (2.0 * d),
        ),
    };

    let theta = (u.hypot(v) / segment_length).to_degrees();
    let phi = resolve_phi(u, v, theta);

    Configuration::new(round6(theta), round6(phi))
}

/// Continuous arc length of a tendon from its length along discrete spacer disks.
///
/// The arc is longer than the chords between the disks. `theta` is in radians and
/// must be non zero.
pub fn spacer_to_arc_length(length: f64, theta: f64, elements: usize) -> f64 {
    let two_n = 2.0 * elements as f64;
    length * theta / (two_n * (theta / two_n).sin())
}

/// Tendon length along discrete spacer disks from its continuous arc length.
///
/// `theta` is in radians and must be non zero.
pub fn arc_to_spacer_length(length: f64, theta: f64, elements: usize) -> f64 {
    let two_n = 2.0 * elements as f64;
    length / theta * two_n * (theta / two_n).sin()
}

/// Convert tendon length changes into configuration space angles.
///
/// # Arguments
///
/// * `tendons` - Number of tendons per segment.
/// * `geometry` - Robot geometry.
/// * `length_changes` - Per segment, the change of each tendon length w.r.t. the straight
///   segment [m].
/// * `partial_path` - Whether tendons are routed through discrete spacer disks.
///
/// # Returns
///
/// The configuration of every segment.
pub fn actuator_to_configuration(
    tendons: TendonCount,
    geometry: &RobotGeometry,
    length_changes: &[Vec<f64>],
    partial_path: bool,
) -> Result<Vec<Configuration>, KinematicsError> {
    check_same_len(
        "length_changes",
        length_changes.len(),
        "seg_len",
        geometry.seg_len.len(),
    )?;
    let elements = geometry.elements_per_segment()?;
    let d = geometry.tendon_radius;

    let mut configurations = Vec::with_capacity(length_changes.len());
    for (segment, changes) in length_changes.iter().enumerate() {
        if changes.len() != tendons.count() {
            return Err(KinematicsError::TendonCountMismatch {
                segment,
                expected: tendons.count(),
                actual: changes.len(),
            });
        }

        let segment_length = geometry.seg_len[segment];
        let lengths: Vec<f64> = changes.iter().map(|dl| dl + segment_length).collect();
        let mut config = angles_from_lengths(tendons, &lengths, segment_length, d);

        if partial_path && config.theta != 0.0 {
            let theta = config.theta.to_radians();
            let corrected: Vec<f64> = lengths
                .iter()
                .map(|&l| spacer_to_arc_length(l, theta, elements[segment]))
                .collect();
            config = angles_from_lengths(tendons, &corrected, segment_length, d);
        }

        configurations.push(config);
    }

    Ok(configurations)
}

/// Convert configuration space angles into tendon length changes.
///
/// # Arguments
///
/// * `tendons` - Number of tendons per segment.
/// * `geometry` - Robot geometry.
/// * `configurations` - Angles of every segment [deg].
/// * `partial_path` - Whether tendons are routed through discrete spacer disks.
///
/// # Returns
///
/// Per segment, the change of each tendon length w.r.t. the straight segment [m].
pub fn configuration_to_actuator(
    tendons: TendonCount,
    geometry: &RobotGeometry,
    configurations: &[Configuration],
    partial_path: bool,
) -> Result<Vec<Vec<f64>>, KinematicsError> {
    check_same_len(
        "configurations",
        configurations.len(),
        "seg_len",
        geometry.seg_len.len(),
    )?;
    let elements = geometry.elements_per_segment()?;
    let d = geometry.tendon_radius;

    let mut result = Vec::with_capacity(configurations.len());
    for (segment, config) in configurations.iter().enumerate() {
        let h = geometry.seg_len[segment];
        let theta = config.theta.to_radians();
        let phi = config.phi.to_radians();

        let (mut u, mut v) = if theta != 0.0 {
            let tan_phi = phi.tan();
            let v = ((theta * h).powi(2) / (tan_phi.powi(2) + 1.0)).sqrt();
            (-tan_phi * v, v)
        } else {
            (0.0, 0.0)
        };

        // bending towards the opposite half plane
        if phi >= std::f64::consts::PI {
            u = -u;
            v = -v;
        }

        let mut lengths = match tendons {
            TendonCount::Three => vec![
                h - d * v,
                h + 0.5 * d * (v + SQRT_3 * u),
                h + 0.5 * d * (v - SQRT_3 * u),
            ],
            TendonCount::Four => vec![h - d * v, h + d * u, h + d * v, h - d * u],
        };

        if partial_path && theta != 0.0 {
            for l in lengths.iter_mut() {
                *l = arc_to_spacer_length(*l, theta, elements[segment]);
            }
        }

        result.push(lengths.into_iter().map(|l| l - h).collect());
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn geometry(num_seg: usize) -> RobotGeometry {
        RobotGeometry::new(vec![0.025; num_seg], vec![10], 0.003)
    }

    #[test]
    fn test_resolve_phi_zero_theta() {
        assert_eq!(resolve_phi(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_resolve_phi_zero_v() {
        assert_eq!(resolve_phi(-1.0, 0.0, 10.0), 90.0);
        assert_eq!(resolve_phi(1.0, 0.0, 10.0), 90.0);
    }

    #[test]
    fn test_resolve_phi_first_quadrant() {
        // u = -tan(30) v
        let phi = resolve_phi(-(30f64.to_radians().tan()), 1.0, 10.0);
        assert_relative_eq!(phi, 30.0, epsilon = 1e-12);
    }

    #[test]
    fn test_resolve_phi_negative_atan() {
        let phi = resolve_phi(1.0, 1.0, 10.0);
        assert_relative_eq!(phi, 135.0, epsilon = 1e-12);
    }

    #[test]
    fn test_resolve_phi_negative_v() {
        let phi = resolve_phi(1.0, -1.0, 10.0);
        assert_relative_eq!(phi, 225.0, epsilon = 1e-12);

        let phi = resolve_phi(-1.0, -1.0, 10.0);
        assert_relative_eq!(phi, 315.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tendon_count() {
        assert_eq!(TendonCount::try_from(3), Ok(TendonCount::Three));
        assert_eq!(TendonCount::try_from(4), Ok(TendonCount::Four));
        assert_eq!(
            TendonCount::try_from(5),
            Err(KinematicsError::UnsupportedTendonCount(5))
        );
        assert_eq!(TendonCount::Four.count(), 4);
    }

    #[test]
    fn test_no_length_change_is_straight() -> Result<(), KinematicsError> {
        for tendons in [TendonCount::Three, TendonCount::Four] {
            let changes = vec![vec![0.0; tendons.count()]];
            let configs = actuator_to_configuration(tendons, &geometry(1), &changes, false)?;
            assert_eq!(configs, vec![Configuration::new(0.0, 0.0)]);
        }
        Ok(())
    }

    #[test]
    fn test_straight_configuration_has_no_length_change() -> Result<(), KinematicsError> {
        let configs = [Configuration::new(0.0, 123.0)];
        let changes = configuration_to_actuator(TendonCount::Three, &geometry(1), &configs, true)?;
        assert_eq!(changes, vec![vec![0.0; 3]]);
        Ok(())
    }

    #[test]
    fn test_three_tendons_sum_to_zero() -> Result<(), KinematicsError> {
        let configs = [Configuration::new(45.0, 60.0), Configuration::new(10.0, 250.0)];
        let changes = configuration_to_actuator(TendonCount::Three, &geometry(2), &configs, false)?;
        for row in &changes {
            assert_relative_eq!(row.iter().sum::<f64>(), 0.0, epsilon = 1e-15);
        }
        Ok(())
    }

    #[test]
    fn test_four_tendons_are_antagonistic() -> Result<(), KinematicsError> {
        let configs = [Configuration::new(30.0, 20.0)];
        let changes = configuration_to_actuator(TendonCount::Four, &geometry(1), &configs, false)?;
        let row = &changes[0];
        assert_relative_eq!(row[0], -row[2], epsilon = 1e-15);
        assert_relative_eq!(row[1], -row[3], epsilon = 1e-15);
        Ok(())
    }

    #[test]
    fn test_pull_on_first_tendon() -> Result<(), KinematicsError> {
        let changes = vec![vec![-0.0005, 0.00025, 0.00025]];
        let configs = actuator_to_configuration(TendonCount::Three, &geometry(1), &changes, false)?;
        assert_relative_eq!(configs[0].phi, 0.0);
        assert!(configs[0].theta > 0.0);

        // releasing it bends the segment the other way
        let changes = vec![vec![0.0005, -0.00025, -0.00025]];
        let configs = actuator_to_configuration(TendonCount::Three, &geometry(1), &changes, false)?;
        assert_relative_eq!(configs[0].phi, 180.0);
        Ok(())
    }

    #[test]
    fn test_spacer_length_is_shorter_than_arc() {
        let (arc, theta, n) = (0.0251, 0.6, 10);
        let spacer = arc_to_spacer_length(arc, theta, n);
        assert!(spacer < arc);
        assert_relative_eq!(spacer_to_arc_length(spacer, theta, n), arc, epsilon = 1e-15);

        // many disks approach the continuous arc
        assert_relative_eq!(arc_to_spacer_length(arc, theta, 10_000), arc, epsilon = 1e-9);
    }

    #[test]
    fn test_partial_path_keeps_straight_segment() -> Result<(), KinematicsError> {
        for tendons in [TendonCount::Three, TendonCount::Four] {
            let changes = vec![vec![0.0; tendons.count()]];
            let configs = actuator_to_configuration(tendons, &geometry(1), &changes, true)?;
            assert_eq!(configs, vec![Configuration::new(0.0, 0.0)]);
        }

        // equal changes of four tendons cancel out
        let changes = vec![vec![0.0003; 4]];
        let configs = actuator_to_configuration(TendonCount::Four, &geometry(1), &changes, true)?;
        assert_eq!(configs, vec![Configuration::new(0.0, 0.0)]);
        Ok(())
    }

    #[test]
    fn test_partial_path_corrects_bent_segment() -> Result<(), KinematicsError> {
        // tendon 1 shortened by 0.1 mm: theta = 0.0001 / (0.003 * 0.025) rad
        let changes = vec![vec![-0.0001, 0.00005, 0.00005]];
        let full = actuator_to_configuration(TendonCount::Three, &geometry(1), &changes, false)?;
        assert_relative_eq!(full[0].theta, 76.394373, epsilon = 1e-6);
        assert_eq!(full[0].phi, 0.0);

        // every tendon is stretched to its arc length, tendon 1 included
        let theta = 76.394373f64.to_radians();
        let arc = spacer_to_arc_length(0.0249, theta, 10);
        let expected = ((0.025 - arc) / 0.003 / 0.025).to_degrees();

        let partial = actuator_to_configuration(TendonCount::Three, &geometry(1), &changes, true)?;
        assert_relative_eq!(partial[0].theta, expected, epsilon = 1e-6);
        assert_relative_eq!(partial[0].theta, 62.296545, epsilon = 1e-6);
        assert_eq!(partial[0].phi, 0.0);
        Ok(())
    }

    #[test]
    fn test_partial_path_changes_lengths() -> Result<(), KinematicsError> {
        let configs = [Configuration::new(60.0, 30.0)];
        let full = configuration_to_actuator(TendonCount::Four, &geometry(1), &configs, false)?;
        let partial = configuration_to_actuator(TendonCount::Four, &geometry(1), &configs, true)?;
        assert_ne!(full, partial);
        Ok(())
    }

    #[test]
    fn test_tendon_count_mismatch() {
        let changes = vec![vec![0.0; 4]];
        let res = actuator_to_configuration(TendonCount::Three, &geometry(1), &changes, false);
        assert_eq!(
            res,
            Err(KinematicsError::TendonCountMismatch {
                segment: 0,
                expected: 3,
                actual: 4
            })
        );
    }

    #[test]
    fn test_segment_count_mismatch() {
        let configs = [Configuration::default()];
        let res = configuration_to_actuator(TendonCount::Three, &geometry(2), &configs, false);
        assert!(matches!(
            res,
            Err(KinematicsError::DimensionMismatch { .. })
        ));
    }
}
