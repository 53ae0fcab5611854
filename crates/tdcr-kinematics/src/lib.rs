#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # TDCR Kinematics
//!
//! Each segment of the robot bends along a circular arc described by a bending
//! parameter `theta` and a bending plane orientation `phi`. Chaining the arcs
//! gives the backbone curve of the robot.
//!
//! ## Example
//!
//! ```rust
//! use tdcr_kinematics::compute_end_effector;
//!
//! let tip = compute_end_effector(&[0.0], &[0.0], &[0.025], 0.003).unwrap();
//! assert_eq!(tip.z, 0.025);
//! ```

/// Tendon length to configuration angle mapping.
pub mod actuator;

mod error;
pub use error::KinematicsError;

/// Forward kinematics over the whole robot.
pub mod forward;

/// Static robot description.
pub mod geometry;

/// Transform of a single constant curvature segment.
pub mod segment;

pub use actuator::{
    actuator_to_configuration, configuration_to_actuator, Configuration, TendonCount,
};
pub use forward::{compute_backbone, compute_end_effector, compute_end_effector_pose, Backbone};
pub use geometry::RobotGeometry;
pub use segment::{arc_transform, ArcParams};
pub use tdcr_pose::Pose;
