#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # TDCR Poses
//!
//! A [`Pose`] is a rigid body transformation made of an orthonormal rotation and a
//! translation. Backbone curves are sequences of poses obtained by chaining the
//! transforms of consecutive arc elements.
//!
//! ## Example
//!
//! ```rust
//! use tdcr_pose::{DVec3, Pose};
//!
//! let base = Pose::from_translation(DVec3::new(0.0, 0.0, 0.025));
//! let tip = base * Pose::from_translation(DVec3::new(0.0, 0.0, 0.025));
//! assert_eq!(tip.translation(), DVec3::new(0.0, 0.0, 0.05));
//! ```

/// Rigid body transform and its column-major representation.
pub mod pose;

pub use glam::{DMat3, DMat4, DVec3};
pub use pose::{Pose, RIGIDITY_TOLERANCE};
