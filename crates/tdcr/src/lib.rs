#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use tdcr_pose as pose;

#[doc(inline)]
pub use tdcr_kinematics as kinematics;

#[doc(inline)]
pub use tdcr_pso as pso;
