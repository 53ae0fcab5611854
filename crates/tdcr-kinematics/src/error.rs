use thiserror::Error;

/// An error type for the kinematics module.
#[derive(Error, Debug, PartialEq)]
pub enum KinematicsError {
    /// Two per-segment inputs have a different number of entries.
    #[error("Dimension mismatch: {left_name} ({left_len}) != {right_name} ({right_len})")]
    DimensionMismatch {
        /// Label for the left-hand input.
        left_name: &'static str,
        /// Length of the left-hand input.
        left_len: usize,
        /// Label for the right-hand input.
        right_name: &'static str,
        /// Length of the right-hand input.
        right_len: usize,
    },

    /// The element counts are neither a single broadcast value nor one per segment.
    #[error("Expected 1 or {expected} element counts, got {actual}")]
    ElementCountMismatch {
        /// Number of segments.
        expected: usize,
        /// Number of element counts provided.
        actual: usize,
    },

    /// A segment is discretized into zero elements.
    #[error("Segment {0} has zero elements")]
    ZeroElements(usize),

    /// An actuator row does not hold one entry per tendon.
    #[error("Segment {segment} has {actual} tendon lengths, expected {expected}")]
    TendonCountMismatch {
        /// Index of the offending segment.
        segment: usize,
        /// Configured tendon count.
        expected: usize,
        /// Number of lengths provided.
        actual: usize,
    },

    /// Only three and four tendon robots are modelled.
    #[error("Unsupported tendon count {0}, expected 3 or 4")]
    UnsupportedTendonCount(usize),
}
