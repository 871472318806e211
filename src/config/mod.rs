//! Curve configuration types.

mod curve_config;

pub use curve_config::{CurveConfig, GraduationPlan};
