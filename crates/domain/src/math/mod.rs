//! Exact integer arithmetic over reserves and rates.

pub mod fixed_point;

pub use fixed_point::{ONE_TOKEN, apply_ratio, fixed_point_ratio, mul_div, ratio_with_scale};
