pub mod closest;
pub mod distance;
pub mod error;
pub mod geometry;
pub mod intersect;
pub mod math;
pub mod spline;

pub use error::{CurvixError, Result};
