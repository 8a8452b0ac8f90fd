//! Curvix spline walk: samples a spline by arc length and scans the
//! resulting polyline for overlaps with a few obstacles.
//!
//! ```text
//! main.rs: entry point (this file)
//! walk.rs: spline construction and arc-length walking
//! scan.rs: broad-phase overlap scan over the walked polyline
//! ```
//!
//! Usage:
//! ```text
//! cargo run --example spline_walk                 # default step 0.5
//! cargo run --example spline_walk -- 0.25         # custom step
//! RUST_LOG=spline_walk=debug cargo run --example spline_walk
//! ```

mod scan;
mod walk;

use curvix::CurvixError;

const DEFAULT_STEP: f64 = 0.5;

fn main() -> Result<(), CurvixError> {
    // Default: WARN for everything, INFO for this demo.
    // Override with RUST_LOG env var (e.g. RUST_LOG=spline_walk=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("spline_walk=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let step = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<f64>().ok())
        .filter(|s| *s > 0.0)
        .unwrap_or(DEFAULT_STEP);

    let spline = walk::build_spline()?;
    let polyline = walk::walk(&spline, step);
    walk::report_tangents(&spline)?;
    scan::report_overlaps(&polyline);
    Ok(())
}
