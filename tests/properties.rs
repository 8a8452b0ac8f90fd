#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use curvix::closest;
use curvix::distance;
use curvix::geometry::{Plane, Ray3, Segment2, Segment3, Triangle};
use curvix::intersect::{ray_plane, Intersection};
use curvix::math::vector::{normalize_or_zero, try_normalize};
use curvix::math::{matrix, quaternion, Matrix2, Matrix3, Matrix4, Point2, Point3, Tolerance, Vector3};
use curvix::spline::{BezierPath, CatmullRom, Curve, ParamMode, SplineConfig};

const TOL: f64 = 1e-9;

// ── vectors ──

#[test]
fn normalized_vectors_have_unit_length() {
    let tol = Tolerance::default();
    for v in [Vector3::new(3.0, -4.0, 12.0), Vector3::new(1e-3, 0.0, 0.0), Vector3::new(-7.5, 2.0, 0.1)] {
        assert!((try_normalize(&v, tol).unwrap().norm() - 1.0).abs() < tol.epsilon);
    }
    assert!(try_normalize(&Vector3::zeros(), tol).unwrap_err().is_degenerate());
    let (zero, degenerate) = normalize_or_zero(&Vector3::zeros(), tol);
    assert_eq!(zero, Vector3::zeros());
    assert!(degenerate);
}

// ── matrices ──

#[test]
fn matrix_times_inverse_is_identity() {
    let tol = Tolerance::default();

    let m2 = Matrix2::new(4.0, 7.0, 2.0, 6.0);
    assert_relative_eq!(m2 * matrix::try_inverse(&m2, tol).unwrap(), Matrix2::identity(), epsilon = TOL);

    let m3 = Matrix3::new(2.0, 0.0, 1.0, 1.0, 3.0, 2.0, 1.0, 1.0, 1.0);
    assert_relative_eq!(m3 * matrix::try_inverse(&m3, tol).unwrap(), Matrix3::identity(), epsilon = TOL);

    let rotation = quaternion::from_axis_angle(&Vector3::new(1.0, 2.0, 3.0), 0.7, tol).unwrap();
    let m4 = matrix::from_trs(&Vector3::new(1.0, -2.0, 3.0), &rotation, &Vector3::new(2.0, 0.5, 1.5));
    assert_relative_eq!(m4 * matrix::try_inverse(&m4, tol).unwrap(), Matrix4::identity(), epsilon = TOL);

    assert!(matrix::try_inverse(&Matrix3::zeros(), tol).unwrap_err().is_singular());
}

// ── quaternions ──

#[test]
fn slerp_endpoints_and_identity() {
    let tol = Tolerance::default();
    let q1 = quaternion::from_axis_angle(&Vector3::z(), 0.3, tol).unwrap();
    let q2 = quaternion::from_axis_angle(&Vector3::new(1.0, 1.0, 0.0), 1.1, tol).unwrap();
    assert!(q1.coords.dot(&q2.coords) > 0.0);

    assert_relative_eq!(quaternion::slerp(&q1, &q2, 0.0, tol), q1, epsilon = TOL);
    assert_relative_eq!(quaternion::slerp(&q1, &q2, 1.0, tol), q2, epsilon = TOL);
    for t in [0.0, 0.25, 0.5, 1.0] {
        assert_relative_eq!(quaternion::slerp(&q1, &q1, t, tol), q1, epsilon = TOL);
    }
}

// ── intersection and distance ──

#[test]
fn ray_parallel_to_plane_misses() {
    let tol = Tolerance::default();
    let plane = Plane::from_point_normal(&Point3::origin(), &Vector3::z(), tol).unwrap();
    let ray = Ray3::new(Point3::new(0.0, 0.0, 2.0), Vector3::new(1.0, 1.0, 0.0), tol).unwrap();
    assert!(matches!(ray_plane(&ray, &plane, tol), Intersection::None));
}

#[test]
fn parallel_segment_distance_is_symmetric() {
    let tol = Tolerance::default();
    for d in [0.5, 1.0, 7.25] {
        let a = Segment2::new(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0));
        let b = Segment2::new(Point2::new(1.0, d), Point2::new(6.0, d));
        assert!((distance::segment_segment(&a, &b, tol) - d).abs() < TOL);
        assert!((distance::segment_segment(&b, &a, tol) - d).abs() < TOL);

        let a3 = Segment3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 4.0));
        let b3 = Segment3::new(Point3::new(d, 0.0, 1.0), Point3::new(d, 0.0, 3.0));
        assert!((distance::segment_segment(&a3, &b3, tol) - distance::segment_segment(&b3, &a3, tol)).abs() < TOL);
    }
}

#[test]
fn closest_point_on_triangle_from_above() {
    let tol = Tolerance::default();
    let tri = Triangle::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0));
    let cp = closest::point_triangle(&Point3::new(0.25, 0.25, 5.0), &tri, tol).unwrap();
    assert_relative_eq!(cp.point, Point3::new(0.25, 0.25, 0.0), epsilon = TOL);
}

// ── splines ──

#[test]
fn bezier_scenario() {
    let path = BezierPath::new(
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
        ],
        SplineConfig::default(),
    )
    .unwrap();
    assert_eq!(path.evaluate(0.0, ParamMode::Strict).unwrap(), Point2::new(0.0, 0.0));
    assert_eq!(path.evaluate(1.0, ParamMode::Strict).unwrap(), Point2::new(1.0, 0.0));
    assert_relative_eq!(path.evaluate(0.5, ParamMode::Strict).unwrap(), Point2::new(0.5, 0.75), epsilon = TOL);
}

#[test]
fn catmull_rom_scenario() {
    let spline = CatmullRom::new(
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 2.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 2.0),
        ],
        SplineConfig::default(),
    )
    .unwrap();
    let t = spline.control_point_parameter(1).unwrap();
    assert_eq!(spline.evaluate(t, ParamMode::Strict).unwrap(), Point2::new(1.0, 2.0));
}

#[test]
fn straight_spline_midpoint_for_any_subdivision() {
    let length = 8.0;
    for samples in 1..=12 {
        let config = SplineConfig {
            arc_length_samples: samples,
            ..SplineConfig::default()
        };
        let spline = CatmullRom::new(vec![Point2::new(0.0, 0.0), Point2::new(0.0, length)], config).unwrap();
        assert_relative_eq!(
            spline.evaluate_by_distance(length / 2.0),
            Point2::new(0.0, length / 2.0),
            epsilon = TOL
        );
    }
}

// ── concurrency ──

#[test]
fn kernel_types_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Tolerance>();
    assert_send_sync::<Plane>();
    assert_send_sync::<Triangle>();
    assert_send_sync::<BezierPath<3>>();
    assert_send_sync::<CatmullRom<2>>();
    assert_send_sync::<curvix::CurvixError>();
}
