//! Euclidean distances between primitives, built on [`crate::closest`].
//!
//! Each query has a `_squared` form that skips the square root.

use crate::closest;
use crate::error::Result;
use crate::geometry::{OrientedRect, Plane, Ray, Rect, Segment, Segment3, Triangle};
use crate::math::{Point, Point2, Point3, Tolerance};

#[must_use]
pub fn point_segment<const D: usize>(p: &Point<D>, seg: &Segment<D>, tol: Tolerance) -> f64 {
    point_segment_squared(p, seg, tol).sqrt()
}

#[must_use]
pub fn point_segment_squared<const D: usize>(p: &Point<D>, seg: &Segment<D>, tol: Tolerance) -> f64 {
    (closest::point_segment(p, seg, tol).point - p).norm_squared()
}

#[must_use]
pub fn point_ray<const D: usize>(p: &Point<D>, ray: &Ray<D>) -> f64 {
    point_ray_squared(p, ray).sqrt()
}

#[must_use]
pub fn point_ray_squared<const D: usize>(p: &Point<D>, ray: &Ray<D>) -> f64 {
    (closest::point_ray(p, ray).point - p).norm_squared()
}

/// Distance to a filled triangle.
///
/// # Errors
///
/// Returns a degenerate-geometry error for a collinear triangle.
pub fn point_triangle(p: &Point3, tri: &Triangle, tol: Tolerance) -> Result<f64> {
    Ok(point_triangle_squared(p, tri, tol)?.sqrt())
}

/// Squared distance to a filled triangle.
///
/// # Errors
///
/// Returns a degenerate-geometry error for a collinear triangle.
pub fn point_triangle_squared(p: &Point3, tri: &Triangle, tol: Tolerance) -> Result<f64> {
    Ok((closest::point_triangle(p, tri, tol)?.point - p).norm_squared())
}

/// Distance to a filled rectangle; zero inside.
#[must_use]
pub fn point_rect(p: &Point2, rect: &Rect) -> f64 {
    point_rect_squared(p, rect).sqrt()
}

#[must_use]
pub fn point_rect_squared(p: &Point2, rect: &Rect) -> f64 {
    (closest::point_rect(p, rect) - p).norm_squared()
}

/// Distance to a filled oriented rectangle; zero inside.
#[must_use]
pub fn point_oriented_rect(p: &Point2, rect: &OrientedRect) -> f64 {
    point_oriented_rect_squared(p, rect).sqrt()
}

#[must_use]
pub fn point_oriented_rect_squared(p: &Point2, rect: &OrientedRect) -> f64 {
    (closest::point_oriented_rect(p, rect) - p).norm_squared()
}

/// Signed distance to a plane, positive on the normal side.
#[must_use]
pub fn point_plane_signed(p: &Point3, plane: &Plane) -> f64 {
    plane.signed_distance(p)
}

#[must_use]
pub fn point_plane(p: &Point3, plane: &Plane) -> f64 {
    plane.signed_distance(p).abs()
}

#[must_use]
pub fn point_plane_squared(p: &Point3, plane: &Plane) -> f64 {
    plane.signed_distance(p).powi(2)
}

/// Distance between two segments; symmetric in its arguments.
#[must_use]
pub fn segment_segment<const D: usize>(a: &Segment<D>, b: &Segment<D>, tol: Tolerance) -> f64 {
    closest::segment_segment(a, b, tol).distance()
}

#[must_use]
pub fn segment_segment_squared<const D: usize>(a: &Segment<D>, b: &Segment<D>, tol: Tolerance) -> f64 {
    closest::segment_segment(a, b, tol).distance_squared()
}

#[must_use]
pub fn ray_segment<const D: usize>(ray: &Ray<D>, seg: &Segment<D>, tol: Tolerance) -> f64 {
    closest::ray_segment(ray, seg, tol).distance()
}

#[must_use]
pub fn ray_segment_squared<const D: usize>(ray: &Ray<D>, seg: &Segment<D>, tol: Tolerance) -> f64 {
    closest::ray_segment(ray, seg, tol).distance_squared()
}

/// Distance between a segment and a filled triangle.
///
/// # Errors
///
/// Returns a degenerate-geometry error for a collinear triangle.
pub fn segment_triangle(seg: &Segment3, tri: &Triangle, tol: Tolerance) -> Result<f64> {
    Ok(closest::segment_triangle(seg, tri, tol)?.distance())
}

/// Squared distance between a segment and a filled triangle.
///
/// # Errors
///
/// Returns a degenerate-geometry error for a collinear triangle.
pub fn segment_triangle_squared(seg: &Segment3, tri: &Triangle, tol: Tolerance) -> Result<f64> {
    Ok(closest::segment_triangle(seg, tri, tol)?.distance().powi(2))
}
