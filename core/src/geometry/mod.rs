use nalgebra as na;

pub type Point2 = na::Point2<f64>;
pub type Vector2 = na::Vector2<f64>;

/// Tolerance for floating-point comparisons
pub const EPSILON: f64 = 1e-6;

pub trait ApproxEq {
    fn approx_eq(&self, other: &Self) -> bool;
}

impl ApproxEq for f64 {
    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).abs() < EPSILON
    }
}

impl ApproxEq for Point2 {
    fn approx_eq(&self, other: &Self) -> bool {
        na::distance_squared(self, other) < EPSILON * EPSILON
    }
}

impl ApproxEq for [f64; 2] {
    fn approx_eq(&self, other: &Self) -> bool {
        utils_2d::points_equal(*self, *other)
    }
}

pub mod utils_2d;

/// Lift a raw `[x, y]` pair into a nalgebra point.
#[inline]
pub fn to_point(p: [f64; 2]) -> Point2 {
    Point2::new(p[0], p[1])
}

#[inline]
pub fn from_point(p: &Point2) -> [f64; 2] {
    [p.x, p.y]
}
