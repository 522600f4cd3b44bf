use crate::pose::Landmark;
use std::ops::Sub;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub(super) struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub(super) fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub(super) fn squared_distance(self, other: Self) -> f32 {
        let delta = other - self;
        delta.dot(delta)
    }

    #[inline]
    pub(super) fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Angle in degrees at `self` formed by the rays towards `a` and `c`, folded into [0, 180].
    pub(super) fn angle_between(self, a: Self, c: Self) -> f32 {
        let to_a = a - self;
        let to_c = c - self;
        let angle = (to_c.y.atan2(to_c.x) - to_a.y.atan2(to_a.x))
            .to_degrees()
            .abs();
        if angle > 180.0 {
            360.0 - angle
        } else {
            angle
        }
    }
}

impl From<&Landmark> for Point {
    fn from(landmark: &Landmark) -> Self {
        Self::new(landmark.x(), landmark.y())
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::Output {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
