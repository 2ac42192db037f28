//! Small vector and scalar helpers
//!
//! Integer vectors address pixels; float vectors carry sensor data and
//! sub-pixel positions. Transcendental functions go through `libm` so the
//! crate stays `no_std`.

use core::ops::{Add, Div, Mul, Neg, Sub};

pub const PI: f32 = core::f32::consts::PI;
pub const TWO_PI: f32 = PI * 2.0;

/// Two-component vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

pub type Vec2i = Vec2<i32>;
pub type Vec2f = Vec2<f32>;

impl<T> Vec2<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Copy + Add<Output = T> + Mul<Output = T>> Vec2<T> {
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y
    }

    pub fn length_squared(self) -> T {
        self.dot(self)
    }
}

impl Vec2f {
    pub fn length(self) -> f32 {
        libm::sqrtf(self.length_squared())
    }

    /// Unit vector in the same direction, or zero for a zero vector
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            Self::default()
        } else {
            self / len
        }
    }
}

impl From<Vec2f> for Vec2i {
    /// Truncates towards zero, matching a plain `as` cast
    fn from(v: Vec2f) -> Self {
        Vec2::new(v.x as i32, v.y as i32)
    }
}

impl From<Vec2i> for Vec2f {
    fn from(v: Vec2i) -> Self {
        Vec2::new(v.x as f32, v.y as f32)
    }
}

impl<T: Add<Output = T>> Add for Vec2<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Sub<Output = T>> Sub for Vec2<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Copy + Mul<Output = T>> Mul<T> for Vec2<T> {
    type Output = Self;
    fn mul(self, rhs: T) -> Self {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl<T: Copy + Div<Output = T>> Div<T> for Vec2<T> {
    type Output = Self;
    fn div(self, rhs: T) -> Self {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl<T: Neg<Output = T>> Neg for Vec2<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Vec2::new(-self.x, -self.y)
    }
}

/// Three-component vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vec3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

pub type Vec3f = Vec3<f32>;

impl<T> Vec3<T> {
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T: Copy + Add<Output = T> + Sub<Output = T> + Mul<Output = T>> Vec3<T> {
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length_squared(self) -> T {
        self.dot(self)
    }
}

impl Vec3f {
    pub fn length(self) -> f32 {
        libm::sqrtf(self.length_squared())
    }

    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            Self::default()
        } else {
            Vec3::new(self.x / len, self.y / len, self.z / len)
        }
    }
}

impl From<kairos_hal::Vector3> for Vec3f {
    fn from(v: kairos_hal::Vector3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl<T: Add<Output = T>> Add for Vec3<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Sub<Output = T>> Sub for Vec3<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Copy + Mul<Output = T>> Mul<T> for Vec3<T> {
    type Output = Self;
    fn mul(self, rhs: T) -> Self {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Linear interpolation between `a` and `b`
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub fn to_radians(degrees: f32) -> f32 {
    degrees * PI / 180.0
}

pub fn to_degrees(radians: f32) -> f32 {
    radians * 180.0 / PI
}

/// Wrap `value` into the half-open range `[min, max)`
///
/// An empty range collapses to `min`.
pub fn wrap(value: f32, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range == 0.0 {
        return min;
    }

    let mut v = libm::fmodf(value - min, range);
    if v < 0.0 {
        v += range;
    }
    v + min
}

/// Shortest signed difference from angle `a` to angle `b`, in radians
pub fn angle_diff(a: f32, b: f32) -> f32 {
    let diff = libm::fmodf(b - a + PI, TWO_PI) - PI;
    if diff < -PI {
        diff + TWO_PI
    } else {
        diff
    }
}
