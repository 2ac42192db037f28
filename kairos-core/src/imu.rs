//! Attitude estimation
//!
//! A complementary filter per axis: the gyro-integrated angle is trusted
//! in the short term, the accelerometer-derived angle pulls it back in the
//! long term. Yaw has no absolute reference and drifts.

use kairos_hal::ImuSample;

use crate::math::to_degrees;

/// Default weight of the gyro-integrated term
pub const DEFAULT_ALPHA: f32 = 0.96;

/// Default gyro rate multiplier
pub const DEFAULT_GYRO_SCALE: f32 = 1.0;

/// Orientation in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EulerAngles {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl EulerAngles {
    pub const fn new(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Angles implied by gravity alone
    pub fn from_accel(sample: &ImuSample) -> Self {
        let a = sample.accel;
        Self {
            roll: to_degrees(libm::atan2f(a.y, a.z)),
            pitch: to_degrees(libm::atan2f(-a.x, libm::sqrtf(a.y * a.y + a.z * a.z))),
            yaw: to_degrees(libm::atan2f(a.x, a.y)),
        }
    }
}

/// Complementary-filter attitude estimator
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AttitudeEstimator {
    angles: EulerAngles,
}

impl AttitudeEstimator {
    pub const fn new() -> Self {
        Self {
            angles: EulerAngles::new(0.0, 0.0, 0.0),
        }
    }

    /// Blend one sample into the estimate
    ///
    /// `dt` is in seconds, `alpha` in `0.0..=1.0`. Neither is validated: a
    /// non-positive `dt` stalls or reverses integration and NaN input
    /// propagates into the angles.
    pub fn update(
        &mut self,
        sample: &ImuSample,
        dt: f32,
        alpha: f32,
        gyro_scale: f32,
    ) -> EulerAngles {
        let accel = EulerAngles::from_accel(sample);
        let gyro = sample.gyro;

        let blend = |current: f32, rate: f32, accel_angle: f32| -> f32 {
            let integrated = current + rate * gyro_scale * dt;
            alpha * integrated + (1.0 - alpha) * accel_angle
        };

        self.angles = EulerAngles {
            roll: blend(self.angles.roll, gyro.x, accel.roll),
            pitch: blend(self.angles.pitch, gyro.y, accel.pitch),
            yaw: blend(self.angles.yaw, gyro.z, accel.yaw),
        };
        self.angles
    }

    /// [`update`](Self::update) with the default alpha and gyro scale
    pub fn update_default(&mut self, sample: &ImuSample, dt: f32) -> EulerAngles {
        self.update(sample, dt, DEFAULT_ALPHA, DEFAULT_GYRO_SCALE)
    }

    pub fn angles(&self) -> EulerAngles {
        self.angles
    }

    pub fn reset(&mut self) {
        self.angles = EulerAngles::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kairos_hal::Vector3;

    fn flat(gyro: Vector3) -> ImuSample {
        ImuSample {
            accel: Vector3::new(0.0, 0.0, 1.0),
            gyro,
            mag: Vector3::ZERO,
        }
    }

    #[test]
    fn test_flat_device_reads_level() {
        let angles = EulerAngles::from_accel(&flat(Vector3::ZERO));
        assert_eq!(angles.roll, 0.0);
        assert_eq!(angles.pitch, 0.0);
    }

    #[test]
    fn test_tilted_roll() {
        // Gravity split evenly between Y and Z -> 45 degrees of roll
        let sample = ImuSample {
            accel: Vector3::new(0.0, 1.0, 1.0),
            ..ImuSample::default()
        };
        let angles = EulerAngles::from_accel(&sample);
        assert!((angles.roll - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_pure_gyro_integration() {
        let mut estimator = AttitudeEstimator::new();
        let sample = flat(Vector3::new(10.0, 20.0, 30.0));

        estimator.update(&sample, 0.5, 1.0, 1.0);
        let angles = estimator.update(&sample, 0.5, 1.0, 1.0);

        assert!((angles.roll - 10.0).abs() < 1e-4);
        assert!((angles.pitch - 20.0).abs() < 1e-4);
        assert!((angles.yaw - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_pure_accel() {
        let mut estimator = AttitudeEstimator::new();
        let sample = ImuSample {
            accel: Vector3::new(0.0, 1.0, 1.0),
            gyro: Vector3::new(100.0, 100.0, 100.0),
            mag: Vector3::ZERO,
        };

        let angles = estimator.update(&sample, 1.0, 0.0, 1.0);
        assert_eq!(angles, EulerAngles::from_accel(&sample));
    }

    #[test]
    fn test_gyro_scale() {
        let mut estimator = AttitudeEstimator::new();
        let angles = estimator.update(&flat(Vector3::new(10.0, 0.0, 0.0)), 1.0, 1.0, 2.0);
        assert!((angles.roll - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_nan_does_not_panic() {
        let mut estimator = AttitudeEstimator::new();
        let sample = ImuSample {
            accel: Vector3::new(f32::NAN, 0.0, 0.0),
            ..ImuSample::default()
        };
        let angles = estimator.update_default(&sample, 0.0);
        assert!(angles.pitch.is_nan());

        estimator.reset();
        assert_eq!(estimator.angles(), EulerAngles::default());
    }
}
