//! Raw input sampling
//!
//! The frame loop latches hardware input exactly once per frame through
//! [`InputHardware::sample`]. Implementations are expected to hand back
//! already-debounced levels; edge detection happens in `kairos-core`.

/// Number of physical front buttons
pub const BUTTON_COUNT: usize = 3;

/// Physical button identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Left / primary button
    A,
    /// Middle button
    B,
    /// Right button
    C,
}

impl ButtonId {
    /// All buttons in index order
    pub const ALL: [ButtonId; BUTTON_COUNT] = [ButtonId::A, ButtonId::B, ButtonId::C];

    /// Index into per-button arrays
    pub const fn index(self) -> usize {
        match self {
            ButtonId::A => 0,
            ButtonId::B => 1,
            ButtonId::C => 2,
        }
    }
}

/// Single touch point as reported by the panel controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    /// X coordinate in display pixels
    pub x: i32,
    /// Y coordinate in display pixels
    pub y: i32,
    /// Whether a finger is currently on the panel
    pub pressed: bool,
}

/// Three-axis vector as reported by an inertial sensor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Raw inertial measurement
///
/// Device coordinate frame: Z points out of the back of the screen,
/// Y points towards the bottom edge, X towards the left edge. A device
/// lying flat screen-up reads roughly (0, 0, +1 G).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImuSample {
    /// Acceleration in G
    pub accel: Vector3,
    /// Angular rate in degrees per second
    pub gyro: Vector3,
    /// Magnetic field in microtesla (zero when no magnetometer is fitted)
    pub mag: Vector3,
}

/// Everything the hardware reports for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HardwareSample {
    /// Debounced button levels, indexed by [`ButtonId::index`]
    pub buttons: [bool; BUTTON_COUNT],
    /// Touch state, or `None` when the board has no (enabled) touch panel
    pub touch: Option<TouchSample>,
    /// IMU reading, or `None` when the board has no IMU or it failed
    pub imu: Option<ImuSample>,
}

/// Board input hardware
///
/// Called once per committed frame. Implementations should not block
/// for longer than a bus transaction.
pub trait InputHardware {
    /// Latch the latest state of all input devices
    fn sample(&mut self) -> HardwareSample;
}

impl<T: InputHardware + ?Sized> InputHardware for &mut T {
    fn sample(&mut self) -> HardwareSample {
        (**self).sample()
    }
}
