//! Touch panel state

use kairos_hal::TouchSample;

use super::edge::Edge;
use crate::math::Vec2i;

/// Touch state across the last two snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Touch {
    current: TouchSample,
    previous: TouchSample,
}

impl Touch {
    pub const fn new() -> Self {
        Self {
            current: TouchSample {
                x: 0,
                y: 0,
                pressed: false,
            },
            previous: TouchSample {
                x: 0,
                y: 0,
                pressed: false,
            },
        }
    }

    /// Rotate generations and latch `sample`
    ///
    /// With no sample the current generation is kept, so a disabled panel
    /// settles into [`Edge::Idle`] or [`Edge::Held`] after one refresh.
    pub fn refresh(&mut self, sample: Option<TouchSample>) {
        self.previous = self.current;
        if let Some(sample) = sample {
            self.current = sample;
        }
    }

    /// Position of the latest sample
    pub fn pos(&self) -> Vec2i {
        Vec2i::new(self.current.x, self.current.y)
    }

    /// Position of the sample before the latest one
    pub fn previous_pos(&self) -> Vec2i {
        Vec2i::new(self.previous.x, self.previous.y)
    }

    /// Finger is on the panel
    pub fn pressed(&self) -> bool {
        self.current.pressed
    }

    /// Finger touched down in this snapshot
    pub fn down(&self) -> bool {
        self.edge().began()
    }

    /// Finger lifted in this snapshot
    pub fn up(&self) -> bool {
        self.edge().ended()
    }

    pub fn edge(&self) -> Edge {
        Edge::from_levels(self.previous.pressed, self.current.pressed)
    }

    pub fn current(&self) -> TouchSample {
        self.current
    }

    pub fn previous(&self) -> TouchSample {
        self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: i32, y: i32, pressed: bool) -> Option<TouchSample> {
        Some(TouchSample { x, y, pressed })
    }

    #[test]
    fn test_down_then_up() {
        let mut touch = Touch::new();
        touch.refresh(sample(10, 20, true));
        assert!(touch.down());
        assert!(!touch.up());
        assert_eq!(touch.pos(), Vec2i::new(10, 20));

        touch.refresh(sample(12, 20, true));
        assert!(!touch.down());
        assert!(touch.pressed());
        assert_eq!(touch.previous_pos(), Vec2i::new(10, 20));

        touch.refresh(sample(12, 20, false));
        assert!(touch.up());
        assert!(!touch.pressed());
    }

    #[test]
    fn test_disabled_panel_keeps_last_value() {
        let mut touch = Touch::new();
        touch.refresh(sample(3, 4, true));
        touch.refresh(None);

        assert_eq!(touch.pos(), Vec2i::new(3, 4));
        assert_eq!(touch.edge(), Edge::Held);
        assert!(!touch.down());
        assert!(!touch.up());
    }
}
