//! Per-button edge tracking

use kairos_hal::ButtonId;

use super::edge::Edge;

/// Level and edge state of one physical button
///
/// Fed with debounced levels once per snapshot. Edge queries are true only
/// in the snapshot where the level changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Button {
    id: ButtonId,
    level: bool,
    previous: bool,
    last_change_ms: u32,
    now_ms: u32,
}

impl Button {
    pub const fn new(id: ButtonId) -> Self {
        Self {
            id,
            level: false,
            previous: false,
            last_change_ms: 0,
            now_ms: 0,
        }
    }

    /// Latch a new level sampled at `now_ms`
    pub fn update(&mut self, level: bool, now_ms: u32) {
        self.previous = self.level;
        self.level = level;
        self.now_ms = now_ms;

        if self.level != self.previous {
            self.last_change_ms = now_ms;
        }
    }

    pub fn id(&self) -> ButtonId {
        self.id
    }

    pub fn edge(&self) -> Edge {
        Edge::from_levels(self.previous, self.level)
    }

    /// Button is currently held
    pub fn is_down(&self) -> bool {
        self.level
    }

    /// Button is currently up
    pub fn is_up(&self) -> bool {
        !self.level
    }

    /// Button went down in this snapshot
    pub fn was_pressed(&self) -> bool {
        self.edge().began()
    }

    /// Button came up in this snapshot
    pub fn was_released(&self) -> bool {
        self.edge().ended()
    }

    /// Milliseconds spent in the current level as of the snapshot
    pub fn held_ms(&self) -> u32 {
        self.now_ms.wrapping_sub(self.last_change_ms)
    }

    /// Held down for at least `ms`
    pub fn pressed_for(&self, ms: u32) -> bool {
        self.level && self.held_ms() >= ms
    }

    /// Left up for at least `ms`
    pub fn released_for(&self, ms: u32) -> bool {
        !self.level && self.held_ms() >= ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_edge_lasts_one_update() {
        let mut button = Button::new(ButtonId::A);
        button.update(true, 0);
        assert!(button.was_pressed());
        assert!(button.is_down());

        button.update(true, 16);
        assert!(!button.was_pressed());
        assert!(button.is_down());

        button.update(false, 32);
        assert!(button.was_released());
        assert!(button.is_up());
    }

    #[test]
    fn test_pressed_for_duration() {
        let mut button = Button::new(ButtonId::B);
        button.update(true, 100);
        button.update(true, 400);
        assert!(button.pressed_for(300));
        assert!(!button.pressed_for(301));
        assert!(!button.released_for(0));

        button.update(false, 500);
        button.update(false, 1500);
        assert!(button.released_for(1000));
        assert!(!button.pressed_for(0));
    }
}
