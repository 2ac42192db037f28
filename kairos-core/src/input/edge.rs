//! Two-generation level/edge state

/// State of a digital input across the last two snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Released in both snapshots
    #[default]
    Idle,
    /// Pressed in both snapshots
    Held,
    /// Pressed in this snapshot only
    Began,
    /// Pressed in the previous snapshot only
    Ended,
}

impl Edge {
    /// Classify a (previous, current) level pair
    pub const fn from_levels(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, false) => Edge::Idle,
            (true, true) => Edge::Held,
            (false, true) => Edge::Began,
            (true, false) => Edge::Ended,
        }
    }

    /// Current level
    pub const fn is_active(self) -> bool {
        matches!(self, Edge::Held | Edge::Began)
    }

    /// Rising edge this snapshot
    pub const fn began(self) -> bool {
        matches!(self, Edge::Began)
    }

    /// Falling edge this snapshot
    pub const fn ended(self) -> bool {
        matches!(self, Edge::Ended)
    }
}
