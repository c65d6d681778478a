use std::fmt;

/// Identifier of a combatant inside one session.
///
/// Assigned sequentially by the session in roster order (players first).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantId(pub u32);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of the underlying character, owned by the character provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u64);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "char:{}", self.0)
    }
}

/// Key under which a session is tracked and persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl std::str::FromStr for SessionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u64::from_str_radix(s, 16).map(Self)
    }
}

/// Discrete battlefield position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance (diagonal steps count as one).
    pub fn distance(self, other: Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Bounded resource such as health or mana.
///
/// `current` never exceeds `max`; every mutation clamps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: u32,
    max: u32,
}

impl ResourceMeter {
    /// Creates a meter, clamping `current` into `[0, max]`.
    pub const fn new(current: u32, max: u32) -> Self {
        let current = if current > max { max } else { current };
        Self { current, max }
    }

    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn max(&self) -> u32 {
        self.max
    }

    pub const fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Removes up to `amount`, returning how much was actually removed.
    pub fn deplete(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.current);
        self.current -= applied;
        applied
    }

    /// Restores up to `amount`, returning how much was actually restored.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.max - self.current);
        self.current += applied;
        applied
    }

    /// Fraction of the maximum remaining, in percent.
    pub fn percent(&self) -> u32 {
        if self.max == 0 {
            return 0;
        }
        ((self.current as u64 * 100) / self.max as u64) as u32
    }
}

impl fmt::Display for ResourceMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_clamps_on_construction() {
        let meter = ResourceMeter::new(150, 100);
        assert_eq!(meter.current(), 100);
    }

    #[test]
    fn meter_stays_in_bounds_for_any_sequence() {
        let mut meter = ResourceMeter::full(40);
        let ops: [(bool, u32); 8] = [
            (true, 15),
            (false, 100),
            (true, 39),
            (true, 39),
            (false, 3),
            (true, u32::MAX),
            (false, u32::MAX),
            (true, 0),
        ];
        for (is_damage, amount) in ops {
            if is_damage {
                meter.deplete(amount);
            } else {
                meter.restore(amount);
            }
            assert!(meter.current() <= meter.max());
        }
        assert_eq!(meter.current(), 40);
    }

    #[test]
    fn deplete_reports_applied_amount() {
        let mut meter = ResourceMeter::new(5, 20);
        assert_eq!(meter.deplete(8), 5);
        assert!(meter.is_depleted());
        assert_eq!(meter.restore(30), 20);
    }

    #[test]
    fn chebyshev_distance() {
        assert_eq!(Position::new(0, 0).distance(Position::new(3, -2)), 3);
        assert_eq!(Position::new(1, 1).distance(Position::new(1, 1)), 0);
    }

    #[test]
    fn session_id_round_trips_through_hex() {
        let id = SessionId(0xdead_beef);
        assert_eq!(id.to_string().parse::<SessionId>(), Ok(id));
    }
}
