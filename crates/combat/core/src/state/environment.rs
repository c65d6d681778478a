//! Battlefield descriptor: bounds, movement cap, hazards, ambient modifiers.

use crate::combat::DamageType;
use crate::effects::EffectModifiers;

use super::Position;

/// Circular (Chebyshev) region of the battlefield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Area {
    pub center: Position,
    pub radius: u32,
}

impl Area {
    pub fn contains(&self, position: Position) -> bool {
        self.center.distance(position) <= self.radius
    }
}

/// Damage source that fires on every round rollover.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hazard {
    pub name: String,
    pub damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_type: DamageType,
    /// `None` covers the whole battlefield.
    #[cfg_attr(feature = "serde", serde(default))]
    pub area: Option<Area>,
}

impl Hazard {
    pub fn new(name: impl Into<String>, damage: u32, damage_type: DamageType) -> Self {
        Self {
            name: name.into(),
            damage,
            damage_type,
            area: None,
        }
    }

    pub fn within(mut self, area: Area) -> Self {
        self.area = Some(area);
        self
    }

    pub fn affects(&self, position: Position) -> bool {
        self.area.is_none_or(|area| area.contains(position))
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Environment {
    pub width: u32,
    pub height: u32,
    /// Maximum Chebyshev distance of a single Move.
    pub max_move_distance: u32,
    pub hazards: Vec<Hazard>,
    /// Folded into every participant's effect aggregate.
    pub ambient: EffectModifiers,
}

impl Environment {
    pub const DEFAULT_WIDTH: u32 = 12;
    pub const DEFAULT_HEIGHT: u32 = 8;
    pub const DEFAULT_MOVE_DISTANCE: u32 = 3;

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_move_distance(mut self, distance: u32) -> Self {
        self.max_move_distance = distance;
        self
    }

    pub fn with_hazard(mut self, hazard: Hazard) -> Self {
        self.hazards.push(hazard);
        self
    }

    pub fn with_ambient(mut self, ambient: EffectModifiers) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            max_move_distance: Self::DEFAULT_MOVE_DISTANCE,
            hazards: Vec::new(),
            ambient: EffectModifiers::NEUTRAL,
        }
    }
}
