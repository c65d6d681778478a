//! Fixtures shared by unit tests.

use crate::combat::DamageType;
use crate::config::CombatConfig;
use crate::env::RngOracle;
use crate::session::{Combatant, initiate};
use crate::state::{
    Attributes, CharacterId, CharacterSnapshot, CombatSession, Environment, SessionId, Weapon,
};
use crate::turn::TurnManager;
use crate::{ActionEngine, StatusEffectEngine};

pub(crate) fn fighter(id: u64, name: &str) -> CharacterSnapshot {
    CharacterSnapshot::new(CharacterId(id), name, 1, Attributes::AVERAGE, 30)
        .with_weapon(Weapon::new("Sword", 5, DamageType::Physical))
}

pub(crate) fn with_dex(mut character: CharacterSnapshot, dexterity: i32) -> CharacterSnapshot {
    character.attributes.dexterity = dexterity;
    character
}

pub(crate) fn turns(config: CombatConfig) -> TurnManager {
    TurnManager::new(StatusEffectEngine::standard(), config)
}

pub(crate) fn engine() -> ActionEngine {
    ActionEngine::new(turns(CombatConfig::default()))
}

/// Starts a session with AI combatants at their default seats.
pub(crate) fn start(
    turns: &TurnManager,
    players: Vec<CharacterSnapshot>,
    enemies: Vec<CharacterSnapshot>,
    environment: Environment,
    rng: &dyn RngOracle,
) -> CombatSession {
    initiate(
        SessionId(0xc0ffee),
        42,
        players.into_iter().map(Combatant::ai).collect(),
        enemies.into_iter().map(Combatant::ai).collect(),
        environment,
        turns,
        rng,
    )
    .expect("valid encounter")
    .session
}
