#![allow(dead_code)]

use combat_core::{Attributes, CharacterId, CharacterSnapshot, Combatant, DamageType, Weapon};

pub fn fighter(id: u64, name: &str, health: u32) -> CharacterSnapshot {
    CharacterSnapshot::new(CharacterId(id), name, 2, Attributes::AVERAGE, health)
        .with_weapon(Weapon::new("Sword", 6, DamageType::Physical))
}

/// One AI fighter per side.
pub fn duel() -> (Vec<Combatant>, Vec<Combatant>) {
    (
        vec![Combatant::ai(fighter(1, "Aria", 30))],
        vec![Combatant::ai(fighter(2, "Goblin", 30))],
    )
}
