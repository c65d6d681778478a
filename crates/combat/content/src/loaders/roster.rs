//! Encounter roster loader.
//!
//! An encounter file describes both sides and the battlefield. Characters
//! are written as flat specs and turned into [`Combatant`]s with character
//! ids assigned in file order when the file leaves them out.

use std::path::Path;

use combat_core::{
    Attributes, CharacterId, CharacterSnapshot, Combatant, Controller, Environment, Position,
    Skills, Weapon,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One character as written in an encounter file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantSpec {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub skills: Skills,
    pub health: u32,
    #[serde(default)]
    pub mana: u32,
    #[serde(default)]
    pub armor: i32,
    #[serde(default)]
    pub magic_resistance: i32,
    #[serde(default)]
    pub weapon: Option<Weapon>,
    /// Overrides the side's default controller.
    #[serde(default)]
    pub controller: Option<Controller>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub action_points: Option<u32>,
}

fn default_level() -> u32 {
    1
}

impl CombatantSpec {
    fn into_combatant(self, fallback_id: u64, controller: Controller) -> Combatant {
        let mut character = CharacterSnapshot::new(
            CharacterId(self.id.unwrap_or(fallback_id)),
            self.name,
            self.level,
            self.attributes,
            self.health,
        )
        .with_skills(self.skills)
        .with_mana(self.mana)
        .with_defenses(self.armor, self.magic_resistance);
        if let Some(weapon) = self.weapon {
            character = character.with_weapon(weapon);
        }

        let mut combatant = Combatant {
            character,
            controller: self.controller.unwrap_or(controller),
            position: self.position,
            action_points: None,
        };
        if let Some(points) = self.action_points {
            combatant = combatant.with_action_points(points);
        }
        combatant
    }
}

/// Encounter file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EncounterFile {
    #[serde(default)]
    environment: Environment,
    players: Vec<CombatantSpec>,
    enemies: Vec<CombatantSpec>,
}

/// Both sides of an encounter plus its battlefield, ready for `initiate`.
#[derive(Debug, Clone, PartialEq)]
pub struct Encounter {
    pub players: Vec<Combatant>,
    pub enemies: Vec<Combatant>,
    pub environment: Environment,
}

/// Loader for encounter rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load an encounter from a RON file.
    ///
    /// Players default to [`Controller::Player`] and enemies to
    /// [`Controller::Ai`]; a spec's `controller` field overrides that.
    pub fn load(path: &Path) -> LoadResult<Encounter> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Encounter> {
        let file: EncounterFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))?;

        if file.players.is_empty() || file.enemies.is_empty() {
            anyhow::bail!("Encounter needs at least one player and one enemy");
        }
        if let Some(spec) = file
            .players
            .iter()
            .chain(&file.enemies)
            .find(|spec| spec.health == 0)
        {
            anyhow::bail!("Combatant '{}' has no health", spec.name);
        }

        let mut next_id = 1u64;
        let mut assign = |specs: Vec<CombatantSpec>, controller: Controller| {
            specs
                .into_iter()
                .map(|spec| {
                    let combatant = spec.into_combatant(next_id, controller);
                    next_id += 1;
                    combatant
                })
                .collect::<Vec<_>>()
        };
        let players = assign(file.players, Controller::Player);
        let enemies = assign(file.enemies, Controller::Ai);

        Ok(Encounter {
            players,
            enemies,
            environment: file.environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use combat_core::DamageType;

    use super::*;

    const SKIRMISH: &str = r#"(
        environment: (
            width: 10,
            height: 6,
            hazards: [(name: "Embers", damage: 2, damage_type: Fire)],
        ),
        players: [
            (
                name: "Aria",
                level: 3,
                attributes: (strength: 14, dexterity: 12, constitution: 12),
                health: 40,
                mana: 20,
                armor: 3,
                weapon: Some((name: "Longsword", base_damage: 6)),
            ),
        ],
        enemies: [
            (name: "Goblin", health: 18, position: Some((x: 9, y: 2))),
            (id: Some(77), name: "Shaman", health: 14, controller: Some(Player), action_points: Some(2)),
        ],
    )"#;

    #[test]
    fn encounter_builds_both_sides() {
        let encounter = RosterLoader::parse(SKIRMISH).unwrap();

        assert_eq!(encounter.players.len(), 1);
        let aria = &encounter.players[0];
        assert_eq!(aria.controller, Controller::Player);
        assert_eq!(aria.character.id, CharacterId(1));
        assert_eq!(aria.character.level, 3);
        assert_eq!(aria.character.health.current(), 40);
        assert_eq!(aria.character.mana.max(), 20);
        assert_eq!(aria.character.attributes.wisdom, 0);
        let weapon = aria.character.weapon.as_ref().unwrap();
        assert_eq!(weapon.damage_type, DamageType::Physical);

        let goblin = &encounter.enemies[0];
        assert_eq!(goblin.controller, Controller::Ai);
        assert_eq!(goblin.character.id, CharacterId(2));
        assert_eq!(goblin.character.level, 1);
        assert_eq!(goblin.position, Some(Position::new(9, 2)));

        let shaman = &encounter.enemies[1];
        assert_eq!(shaman.character.id, CharacterId(77));
        assert_eq!(shaman.controller, Controller::Player);
        assert_eq!(shaman.action_points, Some(2));
    }

    #[test]
    fn environment_falls_back_to_defaults() {
        let encounter = RosterLoader::parse(SKIRMISH).unwrap();
        assert_eq!(encounter.environment.width, 10);
        assert_eq!(
            encounter.environment.max_move_distance,
            Environment::DEFAULT_MOVE_DISTANCE
        );
        assert_eq!(encounter.environment.hazards.len(), 1);
    }

    #[test]
    fn one_sided_encounter_is_rejected() {
        let err = RosterLoader::parse("(players: [(name: \"Solo\", health: 10)], enemies: [])")
            .unwrap_err();
        assert!(err.to_string().contains("at least one player and one enemy"));
    }

    #[test]
    fn zero_health_is_rejected() {
        let err = RosterLoader::parse(
            "(players: [(name: \"Ghost\", health: 0)], enemies: [(name: \"Rat\", health: 3)])",
        )
        .unwrap_err();
        assert!(err.to_string().contains("Ghost"));
    }
}
