//! Attack outcomes and full attack resolution.

use crate::config::CombatConfig;
use crate::stats::CombatStats;

use super::damage::{DamageSource, DamageType, defense_against, raw_damage};
use super::hit::{calculate_hit_chance, check_hit, hit_chance_without_dodge};

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Attack hit the target.
    Hit,
    /// Attack missed the target.
    Miss,
    /// Critical hit; damage multiplied before defenses.
    Critical,
    /// Natural low roll; the attack fails outright.
    Fumble,
    /// Attack landed but defenses absorbed all of it.
    Block,
    /// Missed a target holding a defensive stance.
    Parry,
    /// Missed only because of the target's evasion bonuses.
    Dodge,
}

impl AttackOutcome {
    /// True when the attack connected (damage may still be zero on a block).
    pub fn landed(self) -> bool {
        matches!(self, Self::Hit | Self::Critical | Self::Block)
    }
}

/// Result of a combat resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub outcome: AttackOutcome,
    /// The d100 roll that decided the outcome.
    pub roll: u32,
    /// Final hit chance the roll was compared against.
    pub hit_chance: u32,
    /// Damage after multipliers, crits, and defenses.
    pub damage: u32,
    pub damage_type: DamageType,
}

/// Resolve a complete attack sequence (fumble, hit check, damage, defense).
///
/// * `roll` - d100 roll (1-100 inclusive)
///
/// Rolls at or below `fumble_threshold` fumble regardless of hit chance.
/// Rolls at or above `critical_threshold` always land as criticals, even if
/// the hit chance alone would have missed.
pub fn resolve_attack(
    attacker: &CombatStats,
    target: &CombatStats,
    source: &DamageSource,
    roll: u32,
    config: &CombatConfig,
) -> AttackResult {
    let hit_chance = calculate_hit_chance(attacker, target, source.style, config);
    let miss = |outcome| AttackResult {
        outcome,
        roll,
        hit_chance,
        damage: 0,
        damage_type: source.damage_type,
    };

    // 1. Fumble beats everything
    if roll <= config.fumble_threshold {
        return miss(AttackOutcome::Fumble);
    }

    // 2. Hit check; criticals bypass it
    let critical = roll >= config.critical_threshold;
    if !critical && !check_hit(hit_chance, roll) {
        let outcome = if target.defending {
            AttackOutcome::Parry
        } else if check_hit(hit_chance_without_dodge(attacker, target, source.style, config), roll)
        {
            AttackOutcome::Dodge
        } else {
            AttackOutcome::Miss
        };
        return miss(outcome);
    }

    // 3. Damage, then defense
    let mut damage = raw_damage(attacker, source);
    if critical {
        damage = damage.saturating_mul(config.crit_multiplier);
    }
    let defense = defense_against(target, source.damage_type);
    let damage = damage.saturating_sub(defense);

    let outcome = if critical {
        AttackOutcome::Critical
    } else if damage == 0 && defense > 0 {
        AttackOutcome::Block
    } else {
        AttackOutcome::Hit
    };

    AttackResult {
        outcome,
        roll,
        hit_chance,
        damage,
        damage_type: source.damage_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{AttackStyle, mitigate};
    use crate::effects::{EffectModifiers, StatusEffectEngine, StatusEffectKind};
    use crate::state::{Attributes, CharacterId, CharacterSnapshot, Skills};

    fn stats(character: &CharacterSnapshot) -> CombatStats {
        CombatStats::of(character, &EffectModifiers::NEUTRAL)
    }

    fn average(name: &str) -> CharacterSnapshot {
        CharacterSnapshot::new(CharacterId(1), name, 1, Attributes::AVERAGE, 30)
    }

    #[test]
    fn sixty_accuracy_scenario() {
        let config = CombatConfig::default();
        let attacker = stats(&average("Attacker"));
        let target = stats(&average("Target"));
        let sword = DamageSource::weapon(5, DamageType::Physical);

        let hit = resolve_attack(&attacker, &target, &sword, 50, &config);
        assert_eq!(hit.hit_chance, 60);
        assert_eq!(hit.outcome, AttackOutcome::Hit);
        assert_eq!(hit.damage, 5);

        let crit = resolve_attack(&attacker, &target, &sword, 97, &config);
        assert_eq!(crit.outcome, AttackOutcome::Critical);
        assert_eq!(crit.damage, 10);

        let fumble = resolve_attack(&attacker, &target, &sword, 3, &config);
        assert_eq!(fumble.outcome, AttackOutcome::Fumble);
        assert_eq!(fumble.damage, 0);

        let miss = resolve_attack(&attacker, &target, &sword, 61, &config);
        assert_eq!(miss.outcome, AttackOutcome::Miss);
    }

    #[test]
    fn fumble_wins_even_at_full_hit_chance() {
        let config = CombatConfig::default();
        let mut ace = average("Ace");
        ace.skills = Skills {
            combat: 80,
            ..Skills::ZERO
        };
        let attacker = stats(&ace);
        let target = stats(&average("Target"));
        let sword = DamageSource::weapon(5, DamageType::Physical);

        assert_eq!(calculate_hit_chance(&attacker, &target, AttackStyle::Physical, &config), 100);
        let result = resolve_attack(&attacker, &target, &sword, 5, &config);
        assert_eq!(result.outcome, AttackOutcome::Fumble);
    }

    #[test]
    fn critical_lands_at_zero_hit_chance() {
        let config = CombatConfig::default();
        let attacker = stats(&average("Attacker"));
        let mut evasive = average("Evasive");
        evasive.attributes.dexterity = 200;
        let target = stats(&evasive);
        let sword = DamageSource::weapon(4, DamageType::Physical);

        assert_eq!(calculate_hit_chance(&attacker, &target, AttackStyle::Physical, &config), 0);
        let result = resolve_attack(&attacker, &target, &sword, 95, &config);
        assert_eq!(result.outcome, AttackOutcome::Critical);
        assert_eq!(result.damage, 8);
    }

    #[test]
    fn defending_target_parries_and_dodge_is_attributed() {
        let config = CombatConfig::default();
        let engine = StatusEffectEngine::standard();
        let attacker = stats(&average("Attacker"));
        let sword = DamageSource::weapon(5, DamageType::Physical);

        let mut guard = average("Guard");
        engine.apply(&mut guard.effects, StatusEffectKind::Defending, None);
        let parry = resolve_attack(&attacker, &stats(&guard), &sword, 80, &config);
        assert_eq!(parry.outcome, AttackOutcome::Parry);

        // Hasted: +5 dodge, so hit chance drops 60 -> 55
        let mut quick = average("Quick");
        engine.apply(&mut quick.effects, StatusEffectKind::Hasted, None);
        let dodge = resolve_attack(&attacker, &stats(&quick), &sword, 58, &config);
        assert_eq!(dodge.hit_chance, 55);
        assert_eq!(dodge.outcome, AttackOutcome::Dodge);
    }

    #[test]
    fn armor_can_block_entirely() {
        let config = CombatConfig::default();
        let attacker = stats(&average("Attacker"));
        let knight = average("Knight").with_defenses(8, 0);
        let result = resolve_attack(
            &attacker,
            &stats(&knight),
            &DamageSource::weapon(5, DamageType::Physical),
            40,
            &config,
        );
        assert_eq!(result.outcome, AttackOutcome::Block);
        assert_eq!(result.damage, 0);
    }

    #[test]
    fn defense_depends_on_damage_type() {
        let mut target = average("Target").with_defenses(4, 1);
        target.attributes.constitution = 14;
        let target = stats(&target);

        assert_eq!(defense_against(&target, DamageType::Physical), 6);
        assert_eq!(defense_against(&target, DamageType::Poison), 6);
        assert_eq!(defense_against(&target, DamageType::Fire), 3);
        assert_eq!(defense_against(&target, DamageType::True), 0);
        assert_eq!(mitigate(5, &target, DamageType::Physical), 0);
        assert_eq!(mitigate(5, &target, DamageType::True), 5);
    }

    #[test]
    fn negative_defense_counts_as_zero() {
        let mut frail = average("Frail");
        frail.attributes.constitution = 2;
        assert_eq!(defense_against(&stats(&frail), DamageType::Physical), 0);
    }

    #[test]
    fn spells_scale_with_intelligence_and_multiplier() {
        let engine = StatusEffectEngine::standard();
        let mut mage = average("Mage");
        mage.attributes.intelligence = 16;
        engine.apply(&mut mage.effects, StatusEffectKind::Empowered, None);
        let bolt = DamageSource::spell(7, DamageType::Lightning);
        // (7 + 3) * 1.2
        assert_eq!(raw_damage(&stats(&mage), &bolt), 12);
    }
}
