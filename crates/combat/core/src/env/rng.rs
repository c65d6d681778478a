//! RNG oracle for deterministic random number generation.
//!
//! Every roll in a session is derived from the session seed, the action
//! nonce, the rolling participant, and a roll context. Replaying the same
//! actions against the same seed reproduces the same encounter.

use std::collections::VecDeque;
use std::sync::Mutex;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&self, seed: u64, sides: u32) -> u32 {
        (self.next_u32(seed) % sides.max(1)) + 1
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Distinguishes independent rolls made for the same participant and nonce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RollContext {
    Initiative = 0,
    Hit = 1,
    Flee = 2,
}

/// Compute a deterministic seed for one roll.
///
/// * `session_seed` - seed fixed when the session is initiated
/// * `nonce` - action sequence number (increments each resolved action)
/// * `participant` - raw id of the rolling participant
/// * `context` - which roll within the action
pub fn compute_seed(session_seed: u64, nonce: u64, participant: u32, context: RollContext) -> u64 {
    let mut hash = session_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (participant as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // SplitMix64 finalizer
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Scripted oracle that replays queued rolls in order, for tests and demos.
///
/// Each `roll_d100`/`roll_die` call pops the next queued value (clamped into
/// the die's range). When the queue is empty it falls back to [`PcgRng`].
#[derive(Debug, Default)]
pub struct ScriptedRng {
    rolls: Mutex<VecDeque<u32>>,
}

impl ScriptedRng {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: Mutex::new(rolls.into_iter().collect()),
        }
    }

    /// Queue more rolls after the ones already pending.
    pub fn push(&self, roll: u32) {
        if let Ok(mut rolls) = self.rolls.lock() {
            rolls.push_back(roll);
        }
    }

    fn pop(&self) -> Option<u32> {
        self.rolls.lock().ok()?.pop_front()
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&self, seed: u64) -> u32 {
        PcgRng.next_u32(seed)
    }

    fn roll_d100(&self, seed: u64) -> u32 {
        match self.pop() {
            Some(roll) => roll.clamp(1, 100),
            None => PcgRng.roll_d100(seed),
        }
    }

    fn roll_die(&self, seed: u64, sides: u32) -> u32 {
        match self.pop() {
            Some(roll) => roll.clamp(1, sides.max(1)),
            None => PcgRng.roll_die(seed, sides),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic() {
        let seed = compute_seed(42, 7, 3, RollContext::Hit);
        assert_eq!(PcgRng.roll_d100(seed), PcgRng.roll_d100(seed));
    }

    #[test]
    fn rolls_stay_in_range() {
        for nonce in 0..500 {
            let seed = compute_seed(9, nonce, 1, RollContext::Initiative);
            let d100 = PcgRng.roll_d100(seed);
            let d20 = PcgRng.roll_die(seed, 20);
            assert!((1..=100).contains(&d100));
            assert!((1..=20).contains(&d20));
        }
    }

    #[test]
    fn contexts_produce_distinct_seeds() {
        let hit = compute_seed(1, 1, 1, RollContext::Hit);
        let flee = compute_seed(1, 1, 1, RollContext::Flee);
        assert_ne!(hit, flee);
    }

    #[test]
    fn scripted_rolls_replay_in_order_then_fall_back() {
        let rng = ScriptedRng::new([50, 97, 3]);
        assert_eq!(rng.roll_d100(0), 50);
        assert_eq!(rng.roll_d100(0), 97);
        assert_eq!(rng.roll_die(0, 20), 3);
        let fallback = rng.roll_die(11, 20);
        assert_eq!(fallback, PcgRng.roll_die(11, 20));
    }
}
