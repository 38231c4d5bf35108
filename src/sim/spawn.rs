//! Fruit population: staged growth and delayed respawn
//!
//! Slots are never removed. A sliced fruit keeps its slot and is relaunched in
//! place when its timer runs out, so slot ids stay valid for the whole run.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::fruit::Fruit;
use crate::settings::{Settings, SpawnRule};

/// Effect of a rule that fired during a hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleFired {
    pub rule: SpawnRule,
    /// First slot the rule appended
    pub first_slot: usize,
    pub added: usize,
}

/// Tracks which score rules have fired and the current respawn delay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnManager {
    rules: Vec<SpawnRule>,
    /// Rules before this index have fired
    fired: usize,
    respawn_delay: f32,
    initial_delay: f32,
}

impl SpawnManager {
    pub fn new(settings: &Settings) -> Self {
        let mut rules = settings.rules.clone();
        rules.sort_by_key(|r| r.score);
        Self {
            rules,
            fired: 0,
            respawn_delay: settings.respawn_delay,
            initial_delay: settings.respawn_delay,
        }
    }

    /// Current delay between slice and relaunch (seconds)
    pub fn respawn_delay(&self) -> f32 {
        self.respawn_delay
    }

    /// Number of rules that have fired this run
    pub fn rules_fired(&self) -> usize {
        self.fired
    }

    /// Score of the next rule still waiting to fire
    pub fn next_threshold(&self) -> Option<u64> {
        self.rules.get(self.fired).map(|r| r.score)
    }

    /// Put every rule back and restore the starting delay
    pub fn reset(&mut self) {
        self.fired = 0;
        self.respawn_delay = self.initial_delay;
    }

    /// Take a sliced fruit out of play until the current delay elapses
    pub fn on_hit(&self, fruit: &mut Fruit) {
        fruit.slice(self.respawn_delay);
    }

    /// Fire every rule the score has reached that has not fired yet
    ///
    /// Each rule fires at most once per run no matter how far the score climbs
    /// past its threshold.
    pub fn on_score<R: Rng>(
        &mut self,
        score: u64,
        fruits: &mut Vec<Fruit>,
        rng: &mut R,
        settings: &Settings,
    ) -> Vec<RuleFired> {
        let mut fired = Vec::new();
        while let Some(rule) = self.rules.get(self.fired).copied() {
            if score < rule.score {
                break;
            }
            self.fired += 1;

            let first_slot = fruits.len();
            for _ in 0..rule.extra_fruits {
                fruits.push(Fruit::spawn(rng, settings));
            }
            if let Some(delay) = rule.respawn_delay {
                self.respawn_delay = delay;
            }
            fired.push(RuleFired {
                rule,
                first_slot,
                added: rule.extra_fruits as usize,
            });
        }
        fired
    }

    /// Count down sliced fruits and relaunch the ones whose timer ran out.
    /// Returns the relaunched slots.
    pub fn on_tick<R: Rng>(
        &self,
        dt: f32,
        fruits: &mut [Fruit],
        rng: &mut R,
        settings: &Settings,
    ) -> Vec<usize> {
        let mut relaunched = Vec::new();
        for (slot, fruit) in fruits.iter_mut().enumerate() {
            if fruit.tick_respawn(dt) {
                fruit.respawn(rng, settings);
                relaunched.push(slot);
            }
        }
        relaunched
    }
}
