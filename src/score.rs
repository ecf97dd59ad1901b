//! Caretaker score: a 0–100 composite of how well a pet was looked after.
//!
//! Five components are blended with fixed weights: current mood, inverted
//! hunger, health, lifetime exercise and lifetime responsiveness. The two
//! lifetime components are scored from the fraction of the whole lifespan
//! spent playing or in distress, so the result is comparable across species
//! with different life expectancies. One pet year is one game day, so the
//! lifespan in minutes follows `Rules::minutes_per_day`.

use crate::model::{Pet, Rules, VITAL_MAX, VITAL_MIN};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Year length used when no rules are at hand.
pub const MINUTES_PER_YEAR: f64 = 1440.0;

const W_MOOD: f64 = 0.25;
const W_HUNGER_INVERTED: f64 = 0.25;
const W_HEALTH: f64 = 0.20;
const W_FITNESS: f64 = 0.15;
const W_ATTENTION: f64 = 0.15;

const FITNESS_PASS: f64 = 0.02;
const FITNESS_EXCELLENT: f64 = 0.08;

const ATTENTION_EXCELLENT: f64 = 0.005;
const ATTENTION_PASS: f64 = 0.05;
const ATTENTION_FAIL: f64 = 0.15;

const SPECIAL_GATE: u8 = 95;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreInputs {
    pub mood: f64,
    pub hunger: f64,
    pub health: f64,
    pub fitness_minutes: f64,
    pub distress_minutes: f64,
    pub life_expectancy_years: f64,
    pub minutes_per_year: f64,
}

impl Default for ScoreInputs {
    fn default() -> Self {
        Self {
            mood: 0.0,
            hunger: 0.0,
            health: 0.0,
            fitness_minutes: 0.0,
            distress_minutes: 0.0,
            life_expectancy_years: 0.0,
            minutes_per_year: MINUTES_PER_YEAR,
        }
    }
}

impl ScoreInputs {
    pub fn for_pet(pet: &Pet, rules: &Rules) -> Self {
        Self {
            mood: pet.vitals.mood,
            hunger: pet.vitals.hunger,
            health: pet.vitals.health,
            fitness_minutes: f64::from(pet.timers.fitness),
            distress_minutes: f64::from(pet.timers.distress),
            life_expectancy_years: f64::from(pet.life_expectancy),
            minutes_per_year: f64::from(rules.minutes_per_day),
        }
    }
}

/// Per-component values after sanitising, before weighting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breakdown {
    pub mood: f64,
    pub hunger_inverted: f64,
    pub health: f64,
    pub fitness: f64,
    pub attention: f64,
}

impl Breakdown {
    pub fn weighted(&self) -> f64 {
        W_MOOD * self.mood
            + W_HUNGER_INVERTED * self.hunger_inverted
            + W_HEALTH * self.health
            + W_FITNESS * self.fitness
            + W_ATTENTION * self.attention
    }
}

/// Non-finite values collapse to the worst bound.
fn sanitize(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(VITAL_MIN, VITAL_MAX)
    } else {
        VITAL_MIN
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

pub fn total_life_minutes(years: f64, minutes_per_year: f64) -> f64 {
    let total = years.max(0.0) * minutes_per_year.max(0.0);
    if total.is_finite() {
        total
    } else {
        0.0
    }
}

/// Share of the lifespan covered by `minutes`, or `None` when it cannot be
/// computed.
fn life_ratio(minutes: f64, total: f64) -> Option<f64> {
    if total <= 0.0 {
        return None;
    }
    let ratio = minutes / total;
    ratio.is_finite().then(|| ratio.clamp(0.0, 1.0))
}

/// Whole-number exercise score from lifetime minutes spent playing.
pub fn fitness_score(fitness_minutes: f64, total_life_minutes: f64) -> f64 {
    let Some(ratio) = life_ratio(fitness_minutes, total_life_minutes) else {
        return 0.0;
    };
    if ratio >= FITNESS_EXCELLENT {
        100.0
    } else if ratio <= FITNESS_PASS {
        lerp(0.0, 60.0, ratio / FITNESS_PASS).round()
    } else {
        lerp(60.0, 100.0, (ratio - FITNESS_PASS) / (FITNESS_EXCELLENT - FITNESS_PASS)).round()
    }
}

/// Whole-number responsiveness score; lower distress is better.
pub fn attention_score(distress_minutes: f64, total_life_minutes: f64) -> f64 {
    let Some(ratio) = life_ratio(distress_minutes, total_life_minutes) else {
        return 0.0;
    };
    if ratio <= ATTENTION_EXCELLENT {
        100.0
    } else if ratio >= ATTENTION_FAIL {
        0.0
    } else if ratio <= ATTENTION_PASS {
        lerp(
            100.0,
            60.0,
            (ratio - ATTENTION_EXCELLENT) / (ATTENTION_PASS - ATTENTION_EXCELLENT),
        )
        .round()
    } else {
        lerp(60.0, 0.0, (ratio - ATTENTION_PASS) / (ATTENTION_FAIL - ATTENTION_PASS)).round()
    }
}

pub fn breakdown(inputs: &ScoreInputs) -> Breakdown {
    let total = total_life_minutes(inputs.life_expectancy_years, inputs.minutes_per_year);
    Breakdown {
        mood: sanitize(inputs.mood),
        hunger_inverted: sanitize(VITAL_MAX - inputs.hunger),
        health: sanitize(inputs.health),
        fitness: sanitize(fitness_score(inputs.fitness_minutes, total)),
        attention: sanitize(attention_score(inputs.distress_minutes, total)),
    }
}

pub fn score(inputs: &ScoreInputs) -> u8 {
    let raw = sanitize(breakdown(inputs).weighted());
    raw.round() as u8
}

pub fn qualifies_for_special(score: u8) -> bool {
    score >= SPECIAL_GATE
}

/// Display-only rank; gating uses [`qualifies_for_special`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Grade {
    SPlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: u8) -> Grade {
        match score {
            95.. => Grade::SPlus,
            90..=94 => Grade::A,
            80..=89 => Grade::B,
            70..=79 => Grade::C,
            60..=69 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::SPlus => "S+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(s)
    }
}
