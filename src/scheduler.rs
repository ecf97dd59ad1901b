use crate::model::{Pet, Rules, VITAL_MAX};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened while a pet was being caught up to the wall clock.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CatchupSummary {
    pub minutes_simulated: u32,
    pub minutes_dropped: u64,
    pub died: bool,
    pub became_sick: bool,
    pub penalties: u32,
    pub hunger_max: f64,
    pub mood_min: f64,
    pub health_min: f64,
}

impl CatchupSummary {
    pub fn new() -> Self {
        Self {
            minutes_simulated: 0,
            minutes_dropped: 0,
            died: false,
            became_sick: false,
            penalties: 0,
            hunger_max: 0.0,
            mood_min: VITAL_MAX,
            health_min: VITAL_MAX,
        }
    }

    /// Worth telling the player about.
    pub fn has_anything(&self) -> bool {
        self.minutes_simulated > 0
            && (self.died
                || self.became_sick
                || self.penalties > 0
                || self.minutes_dropped > 0
                || self.hunger_max > 60.0
                || self.mood_min < 40.0
                || self.health_min < 60.0)
    }

    fn record(&mut self, before: &Pet, after: &Pet) {
        self.minutes_simulated += 1;
        self.hunger_max = self.hunger_max.max(after.vitals.hunger);
        self.mood_min = self.mood_min.min(after.vitals.mood);
        self.health_min = self.health_min.min(after.vitals.health);
        self.penalties += after.counters.penalties - before.counters.penalties;
        if after.flags.sick && !before.flags.sick {
            self.became_sick = true;
        }
        if after.flags.dead {
            self.died = true;
        }
    }
}

impl Default for CatchupSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole game-minutes between `pet.last_simulated_at` and `now`. Negative
/// gaps count as zero.
pub fn pending_minutes(pet: &Pet, now: DateTime<Utc>, rules: &Rules) -> u64 {
    let elapsed_ms = (now - pet.last_simulated_at).num_milliseconds();
    let minute_ms = 1000.0 * rules.real_seconds_per_game_minute;
    if elapsed_ms <= 0 || !minute_ms.is_finite() || minute_ms <= 0.0 {
        return 0;
    }
    (elapsed_ms as f64 / minute_ms).floor() as u64
}

/// Replays the time since the pet was last simulated, up to the catch-up cap.
///
/// Returns `None` when less than a whole game-minute has passed; the pet is
/// left untouched so the fraction keeps accumulating. Otherwise the pet's
/// clock is moved to `now` even when the cap cut the replay short, and the
/// excess is gone for good.
pub fn catch_up(pet: &Pet, now: DateTime<Utc>, rules: &Rules) -> Option<(Pet, CatchupSummary)> {
    let pending = pending_minutes(pet, now, rules);
    if pending == 0 {
        return None;
    }

    let cap = u64::from(rules.catch_up_cap_minutes);
    let steps = pending.min(cap);
    let mut summary = CatchupSummary::new();
    summary.minutes_dropped = pending - steps;

    let mut current = pet.clone();
    for _ in 0..steps {
        if current.flags.dead {
            break;
        }
        let mut next = current.clone();
        next.tick_minute(rules);
        summary.record(&current, &next);
        current = next;
    }
    current.last_simulated_at = now;

    if summary.minutes_dropped > 0 {
        tracing::warn!(
            pet = %pet.id,
            pending,
            dropped = summary.minutes_dropped,
            "catch-up capped"
        );
    }
    tracing::debug!(
        pet = %pet.id,
        simulated = summary.minutes_simulated,
        died = summary.died,
        "catch-up replayed"
    );

    Some((current, summary))
}
