use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SAVE_VERSION: u32 = 1;

pub const VITAL_MIN: f64 = 0.0;
pub const VITAL_MAX: f64 = 100.0;

/// Moves a vital by `delta`, keeping it inside `[0, 100]`.
pub(crate) fn nudge(value: f64, delta: f64) -> f64 {
    (value + delta).clamp(VITAL_MIN, VITAL_MAX)
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Species {
    Fox,
    Axolotl,
}

impl Species {
    pub fn life_expectancy(self) -> u32 {
        match self {
            Species::Fox => 10,
            Species::Axolotl => 15,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Species::Fox => "Fox",
            Species::Axolotl => "Axolotl",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Status {
    Idle,
    Eating,
    Pooping,
    Playing,
    Sleeping,
    Vomiting,
    Dancing,
    Dead,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Idle => "Idle",
            Status::Eating => "Eating",
            Status::Pooping => "Pooping",
            Status::Playing => "Playing",
            Status::Sleeping => "Sleeping",
            Status::Vomiting => "Vomiting",
            Status::Dancing => "Dancing",
            Status::Dead => "Dead",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Baby,
    Toddler,
    Teen,
    Adult,
    Special,
}

impl Phase {
    /// Life stage for `age` out of `life_expectancy` years. Boundaries sit at
    /// the ceilings of the quarter, half and three-quarter marks.
    pub fn for_age(age: u32, life_expectancy: u32, special: bool) -> Phase {
        if special {
            return Phase::Special;
        }
        let l = life_expectancy;
        if age < l.div_ceil(4) {
            Phase::Baby
        } else if age < l.div_ceil(2) {
            Phase::Toddler
        } else if age < (3 * l).div_ceil(4) {
            Phase::Teen
        } else {
            Phase::Adult
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Baby => "Baby",
            Phase::Toddler => "Toddler",
            Phase::Teen => "Teen",
            Phase::Adult => "Adult",
            Phase::Special => "Special",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CauseOfDeath {
    OldAge,
    Neglect,
    Starvation,
    Heartbreak,
}

impl CauseOfDeath {
    pub fn label(self) -> &'static str {
        match self {
            CauseOfDeath::OldAge => "Old Age",
            CauseOfDeath::Neglect => "Neglect",
            CauseOfDeath::Starvation => "Starvation",
            CauseOfDeath::Heartbreak => "Broken Heart",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Vitals {
    pub hunger: f64,
    pub mood: f64,
    pub energy: f64,
    pub weight: f64,
    pub health: f64,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            hunger: 50.0,
            mood: 100.0,
            energy: 100.0,
            weight: 50.0,
            health: 100.0,
        }
    }
}

impl Vitals {
    pub fn all_in_bounds(&self) -> bool {
        [self.hunger, self.mood, self.energy, self.weight, self.health]
            .iter()
            .all(|v| (VITAL_MIN..=VITAL_MAX).contains(v))
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flags {
    pub special: bool,
    pub sick: bool,
    pub dirty: bool,
    pub dead: bool,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Counters {
    pub mess: u32,
    pub lifetime_mess: u32,
    pub meals_since_mess: u32,
    pub penalties: u32,
}

/// Simulated-minute timers. `fitness` and `distress` are lifetime totals;
/// the rest count a consecutive streak and drop to zero when it breaks.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Timers {
    pub minute_of_day: u32,
    pub age_progress: u32,
    pub starving: u32,
    pub overfull: u32,
    pub low_mood: u32,
    pub fitness: u32,
    pub distress: u32,
    pub dirty: u32,
    pub sick: u32,
    pub sleeping: u32,
    #[serde(default)]
    pub eating: u32,
}

impl Default for Timers {
    fn default() -> Self {
        Self {
            minute_of_day: 480,
            age_progress: 0,
            starving: 0,
            overfull: 0,
            low_mood: 0,
            fitness: 0,
            distress: 0,
            dirty: 0,
            sick: 0,
            sleeping: 0,
            eating: 0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Pet {
    pub id: Uuid,
    pub name: String,
    pub species: Species,
    pub born_at: DateTime<Utc>,
    pub last_simulated_at: DateTime<Utc>,
    pub life_expectancy: u32,
    pub age: u32,
    pub status: Status,
    pub phase: Phase,
    pub vitals: Vitals,
    pub flags: Flags,
    pub counters: Counters,
    pub timers: Timers,
    pub radio_on: bool,
    pub caretaker_score: u8,
    #[serde(default)]
    pub cause_of_death: Option<CauseOfDeath>,
}

impl Pet {
    pub fn new(name: impl Into<String>, species: Species, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            species,
            born_at: now,
            last_simulated_at: now,
            life_expectancy: species.life_expectancy(),
            age: 0,
            status: Status::Idle,
            phase: Phase::Baby,
            vitals: Vitals::default(),
            flags: Flags::default(),
            counters: Counters::default(),
            timers: Timers::default(),
            radio_on: false,
            caretaker_score: 0,
            cause_of_death: None,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.flags.dead
    }

    pub fn is_night(&self, rules: &Rules) -> bool {
        self.timers.minute_of_day >= rules.day_phase_limit
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Rules {
    pub real_seconds_per_game_minute: f64,
    pub catch_up_cap_minutes: u32,
    pub minutes_per_day: u32,
    pub day_phase_limit: u32,
    pub decay_interval: u32,
    pub nap_minutes: u32,
    pub night_sleep_minutes: u32,
    pub hunger_starving: f64,
    pub hunger_full: f64,
    pub mood_low: f64,
    pub energy_low: f64,
    pub play_energy_floor: f64,
    pub neglect_grace_minutes: u32,
    pub fatal_neglect_minutes: u32,
    pub special_bonus_years: u32,
    pub meal_minutes: u32,
    pub meals_per_mess: u32,
    pub vomit_after_minutes: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            real_seconds_per_game_minute: 0.25,
            catch_up_cap_minutes: 2 * 1440,
            minutes_per_day: 1440,
            day_phase_limit: 720,
            decay_interval: 60,
            nap_minutes: 60,
            night_sleep_minutes: 360,
            hunger_starving: 90.0,
            hunger_full: 10.0,
            mood_low: 10.0,
            energy_low: 10.0,
            play_energy_floor: 33.0,
            neglect_grace_minutes: 180,
            fatal_neglect_minutes: 720,
            special_bonus_years: 5,
            meal_minutes: 10,
            meals_per_mess: 3,
            vomit_after_minutes: 180,
        }
    }
}
