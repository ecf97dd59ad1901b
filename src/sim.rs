use crate::model::{nudge, CauseOfDeath, Pet, Phase, Rules, Status, VITAL_MAX, VITAL_MIN};
use crate::score::{qualifies_for_special, score, ScoreInputs};

/// Neglect conditions in the order they are checked. Only the first one
/// that holds costs health in a given hour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Neglect {
    Starvation,
    Overfeeding,
    Sickness,
    Hygiene,
    Emotional,
    Weight,
}

/// Advances `pet` by one simulated minute. Dead pets come back unchanged.
pub fn advance(pet: &Pet, rules: &Rules) -> Pet {
    let mut next = pet.clone();
    next.tick_minute(rules);
    next
}

fn streak(timer: &mut u32, active: bool) {
    *timer = if active { timer.saturating_add(1) } else { 0 };
}

impl Pet {
    pub(crate) fn tick_minute(&mut self, rules: &Rules) {
        if self.flags.dead {
            return;
        }

        let day = rules.minutes_per_day.max(1);
        self.timers.minute_of_day = (self.timers.minute_of_day + 1) % day;
        self.timers.age_progress += 1;

        if self.timers.age_progress >= day {
            self.timers.age_progress = 0;
            self.age += 1;
            if self.end_of_year(rules) {
                return;
            }
        }

        self.update_timers(rules);

        if self.timers.minute_of_day % rules.decay_interval.max(1) == 0 {
            self.hourly_pass(rules);
        }

        self.digest(rules);

        if self.status == Status::Sleeping {
            let limit = if self.is_night(rules) {
                rules.night_sleep_minutes
            } else {
                rules.nap_minutes
            };
            if self.timers.sleeping >= limit {
                self.status = Status::Idle;
                self.timers.sleeping = 0;
            }
        }

        if self.status == Status::Playing && self.vitals.energy <= rules.play_energy_floor {
            self.status = Status::Idle;
        }

        self.check_death(rules);
    }

    /// Returns true when the pet died of old age.
    fn end_of_year(&mut self, rules: &Rules) -> bool {
        if self.age >= self.life_expectancy {
            if self.flags.special {
                self.die(CauseOfDeath::OldAge, rules);
                return true;
            }
            let s = score(&ScoreInputs::for_pet(self, rules));
            self.caretaker_score = s;
            if !qualifies_for_special(s) {
                self.die(CauseOfDeath::OldAge, rules);
                return true;
            }
            self.flags.special = true;
            self.life_expectancy += rules.special_bonus_years;
            tracing::debug!(
                pet = %self.id,
                score = s,
                life_expectancy = self.life_expectancy,
                "special phase granted"
            );
        }
        self.phase = Phase::for_age(self.age, self.life_expectancy, self.flags.special);
        false
    }

    fn update_timers(&mut self, rules: &Rules) {
        let v = self.vitals;
        let t = &mut self.timers;
        streak(&mut t.starving, v.hunger >= rules.hunger_starving);
        streak(&mut t.overfull, v.hunger <= rules.hunger_full);
        streak(&mut t.low_mood, v.mood <= rules.mood_low);
        streak(&mut t.dirty, self.flags.dirty);
        streak(&mut t.sick, self.flags.sick);
        streak(&mut t.sleeping, self.status == Status::Sleeping);

        if self.status == Status::Playing {
            t.fitness = t.fitness.saturating_add(1);
        }
        if self.in_need(rules) {
            self.timers.distress = self.timers.distress.saturating_add(1);
        }
    }

    /// Whether the pet is currently calling for attention.
    pub fn in_need(&self, rules: &Rules) -> bool {
        let v = &self.vitals;
        v.hunger >= rules.hunger_starving
            || v.energy <= rules.energy_low
            || v.mood <= rules.mood_low
            || self.is_angry(rules)
    }

    fn is_angry(&self, rules: &Rules) -> bool {
        self.vitals.mood <= VITAL_MIN && self.timers.low_mood >= rules.neglect_grace_minutes
    }

    fn hourly_pass(&mut self, rules: &Rules) {
        if !matches!(self.status, Status::Sleeping | Status::Dead) {
            let v = &mut self.vitals;
            v.hunger = nudge(v.hunger, 1.0);
            v.energy = nudge(v.energy, -1.0);
            v.mood = nudge(v.mood, -1.0);

            if self.status == Status::Dancing {
                v.hunger = nudge(v.hunger, 5.0);
                v.weight = nudge(v.weight, -1.0);
                v.mood = nudge(v.mood, 5.0);
                v.energy = nudge(v.energy, -5.0);
            }
        }

        match self.neglect(rules) {
            Some(reason) => {
                self.counters.penalties += 1;
                self.vitals.health = nudge(self.vitals.health, -1.0);
                tracing::debug!(pet = %self.id, ?reason, health = self.vitals.health, "neglect penalty");
            }
            None => self.vitals.health = nudge(self.vitals.health, 1.0),
        }
    }

    /// First neglect condition that currently holds, if any.
    pub fn neglect(&self, rules: &Rules) -> Option<Neglect> {
        let grace = rules.neglect_grace_minutes;
        let t = &self.timers;
        let v = &self.vitals;
        if t.starving >= grace || v.hunger >= VITAL_MAX {
            Some(Neglect::Starvation)
        } else if t.overfull >= grace {
            Some(Neglect::Overfeeding)
        } else if self.status == Status::Vomiting || t.sick >= grace {
            Some(Neglect::Sickness)
        } else if t.dirty >= grace {
            Some(Neglect::Hygiene)
        } else if self.is_angry(rules) {
            Some(Neglect::Emotional)
        } else if v.weight <= VITAL_MIN || v.weight >= VITAL_MAX {
            Some(Neglect::Weight)
        } else {
            None
        }
    }

    /// Where a pet goes once a meal or a mess is over.
    fn resting_status(&self) -> Status {
        if self.radio_on {
            Status::Dancing
        } else {
            Status::Idle
        }
    }

    /// Meals finish, messes get made and overfed pets throw up.
    fn digest(&mut self, rules: &Rules) {
        match self.status {
            Status::Eating => {
                self.timers.eating += 1;
                if self.timers.eating >= rules.meal_minutes {
                    self.timers.eating = 0;
                    if self.counters.meals_since_mess >= rules.meals_per_mess {
                        self.counters.meals_since_mess = 0;
                        self.counters.mess += 1;
                        self.counters.lifetime_mess += 1;
                        self.flags.dirty = true;
                        self.status = Status::Pooping;
                    } else {
                        self.status = self.resting_status();
                    }
                }
            }
            Status::Pooping | Status::Vomiting => self.status = self.resting_status(),
            _ => {}
        }

        let overfull = self.timers.overfull;
        if overfull > 0
            && overfull % rules.vomit_after_minutes.max(1) == 0
            && self.status != Status::Sleeping
        {
            self.status = Status::Vomiting;
            self.timers.eating = 0;
            self.flags.sick = true;
            tracing::debug!(pet = %self.id, overfull, "pet vomited");
        }
    }

    fn check_death(&mut self, rules: &Rules) {
        let fatal = rules.fatal_neglect_minutes;
        if self.vitals.health <= VITAL_MIN {
            self.die(CauseOfDeath::Neglect, rules);
        } else if self.vitals.hunger >= VITAL_MAX && self.timers.starving >= fatal {
            self.die(CauseOfDeath::Starvation, rules);
        } else if self.timers.low_mood >= fatal {
            self.die(CauseOfDeath::Heartbreak, rules);
        }
    }

    fn die(&mut self, cause: CauseOfDeath, rules: &Rules) {
        self.flags.dead = true;
        self.status = Status::Dead;
        self.cause_of_death = Some(cause);
        self.caretaker_score = score(&ScoreInputs::for_pet(self, rules));
        tracing::info!(
            pet = %self.id,
            name = %self.name,
            age = self.age,
            cause = cause.label(),
            score = self.caretaker_score,
            "pet died"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Species;
    use chrono::Utc;

    fn fox() -> Pet {
        Pet::new("Mochi", Species::Fox, Utc::now())
    }

    fn rules() -> Rules {
        Rules::default()
    }

    #[test]
    fn time_of_day_wraps_and_age_progresses() {
        let mut pet = fox();
        pet.timers.minute_of_day = 1439;
        let next = advance(&pet, &rules());
        assert_eq!(next.timers.minute_of_day, 0);
        assert_eq!(next.timers.age_progress, 1);
    }

    #[test]
    fn year_boundary_ages_once_and_updates_phase() {
        let mut pet = fox();
        pet.age = 2;
        pet.timers.age_progress = 1439;
        let next = advance(&pet, &rules());
        assert_eq!(next.age, 3);
        assert_eq!(next.timers.age_progress, 0);
        assert_eq!(next.phase, Phase::Toddler);

        let again = advance(&next, &rules());
        assert_eq!(again.age, 3);
        assert_eq!(again.timers.age_progress, 1);
    }

    fn about_to_expire(pet: &mut Pet) {
        pet.age = pet.life_expectancy - 1;
        pet.timers.age_progress = 1439;
    }

    #[test]
    fn good_care_at_expiry_grants_special_phase() {
        let mut pet = fox();
        about_to_expire(&mut pet);
        pet.vitals.hunger = 0.0;
        pet.timers.fitness = 1152; // 8% of a ten-year life
        let next = advance(&pet, &rules());
        assert!(next.flags.special);
        assert!(!next.is_dead());
        assert_ne!(next.status, Status::Dead);
        assert_eq!(next.life_expectancy, 15);
        assert_eq!(next.phase, Phase::Special);
        assert_eq!(next.caretaker_score, 100);
    }

    #[test]
    fn poor_care_at_expiry_dies_of_old_age() {
        let mut pet = fox();
        about_to_expire(&mut pet);
        pet.vitals.mood = 40.0;
        let next = advance(&pet, &rules());
        assert!(next.is_dead());
        assert_eq!(next.status, Status::Dead);
        assert_eq!(next.cause_of_death, Some(CauseOfDeath::OldAge));
        assert!(!next.flags.special);
        assert_eq!(next.life_expectancy, 10);
        // death stops the minute before any timer moves
        assert_eq!(next.timers.starving, pet.timers.starving);
    }

    #[test]
    fn special_pet_dies_at_extended_expectancy() {
        let mut pet = fox();
        pet.flags.special = true;
        pet.life_expectancy = 15;
        pet.age = 14;
        pet.timers.age_progress = 1439;
        let next = advance(&pet, &rules());
        assert!(next.is_dead());
        assert_eq!(next.cause_of_death, Some(CauseOfDeath::OldAge));
        assert_eq!(next.life_expectancy, 15);
    }

    #[test]
    fn streak_timers_reset_when_condition_clears() {
        let mut pet = fox();
        pet.vitals.hunger = 95.0;
        pet.timers.starving = 50;
        pet.timers.overfull = 12;
        pet.timers.dirty = 30;
        pet.timers.sleeping = 7;
        let next = advance(&pet, &rules());
        assert_eq!(next.timers.starving, 51);
        assert_eq!(next.timers.overfull, 0);
        assert_eq!(next.timers.dirty, 0);
        assert_eq!(next.timers.sleeping, 0);
    }

    #[test]
    fn lifetime_timers_never_reset() {
        let mut pet = fox();
        pet.status = Status::Playing;
        pet.vitals.mood = 5.0;
        pet.timers.fitness = 10;
        pet.timers.distress = 4;
        let next = advance(&pet, &rules());
        assert_eq!(next.timers.fitness, 11);
        assert_eq!(next.timers.distress, 5);

        let mut calm = next.clone();
        calm.status = Status::Idle;
        calm.vitals.mood = 80.0;
        let after = advance(&calm, &rules());
        assert_eq!(after.timers.fitness, 11);
        assert_eq!(after.timers.distress, 5);
    }

    #[test]
    fn low_energy_counts_as_distress() {
        let mut pet = fox();
        pet.vitals.energy = 10.0;
        let next = advance(&pet, &rules());
        assert_eq!(next.timers.distress, 1);
    }

    #[test]
    fn hourly_decay_and_recovery() {
        let mut pet = fox();
        pet.timers.minute_of_day = 539;
        pet.vitals.health = 90.0;
        let next = advance(&pet, &rules());
        assert_eq!(next.timers.minute_of_day, 540);
        assert_eq!(next.vitals.hunger, 51.0);
        assert_eq!(next.vitals.energy, 99.0);
        assert_eq!(next.vitals.mood, 99.0);
        assert_eq!(next.vitals.health, 91.0);
        assert_eq!(next.counters.penalties, 0);
    }

    #[test]
    fn no_decay_while_sleeping() {
        let mut pet = fox();
        pet.timers.minute_of_day = 539;
        pet.status = Status::Sleeping;
        let next = advance(&pet, &rules());
        assert_eq!(next.vitals.hunger, 50.0);
        assert_eq!(next.vitals.energy, 100.0);
        assert_eq!(next.vitals.mood, 100.0);
    }

    #[test]
    fn dancing_burns_extra_each_hour() {
        let mut pet = fox();
        pet.timers.minute_of_day = 539;
        pet.status = Status::Dancing;
        pet.radio_on = true;
        let next = advance(&pet, &rules());
        assert_eq!(next.vitals.hunger, 56.0);
        assert_eq!(next.vitals.weight, 49.0);
        assert_eq!(next.vitals.mood, 100.0);
        assert_eq!(next.vitals.energy, 94.0);
        assert_eq!(next.status, Status::Dancing);
    }

    #[test]
    fn one_penalty_per_hour_even_with_many_conditions() {
        let mut pet = fox();
        pet.timers.minute_of_day = 539;
        pet.vitals.hunger = 100.0;
        pet.vitals.mood = 0.0;
        pet.vitals.weight = 0.0;
        pet.vitals.health = 50.0;
        pet.flags.sick = true;
        pet.flags.dirty = true;
        pet.timers.starving = 200;
        pet.timers.sick = 200;
        pet.timers.dirty = 200;
        pet.timers.low_mood = 200;
        assert_eq!(pet.neglect(&rules()), Some(Neglect::Starvation));

        let next = advance(&pet, &rules());
        assert_eq!(next.counters.penalties, 1);
        assert_eq!(next.vitals.health, 49.0);
        assert!(!next.is_dead());
    }

    #[test]
    fn neglect_order_picks_first_match() {
        let r = rules();
        let mut pet = fox();
        assert_eq!(pet.neglect(&r), None);
        pet.vitals.weight = 100.0;
        assert_eq!(pet.neglect(&r), Some(Neglect::Weight));
        pet.timers.dirty = 180;
        assert_eq!(pet.neglect(&r), Some(Neglect::Hygiene));
        pet.status = Status::Vomiting;
        assert_eq!(pet.neglect(&r), Some(Neglect::Sickness));
        pet.timers.overfull = 180;
        assert_eq!(pet.neglect(&r), Some(Neglect::Overfeeding));
        pet.vitals.hunger = 100.0;
        assert_eq!(pet.neglect(&r), Some(Neglect::Starvation));
    }

    #[test]
    fn zero_health_is_fatal_and_final() {
        let mut pet = fox();
        pet.vitals.health = 0.0;
        let dead = advance(&pet, &rules());
        assert!(dead.is_dead());
        assert_eq!(dead.status, Status::Dead);
        assert_eq!(dead.cause_of_death, Some(CauseOfDeath::Neglect));

        let mut frozen = dead.clone();
        for _ in 0..3000 {
            frozen = advance(&frozen, &rules());
        }
        assert_eq!(frozen, dead);
    }

    #[test]
    fn sustained_full_hunger_starves() {
        let mut pet = fox();
        pet.vitals.hunger = 100.0;
        pet.timers.starving = 719;
        let next = advance(&pet, &rules());
        assert_eq!(next.cause_of_death, Some(CauseOfDeath::Starvation));
    }

    #[test]
    fn sustained_low_mood_is_fatal() {
        let mut pet = fox();
        pet.vitals.mood = 5.0;
        pet.timers.low_mood = 719;
        let next = advance(&pet, &rules());
        assert_eq!(next.cause_of_death, Some(CauseOfDeath::Heartbreak));
    }

    #[test]
    fn naps_end_after_an_hour_by_day() {
        let mut pet = fox();
        pet.status = Status::Sleeping;
        pet.timers.minute_of_day = 100;
        pet.timers.sleeping = 59;
        let next = advance(&pet, &rules());
        assert_eq!(next.status, Status::Idle);
        assert_eq!(next.timers.sleeping, 0);
    }

    #[test]
    fn night_sleep_lasts_six_hours() {
        let mut pet = fox();
        pet.status = Status::Sleeping;
        pet.timers.minute_of_day = 800;
        pet.timers.sleeping = 59;
        let next = advance(&pet, &rules());
        assert_eq!(next.status, Status::Sleeping);
        assert_eq!(next.timers.sleeping, 60);

        pet.timers.sleeping = 359;
        let next = advance(&pet, &rules());
        assert_eq!(next.status, Status::Idle);
    }

    #[test]
    fn tired_pet_stops_playing() {
        let mut pet = fox();
        pet.status = Status::Playing;
        pet.vitals.energy = 33.0;
        let next = advance(&pet, &rules());
        assert_eq!(next.status, Status::Idle);
        assert_eq!(next.timers.fitness, 1);
    }

    #[test]
    fn meal_ends_in_idle_or_mess() {
        let mut pet = fox();
        pet.status = Status::Eating;
        pet.timers.eating = 9;
        pet.counters.meals_since_mess = 1;
        let next = advance(&pet, &rules());
        assert_eq!(next.status, Status::Idle);
        assert_eq!(next.timers.eating, 0);
        assert!(!next.flags.dirty);

        pet.counters.meals_since_mess = 3;
        let next = advance(&pet, &rules());
        assert_eq!(next.status, Status::Pooping);
        assert!(next.flags.dirty);
        assert_eq!(next.counters.mess, 1);
        assert_eq!(next.counters.lifetime_mess, 1);
        assert_eq!(next.counters.meals_since_mess, 0);

        let after = advance(&next, &rules());
        assert_eq!(after.status, Status::Idle);
        assert_eq!(after.timers.dirty, 1);
    }

    #[test]
    fn long_overfeeding_causes_vomiting_and_sickness() {
        let mut pet = fox();
        pet.vitals.hunger = 5.0;
        pet.timers.overfull = 179;
        let next = advance(&pet, &rules());
        assert_eq!(next.status, Status::Vomiting);
        assert!(next.flags.sick);

        let after = advance(&next, &rules());
        assert_eq!(after.status, Status::Idle);
        assert_eq!(after.timers.sick, 1);
    }

    #[test]
    fn digestion_goes_back_to_dancing_while_radio_plays() {
        let mut pet = fox();
        pet.radio_on = true;
        pet.status = Status::Pooping;
        assert_eq!(advance(&pet, &rules()).status, Status::Dancing);

        pet.status = Status::Vomiting;
        assert_eq!(advance(&pet, &rules()).status, Status::Dancing);

        pet.status = Status::Eating;
        pet.timers.eating = 9;
        assert_eq!(advance(&pet, &rules()).status, Status::Dancing);
    }

    #[test]
    fn hour_boundary_recovery_runs_before_the_death_check() {
        let mut pet = fox();
        pet.timers.minute_of_day = 59;
        pet.vitals.health = 0.0;
        let next = advance(&pet, &rules());
        assert!(!next.is_dead());
        assert_eq!(next.vitals.health, 1.0);

        pet.vitals.health = 1.0;
        pet.vitals.hunger = 95.0;
        pet.timers.starving = 180;
        let next = advance(&pet, &rules());
        assert_eq!(next.vitals.health, 0.0);
        assert_eq!(next.cause_of_death, Some(CauseOfDeath::Neglect));
    }

    #[test]
    fn advance_is_deterministic() {
        let mut pet = fox();
        pet.status = Status::Dancing;
        pet.timers.minute_of_day = 59;
        let a = advance(&pet, &rules());
        let b = advance(&pet, &rules());
        assert_eq!(a, b);
    }
}
