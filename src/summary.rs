use crate::model::{CauseOfDeath, Pet, Phase, Species};
use crate::score::Grade;
use std::fmt;

/// End-of-life card for a dead pet.
#[derive(Clone, Debug, PartialEq)]
pub struct Obituary {
    pub name: String,
    pub species: Species,
    pub age: u32,
    pub phase: Phase,
    pub cause: Option<CauseOfDeath>,
    pub score: u8,
    pub grade: Grade,
    pub hunger: u8,
    pub energy: u8,
    pub mood: u8,
    pub health: u8,
}

fn whole(v: f64) -> u8 {
    v.round().clamp(0.0, 100.0) as u8
}

impl Obituary {
    /// `None` while the pet is still alive.
    pub fn for_pet(pet: &Pet) -> Option<Self> {
        if !pet.is_dead() {
            return None;
        }
        Some(Self {
            name: pet.name.clone(),
            species: pet.species,
            age: pet.age,
            phase: pet.phase,
            cause: pet.cause_of_death,
            score: pet.caretaker_score,
            grade: Grade::from_score(pet.caretaker_score),
            hunger: whole(pet.vitals.hunger),
            energy: whole(pet.vitals.energy),
            mood: whole(pet.vitals.mood),
            health: whole(pet.vitals.health),
        })
    }
}

impl fmt::Display for Obituary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let years = if self.age == 1 { "Year" } else { "Years" };
        writeln!(f, "{} the {}", self.name, self.species.label())?;
        writeln!(f, "Lifespan:        {} {} ({})", self.age, years, self.phase.label())?;
        writeln!(
            f,
            "Cause:           {}",
            self.cause.map_or("Unknown", CauseOfDeath::label)
        )?;
        writeln!(f, "Caretaker Score: {}", self.score)?;
        writeln!(f, "Rank:            {}", self.grade)?;
        writeln!(f, "Final Vitals")?;
        writeln!(f, "  Hunger {:>3}/100", self.hunger)?;
        writeln!(f, "  Energy {:>3}/100", self.energy)?;
        writeln!(f, "  Mood   {:>3}/100", self.mood)?;
        write!(f, "  Health {:>3}/100", self.health)
    }
}
