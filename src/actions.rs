//! Player-initiated actions.
//!
//! Every handler takes a snapshot and returns the next one. An action the pet
//! is not able to take yields a clone equal to the input; callers detect the
//! no-op by comparing snapshots.

use crate::model::{nudge, Pet, Rules, Status, VITAL_MIN};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PetAction {
    Feed,
    Play,
    Sleep,
    Clean,
    ToggleRadio,
}

impl PetAction {
    pub fn label(self) -> &'static str {
        match self {
            PetAction::Feed => "feed",
            PetAction::Play => "play",
            PetAction::Sleep => "sleep",
            PetAction::Clean => "clean",
            PetAction::ToggleRadio => "radio",
        }
    }
}

/// The radio action splits on the direction the switch is flipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Trigger {
    Feed,
    Play,
    Sleep,
    Clean,
    RadioOn,
    RadioOff,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Transition {
    Reject,
    Stay,
    Enter(Status),
}

fn transition(from: Status, trigger: Trigger) -> Transition {
    use Status::*;
    use Transition::*;
    match (from, trigger) {
        (Dead, _) => Reject,

        (Sleeping, Trigger::Feed | Trigger::Play) => Reject,
        (Idle | Eating | Pooping | Playing | Vomiting | Dancing, Trigger::Feed) => Enter(Eating),

        (Playing, Trigger::Play) => Enter(Idle),
        (Idle | Eating | Pooping | Vomiting | Dancing, Trigger::Play) => Enter(Playing),

        (Sleeping, Trigger::Sleep) => Enter(Idle),
        (Idle | Eating | Pooping | Playing | Vomiting | Dancing, Trigger::Sleep) => {
            Enter(Sleeping)
        }

        (_, Trigger::Clean) => Stay,

        (Idle, Trigger::RadioOn) => Enter(Dancing),
        (Dancing, Trigger::RadioOff) => Enter(Idle),
        (
            Eating | Pooping | Playing | Sleeping | Vomiting | Dancing,
            Trigger::RadioOn,
        ) => Stay,
        (
            Idle | Eating | Pooping | Playing | Sleeping | Vomiting,
            Trigger::RadioOff,
        ) => Stay,
    }
}

pub fn apply(pet: &Pet, action: PetAction, rules: &Rules) -> Pet {
    match action {
        PetAction::Feed => feed(pet),
        PetAction::Play => play(pet, rules),
        PetAction::Sleep => sleep(pet),
        PetAction::Clean => clean(pet),
        PetAction::ToggleRadio => toggle_radio(pet),
    }
}

pub fn feed(pet: &Pet) -> Pet {
    let Transition::Enter(status) = transition(pet.status, Trigger::Feed) else {
        return pet.clone();
    };
    if pet.vitals.hunger <= VITAL_MIN {
        return pet.clone();
    }

    let mut next = pet.clone();
    let v = &mut next.vitals;
    v.hunger = nudge(v.hunger, -10.0);
    v.weight = nudge(v.weight, 10.0);
    v.mood = nudge(v.mood, 5.0);
    v.energy = nudge(v.energy, 5.0);
    next.status = status;
    next.timers.eating = 0;
    next.counters.meals_since_mess += 1;
    next
}

pub fn play(pet: &Pet, rules: &Rules) -> Pet {
    let Transition::Enter(status) = transition(pet.status, Trigger::Play) else {
        return pet.clone();
    };
    if status == Status::Playing && pet.vitals.energy <= rules.play_energy_floor {
        return pet.clone();
    }

    let mut next = pet.clone();
    next.status = status;
    next
}

/// Going to sleep also cures sickness, but only when the pet is clean.
pub fn sleep(pet: &Pet) -> Pet {
    let Transition::Enter(status) = transition(pet.status, Trigger::Sleep) else {
        return pet.clone();
    };

    let mut next = pet.clone();
    next.status = status;
    if status == Status::Sleeping {
        next.vitals.weight = nudge(next.vitals.weight, -5.0);
        next.vitals.mood = nudge(next.vitals.mood, 15.0);
        if next.flags.sick && !next.flags.dirty {
            next.flags.sick = false;
            next.timers.sick = 0;
        }
    }
    next
}

pub fn clean(pet: &Pet) -> Pet {
    if transition(pet.status, Trigger::Clean) == Transition::Reject {
        return pet.clone();
    }

    let mut next = pet.clone();
    next.counters.mess = 0;
    next.flags.dirty = false;
    next.timers.dirty = 0;
    next.vitals.mood = nudge(next.vitals.mood, 10.0);
    next
}

pub fn toggle_radio(pet: &Pet) -> Pet {
    let trigger = if pet.radio_on {
        Trigger::RadioOff
    } else {
        Trigger::RadioOn
    };

    let mut next = pet.clone();
    match transition(pet.status, trigger) {
        Transition::Reject => return next,
        Transition::Stay => {}
        Transition::Enter(status) => next.status = status,
    }
    next.radio_on = !pet.radio_on;
    next
}
