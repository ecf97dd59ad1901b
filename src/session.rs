use crate::actions::{apply, PetAction};
use crate::error::{DigipetError, Result};
use crate::model::{Pet, Rules, Species};
use crate::scheduler::{catch_up, CatchupSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// All pets plus the one currently being looked after. Only the active pet
/// is advanced by [`Session::tick`]; the others catch up when selected again.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub pets: BTreeMap<Uuid, Pet>,
    pub active: Option<Uuid>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored,
    NoActivePet,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts a new pet and makes it the active one.
    pub fn create_pet(&mut self, name: &str, species: Species, now: DateTime<Utc>) -> Uuid {
        let pet = Pet::new(name, species, now);
        let id = pet.id;
        tracing::info!(pet = %id, name, species = species.label(), "pet created");
        self.pets.insert(id, pet);
        self.active = Some(id);
        id
    }

    pub fn select(&mut self, id: Uuid) -> Result<()> {
        if !self.pets.contains_key(&id) {
            return Err(DigipetError::UnknownPet(id));
        }
        self.active = Some(id);
        Ok(())
    }

    /// Finds the pet whose id starts with `prefix`.
    pub fn resolve(&self, prefix: &str) -> Result<Uuid> {
        let prefix = prefix.trim().to_ascii_lowercase();
        let mut hits = self
            .pets
            .keys()
            .filter(|id| id.to_string().starts_with(&prefix));
        match (hits.next(), hits.next()) {
            (Some(id), None) => Ok(*id),
            (None, _) => Err(DigipetError::NoMatch(prefix)),
            (Some(_), Some(_)) => Err(DigipetError::Ambiguous(prefix)),
        }
    }

    /// Removes a pet whether it is alive or not.
    pub fn delete(&mut self, id: Uuid) -> Option<Pet> {
        let removed = self.pets.remove(&id)?;
        if self.active == Some(id) {
            self.active = None;
        }
        tracing::info!(pet = %id, name = %removed.name, "pet deleted");
        Some(removed)
    }

    pub fn active_pet(&self) -> Option<&Pet> {
        self.active.and_then(|id| self.pets.get(&id))
    }

    pub fn act(&mut self, action: PetAction, rules: &Rules) -> Outcome {
        let Some(pet) = self.active.and_then(|id| self.pets.get_mut(&id)) else {
            return Outcome::NoActivePet;
        };
        let next = apply(pet, action, rules);
        if next == *pet {
            tracing::trace!(pet = %pet.id, action = action.label(), "action ignored");
            return Outcome::Ignored;
        }
        tracing::debug!(
            pet = %pet.id,
            action = action.label(),
            from = pet.status.label(),
            to = next.status.label(),
            "action applied"
        );
        *pet = next;
        Outcome::Applied
    }

    /// Runs the catch-up scheduler on the active pet.
    pub fn tick(&mut self, now: DateTime<Utc>, rules: &Rules) -> Option<CatchupSummary> {
        let pet = self.active.and_then(|id| self.pets.get_mut(&id))?;
        let (next, summary) = catch_up(pet, now, rules)?;
        *pet = next;
        Some(summary)
    }
}
