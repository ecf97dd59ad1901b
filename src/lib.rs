//! A single virtual pet, simulated one game-minute at a time.
//!
//! The core is a set of pure snapshot transforms: [`actions`] for what the
//! player does, [`sim::advance`] for what time does, [`score`] for judging
//! the caretaker and [`scheduler::catch_up`] for turning wall-clock gaps into
//! a bounded number of simulated minutes. [`session::Session`] owns the pets
//! and the active selection; the remaining modules wire it to disk and to a
//! terminal.

pub mod actions;
pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod scheduler;
pub mod score;
pub mod session;
pub mod sim;
pub mod storage;
pub mod summary;

pub use actions::PetAction;
pub use error::DigipetError;
pub use model::{CauseOfDeath, Pet, Phase, Rules, Species, Status};
pub use scheduler::{catch_up, CatchupSummary};
pub use score::{qualifies_for_special, score, Grade, ScoreInputs};
pub use session::{Outcome, Session};
pub use sim::advance;
pub use summary::Obituary;
