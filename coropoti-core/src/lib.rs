//! Core types and scheduling rules for the COROPOTI client.
//!
//! This crate holds everything that does not talk to the network:
//! - `Event`, `Rsvp` and related domain types
//! - status derivation from the clock (`status`)
//! - the tentative-schedule description codec (`tentative`)
//! - the conflict dedup/overlap reducer (`conflict`)
//! - event draft validation, the move guard, capabilities and holidays
//! - configuration and the persisted login session

pub mod capability;
pub mod clock;
pub mod config;
pub mod conflict;
pub mod datetime;
pub mod draft;
pub mod error;
pub mod event;
pub mod holiday;
pub mod protocol;
pub mod reschedule;
pub mod session;
pub mod status;
pub mod tentative;
pub mod user;

pub use error::{CoropotiError, CoropotiResult};
pub use event::*;
