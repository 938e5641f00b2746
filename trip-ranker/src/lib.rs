//! Train trip ranking service.
//!
//! Answers two questions about Dutch Railways trips between two stations at
//! a given moment: which trip is fastest, and which trips are the most and
//! least comfortable once crowding, on-board facilities and transfers are
//! taken into account.

pub mod cache;
pub mod config;
pub mod handler;
pub mod ns;
pub mod planner;
pub mod telemetry;
pub mod web;
