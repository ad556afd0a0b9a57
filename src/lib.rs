//! Department reports over a semicolon-delimited employee roster: a department → team listing
//! and per-department salary statistics, driven from a numbered console menu.

pub mod config;
pub mod department;
pub mod error;
pub mod report;
pub mod roster;
pub mod statistics;
pub mod textinterface;

pub use crate::error::{AccessMode, Result, RosterError};
