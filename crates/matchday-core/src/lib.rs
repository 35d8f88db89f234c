//! Core types and pipeline logic for Matchday.
//!
//! Everything that turns recorded match results into derived views lives
//! here: the league table, prediction points, and end-of-tournament
//! champions. This crate is free of HTTP and database dependencies; storage
//! is reached only through the [`store::LeagueStore`] trait.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod fixture;
pub mod leaderboard;
pub mod prediction;
pub mod scoring;
pub mod standings;
pub mod store;
pub mod tournament;
pub mod winners;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
