//! Shared type definitions for the Smart Scout field simulation.
//!
//! This crate is the single source of truth for the data exchanged between
//! the simulation crates and the game client. Types flow downstream to
//! `TypeScript` via `ts-rs` so the client renders exactly what the engine
//! produces.
//!
//! # Modules
//!
//! - [`grid`] -- The stand-count [`Grid`], the [`ObservationGrid`] of scouted
//!   cells, and [`CellPos`] coordinates.
//! - [`decision`] -- Replant [`Decision`]s, [`EconomicResult`]s, per-cell
//!   [`CellChange`] notifications, and [`TileRating`] buckets.
//! - [`ids`] -- Type-safe UUID wrapper for sessions.

pub mod decision;
pub mod grid;
pub mod ids;

pub use decision::{CellChange, Decision, EconomicResult, TileRating};
pub use grid::{CellPos, Grid, ObservationGrid};
pub use ids::SessionId;
