//! Core of a generative root-like line drawing.
//!
//! Main components:
//! - [`noise`] — smooth angular wander that steers growth.
//! - [`agent`] — a single growing, branching, fading polyline.
//! - [`phases`] — the per-tick population phases (grow, spawn, sweep).
//! - [`simulation`] — the population together with its surface, rng and clock.
//! - [`surface`] — the vector drawing target and its SVG implementation.
//! - [`driver`] — the frame-driven loop that ticks the simulation.
//! - [`clock`] — wall-clock sources for the root spawn cooldown.
//! - [`config`] — tunable constants of the growth.
//! - [`export`] — saving a drawing to disk.
//! - [`types`] — shared type aliases and handles.

pub mod agent;
pub mod clock;
pub mod config;
pub mod driver;
pub mod export;
pub mod noise;
pub mod phases;
pub mod simulation;
pub mod surface;
pub mod types;
