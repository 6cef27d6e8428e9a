//! # social-bot
//!
//! Drives the public HTTP API with synthetic users: signup, login, posting
//! and liking, in that order.

pub mod client;
pub mod config;
pub mod simulation;

pub use client::{ApiClient, LikeOutcome, SignupOutcome};
pub use config::{BotConfig, BotConfigError};
pub use simulation::{Simulation, SimulationReport};
