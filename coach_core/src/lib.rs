#![forbid(unsafe_code)]

//! Core domain model and business logic for the ZenithFit coaching system.
//!
//! This crate provides:
//! - Domain types (age groups, exercises, day plans, weekly plans)
//! - The workout playback engine (countdown state machine)
//! - Plan providers (Gemini-backed and built-in demo)
//! - User profile bookkeeping
//! - Configuration

pub mod types;
pub mod error;
pub mod playback;
pub mod provider;
pub mod catalog;
pub mod profile;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use playback::{pacing_window, PlaybackSession, TickOutcome, FALLBACK_PACING_SECONDS};
pub use provider::{GeminiPlanProvider, PlanProvider};
pub use catalog::{demo_plan, DemoPlanProvider};
pub use profile::UserProfile;
pub use config::Config;
