//! User profile bookkeeping.
//!
//! Profiles live for the duration of the process only. They are created when
//! an age group is selected and discarded when the user starts over; nothing
//! is written to disk.

use crate::AgeGroup;
use serde::{Deserialize, Serialize};

/// The active user's profile
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age_group: AgeGroup,
    pub workouts_completed: u32,
    pub streak: u32,
    pub avatar_url: String,
}

impl UserProfile {
    /// Create a fresh profile for the selected age group
    pub fn new(name: impl Into<String>, age_group: AgeGroup) -> Self {
        Self {
            name: name.into(),
            age_group,
            workouts_completed: 0,
            streak: 0,
            avatar_url: format!("https://picsum.photos/seed/{}/200", age_group.slug()),
        }
    }

    /// Record a finished guided workout
    pub fn record_workout(&mut self) {
        self.workouts_completed += 1;
        self.streak += 1;
        tracing::debug!(
            "Workout recorded: {} completed, {} day streak",
            self.workouts_completed,
            self.streak
        );
    }

    /// Coarse fitness level label shown on the profile page
    pub fn fitness_level(&self) -> &'static str {
        match self.workouts_completed {
            0..=9 => "Beginner",
            10..=29 => "Intermediate",
            _ => "Advanced",
        }
    }
}
