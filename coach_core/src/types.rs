//! Core domain types for the ZenithFit coaching system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Age groups and their labels
//! - Exercises and day plans
//! - The weekly plan produced by a plan provider
//! - Progress rows for the dashboard

use crate::{Error, Result};
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

/// Number of day plans in a weekly plan, one per calendar weekday.
pub const DAYS_PER_WEEK: usize = 7;

// ============================================================================
// Age Groups
// ============================================================================

/// Age bracket a workout plan is generated for
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    Kids,
    Teens,
    Adults,
    Seniors,
}

impl AgeGroup {
    /// All selectable age groups, in display order
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::Kids,
        AgeGroup::Teens,
        AgeGroup::Adults,
        AgeGroup::Seniors,
    ];

    /// Human-readable label with the age range, as shown to the user
    /// and sent to the plan provider
    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Kids => "Kids (5-12)",
            AgeGroup::Teens => "Teens (13-18)",
            AgeGroup::Adults => "Adults (19-50)",
            AgeGroup::Seniors => "Seniors (51+)",
        }
    }

    /// Short lowercase name, used for CLI input and avatar seeds
    pub fn slug(&self) -> &'static str {
        match self {
            AgeGroup::Kids => "kids",
            AgeGroup::Teens => "teens",
            AgeGroup::Adults => "adults",
            AgeGroup::Seniors => "seniors",
        }
    }

    /// Parse a user-supplied name (case-insensitive)
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "kids" => Ok(AgeGroup::Kids),
            "teens" => Ok(AgeGroup::Teens),
            "adults" => Ok(AgeGroup::Adults),
            "seniors" => Ok(AgeGroup::Seniors),
            other => Err(Error::Other(format!(
                "Unknown age group: {} (expected kids, teens, adults or seniors)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Exercises and Plans
// ============================================================================

/// A single exercise within a day plan.
///
/// Exactly one of `duration_seconds` / `reps` is the primary measure:
/// `duration_seconds == 0` marks a rep-based exercise, which the playback
/// engine paces with a fixed fallback window instead. `reps` is
/// informational-only to the engine.
///
/// Wire field names (`duration`, `videoQuery`) follow the plan provider
/// contract.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    pub name: String,
    pub description: String,
    #[serde(rename = "duration")]
    pub duration_seconds: u32,
    pub reps: u32,
    #[serde(rename = "videoQuery")]
    pub video_query: String,
}

impl Exercise {
    /// Short measure label for list views, e.g. "45s" or "12 reps"
    pub fn measure(&self) -> String {
        if self.duration_seconds > 0 {
            format!("{}s", self.duration_seconds)
        } else {
            format!("{} reps", self.reps)
        }
    }

    /// YouTube search URL for the tutorial video query
    pub fn video_url(&self) -> String {
        format!(
            "https://www.youtube.com/results?search_query={}",
            urlencode(&self.video_query)
        )
    }
}

/// One day's named set of exercises within a weekly plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayPlan {
    pub day: String,
    pub title: String,
    pub exercises: Vec<Exercise>,
}

impl DayPlan {
    /// Total planned minutes for this day, summing each exercise's pacing
    /// window and rounding up
    pub fn planned_minutes(&self) -> u32 {
        let total: u32 = self
            .exercises
            .iter()
            .map(crate::playback::pacing_window)
            .sum();
        total.div_ceil(60)
    }
}

/// A full week of day plans, produced atomically by a plan provider
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct WeeklyPlan {
    pub days: Vec<DayPlan>,
}

impl WeeklyPlan {
    /// Validate the plan against the provider contract.
    ///
    /// A valid plan has exactly seven days, each with at least one exercise.
    /// Partial plans are rejected outright.
    pub fn validate(&self) -> Result<()> {
        if self.days.len() != DAYS_PER_WEEK {
            return Err(Error::Plan(format!(
                "Expected {} day plans, got {}",
                DAYS_PER_WEEK,
                self.days.len()
            )));
        }

        for day in &self.days {
            if day.exercises.is_empty() {
                return Err(Error::Plan(format!(
                    "Day plan '{}' ({}) has no exercises",
                    day.title, day.day
                )));
            }
        }

        Ok(())
    }

    /// The day plan matching today's weekday name, falling back to the
    /// first day when the labels don't line up
    pub fn today(&self) -> &DayPlan {
        let weekday = Local::now().weekday().to_string();
        self.days
            .iter()
            .find(|d| d.day.starts_with(&weekday))
            .unwrap_or(&self.days[0])
    }

    /// Planned workout minutes per day, for the weekly progress view
    pub fn progress(&self) -> Vec<ProgressPoint> {
        self.days
            .iter()
            .map(|d| ProgressPoint {
                day: d.day.clone(),
                minutes: d.planned_minutes(),
            })
            .collect()
    }
}

/// One row of the weekly progress view
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressPoint {
    pub day: String,
    pub minutes: u32,
}

fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(duration: u32, reps: u32) -> Exercise {
        Exercise {
            name: "Jumping Jacks".into(),
            description: "Full-body warmup".into(),
            duration_seconds: duration,
            reps,
            video_query: "jumping jacks form".into(),
        }
    }

    fn day(label: &str, exercises: Vec<Exercise>) -> DayPlan {
        DayPlan {
            day: label.into(),
            title: format!("{} Session", label),
            exercises,
        }
    }

    #[test]
    fn test_age_group_labels() {
        assert_eq!(AgeGroup::Kids.label(), "Kids (5-12)");
        assert_eq!(AgeGroup::Seniors.label(), "Seniors (51+)");
        assert_eq!(AgeGroup::ALL.len(), 4);
    }

    #[test]
    fn test_age_group_parse() {
        assert_eq!(AgeGroup::parse("adults").unwrap(), AgeGroup::Adults);
        assert_eq!(AgeGroup::parse(" TEENS ").unwrap(), AgeGroup::Teens);
        assert!(AgeGroup::parse("toddlers").is_err());
    }

    #[test]
    fn test_exercise_wire_format() {
        let json = r#"{
            "name": "Plank",
            "description": "Hold a straight line",
            "duration": 45,
            "reps": 0,
            "videoQuery": "plank tutorial"
        }"#;

        let ex: Exercise = serde_json::from_str(json).unwrap();
        assert_eq!(ex.duration_seconds, 45);
        assert_eq!(ex.video_query, "plank tutorial");

        // Round-trips under the same wire names
        let out = serde_json::to_value(&ex).unwrap();
        assert_eq!(out["duration"], 45);
        assert!(out["videoQuery"].is_string());
    }

    #[test]
    fn test_exercise_measure() {
        assert_eq!(exercise(45, 0).measure(), "45s");
        assert_eq!(exercise(0, 12).measure(), "12 reps");
    }

    #[test]
    fn test_video_url_is_encoded() {
        let ex = exercise(30, 0);
        assert_eq!(
            ex.video_url(),
            "https://www.youtube.com/results?search_query=jumping+jacks+form"
        );
    }

    #[test]
    fn test_planned_minutes_uses_pacing_windows() {
        // 90s timed + 60s fallback for the rep-based one = 150s -> 3 min
        let d = day("Monday", vec![exercise(90, 0), exercise(0, 10)]);
        assert_eq!(d.planned_minutes(), 3);
    }

    #[test]
    fn test_weekly_plan_validation_rejects_short_week() {
        let plan = WeeklyPlan {
            days: vec![day("Monday", vec![exercise(30, 0)])],
        };
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_weekly_plan_validation_rejects_empty_day() {
        let labels = [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
        ];
        let mut days: Vec<DayPlan> = labels
            .iter()
            .map(|l| day(l, vec![exercise(30, 0)]))
            .collect();
        days[3].exercises.clear();

        let plan = WeeklyPlan { days };
        let err = plan.validate().unwrap_err();
        assert!(err.to_string().contains("no exercises"));
    }

    #[test]
    fn test_weekly_plan_parses_provider_array() {
        let json = r#"[
            {"day": "Monday", "title": "Cardio Blast", "exercises": [
                {"name": "High Knees", "description": "Run in place", "duration": 30, "reps": 0, "videoQuery": "high knees"}
            ]}
        ]"#;

        let plan: WeeklyPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.days.len(), 1);
        assert_eq!(plan.days[0].title, "Cardio Blast");
    }
}
