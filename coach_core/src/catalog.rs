//! Built-in demo plan.
//!
//! A hand-written, balanced seven-day plan used by `--demo` runs and by the
//! test suite, so neither needs a network connection or an API key.

use crate::provider::PlanProvider;
use crate::types::*;
use crate::Result;
use once_cell::sync::Lazy;

/// Cached demo plan - built once and reused across all operations
static DEMO_PLAN: Lazy<WeeklyPlan> = Lazy::new(build_demo_plan);

/// Get a reference to the cached demo plan
pub fn demo_plan() -> &'static WeeklyPlan {
    &DEMO_PLAN
}

/// Plan provider that serves the built-in demo plan for any age group
#[derive(Clone, Copy, Debug, Default)]
pub struct DemoPlanProvider;

impl PlanProvider for DemoPlanProvider {
    fn weekly_plan(&self, age_group: AgeGroup) -> Result<WeeklyPlan> {
        tracing::info!("Serving built-in demo plan for {}", age_group.label());
        Ok(demo_plan().clone())
    }
}

fn exercise(
    name: &str,
    description: &str,
    duration_seconds: u32,
    reps: u32,
    video_query: &str,
) -> Exercise {
    Exercise {
        name: name.into(),
        description: description.into(),
        duration_seconds,
        reps,
        video_query: video_query.into(),
    }
}

fn day(day: &str, title: &str, exercises: Vec<Exercise>) -> DayPlan {
    DayPlan {
        day: day.into(),
        title: title.into(),
        exercises,
    }
}

/// Builds the demo plan
fn build_demo_plan() -> WeeklyPlan {
    WeeklyPlan {
        days: vec![
            day(
                "Monday",
                "Full-Body Kickoff",
                vec![
                    exercise(
                        "Jumping Jacks",
                        "Steady full-body warmup, light on the knees",
                        45,
                        0,
                        "jumping jacks proper form",
                    ),
                    exercise(
                        "Bodyweight Squats",
                        "Sit back into the heels, chest tall",
                        0,
                        15,
                        "bodyweight squat tutorial",
                    ),
                    exercise(
                        "Push-ups",
                        "Knees down is fine, keep the hips in line",
                        0,
                        10,
                        "push up beginner form",
                    ),
                    exercise(
                        "Plank",
                        "Straight line from head to heels, breathe",
                        30,
                        0,
                        "plank hold technique",
                    ),
                ],
            ),
            day(
                "Tuesday",
                "Cardio Builder",
                vec![
                    exercise(
                        "High Knees",
                        "Run in place, drive the knees to hip height",
                        30,
                        0,
                        "high knees exercise",
                    ),
                    exercise(
                        "Mountain Climbers",
                        "Hands under shoulders, quick alternating knees",
                        30,
                        0,
                        "mountain climbers form",
                    ),
                    exercise(
                        "Burpees",
                        "Step or jump back, stand tall at the top",
                        0,
                        8,
                        "burpee tutorial beginner",
                    ),
                    exercise(
                        "Jump Rope (imaginary)",
                        "Light bounces on the balls of the feet",
                        60,
                        0,
                        "jump rope without rope workout",
                    ),
                ],
            ),
            day(
                "Wednesday",
                "Core Focus",
                vec![
                    exercise(
                        "Crunches",
                        "Slow and controlled, chin off the chest",
                        0,
                        15,
                        "crunch exercise form",
                    ),
                    exercise(
                        "Russian Twists",
                        "Feet down or hovering, rotate from the ribs",
                        0,
                        20,
                        "russian twist tutorial",
                    ),
                    exercise(
                        "Side Plank (left)",
                        "Stack the feet, lift the hips",
                        20,
                        0,
                        "side plank technique",
                    ),
                    exercise(
                        "Side Plank (right)",
                        "Same hold on the other side",
                        20,
                        0,
                        "side plank technique",
                    ),
                    exercise(
                        "Dead Bug",
                        "Lower opposite arm and leg, back flat",
                        45,
                        0,
                        "dead bug core exercise",
                    ),
                ],
            ),
            day(
                "Thursday",
                "Active Recovery",
                vec![
                    exercise(
                        "Cat-Cow Stretch",
                        "Slow spinal waves with the breath",
                        60,
                        0,
                        "cat cow stretch",
                    ),
                    exercise(
                        "Hip Circles",
                        "Big controlled circles, both directions",
                        0,
                        10,
                        "standing hip circles mobility",
                    ),
                    exercise(
                        "Hamstring Stretch",
                        "Hinge forward with a long spine",
                        45,
                        0,
                        "standing hamstring stretch",
                    ),
                    exercise(
                        "Shoulder Rolls",
                        "Loosen up, roll forward then back",
                        0,
                        12,
                        "shoulder roll warm up",
                    ),
                ],
            ),
            day(
                "Friday",
                "Lower Body Strength",
                vec![
                    exercise(
                        "Lunges",
                        "Alternating legs, front knee over the ankle",
                        0,
                        12,
                        "forward lunge form",
                    ),
                    exercise(
                        "Glute Bridges",
                        "Squeeze at the top, ribs down",
                        0,
                        15,
                        "glute bridge tutorial",
                    ),
                    exercise(
                        "Wall Sit",
                        "Thighs parallel, back flat on the wall",
                        40,
                        0,
                        "wall sit exercise",
                    ),
                    exercise(
                        "Calf Raises",
                        "Full range, pause at the top",
                        0,
                        20,
                        "calf raise form",
                    ),
                ],
            ),
            day(
                "Saturday",
                "Endurance Circuit",
                vec![
                    exercise(
                        "March in Place",
                        "Brisk pace, swing the arms",
                        60,
                        0,
                        "marching in place cardio",
                    ),
                    exercise(
                        "Squat to Stand",
                        "Touch the floor, stand tall between reps",
                        0,
                        12,
                        "squat to stand exercise",
                    ),
                    exercise(
                        "Bear Crawl Hold",
                        "Knees an inch off the floor",
                        30,
                        0,
                        "bear crawl hold",
                    ),
                    exercise(
                        "Step Jacks",
                        "Low-impact jumping jack variation",
                        45,
                        0,
                        "step jack low impact",
                    ),
                    exercise(
                        "Superman Hold",
                        "Lift arms and legs, squeeze the back",
                        20,
                        0,
                        "superman exercise hold",
                    ),
                ],
            ),
            day(
                "Sunday",
                "Gentle Reset",
                vec![
                    exercise(
                        "Deep Breathing",
                        "Slow nasal breaths, long exhales",
                        60,
                        0,
                        "box breathing exercise",
                    ),
                    exercise(
                        "Child's Pose",
                        "Sink the hips back, arms long",
                        45,
                        0,
                        "childs pose stretch",
                    ),
                    exercise(
                        "Neck Stretches",
                        "Ear to shoulder, gentle holds each side",
                        0,
                        6,
                        "neck stretch routine",
                    ),
                    exercise(
                        "Easy Walk",
                        "Around the room or outside, easy pace",
                        120,
                        0,
                        "walking warm up",
                    ),
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_plan_is_valid() {
        demo_plan().validate().unwrap();
    }

    #[test]
    fn test_demo_plan_covers_the_week_in_order() {
        let labels: Vec<&str> = demo_plan().days.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
                "Sunday"
            ]
        );
    }

    #[test]
    fn test_demo_plan_mixes_timed_and_rep_based() {
        let plan = demo_plan();
        let timed = plan
            .days
            .iter()
            .flat_map(|d| &d.exercises)
            .filter(|e| e.duration_seconds > 0)
            .count();
        let rep_based = plan
            .days
            .iter()
            .flat_map(|d| &d.exercises)
            .filter(|e| e.duration_seconds == 0)
            .count();

        assert!(timed > 0);
        assert!(rep_based > 0);
        // Every rep-based exercise carries a usable rep count
        assert!(plan
            .days
            .iter()
            .flat_map(|d| &d.exercises)
            .filter(|e| e.duration_seconds == 0)
            .all(|e| e.reps > 0));
    }

    #[test]
    fn test_demo_provider_serves_the_plan() {
        let plan = DemoPlanProvider.weekly_plan(AgeGroup::Adults).unwrap();
        assert_eq!(plan.days.len(), DAYS_PER_WEEK);
    }
}
