//! Workout playback engine.
//!
//! This module implements the guided-workout countdown state machine:
//! - One session per selected day plan, over a borrowed exercise sequence
//! - A per-exercise pacing window (own duration, or a fixed fallback for
//!   rep-based exercises)
//! - Tick-driven transitions: the engine holds no timer and is driven by an
//!   external 1 Hz scheduler, which makes it unit-testable without real
//!   time passing

use crate::{Error, Exercise, Result};

/// Pacing window applied to rep-based exercises (`duration_seconds == 0`),
/// irrespective of the rep count
pub const FALLBACK_PACING_SECONDS: u32 = 60;

/// Countdown duration assigned to an exercise: its own duration when
/// time-based, else the fixed fallback window
pub fn pacing_window(exercise: &Exercise) -> u32 {
    if exercise.duration_seconds > 0 {
        exercise.duration_seconds
    } else {
        FALLBACK_PACING_SECONDS
    }
}

/// What a single tick did to the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused with time remaining; nothing changed
    Idle,
    /// One second elapsed on the current exercise
    Ticked,
    /// The countdown expired and the session advanced to the exercise at
    /// `index`, paused and awaiting explicit resume
    Advanced { index: usize },
    /// The countdown expired on the last exercise; the session is terminal
    Completed,
}

/// Playback state for one guided workout.
///
/// The session borrows the day plan's exercise sequence read-only; it owns
/// only the cursor, the countdown and the running flag. It is created when a
/// day plan is selected for execution and simply dropped when the user
/// navigates away.
#[derive(Clone, Debug)]
pub struct PlaybackSession<'a> {
    exercises: &'a [Exercise],
    current_index: usize,
    remaining_seconds: u32,
    running: bool,
}

impl<'a> PlaybackSession<'a> {
    /// Create a session positioned on the first exercise, paused.
    ///
    /// An empty exercise sequence is a caller contract violation and is
    /// rejected rather than clamped.
    pub fn new(exercises: &'a [Exercise]) -> Result<Self> {
        let first = exercises
            .first()
            .ok_or_else(|| Error::Playback("Cannot start a workout with no exercises".into()))?;

        Ok(Self {
            exercises,
            current_index: 0,
            remaining_seconds: pacing_window(first),
            running: false,
        })
    }

    /// Jump to the exercise at `index`, resetting the countdown to its
    /// pacing window and pausing.
    ///
    /// Selecting the current index is an idempotent reset. An out-of-range
    /// index is rejected.
    pub fn select_exercise(&mut self, index: usize) -> Result<()> {
        if index >= self.exercises.len() {
            return Err(Error::Playback(format!(
                "Exercise index {} out of range (0..{})",
                index,
                self.exercises.len()
            )));
        }
        self.jump_to(index);
        Ok(())
    }

    /// Flip the running flag. The countdown is untouched; resuming at zero
    /// remaining is treated as expiry on the next tick.
    pub fn toggle_running(&mut self) {
        self.running = !self.running;
    }

    /// Restart the current exercise's countdown, paused
    pub fn reset(&mut self) {
        self.jump_to(self.current_index);
    }

    /// Move to the next exercise; no-op on the last one
    pub fn advance(&mut self) {
        if self.current_index + 1 < self.exercises.len() {
            self.jump_to(self.current_index + 1);
        }
    }

    /// Move to the previous exercise; no-op on the first one
    pub fn retreat(&mut self) {
        if self.current_index > 0 {
            self.jump_to(self.current_index - 1);
        }
    }

    /// Apply one one-second time step.
    ///
    /// Invoked only by the scheduling layer, never by direct user action.
    /// While running with time remaining, the countdown decrements. A zero
    /// countdown signals expiry whether or not the session is running: the
    /// session advances to the next exercise (paused), or, on the last
    /// exercise, pauses terminally. Ticking a terminal session keeps
    /// reporting `Completed` and changes nothing.
    pub fn tick(&mut self) -> TickOutcome {
        if self.running && self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
            return TickOutcome::Ticked;
        }

        if self.remaining_seconds == 0 {
            if self.current_index + 1 < self.exercises.len() {
                let next = self.current_index + 1;
                self.jump_to(next);
                tracing::debug!("Countdown expired, advancing to exercise {}", next);
                return TickOutcome::Advanced { index: next };
            }

            self.running = false;
            return TickOutcome::Completed;
        }

        TickOutcome::Idle
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The exercise the cursor is on
    pub fn current_exercise(&self) -> &Exercise {
        &self.exercises[self.current_index]
    }

    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    /// Terminal condition: last exercise, countdown expired
    pub fn is_complete(&self) -> bool {
        self.current_index + 1 == self.exercises.len() && self.remaining_seconds == 0
    }

    /// Fraction of the current pacing window still remaining, in [0, 1].
    /// Drives the progress indicator.
    pub fn progress(&self) -> f32 {
        let window = pacing_window(self.current_exercise());
        self.remaining_seconds as f32 / window as f32
    }

    fn jump_to(&mut self, index: usize) {
        self.current_index = index;
        self.remaining_seconds = pacing_window(&self.exercises[index]);
        self.running = false;
    }
}

/// Render a countdown as zero-padded `MM:SS`
pub fn format_remaining(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(seconds: u32) -> Exercise {
        Exercise {
            name: format!("Timed {}", seconds),
            description: "test".into(),
            duration_seconds: seconds,
            reps: 0,
            video_query: "test".into(),
        }
    }

    fn rep_based(reps: u32) -> Exercise {
        Exercise {
            name: format!("Reps {}", reps),
            description: "test".into(),
            duration_seconds: 0,
            reps,
            video_query: "test".into(),
        }
    }

    fn state(session: &PlaybackSession) -> (usize, u32, bool) {
        (
            session.current_index(),
            session.remaining_seconds(),
            session.is_running(),
        )
    }

    #[test]
    fn test_fresh_session_starts_paused_on_first_exercise() {
        let exercises = [timed(30), timed(45)];
        let session = PlaybackSession::new(&exercises).unwrap();
        assert_eq!(state(&session), (0, 30, false));
    }

    #[test]
    fn test_fresh_session_uses_fallback_for_rep_based_first_exercise() {
        let exercises = [rep_based(12), timed(45)];
        let session = PlaybackSession::new(&exercises).unwrap();
        assert_eq!(session.remaining_seconds(), FALLBACK_PACING_SECONDS);
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        let exercises: [Exercise; 0] = [];
        assert!(PlaybackSession::new(&exercises).is_err());
    }

    #[test]
    fn test_pacing_window_ignores_reps() {
        // Fallback applies to any zero-duration exercise, reps == 0 included
        assert_eq!(pacing_window(&timed(45)), 45);
        assert_eq!(pacing_window(&rep_based(12)), 60);
        assert_eq!(pacing_window(&rep_based(0)), 60);
    }

    #[test]
    fn test_tick_while_paused_with_time_left_is_a_noop() {
        let exercises = [timed(30), timed(45)];
        let mut session = PlaybackSession::new(&exercises).unwrap();

        assert_eq!(session.tick(), TickOutcome::Idle);
        assert_eq!(state(&session), (0, 30, false));
    }

    #[test]
    fn test_running_ticks_decrement_one_second_each() {
        let exercises = [timed(30)];
        let mut session = PlaybackSession::new(&exercises).unwrap();
        session.toggle_running();

        assert_eq!(session.tick(), TickOutcome::Ticked);
        assert_eq!(session.tick(), TickOutcome::Ticked);
        assert_eq!(state(&session), (0, 28, true));
    }

    #[test]
    fn test_full_window_of_ticks_lands_on_next_exercise_paused() {
        let exercises = [timed(3), timed(45)];
        let mut session = PlaybackSession::new(&exercises).unwrap();
        session.toggle_running();

        for _ in 0..3 {
            assert_eq!(session.tick(), TickOutcome::Ticked);
        }
        assert_eq!(state(&session), (0, 0, true));

        // The tick after the countdown hits zero performs the transition
        assert_eq!(session.tick(), TickOutcome::Advanced { index: 1 });
        assert_eq!(state(&session), (1, 45, false));
    }

    #[test]
    fn test_expiry_on_last_exercise_completes_and_pauses() {
        let exercises = [timed(2)];
        let mut session = PlaybackSession::new(&exercises).unwrap();
        session.toggle_running();

        session.tick();
        session.tick();
        assert_eq!(session.tick(), TickOutcome::Completed);
        assert_eq!(state(&session), (0, 0, false));
        assert!(session.is_complete());
    }

    #[test]
    fn test_terminal_session_ticks_are_idempotent() {
        let exercises = [timed(1)];
        let mut session = PlaybackSession::new(&exercises).unwrap();
        session.toggle_running();
        session.tick();
        session.tick();
        assert!(session.is_complete());

        for _ in 0..5 {
            assert_eq!(session.tick(), TickOutcome::Completed);
            assert_eq!(state(&session), (0, 0, false));
        }
    }

    #[test]
    fn test_tick_advances_even_when_paused_at_zero() {
        // Expiry fires on remaining == 0 regardless of the running flag,
        // so a session paused at zero still advances on the next scheduled
        // tick. Intentional; do not "fix" without changing the contract.
        let exercises = [timed(1), timed(45)];
        let mut session = PlaybackSession::new(&exercises).unwrap();
        session.toggle_running();
        session.tick();
        session.toggle_running();
        assert_eq!(state(&session), (0, 0, false));

        assert_eq!(session.tick(), TickOutcome::Advanced { index: 1 });
        assert_eq!(state(&session), (1, 45, false));
    }

    #[test]
    fn test_resuming_at_zero_expires_on_next_tick() {
        let exercises = [timed(1), timed(30)];
        let mut session = PlaybackSession::new(&exercises).unwrap();
        session.toggle_running();
        session.tick();
        session.toggle_running(); // pause at zero
        session.toggle_running(); // resume at zero

        assert_eq!(session.tick(), TickOutcome::Advanced { index: 1 });
    }

    #[test]
    fn test_select_exercise_resets_countdown_and_pauses() {
        let exercises = [timed(30), rep_based(10), timed(20)];
        let mut session = PlaybackSession::new(&exercises).unwrap();
        session.toggle_running();
        session.tick();
        session.tick();

        session.select_exercise(1).unwrap();
        assert_eq!(state(&session), (1, 60, false));

        // Re-selecting the current index is an idempotent reset
        session.toggle_running();
        session.tick();
        session.select_exercise(1).unwrap();
        assert_eq!(state(&session), (1, 60, false));
    }

    #[test]
    fn test_select_exercise_rejects_out_of_range() {
        let exercises = [timed(30)];
        let mut session = PlaybackSession::new(&exercises).unwrap();

        let err = session.select_exercise(1).unwrap_err();
        assert!(err.to_string().contains("out of range"));
        assert_eq!(state(&session), (0, 30, false));
    }

    #[test]
    fn test_advance_and_retreat_are_noops_at_the_edges() {
        let exercises = [timed(30), timed(45)];
        let mut session = PlaybackSession::new(&exercises).unwrap();

        session.retreat();
        assert_eq!(state(&session), (0, 30, false));

        session.advance();
        assert_eq!(state(&session), (1, 45, false));

        // Running state and countdown survive a boundary no-op untouched
        session.toggle_running();
        session.tick();
        session.advance();
        assert_eq!(state(&session), (1, 44, true));

        session.retreat();
        assert_eq!(state(&session), (0, 30, false));
    }

    #[test]
    fn test_reset_restarts_current_exercise() {
        let exercises = [timed(30), timed(45)];
        let mut session = PlaybackSession::new(&exercises).unwrap();
        session.advance();
        session.toggle_running();
        session.tick();
        session.tick();
        assert_eq!(state(&session), (1, 43, true));

        session.reset();
        assert_eq!(state(&session), (1, 45, false));
    }

    #[test]
    fn test_progress_fraction_tracks_pacing_window() {
        let exercises = [timed(4)];
        let mut session = PlaybackSession::new(&exercises).unwrap();
        assert_eq!(session.progress(), 1.0);

        session.toggle_running();
        session.tick();
        assert_eq!(session.progress(), 0.75);
    }

    #[test]
    fn test_format_remaining_is_zero_padded() {
        assert_eq!(format_remaining(0), "00:00");
        assert_eq!(format_remaining(9), "00:09");
        assert_eq!(format_remaining(60), "01:00");
        assert_eq!(format_remaining(754), "12:34");
    }

    #[test]
    fn test_two_exercise_walkthrough() {
        // Timed 3s exercise followed by a rep-based one on the fallback window
        let exercises = [timed(3), rep_based(10)];
        let mut session = PlaybackSession::new(&exercises).unwrap();
        assert_eq!(state(&session), (0, 3, false));

        session.toggle_running();
        assert!(session.is_running());

        session.tick();
        session.tick();
        assert_eq!(state(&session), (0, 1, true));

        session.tick();
        assert_eq!(state(&session), (0, 0, true));

        assert_eq!(session.tick(), TickOutcome::Advanced { index: 1 });
        assert_eq!(state(&session), (1, 60, false));
        assert_eq!(session.current_exercise().reps, 10);
    }
}
