//! Client story session state machine.
//!
//! The session owns the current stage, the accumulated progress log, and
//! the running score, and drives the transitions described by the flow
//! `interests -> characterSelection -> loading -> story -> feedback ->
//! {story | end}`. It performs no I/O itself: generation and persistence
//! results are fed back in by the caller, which keeps every transition
//! unit-testable.

use std::time::Duration;

use crate::achievements::StatsReport;
use crate::story::{CharacterSnapshot, Choice, StoryStep};

/// Fixed pause between committing a choice and requesting the next
/// segment. Not skippable and not cancellable.
pub const FEEDBACK_DELAY: Duration = Duration::from_secs(3);

/// Number of trailing steps sent as generation context; older history is
/// dropped to bound prompt size.
pub const CONTEXT_WINDOW: usize = 3;

/// A story run completes at exactly this many committed decisions.
pub const STORY_LENGTH: usize = 5;

/// Feedback shown after a safe choice.
pub const SAFE_FEEDBACK: &str = "Great job! That was a safe choice!";
/// Feedback shown after an unsafe or neutral choice.
pub const UNSAFE_FEEDBACK: &str = "Let's think about that choice...";

/// User-visible alert when generation fails and the session falls back to
/// the dashboard.
pub const GENERATION_FAILED_ALERT: &str = "Sorry, we could not generate a story. Please try again.";

/// Current screen/state of the story session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Interests,
    CharacterSelection,
    Loading,
    Story,
    Feedback,
    End,
    Dashboard,
    Adventures,
    Profile,
    Blog,
}

/// Errors produced by rejected transitions.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Select at least one interest first")]
    NoInterests,

    #[error("Please select a character!")]
    NoCharacter,

    #[error("Transition not allowed from the current stage")]
    InvalidTransition,

    #[error("No such choice at the current decision point")]
    NoSuchChoice,
}

/// Result of committing a choice.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOutcome {
    /// Whether the committed choice was flagged safe.
    pub safe: bool,
    /// One of the two fixed feedback messages.
    pub feedback: &'static str,
    /// Score after applying the choice's point delta.
    pub score: i32,
    /// Present exactly when this commit was the 5th completed decision.
    pub stats_report: Option<StatsReport>,
}

/// Holds one user's in-flight story: stage, progress log, and score.
#[derive(Debug, Clone)]
pub struct StorySession {
    stage: Stage,
    interests: Vec<String>,
    character: Option<CharacterSnapshot>,
    progress: Vec<StoryStep>,
    score: i32,
}

impl StorySession {
    /// Start a fresh session at the interest-selection stage.
    pub fn new() -> Self {
        Self {
            stage: Stage::Interests,
            interests: Vec::new(),
            character: None,
            progress: Vec::new(),
            score: 0,
        }
    }

    /// Resume a persisted story directly at the story stage, displaying
    /// its last step.
    pub fn resume(
        interests: Vec<String>,
        character: Option<CharacterSnapshot>,
        progress: Vec<StoryStep>,
        score: i32,
    ) -> Self {
        Self {
            stage: Stage::Story,
            interests,
            character,
            progress,
            score,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    pub fn character(&self) -> Option<&CharacterSnapshot> {
        self.character.as_ref()
    }

    pub fn progress(&self) -> &[StoryStep] {
        &self.progress
    }

    /// The last [`CONTEXT_WINDOW`] steps, used as generation context.
    pub fn generation_context(&self) -> &[StoryStep] {
        let start = self.progress.len().saturating_sub(CONTEXT_WINDOW);
        &self.progress[start..]
    }

    /// Toggle an interest tag in or out of the selection.
    pub fn toggle_interest(&mut self, interest: &str) {
        if let Some(pos) = self.interests.iter().position(|i| i == interest) {
            self.interests.remove(pos);
        } else {
            self.interests.push(interest.to_string());
        }
    }

    /// Advance from interest selection to character selection.
    ///
    /// Rejected while the interest selection is empty.
    pub fn proceed_to_character_selection(&mut self) -> Result<(), SessionError> {
        if self.stage != Stage::Interests {
            return Err(SessionError::InvalidTransition);
        }
        if self.interests.is_empty() {
            return Err(SessionError::NoInterests);
        }
        self.stage = Stage::CharacterSelection;
        Ok(())
    }

    pub fn select_character(&mut self, character: CharacterSnapshot) {
        self.character = Some(character);
    }

    /// Dispatch the opening generation request: `characterSelection -> loading`.
    ///
    /// Rejected when no character has been chosen.
    pub fn begin_story(&mut self) -> Result<(), SessionError> {
        if self.stage != Stage::CharacterSelection {
            return Err(SessionError::InvalidTransition);
        }
        if self.character.is_none() {
            return Err(SessionError::NoCharacter);
        }
        self.stage = Stage::Loading;
        Ok(())
    }

    /// Generation succeeded: append the new step and show it.
    ///
    /// Valid from `Loading` (opening segment) and `Feedback` (continuation).
    pub fn generation_succeeded(&mut self, step: StoryStep) -> Result<(), SessionError> {
        match self.stage {
            Stage::Loading | Stage::Feedback => {
                self.progress.push(step);
                self.stage = Stage::Story;
                Ok(())
            }
            _ => Err(SessionError::InvalidTransition),
        }
    }

    /// Opening generation failed: fall back to the dashboard.
    ///
    /// Returns the fixed user-visible alert. No retry is attempted.
    pub fn generation_failed(&mut self) -> &'static str {
        self.stage = Stage::Dashboard;
        GENERATION_FAILED_ALERT
    }

    /// Continuation generation returned nothing: the run ends.
    ///
    /// The caller persists the story as complete before rendering the end
    /// screen.
    pub fn finish(&mut self) -> Result<(), SessionError> {
        if self.stage != Stage::Feedback {
            return Err(SessionError::InvalidTransition);
        }
        self.stage = Stage::End;
        Ok(())
    }

    /// Commit the choice at `index` on the current step.
    ///
    /// Applies the point delta to the running score, records the decision
    /// and feedback on the step, and moves to the feedback stage. On the
    /// 5th completed decision the outcome carries a one-shot
    /// [`StatsReport`] with the aggregate choice-safety counts.
    pub fn commit_choice(&mut self, index: usize) -> Result<ChoiceOutcome, SessionError> {
        if self.stage != Stage::Story {
            return Err(SessionError::InvalidTransition);
        }
        let step = self
            .progress
            .last_mut()
            .ok_or(SessionError::InvalidTransition)?;
        let choice: Choice = step
            .choices
            .get(index)
            .cloned()
            .ok_or(SessionError::NoSuchChoice)?;

        let feedback = if choice.safe {
            SAFE_FEEDBACK
        } else {
            UNSAFE_FEEDBACK
        };
        let safe = choice.safe;

        self.score += choice.points;
        step.decision = Some(choice);
        step.feedback = Some(feedback.to_string());

        let stats_report = if self.progress.len() == STORY_LENGTH {
            let safe_choices = self
                .progress
                .iter()
                .filter(|p| p.decision.as_ref().is_some_and(|d| d.safe))
                .count() as i32;
            Some(StatsReport {
                safe_choices,
                total_choices: self.progress.len() as i32,
                is_complete: true,
            })
        } else {
            None
        };

        self.stage = Stage::Feedback;

        Ok(ChoiceOutcome {
            safe,
            feedback,
            score: self.score,
            stats_report,
        })
    }

    /// Unconditional "go home" reset: display state only, persisted story
    /// progress is untouched.
    pub fn go_home(&mut self) {
        self.stage = Stage::Dashboard;
    }

    /// Visit one of the dashboard side branches.
    ///
    /// Only reachable from the dashboard; every other stage must go home
    /// first.
    pub fn visit(&mut self, stage: Stage) -> Result<(), SessionError> {
        let allowed = matches!(stage, Stage::Adventures | Stage::Profile | Stage::Blog);
        if !allowed || self.stage != Stage::Dashboard {
            return Err(SessionError::InvalidTransition);
        }
        self.stage = stage;
        Ok(())
    }
}

impl Default for StorySession {
    fn default() -> Self {
        Self::new()
    }
}
