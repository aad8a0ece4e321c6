//! User statistics and the fixed achievement rule table.
//!
//! Achievements are opaque tags accumulated in a de-duplicated set. The
//! rule table is evaluated on every stats update, and tags are only ever
//! added (set union), so the achievement set is monotonically
//! non-decreasing.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Awarded when the first story is completed.
pub const FIRST_STORY: &str = "FIRST_STORY";
/// Awarded at a safe-choice streak of 5 or more.
pub const SAFETY_STREAK: &str = "SAFETY_STREAK";
/// Awarded on any perfect story (all choices safe).
pub const PERFECT_SCORE: &str = "PERFECT_SCORE";
/// Awarded at 5 or more completed stories.
pub const STORY_MASTER: &str = "STORY_MASTER";

/// Streak length required for [`SAFETY_STREAK`].
const SAFETY_STREAK_THRESHOLD: i32 = 5;
/// Completed-story count required for [`STORY_MASTER`].
const STORY_MASTER_THRESHOLD: i32 = 5;

/// Per-user gameplay statistics, embedded in the user record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub stories_completed: i32,
    pub safe_choices_streak: i32,
    pub perfect_stories: i32,
    pub achievements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_date: Option<Timestamp>,
    pub login_streak: i32,
}

/// Aggregate choice-safety counts reported when a story run finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub safe_choices: i32,
    pub total_choices: i32,
    pub is_complete: bool,
}

impl UserStats {
    /// Apply a completed-story report and re-evaluate the rule table.
    ///
    /// A perfect run (every choice safe) bumps `perfect_stories` and the
    /// safe-choice streak; any other run resets the streak to 0.
    pub fn record_story(&mut self, report: StatsReport) {
        if report.is_complete {
            self.stories_completed += 1;
        }

        if report.safe_choices == report.total_choices {
            self.perfect_stories += 1;
            self.safe_choices_streak += 1;
        } else {
            self.safe_choices_streak = 0;
        }

        self.evaluate_achievements();
    }

    /// Evaluate the fixed rule table, unioning any newly earned tags.
    fn evaluate_achievements(&mut self) {
        if self.stories_completed == 1 {
            self.add_achievement(FIRST_STORY);
        }
        if self.safe_choices_streak >= SAFETY_STREAK_THRESHOLD {
            self.add_achievement(SAFETY_STREAK);
        }
        if self.perfect_stories >= 1 {
            self.add_achievement(PERFECT_SCORE);
        }
        if self.stories_completed >= STORY_MASTER_THRESHOLD {
            self.add_achievement(STORY_MASTER);
        }
    }

    fn add_achievement(&mut self, tag: &str) {
        if !self.achievements.iter().any(|a| a == tag) {
            self.achievements.push(tag.to_string());
        }
    }
}

/// Compute the login streak after a login at `now`.
///
/// Logging in again on the same calendar day (UTC) leaves the streak
/// unchanged; the day after the last login extends it by one; any longer
/// gap, or no prior login, starts a fresh streak of 1.
pub fn updated_login_streak(
    last_login: Option<Timestamp>,
    current_streak: i32,
    now: Timestamp,
) -> i32 {
    let Some(last) = last_login else {
        return 1;
    };

    let today = now.date_naive();
    let last_day = last.date_naive();

    if last_day == today {
        current_streak
    } else if last_day.succ_opt() == Some(today) {
        current_streak + 1
    } else {
        1
    }
}
