use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::DrillId;

/// Work duration used when a drill has no usable duration.
pub const DEFAULT_WORK_SECS: u32 = 30;

/// Duration pre-filled in the authoring form.
pub const DEFAULT_DRAFT_SECS: u32 = 180;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DrillError {
    #[error("drill name cannot be empty")]
    EmptyTitle,

    #[error("drill description cannot be empty")]
    EmptyDescription,

    #[error("drill duration must be a whole number of seconds: {raw:?}")]
    InvalidDuration { raw: String },
}

/// A single exercise inside a training session.
///
/// `duration_secs` is stored as authored. Zero or missing durations are kept
/// as-is so the stored data stays faithful; playback substitutes
/// [`DEFAULT_WORK_SECS`] through [`Drill::work_duration_secs`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drill {
    id: DrillId,
    title: String,
    description: String,
    duration_secs: Option<u32>,
    steps: Vec<String>,
}

impl Drill {
    #[must_use]
    pub fn new(
        id: DrillId,
        title: impl Into<String>,
        description: impl Into<String>,
        duration_secs: Option<u32>,
        steps: Vec<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            duration_secs,
            steps,
        }
    }

    #[must_use]
    pub fn id(&self) -> DrillId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Duration as authored, which may be absent or zero.
    #[must_use]
    pub fn duration_secs(&self) -> Option<u32> {
        self.duration_secs
    }

    #[must_use]
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Length of the work phase for this drill.
    #[must_use]
    pub fn work_duration_secs(&self) -> u32 {
        work_duration_or_default(self.duration_secs)
    }

    /// True when playback will fall back to the default duration.
    #[must_use]
    pub fn uses_default_duration(&self) -> bool {
        !matches!(self.duration_secs, Some(secs) if secs > 0)
    }
}

/// Maps an authored duration to a playable one.
#[must_use]
pub fn work_duration_or_default(duration_secs: Option<u32>) -> u32 {
    match duration_secs {
        Some(secs) if secs > 0 => secs,
        _ => DEFAULT_WORK_SECS,
    }
}

/// Unvalidated drill input from the create form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillDraft {
    pub title: String,
    pub description: String,
    pub duration: String,
    pub steps: Vec<String>,
}

impl Default for DrillDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            duration: DEFAULT_DRAFT_SECS.to_string(),
            steps: vec![String::new()],
        }
    }
}

/// Validated drill ready to be attached to a new post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDrill {
    pub title: String,
    pub description: String,
    pub duration_secs: Option<u32>,
    pub steps: Vec<String>,
}

impl NewDrill {
    #[must_use]
    pub fn work_duration_secs(&self) -> u32 {
        work_duration_or_default(self.duration_secs)
    }
}

impl DrillDraft {
    /// Validate the draft.
    ///
    /// An empty duration field is accepted as "no duration"; playback applies
    /// the default for it.
    ///
    /// # Errors
    ///
    /// Returns `DrillError` when the title or description is blank, or when the
    /// duration is not a non-negative integer.
    pub fn validate(&self) -> Result<NewDrill, DrillError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DrillError::EmptyTitle);
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(DrillError::EmptyDescription);
        }

        let raw = self.duration.trim();
        let duration_secs = if raw.is_empty() {
            None
        } else {
            Some(raw.parse::<u32>().map_err(|_| DrillError::InvalidDuration {
                raw: raw.to_string(),
            })?)
        };

        let steps = self
            .steps
            .iter()
            .map(|step| step.trim())
            .filter(|step| !step.is_empty())
            .map(ToString::to_string)
            .collect();

        Ok(NewDrill {
            title: title.to_string(),
            description: description.to_string(),
            duration_secs,
            steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drill(duration: Option<u32>) -> Drill {
        Drill::new(DrillId::new(1), "Sprints", "Run", duration, Vec::new())
    }

    #[test]
    fn zero_and_missing_durations_use_default() {
        assert_eq!(drill(Some(0)).work_duration_secs(), DEFAULT_WORK_SECS);
        assert_eq!(drill(None).work_duration_secs(), DEFAULT_WORK_SECS);
        assert!(drill(None).uses_default_duration());
        assert_eq!(drill(Some(10)).work_duration_secs(), 10);
        assert!(!drill(Some(10)).uses_default_duration());
    }

    #[test]
    fn draft_drops_blank_steps_and_trims() {
        let draft = DrillDraft {
            title: "  Court Sprints ".into(),
            description: "Front to back".into(),
            duration: "45".into(),
            steps: vec!["Start at T".into(), "   ".into(), "Touch front wall".into()],
        };
        let drill = draft.validate().unwrap();
        assert_eq!(drill.title, "Court Sprints");
        assert_eq!(drill.duration_secs, Some(45));
        assert_eq!(drill.steps, vec!["Start at T", "Touch front wall"]);
    }

    #[test]
    fn draft_rejects_bad_duration() {
        let draft = DrillDraft {
            title: "Lunges".into(),
            description: "Deep".into(),
            duration: "-5".into(),
            ..DrillDraft::default()
        };
        assert_eq!(
            draft.validate(),
            Err(DrillError::InvalidDuration { raw: "-5".into() })
        );
    }

    #[test]
    fn draft_requires_title_and_description() {
        let draft = DrillDraft::default();
        assert_eq!(draft.validate(), Err(DrillError::EmptyTitle));

        let draft = DrillDraft {
            title: "Boasts".into(),
            ..DrillDraft::default()
        };
        assert_eq!(draft.validate(), Err(DrillError::EmptyDescription));
    }

    #[test]
    fn empty_duration_field_means_default() {
        let draft = DrillDraft {
            title: "Drives".into(),
            description: "Rail".into(),
            duration: String::new(),
            steps: Vec::new(),
        };
        let drill = draft.validate().unwrap();
        assert_eq!(drill.duration_secs, None);
        assert_eq!(drill.work_duration_secs(), DEFAULT_WORK_SECS);
    }
}
