use drill_core::model::{
    BallType, DrillDraft, FocusArea, PlayerCount, PostDraft, PostError, work_duration_or_default,
};

/// State of the create-session form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateFormVm {
    draft: PostDraft,
}

impl CreateFormVm {
    /// Empty form with one blank drill.
    #[must_use]
    pub fn new() -> Self {
        Self {
            draft: PostDraft {
                drills: vec![DrillDraft::default()],
                ..PostDraft::default()
            },
        }
    }

    #[must_use]
    pub fn draft(&self) -> &PostDraft {
        &self.draft
    }

    pub fn set_title(&mut self, value: String) {
        self.draft.title = value;
    }

    pub fn set_description(&mut self, value: String) {
        self.draft.description = value;
    }

    /// Unknown labels leave the selection unchanged.
    pub fn set_player_count(&mut self, label: &str) {
        if let Ok(count) = PlayerCount::from_label(label) {
            self.draft.player_count = count;
        }
    }

    pub fn set_ball_type(&mut self, label: &str) {
        if let Ok(ball) = BallType::from_label(label) {
            self.draft.ball_type = ball;
        }
    }

    pub fn toggle_focus(&mut self, area: FocusArea) {
        self.draft.toggle_focus(area);
    }

    #[must_use]
    pub fn is_focus_selected(&self, area: FocusArea) -> bool {
        self.draft.focus.contains(&area)
    }

    pub fn set_intensity(&mut self, raw: &str) {
        self.draft.intensity = sanitize_intensity_input(raw);
    }

    pub fn add_drill(&mut self) {
        self.draft.drills.push(DrillDraft::default());
    }

    pub fn remove_drill(&mut self, index: usize) {
        if index < self.draft.drills.len() {
            self.draft.drills.remove(index);
        }
    }

    pub fn set_drill_title(&mut self, index: usize, value: String) {
        if let Some(drill) = self.draft.drills.get_mut(index) {
            drill.title = value;
        }
    }

    pub fn set_drill_description(&mut self, index: usize, value: String) {
        if let Some(drill) = self.draft.drills.get_mut(index) {
            drill.description = value;
        }
    }

    pub fn set_drill_duration(&mut self, index: usize, raw: &str) {
        if let Some(drill) = self.draft.drills.get_mut(index) {
            drill.duration = sanitize_duration_input(raw);
        }
    }

    pub fn add_step(&mut self, drill: usize) {
        if let Some(drill) = self.draft.drills.get_mut(drill) {
            drill.steps.push(String::new());
        }
    }

    pub fn set_step(&mut self, drill: usize, step: usize, value: String) {
        if let Some(slot) = self
            .draft
            .drills
            .get_mut(drill)
            .and_then(|drill| drill.steps.get_mut(step))
        {
            *slot = value;
        }
    }

    pub fn remove_step(&mut self, drill: usize, step: usize) {
        if let Some(drill) = self.draft.drills.get_mut(drill) {
            if step < drill.steps.len() {
                drill.steps.remove(step);
            }
        }
    }

    /// Running total shown under the drill list, in whole minutes.
    #[must_use]
    pub fn total_minutes_preview(&self) -> u32 {
        let secs: u32 = self
            .draft
            .drills
            .iter()
            .map(|drill| work_duration_or_default(drill.duration.trim().parse().ok()))
            .fold(0, u32::saturating_add);
        secs.div_ceil(60)
    }
}

/// Keep only digits, at most two of them.
#[must_use]
pub fn sanitize_intensity_input(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(2).collect()
}

#[must_use]
pub fn sanitize_duration_input(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(6).collect()
}

/// User-facing text for a rejected draft.
#[must_use]
pub fn form_error_message(err: &PostError) -> String {
    match err {
        PostError::Drill { index, source } => capitalize(&format!("drill {}: {source}", index + 1)),
        other => capitalize(&other.to_string()),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
