use drill_core::model::{Drill, Post, RatingSummary, UserId};

use crate::vm::time_fmt::{format_date, format_minutes};

/// One row in the session list.
#[derive(Clone, Debug, PartialEq)]
pub struct PostCardVm {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub created_at_str: String,
    pub duration_str: String,
    pub players_str: &'static str,
    pub ball_str: &'static str,
    pub intensity_str: String,
    pub tags: Vec<&'static str>,
    pub rating_str: String,
    pub drill_count: usize,
}

impl From<&Post> for PostCardVm {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id().value(),
            title: post.title().to_string(),
            author: post.author().name.clone(),
            created_at_str: format_date(post.created_at()),
            duration_str: format_minutes(post.duration_minutes()),
            players_str: post.player_count().label(),
            ball_str: post.ball_type().label(),
            intensity_str: format!("Intensity {}/10", post.intensity().value()),
            tags: post.tags().iter().map(|tag| tag.label()).collect(),
            rating_str: rating_label(post.rating()),
            drill_count: post.drills().len(),
        }
    }
}

#[must_use]
pub fn map_post_cards(posts: &[Post]) -> Vec<PostCardVm> {
    posts.iter().map(PostCardVm::from).collect()
}

/// "⭐ 4.5 (12)", or "No ratings yet".
#[must_use]
pub fn rating_label(rating: RatingSummary) -> String {
    if rating.count() == 0 {
        return "No ratings yet".to_string();
    }
    format!("⭐ {:.1} ({})", rating.display_average(), rating.count())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrillVm {
    pub position: usize,
    pub title: String,
    pub description: String,
    pub duration_str: String,
    pub steps: Vec<String>,
}

impl DrillVm {
    fn from_drill(position: usize, drill: &Drill) -> Self {
        let secs = drill.work_duration_secs();
        let duration_str = if drill.uses_default_duration() {
            format!("{secs}s (default)")
        } else {
            format!("{secs}s")
        };
        Self {
            position,
            title: drill.title().to_string(),
            description: drill.description().to_string(),
            duration_str,
            steps: drill.steps().to_vec(),
        }
    }
}

/// Everything on the session detail screen.
#[derive(Clone, Debug, PartialEq)]
pub struct PostDetailVm {
    pub card: PostCardVm,
    pub description: Option<String>,
    pub drills: Vec<DrillVm>,
    pub can_delete: bool,
    pub can_start: bool,
}

impl PostDetailVm {
    #[must_use]
    pub fn new(post: &Post, viewer: UserId) -> Self {
        Self {
            card: PostCardVm::from(post),
            description: post.description().map(ToString::to_string),
            drills: post
                .drills()
                .iter()
                .enumerate()
                .map(|(index, drill)| DrillVm::from_drill(index + 1, drill))
                .collect(),
            can_delete: post.author().id == viewer,
            can_start: !post.drills().is_empty(),
        }
    }
}
