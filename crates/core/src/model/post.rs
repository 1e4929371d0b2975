use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::drill::{Drill, DrillDraft, DrillError, NewDrill};
use crate::model::ids::{PostId, UserId};
use crate::model::rating::RatingSummary;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PostError {
    #[error("session title cannot be empty")]
    EmptyTitle,

    #[error("session description cannot be empty")]
    EmptyDescription,

    #[error("a session needs at least one drill")]
    NoDrills,

    #[error("intensity must be between 1 and 10")]
    InvalidIntensity,

    #[error("unknown player count: {0}")]
    UnknownPlayerCount(String),

    #[error("unknown ball type: {0}")]
    UnknownBallType(String),

    #[error("unknown focus area: {0}")]
    UnknownFocusArea(String),

    #[error("drill {index}: {source}")]
    Drill { index: usize, source: DrillError },
}

//
// ─── CHOICES ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayerCount {
    #[default]
    One,
    Two,
    Three,
    Four,
    FivePlus,
}

impl PlayerCount {
    pub const ALL: [PlayerCount; 5] = [
        PlayerCount::One,
        PlayerCount::Two,
        PlayerCount::Three,
        PlayerCount::Four,
        PlayerCount::FivePlus,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PlayerCount::One => "1 player",
            PlayerCount::Two => "2 players",
            PlayerCount::Three => "3 players",
            PlayerCount::Four => "4 players",
            PlayerCount::FivePlus => "5+ players",
        }
    }

    /// Minimum head count, used for storage.
    #[must_use]
    pub fn minimum(self) -> u8 {
        match self {
            PlayerCount::One => 1,
            PlayerCount::Two => 2,
            PlayerCount::Three => 3,
            PlayerCount::Four => 4,
            PlayerCount::FivePlus => 5,
        }
    }

    #[must_use]
    pub fn from_minimum(value: u8) -> Option<Self> {
        match value {
            1 => Some(PlayerCount::One),
            2 => Some(PlayerCount::Two),
            3 => Some(PlayerCount::Three),
            4 => Some(PlayerCount::Four),
            v if v >= 5 => Some(PlayerCount::FivePlus),
            _ => None,
        }
    }

    /// # Errors
    ///
    /// Returns `PostError::UnknownPlayerCount` for labels outside [`PlayerCount::ALL`].
    pub fn from_label(label: &str) -> Result<Self, PostError> {
        Self::ALL
            .into_iter()
            .find(|count| count.label() == label.trim())
            .ok_or_else(|| PostError::UnknownPlayerCount(label.to_string()))
    }
}

impl fmt::Display for PlayerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BallType {
    #[default]
    Any,
    DoubleYellow,
    SingleYellow,
    Red,
    Blue,
}

impl BallType {
    pub const ALL: [BallType; 5] = [
        BallType::Any,
        BallType::DoubleYellow,
        BallType::SingleYellow,
        BallType::Red,
        BallType::Blue,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            BallType::Any => "Any",
            BallType::DoubleYellow => "Double Yellow",
            BallType::SingleYellow => "Single Yellow",
            BallType::Red => "Red",
            BallType::Blue => "Blue",
        }
    }

    /// # Errors
    ///
    /// Returns `PostError::UnknownBallType` for labels outside [`BallType::ALL`].
    pub fn from_label(label: &str) -> Result<Self, PostError> {
        Self::ALL
            .into_iter()
            .find(|ball| ball.label().eq_ignore_ascii_case(label.trim()))
            .ok_or_else(|| PostError::UnknownBallType(label.to_string()))
    }
}

impl fmt::Display for BallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Focus areas a session can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FocusArea {
    Drop,
    Lob,
    Drive,
    Boast,
    Volley,
    Footwork,
    Movement,
    Technique,
    Deception,
    Strategy,
    Fitness,
    Pressure,
}

impl FocusArea {
    pub const ALL: [FocusArea; 12] = [
        FocusArea::Drop,
        FocusArea::Lob,
        FocusArea::Drive,
        FocusArea::Boast,
        FocusArea::Volley,
        FocusArea::Footwork,
        FocusArea::Movement,
        FocusArea::Technique,
        FocusArea::Deception,
        FocusArea::Strategy,
        FocusArea::Fitness,
        FocusArea::Pressure,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FocusArea::Drop => "Drop",
            FocusArea::Lob => "Lob",
            FocusArea::Drive => "Drive",
            FocusArea::Boast => "Boast",
            FocusArea::Volley => "Volley",
            FocusArea::Footwork => "Footwork",
            FocusArea::Movement => "Movement",
            FocusArea::Technique => "Technique",
            FocusArea::Deception => "Deception",
            FocusArea::Strategy => "Strategy",
            FocusArea::Fitness => "Fitness",
            FocusArea::Pressure => "Pressure",
        }
    }

    /// # Errors
    ///
    /// Returns `PostError::UnknownFocusArea` for unknown tags.
    pub fn from_label(label: &str) -> Result<Self, PostError> {
        Self::ALL
            .into_iter()
            .find(|area| area.label().eq_ignore_ascii_case(label.trim()))
            .ok_or_else(|| PostError::UnknownFocusArea(label.to_string()))
    }
}

impl fmt::Display for FocusArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Perceived effort, 1 to 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Intensity(u8);

impl Intensity {
    pub const DEFAULT: Intensity = Intensity(5);

    /// # Errors
    ///
    /// Returns `PostError::InvalidIntensity` outside 1..=10.
    pub fn new(value: u8) -> Result<Self, PostError> {
        if (1..=10).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PostError::InvalidIntensity)
        }
    }

    /// Parse form input. Only up to two digits are accepted.
    ///
    /// # Errors
    ///
    /// Returns `PostError::InvalidIntensity` for anything that is not 1..=10.
    pub fn parse(raw: &str) -> Result<Self, PostError> {
        let raw = raw.trim();
        if raw.is_empty() || raw.len() > 2 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PostError::InvalidIntensity);
        }
        let value = raw.parse::<u8>().map_err(|_| PostError::InvalidIntensity)?;
        Self::new(value)
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

//
// ─── AUTHOR ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: UserId,
    pub name: String,
    pub image: Option<String>,
}

//
// ─── POST ──────────────────────────────────────────────────────────────────────
//

/// A published training session: metadata plus its ordered drills.
///
/// Drill order is playback order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    id: PostId,
    title: String,
    description: Option<String>,
    author: Author,
    player_count: PlayerCount,
    ball_type: BallType,
    intensity: Intensity,
    tags: Vec<FocusArea>,
    drills: Vec<Drill>,
    rating: RatingSummary,
    created_at: DateTime<Utc>,
}

impl Post {
    /// Rehydrate a post from storage.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn from_persisted(
        id: PostId,
        title: String,
        description: Option<String>,
        author: Author,
        player_count: PlayerCount,
        ball_type: BallType,
        intensity: Intensity,
        tags: Vec<FocusArea>,
        drills: Vec<Drill>,
        rating: RatingSummary,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            author,
            player_count,
            ball_type,
            intensity,
            tags,
            drills,
            rating,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> PostId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn author(&self) -> &Author {
        &self.author
    }

    #[must_use]
    pub fn player_count(&self) -> PlayerCount {
        self.player_count
    }

    #[must_use]
    pub fn ball_type(&self) -> BallType {
        self.ball_type
    }

    #[must_use]
    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    #[must_use]
    pub fn tags(&self) -> &[FocusArea] {
        &self.tags
    }

    #[must_use]
    pub fn drills(&self) -> &[Drill] {
        &self.drills
    }

    #[must_use]
    pub fn rating(&self) -> RatingSummary {
        self.rating
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Total playable work time in minutes, rounded up.
    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        total_minutes(self.drills.iter().map(Drill::work_duration_secs))
    }

    pub fn set_rating(&mut self, rating: RatingSummary) {
        self.rating = rating;
    }
}

fn total_minutes(durations: impl Iterator<Item = u32>) -> u32 {
    let secs: u32 = durations.fold(0_u32, u32::saturating_add);
    secs.div_ceil(60)
}

//
// ─── AUTHORING ─────────────────────────────────────────────────────────────────
//

/// Raw create-form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    pub player_count: PlayerCount,
    pub ball_type: BallType,
    pub focus: Vec<FocusArea>,
    pub intensity: String,
    pub drills: Vec<DrillDraft>,
}

impl Default for PostDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            player_count: PlayerCount::One,
            ball_type: BallType::Any,
            focus: Vec::new(),
            intensity: Intensity::DEFAULT.value().to_string(),
            drills: Vec::new(),
        }
    }
}

impl PostDraft {
    /// Add or remove a focus area, keeping selection order.
    pub fn toggle_focus(&mut self, area: FocusArea) {
        if let Some(pos) = self.focus.iter().position(|a| *a == area) {
            self.focus.remove(pos);
        } else {
            self.focus.push(area);
        }
    }

    /// Validate the draft into a post ready for insertion.
    ///
    /// # Errors
    ///
    /// Returns `PostError` for missing title/description, bad intensity, no
    /// drills, or the first invalid drill.
    pub fn validate(&self, author: UserId) -> Result<NewPost, PostError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(PostError::EmptyTitle);
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(PostError::EmptyDescription);
        }
        let intensity = Intensity::parse(&self.intensity)?;
        if self.drills.is_empty() {
            return Err(PostError::NoDrills);
        }
        let drills = self
            .drills
            .iter()
            .enumerate()
            .map(|(index, draft)| {
                draft
                    .validate()
                    .map_err(|source| PostError::Drill { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NewPost {
            author,
            title: title.to_string(),
            description: Some(description.to_string()),
            player_count: self.player_count,
            ball_type: self.ball_type,
            intensity,
            tags: self.focus.clone(),
            drills,
        })
    }
}

/// Validated post waiting for an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author: UserId,
    pub title: String,
    pub description: Option<String>,
    pub player_count: PlayerCount,
    pub ball_type: BallType,
    pub intensity: Intensity,
    pub tags: Vec<FocusArea>,
    pub drills: Vec<NewDrill>,
}

impl NewPost {
    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        total_minutes(self.drills.iter().map(NewDrill::work_duration_secs))
    }
}

//
// ─── FILTER ────────────────────────────────────────────────────────────────────
//

/// Criteria for the session list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub query: Option<String>,
    pub tags: Vec<FocusArea>,
    pub player_count: Option<PlayerCount>,
}

impl PostFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.as_deref().is_none_or(|q| q.trim().is_empty())
            && self.tags.is_empty()
            && self.player_count.is_none()
    }

    /// Case-insensitive text match on title, description and author, plus
    /// all-of tag matching.
    #[must_use]
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(count) = self.player_count {
            if post.player_count() != count {
                return false;
            }
        }
        if !self.tags.iter().all(|tag| post.tags().contains(tag)) {
            return false;
        }
        match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => {
                let needle = query.to_lowercase();
                post.title().to_lowercase().contains(&needle)
                    || post
                        .description()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
                    || post.author().name.to_lowercase().contains(&needle)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::DrillId;
    use crate::time::fixed_now;

    fn drill_draft(title: &str, duration: &str) -> DrillDraft {
        DrillDraft {
            title: title.into(),
            description: format!("{title} description"),
            duration: duration.into(),
            steps: vec!["step".into()],
        }
    }

    fn post(title: &str, tags: Vec<FocusArea>, players: PlayerCount) -> Post {
        Post::from_persisted(
            PostId::new(1),
            title.into(),
            Some("Solo ghosting routine".into()),
            Author {
                id: UserId::new(1),
                name: "Coach Nour".into(),
                image: None,
            },
            players,
            BallType::Any,
            Intensity::DEFAULT,
            tags,
            vec![
                Drill::new(DrillId::new(1), "Sprints", "", Some(90), Vec::new()),
                Drill::new(DrillId::new(2), "Lunges", "", Some(0), Vec::new()),
            ],
            RatingSummary::default(),
            fixed_now(),
        )
    }

    #[test]
    fn draft_validates_into_new_post() {
        let mut draft = PostDraft {
            title: "Movement Basics".into(),
            description: "Ghosting for beginners".into(),
            drills: vec![drill_draft("Ghosting", "120"), drill_draft("Rest", "")],
            ..PostDraft::default()
        };
        draft.toggle_focus(FocusArea::Footwork);
        draft.toggle_focus(FocusArea::Movement);
        draft.toggle_focus(FocusArea::Footwork);

        let new_post = draft.validate(UserId::new(3)).unwrap();
        assert_eq!(new_post.tags, vec![FocusArea::Movement]);
        assert_eq!(new_post.intensity, Intensity::DEFAULT);
        assert_eq!(new_post.drills.len(), 2);
        // 120 + 30 (default) seconds
        assert_eq!(new_post.duration_minutes(), 3);
    }

    #[test]
    fn draft_requires_drills() {
        let draft = PostDraft {
            title: "Empty".into(),
            description: "Nothing".into(),
            ..PostDraft::default()
        };
        assert_eq!(draft.validate(UserId::new(1)), Err(PostError::NoDrills));
    }

    #[test]
    fn draft_reports_drill_index() {
        let draft = PostDraft {
            title: "T".into(),
            description: "D".into(),
            drills: vec![drill_draft("Ok", "10"), drill_draft("", "10")],
            ..PostDraft::default()
        };
        assert_eq!(
            draft.validate(UserId::new(1)),
            Err(PostError::Drill {
                index: 1,
                source: DrillError::EmptyTitle
            })
        );
    }

    #[test]
    fn intensity_parsing() {
        assert_eq!(Intensity::parse("7").unwrap().value(), 7);
        assert_eq!(Intensity::parse("10").unwrap().value(), 10);
        assert!(Intensity::parse("0").is_err());
        assert!(Intensity::parse("11").is_err());
        assert!(Intensity::parse("100").is_err());
        assert!(Intensity::parse("").is_err());
    }

    #[test]
    fn labels_round_trip() {
        for count in PlayerCount::ALL {
            assert_eq!(PlayerCount::from_label(count.label()).unwrap(), count);
            assert_eq!(PlayerCount::from_minimum(count.minimum()), Some(count));
        }
        assert_eq!(BallType::from_label("double yellow").unwrap(), BallType::DoubleYellow);
        assert!(FocusArea::from_label("Smash").is_err());
    }

    #[test]
    fn duration_rounds_up_with_default() {
        let post = post("Ghosting", Vec::new(), PlayerCount::One);
        // 90 + 30 seconds
        assert_eq!(post.duration_minutes(), 2);
    }

    #[test]
    fn filter_matches_text_tags_and_players() {
        let post = post("Ghosting Ladder", vec![FocusArea::Footwork], PlayerCount::One);

        assert!(PostFilter::default().matches(&post));
        assert!(PostFilter {
            query: Some("ladder".into()),
            ..PostFilter::default()
        }
        .matches(&post));
        assert!(PostFilter {
            query: Some("nour".into()),
            ..PostFilter::default()
        }
        .matches(&post));
        assert!(!PostFilter {
            tags: vec![FocusArea::Footwork, FocusArea::Lob],
            ..PostFilter::default()
        }
        .matches(&post));
        assert!(!PostFilter {
            player_count: Some(PlayerCount::Two),
            ..PostFilter::default()
        }
        .matches(&post));
    }
}
