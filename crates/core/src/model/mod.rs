mod drill;
mod ids;
mod post;
mod rating;

pub use ids::{DrillId, ParseIdError, PostId, UserId};

pub use drill::{
    DEFAULT_DRAFT_SECS, DEFAULT_WORK_SECS, Drill, DrillDraft, DrillError, NewDrill,
    work_duration_or_default,
};
pub use post::{
    Author, BallType, FocusArea, Intensity, NewPost, PlayerCount, Post, PostDraft, PostError,
    PostFilter,
};
pub use rating::{Rating, RatingError, RatingScore, RatingSummary};
