use drill_core::model::{BallType, DrillDraft, FocusArea, PlayerCount, PostDraft, PostId};
use services::{AppServices, PostServiceError};

fn drill(title: &str, description: &str, duration: &str, steps: &[&str]) -> DrillDraft {
    DrillDraft {
        title: title.to_string(),
        description: description.to_string(),
        duration: duration.to_string(),
        steps: steps.iter().map(ToString::to_string).collect(),
    }
}

/// Sample sessions for local testing. The second drill of "Leg day" has a
/// zero duration so the 30 second fallback can be seen in the player.
fn samples() -> Vec<PostDraft> {
    vec![
        PostDraft {
            title: "Leg day".into(),
            description: "Short court conditioning block.".into(),
            player_count: PlayerCount::One,
            ball_type: BallType::Any,
            focus: vec![FocusArea::Fitness, FocusArea::Movement],
            intensity: "8".into(),
            drills: vec![
                drill("Sprints", "Front wall to back wall and return.", "10", &["Touch the T each time"]),
                drill("Lunges", "Lunge to each corner.", "0", &[]),
            ],
        },
        PostDraft {
            title: "Drop and drive".into(),
            description: "Feed a drive, answer with a straight drop.".into(),
            player_count: PlayerCount::Two,
            ball_type: BallType::DoubleYellow,
            focus: vec![FocusArea::Drop, FocusArea::Drive],
            intensity: "5".into(),
            drills: vec![
                drill(
                    "Straight drops",
                    "Partner feeds from the back.",
                    "120",
                    &["Early racket prep", "Hold the shot", "Recover to the T"],
                ),
                drill("Length rally", "Drives only, past the short line.", "180", &[]),
            ],
        },
    ]
}

/// Insert the sample sessions under the local user.
///
/// # Errors
///
/// Returns `PostServiceError` if a sample fails validation or cannot be stored.
pub async fn seed(services: &AppServices) -> Result<Vec<PostId>, PostServiceError> {
    let posts = services.posts();
    let mut ids = Vec::new();
    for draft in samples() {
        let id = posts.create_post(&draft, services.current_user()).await?;
        tracing::info!(post_id = %id, title = %draft.title, "seeded training session");
        ids.push(id);
    }
    Ok(ids)
}
