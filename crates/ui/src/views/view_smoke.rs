use drill_core::model::{DrillDraft, FocusArea, NewPost, PostDraft, PostId, UserId};
use drill_core::time::fixed_now;
use services::AppServices;

use super::test_harness::{ViewKind, mount, setup_services};

fn leg_day() -> PostDraft {
    PostDraft {
        title: "Leg day".into(),
        description: "Court sprints and lunges".into(),
        focus: vec![FocusArea::Fitness, FocusArea::Movement],
        drills: vec![
            DrillDraft {
                title: "Sprints".into(),
                description: "Front to back".into(),
                duration: "10".into(),
                steps: vec!["Touch the T".into()],
            },
            DrillDraft {
                title: "Lunges".into(),
                description: "Six corners".into(),
                duration: String::new(),
                steps: Vec::new(),
            },
        ],
        ..PostDraft::default()
    }
}

async fn create(services: &AppServices, draft: &PostDraft) -> PostId {
    services
        .posts()
        .create_post(draft, services.current_user())
        .await
        .expect("create post")
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_lists_sessions() {
    let (storage, services) = setup_services().await;
    create(&services, &leg_day()).await;

    let mut harness = mount(ViewKind::Home, storage, services);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Leg day"), "missing title in {html}");
    assert!(html.contains("1 player"), "missing player count in {html}");
    assert!(html.contains("No ratings yet"), "missing rating in {html}");
    assert!(html.contains("2 drills"), "missing drill count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_empty_state() {
    let (storage, services) = setup_services().await;
    let mut harness = mount(ViewKind::Home, storage, services);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No training sessions yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn post_view_renders_drills_for_owner() {
    let (storage, services) = setup_services().await;
    let id = create(&services, &leg_day()).await;
    services
        .ratings()
        .rate(id, services.current_user().id, 4)
        .await
        .expect("rate");

    let mut harness = mount(ViewKind::Post(id.value()), storage, services);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Sprints"), "missing drill in {html}");
    assert!(html.contains("30s (default)"), "missing default duration in {html}");
    assert!(html.contains("Touch the T"), "missing step in {html}");
    assert!(html.contains("⭐ 4.0 (1)"), "missing rating in {html}");
    assert!(html.contains("Start training"), "missing start link in {html}");
    assert!(html.contains("Delete session"), "missing delete for owner in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn post_view_missing_session() {
    let (storage, services) = setup_services().await;
    let mut harness = mount(ViewKind::Post(404), storage, services);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("no longer exists"), "missing not-found text in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn create_view_renders_form() {
    let (storage, services) = setup_services().await;
    let mut harness = mount(ViewKind::Create, storage, services);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("New training session"), "missing heading in {html}");
    assert!(html.contains("Drill 1 name"), "missing drill form in {html}");
    assert!(html.contains("180"), "missing default duration in {html}");
    assert!(html.contains("Pressure"), "missing focus chips in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn training_view_starts_paused_at_countdown() {
    let (storage, services) = setup_services().await;
    let id = create(&services, &leg_day()).await;

    let mut harness = mount(ViewKind::Training(id.value()), storage, services);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Get ready"), "missing phase in {html}");
    assert!(html.contains("00:05"), "missing clock in {html}");
    assert!(html.contains("Drill 1 of 2"), "missing position in {html}");
    assert!(html.contains("Sprints"), "missing drill title in {html}");
    assert!(html.contains("Play"), "missing play button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn training_view_empty_session() {
    let (storage, services) = setup_services().await;
    let id = storage
        .posts
        .insert_post(
            &NewPost {
                author: UserId::new(1),
                title: "Rest day".into(),
                description: None,
                player_count: Default::default(),
                ball_type: Default::default(),
                intensity: Default::default(),
                tags: Vec::new(),
                drills: Vec::new(),
            },
            fixed_now(),
        )
        .await
        .expect("insert empty post");

    let mut harness = mount(ViewKind::Training(id.value()), storage, services);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("has no drills"), "missing empty text in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn training_view_missing_session() {
    let (storage, services) = setup_services().await;
    let mut harness = mount(ViewKind::Training(404), storage, services);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Could not load this session."), "missing error in {html}");
}
