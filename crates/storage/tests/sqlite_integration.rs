use chrono::Duration;
use drill_core::model::{
    Author, BallType, FocusArea, Intensity, NewDrill, NewPost, PlayerCount, Rating, RatingScore,
    UserId,
};
use drill_core::time::fixed_now;
use storage::repository::{PostRepository, RatingRepository, StorageError, UserRepository};
use storage::sqlite::SqliteRepository;

async fn repo(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

fn coach() -> Author {
    Author {
        id: UserId::new(1),
        name: "Coach Nour".into(),
        image: Some("https://example.com/nour.png".into()),
    }
}

fn sprints_and_lunges() -> NewPost {
    NewPost {
        author: UserId::new(1),
        title: "Court Fitness".into(),
        description: Some("Short conditioning block".into()),
        player_count: PlayerCount::Two,
        ball_type: BallType::DoubleYellow,
        intensity: Intensity::new(8).unwrap(),
        tags: vec![FocusArea::Fitness, FocusArea::Footwork],
        drills: vec![
            NewDrill {
                title: "Sprints".into(),
                description: "Front to back".into(),
                duration_secs: Some(10),
                steps: vec!["Start at the T".into(), "Touch the front wall".into()],
            },
            NewDrill {
                title: "Lunges".into(),
                description: "Deep lunges to each corner".into(),
                duration_secs: Some(0),
                steps: Vec::new(),
            },
        ],
    }
}

#[tokio::test]
async fn sqlite_round_trips_post_drills_and_author() {
    let repo = repo("memdb_post_roundtrip").await;
    repo.upsert_user(&coach()).await.unwrap();

    let id = repo
        .insert_post(&sprints_and_lunges(), fixed_now())
        .await
        .unwrap();
    let post = repo.get_post(id).await.unwrap().expect("post");

    assert_eq!(post.title(), "Court Fitness");
    assert_eq!(post.author(), &coach());
    assert_eq!(post.player_count(), PlayerCount::Two);
    assert_eq!(post.ball_type(), BallType::DoubleYellow);
    assert_eq!(post.intensity().value(), 8);
    assert_eq!(post.tags(), &[FocusArea::Fitness, FocusArea::Footwork]);
    assert_eq!(post.created_at(), fixed_now());

    let drills = post.drills();
    assert_eq!(drills.len(), 2);
    assert_eq!(drills[0].title(), "Sprints");
    assert_eq!(drills[0].steps().len(), 2);
    assert_eq!(drills[1].duration_secs(), Some(0));
    assert_eq!(drills[1].work_duration_secs(), 30);
}

#[tokio::test]
async fn sqlite_missing_post_and_author() {
    let repo = repo("memdb_missing").await;
    assert!(repo.get_post(drill_core::model::PostId::new(99)).await.unwrap().is_none());

    let err = repo
        .insert_post(&sprints_and_lunges(), fixed_now())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn sqlite_lists_newest_first() {
    let repo = repo("memdb_list_order").await;
    repo.upsert_user(&coach()).await.unwrap();

    let first = repo
        .insert_post(&sprints_and_lunges(), fixed_now())
        .await
        .unwrap();
    let second = repo
        .insert_post(&sprints_and_lunges(), fixed_now() + Duration::minutes(5))
        .await
        .unwrap();

    let ids: Vec<_> = repo
        .list_posts(10, 0)
        .await
        .unwrap()
        .iter()
        .map(|p| p.id())
        .collect();
    assert_eq!(ids, vec![second, first]);

    let limited = repo.list_posts(1, 0).await.unwrap();
    assert_eq!(limited.len(), 1);

    let rest: Vec<_> = repo
        .list_posts(10, 1)
        .await
        .unwrap()
        .iter()
        .map(|p| p.id())
        .collect();
    assert_eq!(rest, vec![first]);
}

#[tokio::test]
async fn sqlite_ratings_aggregate_and_cascade_on_delete() {
    let repo = repo("memdb_ratings").await;
    repo.upsert_user(&coach()).await.unwrap();
    repo.upsert_user(&Author {
        id: UserId::new(2),
        name: "Player".into(),
        image: None,
    })
    .await
    .unwrap();
    let id = repo
        .insert_post(&sprints_and_lunges(), fixed_now())
        .await
        .unwrap();

    for (user, score) in [(1, 3), (2, 5), (1, 4)] {
        repo.upsert_rating(&Rating {
            post_id: id,
            user_id: UserId::new(user),
            score: RatingScore::new(score).unwrap(),
            rated_at: fixed_now(),
        })
        .await
        .unwrap();
    }

    let summary = repo.rating_summary(id).await.unwrap();
    assert_eq!(summary.count(), 2);
    assert!((summary.average() - 4.5).abs() < 1e-9);

    let post = repo.get_post(id).await.unwrap().expect("post");
    assert_eq!(post.rating().count(), 2);

    repo.delete_post(id).await.unwrap();
    assert!(repo.get_post(id).await.unwrap().is_none());
    assert_eq!(repo.rating_summary(id).await.unwrap().count(), 0);
    assert!(matches!(
        repo.delete_post(id).await,
        Err(StorageError::NotFound)
    ));
}

#[tokio::test]
async fn sqlite_rating_unknown_post_is_not_found() {
    let repo = repo("memdb_rating_missing").await;
    repo.upsert_user(&coach()).await.unwrap();
    let err = repo
        .upsert_rating(&Rating {
            post_id: drill_core::model::PostId::new(404),
            user_id: UserId::new(1),
            score: RatingScore::new(5).unwrap(),
            rated_at: fixed_now(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}
