use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use drill_core::model::{PostId, RatingScore};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{DrillVm, PostDetailVm, rating_label};

#[component]
pub fn PostView(id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let post_id = PostId::new(id);
    let viewer = ctx.current_user().id;
    let posts = ctx.posts();
    let ratings = ctx.ratings();

    let mut action_error = use_signal(|| None::<ViewError>);
    let mut rating_override = use_signal(|| None::<String>);

    let resource = {
        let posts = posts.clone();
        use_resource(use_reactive!(|post_id| {
            let posts = posts.clone();
            async move {
                let post = posts
                    .get_post(post_id)
                    .await
                    .map_err(|err| ViewError::from(&err))?;
                Ok::<_, ViewError>(PostDetailVm::new(&post, viewer))
            }
        }))
    };
    let state = view_state_from_resource(&resource);

    let rate = use_callback(move |score: u8| {
        let ratings = ratings.clone();
        spawn(async move {
            match ratings.rate(post_id, viewer, score).await {
                Ok(summary) => {
                    action_error.set(None);
                    rating_override.set(Some(rating_label(summary)));
                }
                Err(err) => action_error.set(Some(ViewError::from(&err))),
            }
        });
    });

    let delete = use_callback(move |()| {
        let posts = posts.clone();
        spawn(async move {
            match posts.delete_post(post_id).await {
                Ok(()) => {
                    let _ = navigator.push(Route::Home {});
                }
                Err(err) => action_error.set(Some(ViewError::from(&err))),
            }
        });
    });

    rsx! {
        div { class: "page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(detail) => rsx! {
                    h2 { "{detail.card.title}" }
                    p { class: "post-meta",
                        "By {detail.card.author} · {detail.card.created_at_str} · {detail.card.duration_str}"
                    }
                    p { class: "post-meta",
                        "{detail.card.players_str} · {detail.card.ball_str} ball · {detail.card.intensity_str}"
                    }
                    div { class: "tags",
                        for tag in detail.card.tags.iter() {
                            span { class: "tag", "{tag}" }
                        }
                    }
                    if let Some(description) = detail.description.as_ref() {
                        p { "{description}" }
                    }

                    div { class: "rating",
                        span {
                            {rating_override().unwrap_or_else(|| detail.card.rating_str.clone())}
                        }
                        div { class: "stars",
                            for score in RatingScore::MIN..=RatingScore::MAX {
                                button {
                                    title: "Rate {score}",
                                    onclick: move |_| rate.call(score),
                                    "☆"
                                }
                            }
                        }
                    }

                    if detail.can_start {
                        Link { class: "start", to: Route::Training { id }, "Start training" }
                    }

                    h3 { "Drills" }
                    for drill in detail.drills.iter().cloned() {
                        DrillItem { key: "{drill.position}", drill }
                    }

                    if detail.can_delete {
                        button { class: "danger", onclick: move |_| delete.call(()), "Delete session" }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    Link { to: Route::Home {}, "Back to sessions" }
                },
            }
            if let Some(err) = action_error() {
                p { class: "error", "{err.message()}" }
            }
        }
    }
}

#[component]
fn DrillItem(drill: DrillVm) -> Element {
    rsx! {
        div { class: "drill",
            h4 { "{drill.position}. {drill.title} ({drill.duration_str})" }
            p { "{drill.description}" }
            if !drill.steps.is_empty() {
                ol {
                    for step in drill.steps {
                        li { "{step}" }
                    }
                }
            }
        }
    }
}
