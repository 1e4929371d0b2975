use dioxus::prelude::*;
use dioxus_router::Link;
use drill_core::model::{FocusArea, PlayerCount, PostFilter};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{PostCardVm, map_post_cards};

const LIST_LIMIT: u32 = 50;

#[derive(Clone, Debug, PartialEq)]
struct HomeData {
    cards: Vec<PostCardVm>,
}

fn chip_class(selected: bool) -> &'static str {
    if selected { "chip selected" } else { "chip" }
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let posts = ctx.posts();

    let mut query = use_signal(String::new);
    let mut tags = use_signal(Vec::<FocusArea>::new);
    let mut players = use_signal(|| None::<PlayerCount>);

    let resource = use_resource(move || {
        let posts = posts.clone();
        let filter = PostFilter {
            query: Some(query()),
            tags: tags(),
            player_count: players(),
        };
        async move {
            let items = posts
                .list_posts(&filter, LIST_LIMIT)
                .await
                .map_err(|err| ViewError::from(&err))?;
            Ok(HomeData {
                cards: map_post_cards(&items),
            })
        }
    });
    let state = view_state_from_resource(&resource);
    let filtering = query.read().trim().len() + tags.read().len() > 0 || players().is_some();

    rsx! {
        div { class: "page",
            h2 { "Training sessions" }

            div { class: "filters",
                input {
                    r#type: "search",
                    placeholder: "Search sessions",
                    value: "{query}",
                    oninput: move |evt| query.set(evt.value()),
                }
                select {
                    onchange: move |evt| players.set(PlayerCount::from_label(&evt.value()).ok()),
                    option { value: "", selected: players().is_none(), "Any players" }
                    for count in PlayerCount::ALL {
                        option {
                            value: count.label(),
                            selected: players() == Some(count),
                            "{count.label()}"
                        }
                    }
                }
            }
            div { class: "filters",
                for area in FocusArea::ALL {
                    button {
                        class: chip_class(tags.read().contains(&area)),
                        onclick: move |_| {
                            let mut selected = tags.write();
                            if let Some(pos) = selected.iter().position(|a| *a == area) {
                                selected.remove(pos);
                            } else {
                                selected.push(area);
                            }
                        },
                        "{area.label()}"
                    }
                }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.cards.is_empty() {
                        if filtering {
                            p { "No sessions match these filters." }
                        } else {
                            p { "No training sessions yet." }
                            Link { to: Route::Create {}, "Create the first one" }
                        }
                    } else {
                        ul { class: "post-list",
                            for card in data.cards {
                                PostCard { key: "{card.id}", card }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn PostCard(card: PostCardVm) -> Element {
    rsx! {
        li { class: "post-card",
            Link { to: Route::Post { id: card.id },
                h3 { "{card.title}" }
            }
            p { class: "meta",
                "{card.author} · {card.created_at_str} · {card.duration_str} · {card.drill_count} drills"
            }
            p { class: "meta",
                "{card.players_str} · {card.ball_str} ball · {card.intensity_str} · {card.rating_str}"
            }
            div { class: "tags",
                for tag in card.tags {
                    span { class: "tag", "{tag}" }
                }
            }
        }
    }
}
