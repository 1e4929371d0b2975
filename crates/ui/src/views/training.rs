use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use drill_core::model::PostId;

use crate::context::AppContext;
use crate::platform::{BackRequests, ChannelNavigator};
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{PlayerPanelVm, PlayerScreenVm};

/// Full-screen player for one training session.
///
/// The view owns its `SessionPlayer`: loading is re-run when `id` changes and
/// the player's clock is shut down when the view is dropped.
#[component]
pub fn TrainingView(id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let arc_radius = ctx.player_config().arc_radius();

    let (player, back_requests) = use_hook(|| {
        let (nav, rx) = ChannelNavigator::channel();
        let player = Rc::new(ctx.session_player(Arc::new(nav)));
        (player, Rc::new(RefCell::new(Some::<BackRequests>(rx))))
    });

    let mut view = use_signal(|| player.view());

    {
        let player = Rc::clone(&player);
        use_future(move || {
            let mut rx = player.subscribe();
            async move {
                view.set(rx.borrow_and_update().clone());
                while rx.changed().await.is_ok() {
                    view.set(rx.borrow_and_update().clone());
                }
            }
        });
    }

    use_future(move || {
        let rx = back_requests.borrow_mut().take();
        async move {
            let Some(mut rx) = rx else {
                return;
            };
            if rx.recv().await.is_some() {
                navigator.go_back();
            }
        }
    });

    {
        let player = Rc::clone(&player);
        use_effect(use_reactive!(|id| {
            let player = Rc::clone(&player);
            spawn(async move {
                player.load(PostId::new(id)).await;
            });
        }));
    }

    {
        let player = Rc::clone(&player);
        use_drop(move || player.shutdown());
    }

    let toggle = {
        let player = Rc::clone(&player);
        use_callback(move |()| player.toggle_play_pause())
    };
    let forward = {
        let player = Rc::clone(&player);
        use_callback(move |()| player.skip_forward())
    };
    let backward = {
        let player = Rc::clone(&player);
        use_callback(move |()| player.skip_backward())
    };

    let screen = PlayerScreenVm::from_view(&view.read(), arc_radius);

    rsx! {
        div { class: "page player",
            match screen {
                PlayerScreenVm::Loading => rsx! {
                    p { "Loading session..." }
                },
                PlayerScreenVm::Failed(message) => rsx! {
                    p { class: "error", "Could not load this session." }
                    p { class: "meta", "{message}" }
                    Link { to: Route::Home {}, "Back to sessions" }
                },
                PlayerScreenVm::NoDrills => rsx! {
                    p { "{ViewError::EmptySession.message()}" }
                    Link { to: Route::Post { id }, "Back" }
                },
                PlayerScreenVm::Panel(panel) => rsx! {
                    PlayerPanel {
                        panel,
                        on_toggle: toggle,
                        on_forward: forward,
                        on_backward: backward,
                    }
                    Link { to: Route::Post { id }, "Exit" }
                },
            }
        }
    }
}

#[component]
fn PlayerPanel(
    panel: PlayerPanelVm,
    on_toggle: Callback<()>,
    on_forward: Callback<()>,
    on_backward: Callback<()>,
) -> Element {
    let arc = panel.arc.clone();
    rsx! {
        p { class: "meta", "{panel.session_title}" }
        p { class: "phase", "{panel.phase_label}" }
        p { class: "drill-title", "{panel.drill_title}" }
        p { class: "meta", "{panel.drill_label}" }

        div { class: "timer",
            svg {
                width: "{arc.size}",
                height: "{arc.size}",
                view_box: "0 0 {arc.size} {arc.size}",
                circle {
                    class: "track",
                    cx: "{arc.center}",
                    cy: "{arc.center}",
                    r: "{arc.radius}",
                    fill: "none",
                    stroke_width: "{arc.stroke_width}",
                }
                circle {
                    class: "progress",
                    cx: "{arc.center}",
                    cy: "{arc.center}",
                    r: "{arc.radius}",
                    fill: "none",
                    stroke_width: "{arc.stroke_width}",
                    stroke_dasharray: "{arc.dash_array}",
                    stroke_dashoffset: "{arc.dash_offset}",
                    transform: "rotate(-90 {arc.center} {arc.center})",
                }
            }
            span { class: "time", "{panel.time_label}" }
        }

        div { class: "controls",
            button {
                disabled: !panel.can_skip_backward,
                onclick: move |_| on_backward.call(()),
                "Previous"
            }
            button {
                class: "primary",
                disabled: !panel.can_toggle,
                onclick: move |_| on_toggle.call(()),
                "{panel.play_label}"
            }
            button {
                disabled: !panel.can_skip_forward,
                onclick: move |_| on_forward.call(()),
                "Next"
            }
        }
    }
}
