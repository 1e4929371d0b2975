use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{CreateView, HomeView, PostView, TrainingView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/create", CreateView)] Create {},
        #[route("/post/:id", PostView)] Post { id: u64 },
    #[end_layout]
    #[route("/training/:id", TrainingView)] Training { id: u64 },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Drills" }
            ul {
                li { Link { to: Route::Home {}, "Sessions" } }
                li { Link { to: Route::Create {}, "New session" } }
            }
        }
    }
}
