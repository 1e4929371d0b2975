use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use drill_core::PlayerConfig;
use drill_core::model::Author;
use drill_core::time::fixed_clock;
use services::{
    Announcer, AppServices, LogAnnouncer, PostService, RatingService, SessionLoader,
};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{CreateView, HomeView, PostView, TrainingView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn current_user(&self) -> Author {
        self.services.current_user().clone()
    }

    fn player_config(&self) -> PlayerConfig {
        self.services.player_config()
    }

    fn posts(&self) -> Arc<PostService> {
        self.services.posts()
    }

    fn ratings(&self) -> Arc<RatingService> {
        self.services.ratings()
    }

    fn session_loader(&self) -> Arc<dyn SessionLoader> {
        self.services.session_loader()
    }

    fn announcer(&self) -> Arc<dyn Announcer> {
        Arc::new(LogAnnouncer)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Create,
    Post(u64),
    Training(u64),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Create => rsx! { CreateView {} },
        ViewKind::Post(id) => rsx! { PostView { id } },
        ViewKind::Training(id) => rsx! { TrainingView { id } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub services: AppServices,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Run enough rounds for resources, effects and spawned loads to land.
    pub async fn settle(&mut self) {
        for _ in 0..6 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Services over fresh in-memory storage. Seed through `services` or
/// `storage`, then call [`mount`].
pub async fn setup_services() -> (Storage, AppServices) {
    let storage = Storage::in_memory();
    let services = AppServices::from_storage(storage.clone(), fixed_clock(), PlayerConfig::default())
        .await
        .expect("bootstrap services");
    (storage, services)
}

pub fn mount(view: ViewKind, storage: Storage, services: AppServices) -> ViewHarness {
    let app = Arc::new(TestApp {
        services: services.clone(),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness {
        dom,
        storage,
        services,
    }
}
