use dioxus::prelude::*;
use dioxus_router::use_navigator;
use drill_core::model::{BallType, FocusArea, PlayerCount};
use services::PostServiceError;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{CreateFormVm, form_error_message};

fn chip_class(selected: bool) -> &'static str {
    if selected { "chip selected" } else { "chip" }
}

#[component]
pub fn CreateView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let posts = ctx.posts();
    let author = ctx.current_user().clone();

    let mut form = use_signal(CreateFormVm::new);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let submit = use_callback(move |()| {
        if saving() {
            return;
        }
        let posts = posts.clone();
        let author = author.clone();
        let draft = form.read().draft().clone();
        saving.set(true);
        spawn(async move {
            let result = posts.create_post(&draft, &author).await;
            saving.set(false);
            match result {
                Ok(id) => {
                    let _ = navigator.replace(Route::Post { id: id.value() });
                }
                Err(PostServiceError::Post(err)) => error.set(Some(form_error_message(&err))),
                Err(_) => error.set(Some("Could not save the session. Please try again.".into())),
            }
        });
    });

    let snapshot = form.read().clone();
    let draft = snapshot.draft().clone();
    let drill_count = draft.drills.len();
    let total_minutes = snapshot.total_minutes_preview();

    rsx! {
        div { class: "page form",
            h2 { "New training session" }

            label { "Title" }
            input {
                value: "{draft.title}",
                oninput: move |evt| form.write().set_title(evt.value()),
            }

            label { "Description" }
            textarea {
                value: "{draft.description}",
                oninput: move |evt| form.write().set_description(evt.value()),
            }

            label { "Players" }
            select {
                onchange: move |evt| form.write().set_player_count(&evt.value()),
                for count in PlayerCount::ALL {
                    option {
                        value: count.label(),
                        selected: draft.player_count == count,
                        "{count.label()}"
                    }
                }
            }

            label { "Ball" }
            select {
                onchange: move |evt| form.write().set_ball_type(&evt.value()),
                for ball in BallType::ALL {
                    option {
                        value: ball.label(),
                        selected: draft.ball_type == ball,
                        "{ball.label()}"
                    }
                }
            }

            label { "Intensity (1-10)" }
            input {
                inputmode: "numeric",
                maxlength: 2,
                value: "{draft.intensity}",
                oninput: move |evt| form.write().set_intensity(&evt.value()),
            }

            label { "Focus" }
            div { class: "filters",
                for area in FocusArea::ALL {
                    button {
                        r#type: "button",
                        class: chip_class(snapshot.is_focus_selected(area)),
                        onclick: move |_| form.write().toggle_focus(area),
                        "{area.label()}"
                    }
                }
            }

            h3 { "Drills ({total_minutes} min)" }
            for (index, drill) in draft.drills.iter().cloned().enumerate() {
                div { key: "{index}", class: "drill-form",
                    label { "Drill {index + 1} name" }
                    input {
                        value: "{drill.title}",
                        oninput: move |evt| form.write().set_drill_title(index, evt.value()),
                    }
                    label { "Description" }
                    textarea {
                        value: "{drill.description}",
                        oninput: move |evt| form.write().set_drill_description(index, evt.value()),
                    }
                    label { "Duration (seconds)" }
                    input {
                        inputmode: "numeric",
                        value: "{drill.duration}",
                        oninput: move |evt| form.write().set_drill_duration(index, &evt.value()),
                    }
                    label { "Steps" }
                    for (step_index, step) in drill.steps.iter().cloned().enumerate() {
                        div { key: "{step_index}", class: "step",
                            input {
                                value: "{step}",
                                placeholder: "Step {step_index + 1}",
                                oninput: move |evt| form.write().set_step(index, step_index, evt.value()),
                            }
                            button {
                                r#type: "button",
                                onclick: move |_| form.write().remove_step(index, step_index),
                                "Remove step"
                            }
                        }
                    }
                    button {
                        r#type: "button",
                        onclick: move |_| form.write().add_step(index),
                        "Add step"
                    }
                    if drill_count > 1 {
                        button {
                            r#type: "button",
                            class: "danger",
                            onclick: move |_| form.write().remove_drill(index),
                            "Remove drill"
                        }
                    }
                }
            }
            button {
                r#type: "button",
                onclick: move |_| form.write().add_drill(),
                "Add drill"
            }

            if let Some(message) = error() {
                p { class: "error", "{message}" }
            }
            button {
                class: "primary",
                disabled: saving(),
                onclick: move |_| submit.call(()),
                if saving() { "Saving..." } else { "Create session" }
            }
        }
    }
}
