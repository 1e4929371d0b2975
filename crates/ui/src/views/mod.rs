mod create;
mod home;
mod post;
mod state;
mod training;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use create::CreateView;
pub use home::HomeView;
pub use post::PostView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use training::TrainingView;
