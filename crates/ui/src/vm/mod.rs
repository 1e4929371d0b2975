mod create_vm;
mod player_vm;
mod post_vm;
mod time_fmt;

pub use create_vm::{
    CreateFormVm, form_error_message, sanitize_duration_input, sanitize_intensity_input,
};
pub use player_vm::{PlayerPanelVm, PlayerScreenVm, TimerArcVm};
pub use post_vm::{DrillVm, PostCardVm, PostDetailVm, map_post_cards, rating_label};
pub use time_fmt::{format_date, format_minutes};
