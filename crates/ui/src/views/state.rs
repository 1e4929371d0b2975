use dioxus::prelude::*;
use services::{PostServiceError, RatingServiceError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    NotFound,
    EmptySession,
    Invalid,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::NotFound => "This training session no longer exists.",
            ViewError::EmptySession => "This training session has no drills.",
            ViewError::Invalid => "Please check the highlighted fields.",
        }
    }
}

impl From<&PostServiceError> for ViewError {
    fn from(err: &PostServiceError) -> Self {
        match err {
            PostServiceError::NotFound(_) => ViewError::NotFound,
            PostServiceError::Post(_) => ViewError::Invalid,
            _ => ViewError::Unknown,
        }
    }
}

impl From<&RatingServiceError> for ViewError {
    fn from(err: &RatingServiceError) -> Self {
        match err {
            RatingServiceError::NotFound(_) => ViewError::NotFound,
            RatingServiceError::Rating(_) => ViewError::Invalid,
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
