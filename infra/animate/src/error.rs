use crate::surface::ElementId;
use mcs_error::{ErrorContext, format_context};

/// Errors that can occur when starting a transition.
///
/// They are raised synchronously by the call that starts the transition, never by the deferred
/// completion.
#[derive(Debug, thiserror::Error)]
pub enum AnimateError {
    /// The element is missing or not attached to the render tree.
    #[error("Invalid target {element}{}", format_context(.context))]
    InvalidTarget { element: ElementId, context: ErrorContext },

    /// No tokio runtime is available to drive transitions.
    #[error("Runtime unavailable{}: {source}", format_context(.context))]
    Runtime { source: tokio::runtime::TryCurrentError, context: ErrorContext },
}

pub type Result<T> = std::result::Result<T, AnimateError>;

mcs_error::context_ext!(
    /// Adds `.context(..)` to animator results.
    pub trait AnimateErrorExt for AnimateError { InvalidTarget, Runtime }
);

mcs_error::from_source!(AnimateError { tokio::runtime::TryCurrentError => Runtime });
