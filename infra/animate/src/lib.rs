//! # Animate
//!
//! Slide-style visibility transitions (`slide_up`, `slide_down`, `slide_toggle`) for dashboard
//! panels.
//!
//! The animator never touches a document directly. It talks to a [`RenderSurface`], a small
//! capability trait for reading computed display and box metrics and for writing inline styles,
//! so the transition logic runs the same against a browser binding or an in-memory fake.
//!
//! * **One transition per element**: a new call supersedes the pending one (frames and
//!   completion are cancelled), so rapid toggling converges on the last request.
//! * **Fail fast**: a missing or detached element is reported as
//!   [`AnimateError::InvalidTarget`] at call time.
//! * **Fire-and-forget**: frames and completion run on tokio timers; callers are never
//!   suspended.

mod animator;
mod error;
mod surface;

pub use crate::animator::{
    AnimationState, Animator, DEFAULT_FRAME_INTERVAL, DEFAULT_SLIDE_DURATION, Direction,
};
pub use crate::error::{AnimateError, AnimateErrorExt, Result};
pub use crate::surface::{
    BoxMetrics, Display, ElementId, RenderSurface, StyleProperty, parse_px, px,
};
