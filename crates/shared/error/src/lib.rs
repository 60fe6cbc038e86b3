//! # Error helpers
//!
//! Every error enum in the workspace follows one shape: `thiserror` variants that carry an
//! optional human-readable `context`, rendered after the variant message. This crate holds the
//! pieces that shape needs so each crate only declares its variants:
//!
//! * [`format_context`] for `#[error(..)]` messages;
//! * [`context_ext!`] for the `.context(..)` extension trait;
//! * [`from_source!`] for `From<Source>` conversions into `{ source, context: None }` variants.
//!
//! ## Example
//!
//! ```rust
//! use mcs_error::{ErrorContext, format_context};
//!
//! #[derive(Debug, thiserror::Error)]
//! pub enum StoreError {
//!     #[error("I/O error{}: {source}", format_context(.context))]
//!     Io { source: std::io::Error, context: ErrorContext },
//! }
//!
//! mcs_error::context_ext!(pub trait StoreErrorExt for StoreError { Io });
//! mcs_error::from_source!(StoreError { std::io::Error => Io });
//! ```

use std::borrow::Cow;

/// Optional context attached to an error variant.
pub type ErrorContext = Option<Cow<'static, str>>;

/// Renders a context as a ` (context)` suffix, or nothing.
#[allow(clippy::ref_option)]
#[must_use]
pub fn format_context(context: &ErrorContext) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

/// Declares a `.context(..)` extension trait for `Result<T, $error>`.
///
/// Every listed variant must have a `context` field of type [`ErrorContext`]. More impls of the
/// trait (for foreign error types) can be added by hand next to the invocation.
#[macro_export]
macro_rules! context_ext {
    ($(#[$meta:meta])* $vis:vis trait $ext:ident for $error:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        $vis trait $ext<T> {
            /// Attaches a human-readable context to the error, if any.
            ///
            /// # Errors
            /// Returns the error with the context attached.
            fn context(
                self,
                context: impl Into<::std::borrow::Cow<'static, str>>,
            ) -> ::std::result::Result<T, $error>;
        }

        impl<T> $ext<T> for ::std::result::Result<T, $error> {
            fn context(self, context: impl Into<::std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut error| {
                    match &mut error {
                        $($error::$variant { context: slot, .. })|+ => {
                            *slot = Some(context.into());
                        },
                    }
                    error
                })
            }
        }
    };
}

/// Implements `From<Source>` for variants shaped `{ source, context }`.
#[macro_export]
macro_rules! from_source {
    ($error:ident { $($source:ty => $variant:ident),+ $(,)? }) => {
        $(
            impl From<$source> for $error {
                fn from(source: $source) -> Self {
                    Self::$variant { source, context: None }
                }
            }
        )+
    };
}
