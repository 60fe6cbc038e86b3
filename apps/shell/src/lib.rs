//! # Shell
//!
//! Composition root of the mission-control dashboard. It turns the shell settings into a
//! [`ConfigResolver`](mcs_config::ConfigResolver), derives the message-bus
//! [`ConnectionOptions`](mcs_domain::config::ConnectionOptions) and dashboard options from it, and
//! binds the layout switches of the sidebar to slide transitions.
//!
//! Keep this crate thin: resolution rules live in `mcs-config`, transitions in `mcs-animate`.

mod bootstrap;
pub mod cli;
mod panels;

pub use crate::bootstrap::{
    Bootstrap, CLIENT_ID_PREFIX, KeySource, Report, client_id, connection_options,
    dashboard_options,
};
pub use crate::cli::Cli;
pub use crate::panels::SidebarController;
