//! # Domain Models
//!
//! Pure data types shared by the mission-control shell crates, with minimal dependencies
//! (`serde`, `bitflags`). Keep it lean: no I/O, networking, or heavy logic, just data and
//! simple helpers.

pub mod config;
pub mod keys;
pub mod layout;
