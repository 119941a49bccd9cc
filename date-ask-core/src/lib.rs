//! Core types for date-ask.
//!
//! - `controller` drives the ask → celebrate → schedule sequence
//! - `gateway` persists the response locally and forwards it remotely
//! - `record` and `activity` define the persisted data

pub mod activity;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod record;
pub mod reluctance;
pub mod remote;
pub mod store;
pub mod timeline;

pub use activity::ActivityType;
pub use controller::{Controller, Stage};
pub use record::ResponseRecord;
