//! Fetch recent Gmail messages, clean their bodies and group them into
//! chronologically ordered conversation threads.

pub mod auth;
pub mod config;
pub mod domain;
pub mod mail;
pub mod output;

pub use domain::email::{Header, Message, PartBody, Payload, RawMessage, Thread, ThreadId};
pub use mail::extract::{extract, preview};
pub use mail::message::build_message;
pub use mail::sanitize::sanitize;
pub use mail::threads::{ThreadGroups, assemble, group_by_thread, threads_from_raw};
