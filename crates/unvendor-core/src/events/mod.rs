//! Feature change notifications.

pub mod dispatcher;
pub mod handler;
