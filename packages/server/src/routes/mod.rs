//! Request handlers, grouped by resource.

pub mod documents;
pub mod users;
