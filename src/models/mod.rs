//! Data models for the StackIt backend.
//!
//! These models match the frontend interfaces exactly for seamless
//! interoperability.

mod datastore;
mod notification;
mod question;
mod stats;
mod user;

pub use datastore::*;
pub use notification::*;
pub use question::*;
pub use stats::*;
pub use user::*;
