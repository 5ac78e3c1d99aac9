//! Session state: who is signed in and which role they act under

mod context;
mod store;

pub use context::{SessionContext, SessionUser};
pub use store::SessionStore;
