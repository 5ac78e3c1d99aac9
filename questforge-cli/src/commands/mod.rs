pub mod check;
pub mod config;
pub mod nav;
pub mod permissions;
pub mod roles;
pub mod session;
pub mod task;
