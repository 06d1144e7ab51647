//! Headless client core for the Fotogram photo sharing service.
//!
//! The crate mediates between a view layer and the remote REST API: every
//! remote operation is dispatched as an action, runs through a reducer as a
//! pending/fulfilled/rejected lifecycle, and lands in store-owned state the
//! view subscribes to. The view itself lives elsewhere; this crate has no
//! rendering dependencies.

pub mod components;
pub mod dispatcher;
pub mod environment;
pub mod view_model;

pub use dispatcher::{Effect, Reducer, RequestSeq, Store};
pub use environment::{Config, Environment, Model};
