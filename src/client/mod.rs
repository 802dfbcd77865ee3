//! Client-side data access for the Z game.
//!
//! This module contains the dungeon progress store, the ZToken reset service and timer,
//! the backend client they are built on, and the pure helpers shared with the view layer.
//! Every component receives its backend explicitly so it can be exercised against a fake.

pub mod config;
pub mod data;
pub mod error;
#[cfg(feature = "ui")]
pub mod hooks;
pub mod notify;
pub mod scheduler;
pub mod service;
pub mod store;
pub mod util;
