//! Client-side view-state stores.

pub mod dungeon;
