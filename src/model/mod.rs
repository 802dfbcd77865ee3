pub mod api;
pub mod dungeon;
pub mod ztoken;
