pub mod dungeon;
pub mod time;
