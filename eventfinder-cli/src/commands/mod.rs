pub mod clear;
pub mod delete;
pub mod events;
pub mod map;
pub mod remind;
pub mod results;
pub mod save;
pub mod search;
pub mod show;
