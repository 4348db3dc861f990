//! Core data models for the tier list.

mod application;
mod gamemode;
mod ids;
mod mock;
mod player;
mod tier;

pub use application::*;
pub use gamemode::*;
pub use ids::*;
pub use mock::*;
pub use player::*;
pub use tier::*;
