//! Loads and validates the JSON rule tables and bestiary the game runs on.

pub mod load;

pub use load::*;
