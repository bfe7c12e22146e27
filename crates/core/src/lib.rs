//! Core game rules. Keep this crate free of IO and platform concerns.

pub mod battle;
pub mod config;
pub mod content;
pub mod events;
pub mod gems;
pub mod rng;
pub mod run;
pub mod satchel;
pub mod shop;
pub mod state;

pub use battle::*;
pub use config::*;
pub use content::*;
pub use events::*;
pub use gems::*;
pub use rng::*;
pub use run::*;
pub use satchel::*;
pub use shop::*;
pub use state::*;
