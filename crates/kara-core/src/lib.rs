pub mod config;
pub mod error;
pub mod index;
pub mod platform;
pub mod player;
pub mod playlog;
pub mod search;
