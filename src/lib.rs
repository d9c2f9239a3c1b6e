pub mod ambience;
pub mod auth;
pub mod config;
pub mod deck;
pub mod event;
pub mod player;
pub mod session;
pub mod ui;
pub mod util;
