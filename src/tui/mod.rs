pub mod app;
pub mod events;
pub mod layout;
pub mod reveal;
pub mod theme;
pub mod views;
