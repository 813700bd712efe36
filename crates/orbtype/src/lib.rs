pub mod config;
pub mod events;
pub mod layout;
pub mod render;
pub mod showcase;
pub mod specimen;
pub mod sys;
pub mod theme;
