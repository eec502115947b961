pub mod config;
pub mod logging;
pub mod render;
pub mod script;
pub mod session;
