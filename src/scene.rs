pub mod assemble;
pub mod config;
pub mod display;
pub mod layout;
pub mod stage;
