pub mod command_handlers;
pub mod dispatcher;
pub mod display;
pub mod input;
pub mod main_types;
