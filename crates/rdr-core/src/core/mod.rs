pub mod layout;
pub mod services;
pub mod visualization;
