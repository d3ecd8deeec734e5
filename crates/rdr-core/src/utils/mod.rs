pub mod error_helpers;
pub mod logging;
pub mod poll;
pub mod validation;
