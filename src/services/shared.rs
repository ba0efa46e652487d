pub mod constants;
pub mod env;
pub mod format;
pub mod logger;
