pub mod env;
pub mod logger;
pub mod style;
