pub mod error;
pub mod logger;
pub mod naming;
pub mod validation;
