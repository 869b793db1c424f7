pub mod error;
pub mod logger;
pub mod rate_limit;
pub mod validation;
pub mod word_number;
