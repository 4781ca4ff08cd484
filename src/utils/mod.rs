pub mod date_key;
pub mod jwt;
pub mod parameter_error_handler;
pub mod validate;

pub use date_key::date_key_for;
pub use parameter_error_handler::{json_error_handler, query_error_handler};
