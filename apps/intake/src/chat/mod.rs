pub mod handlers;
pub mod script;
