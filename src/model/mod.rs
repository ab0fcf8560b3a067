pub mod api;
pub mod source;
