pub mod api;
pub mod artifact;
pub mod sync;
pub mod validation;
