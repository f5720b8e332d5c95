pub mod local;
pub mod repositories;
