//! # SchoolTime Core
//!
//! Domain types shared by the database and API crates: academic calendar records,
//! timetables and their slots, subjects, authentication claims, the error taxonomy
//! and request validation.

pub mod errors;
pub mod models;
pub mod validation;
