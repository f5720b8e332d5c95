/// Liveness and version probes
pub mod health;
/// Class, staff and room endpoints
pub mod roster;
/// Subject catalogue endpoints
pub mod subject;
/// Timetable and slot endpoints
pub mod timetable;
