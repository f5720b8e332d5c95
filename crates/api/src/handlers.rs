/// Class, staff and room handlers
pub mod roster;
/// Subject catalogue handlers
pub mod subject;
/// Timetable handlers
pub mod timetable;
