/// Classes, staff and rooms
pub mod roster;
/// Subject bookkeeping
pub mod subject;
/// Active academic year and term resolution
pub mod term;
/// Timetable reads and conflict-checked slot assignment
pub mod timetable;
