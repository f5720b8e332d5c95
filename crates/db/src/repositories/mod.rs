pub mod academic;
pub mod roster;
pub mod subject;
pub mod timetable;
pub mod timetable_slot;
