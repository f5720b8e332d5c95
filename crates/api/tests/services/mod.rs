mod term_test;
mod timetable_service_test;
