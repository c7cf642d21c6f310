pub mod allotment;
pub mod batch;
pub mod comment;
pub mod content;
pub mod enrollment;
pub mod notification;
pub mod payment;
pub mod schedule;
pub mod teacher;
pub mod timetable;
pub mod user;
