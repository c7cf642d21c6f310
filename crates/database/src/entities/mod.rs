pub mod batch;
pub mod batch_teacher;
pub mod comment;
pub mod content;
pub mod enrollment;
pub mod notification;
pub mod payment;
pub mod schedule;
pub mod teacher;
pub mod timetable_slot;
pub mod user;
pub mod user_auth_provider;

pub use batch as batches;
pub use batch_teacher as batch_teachers;
pub use comment as comments;
pub use content as contents;
pub use enrollment as enrollments;
pub use notification as notifications;
pub use payment as payments;
pub use schedule as schedules;
pub use teacher as teachers;
pub use timetable_slot as timetable_slots;
pub use user as users;
pub use user_auth_provider as user_auth_providers;
