pub mod auth_provider;
pub mod content_type;
pub mod payment_status;
pub mod role;
pub mod subjects;
