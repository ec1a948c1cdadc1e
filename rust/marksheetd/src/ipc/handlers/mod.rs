pub mod core;
pub mod details;
pub mod grades;
pub mod reports;
pub mod subjects;
