pub mod stats;
pub mod students;
pub mod users;
