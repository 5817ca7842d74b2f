pub mod students;
pub mod users;
