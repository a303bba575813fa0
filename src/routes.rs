pub mod index;
pub mod students;
