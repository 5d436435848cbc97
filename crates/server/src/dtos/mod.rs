pub mod course;
pub mod department;
pub mod enrollment;
pub mod lecturer;
pub mod staff;
pub mod student;
