//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod subject;
pub mod student;
pub mod grade;
pub mod gradebook;

pub use validation::ValidationError;
pub use subject::Subject;
pub use student::{NewStudent, Student};
pub use grade::{Grade, GradeValue};
pub use gradebook::{average, GradebookStudent, StudentGrades};
