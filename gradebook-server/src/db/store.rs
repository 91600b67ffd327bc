//! Persistence seam used by the gradebook service
//!
//! The service only ever talks to storage through these finder/writer
//! operations, so the Postgres and in-memory backends are interchangeable.

use async_trait::async_trait;

use crate::models::{Grade, GradeValue, NewStudent, Student, Subject};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("conflict: {resource} {detail}")]
    Conflict {
        resource: &'static str,
        detail: String,
    },

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn student_not_found(id: i32) -> Self {
        Self::NotFound {
            resource: "student",
            id: id.to_string(),
        }
    }
}

/// Finder/writer operations over students and their grades.
///
/// Listings are returned in storage (insertion) order.
#[async_trait]
pub trait GradebookStore: Send + Sync {
    async fn list_students(&self) -> Result<Vec<Student>, DbError>;

    async fn find_student(&self, id: i32) -> Result<Option<Student>, DbError>;

    async fn student_exists(&self, id: i32) -> Result<bool, DbError>;

    /// Insert a student. A duplicate email is a `Conflict`.
    async fn insert_student(&self, student: &NewStudent) -> Result<Student, DbError>;

    /// Delete a student and every grade it owns, atomically.
    /// Returns `false` when no such student exists.
    async fn delete_student_cascade(&self, id: i32) -> Result<bool, DbError>;

    async fn grades_for_student(
        &self,
        student_id: i32,
        subject: Subject,
    ) -> Result<Vec<Grade>, DbError>;

    /// Insert a grade. An unknown owner is `NotFound`.
    async fn insert_grade(
        &self,
        student_id: i32,
        subject: Subject,
        value: GradeValue,
    ) -> Result<Grade, DbError>;

    /// Look up a grade within one subject's collection.
    async fn find_grade(&self, grade_id: i32, subject: Subject) -> Result<Option<Grade>, DbError>;

    /// Returns `false` when no grade with that id exists in the subject.
    async fn delete_grade(&self, grade_id: i32, subject: Subject) -> Result<bool, DbError>;
}
