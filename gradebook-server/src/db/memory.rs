//! In-process gradebook store
//!
//! Mirrors the Postgres schema: serial ids starting at 1, unique emails,
//! grades owned by an existing student and removed with it. Used by the
//! test suites and by `serve --in-memory`.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{DbError, GradebookStore};
use crate::models::{Grade, GradeValue, NewStudent, Student, Subject};

#[derive(Default)]
struct Tables {
    students: Vec<Student>,
    grades: Vec<Grade>,
    last_student_id: i32,
    last_grade_id: i32,
}

/// Gradebook store held entirely in memory
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GradebookStore for MemoryStore {
    async fn list_students(&self) -> Result<Vec<Student>, DbError> {
        Ok(self.tables.read().await.students.clone())
    }

    async fn find_student(&self, id: i32) -> Result<Option<Student>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.students.iter().find(|s| s.id == id).cloned())
    }

    async fn student_exists(&self, id: i32) -> Result<bool, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.students.iter().any(|s| s.id == id))
    }

    async fn insert_student(&self, student: &NewStudent) -> Result<Student, DbError> {
        let mut tables = self.tables.write().await;

        if tables
            .students
            .iter()
            .any(|s| s.email_address == student.email_address())
        {
            return Err(DbError::Conflict {
                resource: "student",
                detail: format!("email address '{}' already exists", student.email_address()),
            });
        }

        tables.last_student_id += 1;
        let created = Student {
            id: tables.last_student_id,
            firstname: student.firstname().to_owned(),
            lastname: student.lastname().to_owned(),
            email_address: student.email_address().to_owned(),
        };
        tables.students.push(created.clone());
        Ok(created)
    }

    async fn delete_student_cascade(&self, id: i32) -> Result<bool, DbError> {
        let mut tables = self.tables.write().await;

        let before = tables.students.len();
        tables.students.retain(|s| s.id != id);
        if tables.students.len() == before {
            return Ok(false);
        }

        tables.grades.retain(|g| g.student_id != id);
        Ok(true)
    }

    async fn grades_for_student(
        &self,
        student_id: i32,
        subject: Subject,
    ) -> Result<Vec<Grade>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .grades
            .iter()
            .filter(|g| g.student_id == student_id && g.subject == subject)
            .cloned()
            .collect())
    }

    async fn insert_grade(
        &self,
        student_id: i32,
        subject: Subject,
        value: GradeValue,
    ) -> Result<Grade, DbError> {
        let mut tables = self.tables.write().await;

        if !tables.students.iter().any(|s| s.id == student_id) {
            return Err(DbError::student_not_found(student_id));
        }

        tables.last_grade_id += 1;
        let grade = Grade {
            id: tables.last_grade_id,
            student_id,
            subject,
            grade: value.get(),
        };
        tables.grades.push(grade.clone());
        Ok(grade)
    }

    async fn find_grade(&self, grade_id: i32, subject: Subject) -> Result<Option<Grade>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .grades
            .iter()
            .find(|g| g.id == grade_id && g.subject == subject)
            .cloned())
    }

    async fn delete_grade(&self, grade_id: i32, subject: Subject) -> Result<bool, DbError> {
        let mut tables = self.tables.write().await;

        let before = tables.grades.len();
        tables
            .grades
            .retain(|g| !(g.id == grade_id && g.subject == subject));
        Ok(tables.grades.len() < before)
    }
}
