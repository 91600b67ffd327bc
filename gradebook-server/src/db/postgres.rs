//! Postgres-backed gradebook store
//!
//! - insert student: relies on the UNIQUE email constraint (no pre-check)
//! - insert grade: relies on the students FK (no pre-check)
//! - delete student: grades and student removed in one transaction

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::store::{DbError, GradebookStore};
use crate::models::{Grade, GradeValue, NewStudent, Student, Subject};

/// Gradebook store over a shared connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn grade_from_row(row: &PgRow, subject: Subject) -> Grade {
    Grade {
        id: row.get("id"),
        student_id: row.get("student_id"),
        subject,
        grade: row.get("grade"),
    }
}

#[async_trait]
impl GradebookStore for PgStore {
    async fn list_students(&self) -> Result<Vec<Student>, DbError> {
        let students: Vec<Student> = sqlx::query_as(
            r#"
            SELECT id, firstname, lastname, email_address
            FROM students
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    async fn find_student(&self, id: i32) -> Result<Option<Student>, DbError> {
        let student: Option<Student> = sqlx::query_as(
            r#"
            SELECT id, firstname, lastname, email_address
            FROM students
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    async fn student_exists(&self, id: i32) -> Result<bool, DbError> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists.0)
    }

    async fn insert_student(&self, student: &NewStudent) -> Result<Student, DbError> {
        let result: Result<Student, sqlx::Error> = sqlx::query_as(
            r#"
            INSERT INTO students (firstname, lastname, email_address)
            VALUES ($1, $2, $3)
            RETURNING id, firstname, lastname, email_address
            "#,
        )
        .bind(student.firstname())
        .bind(student.lastname())
        .bind(student.email_address())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(created) => Ok(created),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(DbError::Conflict {
                resource: "student",
                detail: format!("email address '{}' already exists", student.email_address()),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_student_cascade(&self, id: i32) -> Result<bool, DbError> {
        let mut tx = self.pool.begin().await?;

        // Grades first, then the owning student
        let grades = sqlx::query("DELETE FROM grades WHERE student_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let students = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            student_id = id,
            grades_deleted = grades.rows_affected(),
            "deleted student"
        );
        Ok(students.rows_affected() > 0)
    }

    async fn grades_for_student(
        &self,
        student_id: i32,
        subject: Subject,
    ) -> Result<Vec<Grade>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, student_id, grade
            FROM grades
            WHERE student_id = $1 AND subject = $2
            ORDER BY id
            "#,
        )
        .bind(student_id)
        .bind(subject.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(|r| grade_from_row(r, subject)).collect())
    }

    async fn insert_grade(
        &self,
        student_id: i32,
        subject: Subject,
        value: GradeValue,
    ) -> Result<Grade, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO grades (student_id, subject, grade)
            VALUES ($1, $2, $3)
            RETURNING id, student_id, grade
            "#,
        )
        .bind(student_id)
        .bind(subject.as_str())
        .bind(value.get())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(grade_from_row(&row, subject)),
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                Err(DbError::student_not_found(student_id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_grade(&self, grade_id: i32, subject: Subject) -> Result<Option<Grade>, DbError> {
        let row = sqlx::query(
            r#"
            SELECT id, student_id, grade
            FROM grades
            WHERE id = $1 AND subject = $2
            "#,
        )
        .bind(grade_id)
        .bind(subject.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| grade_from_row(&r, subject)))
    }

    async fn delete_grade(&self, grade_id: i32, subject: Subject) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM grades WHERE id = $1 AND subject = $2")
            .bind(grade_id)
            .bind(subject.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p gradebook-server -- --ignored

    async fn store() -> PgStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        PgStore::new(pool)
    }

    fn unique_email(tag: &str) -> String {
        format!("{}-{}@example.com", tag, chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_email_is_conflict() {
        let store = store().await;
        let email = unique_email("dup");
        let student = NewStudent::new("Oumnia", "tafer", &email).unwrap();

        let created = store.insert_student(&student).await.unwrap();
        let err = store.insert_student(&student).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { .. }));

        store.delete_student_cascade(created.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_student_removes_all_grades() {
        let store = store().await;
        let student = NewStudent::new("Mouloud", "Dernoun", &unique_email("cascade")).unwrap();
        let created = store.insert_student(&student).await.unwrap();

        for subject in Subject::all() {
            store
                .insert_grade(created.id, *subject, GradeValue::new(80.0).unwrap())
                .await
                .unwrap();
        }

        assert!(store.delete_student_cascade(created.id).await.unwrap());
        for subject in Subject::all() {
            let grades = store.grades_for_student(created.id, *subject).await.unwrap();
            assert!(grades.is_empty());
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn grade_for_unknown_student_is_not_found() {
        let store = store().await;
        let err = store
            .insert_grade(i32::MAX, Subject::Math, GradeValue::new(50.0).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "student", .. }));
    }
}
