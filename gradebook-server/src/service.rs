//! Gradebook service
//!
//! Mediates between the HTTP boundary and storage. Every read rebuilds
//! its result from storage; nothing is cached between calls.
//!
//! Absence is reported two ways, matching how callers use it:
//! - `student_view` fails with `ServiceError::NotFound`
//! - `create_grade` / `delete_grade` report it in their return value
//!   (`false` / `None`) and leave storage untouched

use std::sync::Arc;

use crate::db::{DbError, GradebookStore};
use crate::models::{
    GradeValue, GradebookStudent, NewStudent, Student, StudentGrades, Subject, ValidationError,
};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Closed set of failures the service can report
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Student or grade does not resolve
    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Input rejected by validation or by a storage constraint
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Unexpected storage failure
    #[error("internal error: {0}")]
    Internal(#[source] DbError),
}

impl From<DbError> for ServiceError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Conflict { .. } => Self::BadRequest(e.to_string()),
            DbError::Sqlx(_) => Self::Internal(e),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(e: ValidationError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

/// Student and grade operations over a `GradebookStore`
#[derive(Clone)]
pub struct GradebookService {
    store: Arc<dyn GradebookStore>,
}

impl GradebookService {
    pub fn new(store: Arc<dyn GradebookStore>) -> Self {
        Self { store }
    }

    /// All current students, without grades, in storage order.
    pub async fn list_students(&self) -> ServiceResult<Vec<Student>> {
        Ok(self.store.list_students().await?)
    }

    pub async fn student_exists(&self, id: i32) -> ServiceResult<bool> {
        Ok(self.store.student_exists(id).await?)
    }

    /// Assemble the composite view for one student.
    pub async fn student_view(&self, id: i32) -> ServiceResult<GradebookStudent> {
        let student = self
            .store
            .find_student(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound {
                resource: "student",
                id: id.to_string(),
            })?;

        let mut grades = StudentGrades::default();
        for subject in Subject::all() {
            *grades.for_subject_mut(*subject) = self.store.grades_for_student(id, *subject).await?;
        }

        Ok(GradebookStudent::assemble(student, grades))
    }

    pub async fn create_student(&self, student: NewStudent) -> ServiceResult<()> {
        let created = self.store.insert_student(&student).await?;
        tracing::info!(student_id = created.id, "created student");
        Ok(())
    }

    /// Delete a student with all of its grades. Unknown ids are a no-op.
    pub async fn delete_student(&self, id: i32) -> ServiceResult<()> {
        if self.store.delete_student_cascade(id).await? {
            tracing::info!(student_id = id, "deleted student");
        } else {
            tracing::debug!(student_id = id, "delete skipped, no such student");
        }
        Ok(())
    }

    /// Record a grade. Returns `false` when the subject tag is not
    /// recognised or the student does not exist.
    ///
    /// # Errors
    ///
    /// `BadRequest` for a non-finite value, `Internal` for storage faults.
    pub async fn create_grade(
        &self,
        value: f64,
        student_id: i32,
        subject_tag: &str,
    ) -> ServiceResult<bool> {
        let Some(subject) = Subject::from_tag(subject_tag) else {
            tracing::debug!(subject_tag, "unknown grade type");
            return Ok(false);
        };
        let value = GradeValue::new(value)?;

        if !self.store.student_exists(student_id).await? {
            return Ok(false);
        }

        match self.store.insert_grade(student_id, subject, value).await {
            Ok(grade) => {
                tracing::info!(grade_id = grade.id, student_id, %subject, "created grade");
                Ok(true)
            }
            // Student removed between the check and the insert
            Err(DbError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a grade from one subject's collection and return the id of
    /// the student that owned it, or `None` if nothing matched.
    pub async fn delete_grade(&self, grade_id: i32, subject_tag: &str) -> ServiceResult<Option<i32>> {
        let Some(subject) = Subject::from_tag(subject_tag) else {
            tracing::debug!(subject_tag, "unknown grade type");
            return Ok(None);
        };

        let Some(grade) = self.store.find_grade(grade_id, subject).await? else {
            return Ok(None);
        };

        if !self.store.delete_grade(grade_id, subject).await? {
            return Ok(None);
        }

        tracing::info!(grade_id, student_id = grade.student_id, %subject, "deleted grade");
        Ok(Some(grade.student_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    async fn seeded() -> (GradebookService, MemoryStore) {
        let store = MemoryStore::new();
        let service = GradebookService::new(Arc::new(store.clone()));

        service
            .create_student(NewStudent::new("Mouloud", "Dernoun", "mouloud.dernoun@gmail.com").unwrap())
            .await
            .unwrap();
        assert!(service.create_grade(85.0, 1, "math").await.unwrap());
        assert!(service.create_grade(90.0, 1, "science").await.unwrap());
        assert!(service.create_grade(70.0, 1, "history").await.unwrap());

        (service, store)
    }

    #[tokio::test]
    async fn student_view_aggregates_grades() {
        let (service, _) = seeded().await;

        let view = service.student_view(1).await.unwrap();
        assert_eq!(view.full_name(), "Mouloud Dernoun");
        assert_eq!(view.math_average, Some(85.0));
        assert_eq!(view.science_average, Some(90.0));
        assert_eq!(view.history_average, Some(70.0));
    }

    #[tokio::test]
    async fn averages_follow_current_rows() {
        let (service, _) = seeded().await;

        assert!(service.create_grade(95.0, 1, "math").await.unwrap());
        assert_eq!(service.student_view(1).await.unwrap().math_average, Some(90.0));

        let grade_id = service.student_view(1).await.unwrap().grades.math[0].id;
        assert_eq!(service.delete_grade(grade_id, "math").await.unwrap(), Some(1));
        assert_eq!(service.student_view(1).await.unwrap().math_average, Some(95.0));
    }

    #[tokio::test]
    async fn unknown_student_view_is_not_found() {
        let (service, _) = seeded().await;

        for id in [0, 2, -1, i32::MAX] {
            let err = service.student_view(id).await.unwrap_err();
            assert!(matches!(err, ServiceError::NotFound { .. }), "id {id}");
        }
    }

    #[tokio::test]
    async fn empty_subject_has_no_average() {
        let service = GradebookService::new(Arc::new(MemoryStore::new()));
        service
            .create_student(NewStudent::new("Oumnia", "tafer", "taferoumnia@gmail.com").unwrap())
            .await
            .unwrap();
        assert!(service.create_grade(60.0, 1, "science").await.unwrap());

        let view = service.student_view(1).await.unwrap();
        assert_eq!(view.math_average, None);
        assert_eq!(view.science_average, Some(60.0));
        assert_eq!(view.history_average, None);
    }

    #[tokio::test]
    async fn unknown_grade_type_leaves_storage_unchanged() {
        let (service, store) = seeded().await;
        let before = service.student_view(1).await.unwrap();

        assert!(!service.create_grade(100.0, 1, "literature").await.unwrap());

        assert_eq!(service.student_view(1).await.unwrap(), before);
        for subject in Subject::all() {
            assert_eq!(store.grades_for_student(1, *subject).await.unwrap().len(), 1);
        }
    }

    #[tokio::test]
    async fn grade_for_unknown_student_is_rejected() {
        let (service, store) = seeded().await;

        assert!(!service.create_grade(100.0, 42, "math").await.unwrap());
        assert!(store.grades_for_student(42, Subject::Math).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_finite_grade_is_bad_request() {
        let (service, _) = seeded().await;

        let err = service.create_grade(f64::NAN, 1, "math").await.unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
    }

    #[tokio::test]
    async fn delete_missing_grade_returns_none() {
        let (service, _) = seeded().await;
        let before = service.student_view(1).await.unwrap();

        assert_eq!(service.delete_grade(999, "math").await.unwrap(), None);
        assert_eq!(service.delete_grade(0, "math").await.unwrap(), None);
        assert_eq!(service.delete_grade(1, "art").await.unwrap(), None);

        assert_eq!(service.student_view(1).await.unwrap(), before);
    }

    #[tokio::test]
    async fn delete_grade_requires_matching_subject() {
        let (service, _) = seeded().await;
        let math_id = service.student_view(1).await.unwrap().grades.math[0].id;

        assert_eq!(service.delete_grade(math_id, "history").await.unwrap(), None);
        assert_eq!(service.delete_grade(math_id, "math").await.unwrap(), Some(1));
        assert_eq!(service.delete_grade(math_id, "math").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_student_cascades() {
        let (service, store) = seeded().await;

        service.delete_student(1).await.unwrap();

        assert!(!service.student_exists(1).await.unwrap());
        assert!(service.list_students().await.unwrap().is_empty());
        for subject in Subject::all() {
            assert!(store.grades_for_student(1, *subject).await.unwrap().is_empty());
        }
        assert!(matches!(
            service.student_view(1).await.unwrap_err(),
            ServiceError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn delete_unknown_student_is_noop() {
        let (service, _) = seeded().await;

        service.delete_student(0).await.unwrap();
        assert_eq!(service.list_students().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_student_appends_to_list() {
        let (service, _) = seeded().await;

        service
            .create_student(NewStudent::new("Oumnia", "tafer", "taferoumnia@gmail.com").unwrap())
            .await
            .unwrap();

        let students = service.list_students().await.unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(
            students
                .iter()
                .filter(|s| s.email_address == "taferoumnia@gmail.com")
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn duplicate_email_is_bad_request() {
        let (service, _) = seeded().await;

        let err = service
            .create_student(NewStudent::new("Other", "Person", "mouloud.dernoun@gmail.com").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
    }
}
