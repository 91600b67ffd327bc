//! Student endpoints
//!
//! List, create and delete students, and the composite student view.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiPath};
use crate::http::server::AppState;
use crate::models::{Grade, GradebookStudent, NewStudent, Student};

/// Create student request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub firstname: String,
    pub lastname: String,
    pub email_address: String,
}

/// Student list entry
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email_address: String,
    pub full_name: String,
}

impl From<Student> for StudentResponse {
    fn from(s: Student) -> Self {
        Self {
            full_name: s.full_name(),
            id: s.id,
            firstname: s.firstname,
            lastname: s.lastname,
            email_address: s.email_address,
        }
    }
}

/// One grade inside a collection
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResponse {
    pub id: i32,
    pub student_id: i32,
    pub grade: f64,
}

impl From<Grade> for GradeResponse {
    fn from(g: Grade) -> Self {
        Self {
            id: g.id,
            student_id: g.student_id,
            grade: g.grade,
        }
    }
}

/// The three grade collections
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentGradesResponse {
    pub math_grade_results: Vec<GradeResponse>,
    pub science_grade_results: Vec<GradeResponse>,
    pub history_grade_results: Vec<GradeResponse>,
}

/// Composite student view. Averages are omitted for empty collections.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradebookStudentResponse {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email_address: String,
    pub full_name: String,
    pub student_grades: StudentGradesResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub math_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub science_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_average: Option<f64>,
}

fn grade_list(grades: Vec<Grade>) -> Vec<GradeResponse> {
    grades.into_iter().map(GradeResponse::from).collect()
}

impl From<GradebookStudent> for GradebookStudentResponse {
    fn from(v: GradebookStudent) -> Self {
        let full_name = v.full_name();
        Self {
            id: v.student.id,
            firstname: v.student.firstname,
            lastname: v.student.lastname,
            email_address: v.student.email_address,
            full_name,
            student_grades: StudentGradesResponse {
                math_grade_results: grade_list(v.grades.math),
                science_grade_results: grade_list(v.grades.science),
                history_grade_results: grade_list(v.grades.history),
            },
            math_average: v.math_average,
            science_average: v.science_average,
            history_average: v.history_average,
        }
    }
}

/// Fresh student list, rebuilt from storage
async fn gradebook(state: &AppState) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let students = state.service.list_students().await?;
    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

/// GET / - list all students
async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    gradebook(&state).await
}

/// POST / - create a student, respond with the updated list
async fn create_student(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateStudentRequest>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let student = NewStudent::new(&req.firstname, &req.lastname, &req.email_address)?;
    state.service.create_student(student).await?;
    gradebook(&state).await
}

/// GET /studentInformation/{id} - composite view for one student
async fn student_information(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<GradebookStudentResponse>, ApiError> {
    if !state.service.student_exists(id).await? {
        return Err(ApiError::NotFound);
    }

    let view = state.service.student_view(id).await?;
    Ok(Json(GradebookStudentResponse::from(view)))
}

/// DELETE /student/{id} - delete a student, respond with the updated list
async fn delete_student(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    if !state.service.student_exists(id).await? {
        return Err(ApiError::NotFound);
    }

    state.service.delete_student(id).await?;
    gradebook(&state).await
}

/// Student routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route("/studentInformation/{id}", get(student_information))
        .route("/student/{id}", delete(delete_student))
}
