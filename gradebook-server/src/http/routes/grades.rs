//! Grade endpoints
//!
//! Both mutations respond with the refreshed view of the owning student.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, post},
    Json, Router,
};
use serde::Deserialize;

use super::students::GradebookStudentResponse;
use crate::http::error::ApiError;
use crate::http::extractors::{ApiPath, ApiQuery};
use crate::http::server::AppState;
use crate::service::ServiceError;

/// Query parameters for POST /grades
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGradeParams {
    pub grade: f64,
    pub grade_type: String,
    pub student_id: i32,
}

async fn refreshed_view(
    state: &AppState,
    student_id: i32,
) -> Result<Json<GradebookStudentResponse>, ApiError> {
    match state.service.student_view(student_id).await {
        Ok(view) => Ok(Json(GradebookStudentResponse::from(view))),
        Err(ServiceError::NotFound { .. }) => Err(ApiError::NotFound),
        Err(e) => Err(e.into()),
    }
}

/// POST /grades?grade=&gradeType=&studentId= - record a grade
async fn create_grade(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<CreateGradeParams>,
) -> Result<Json<GradebookStudentResponse>, ApiError> {
    if !state.service.student_exists(params.student_id).await? {
        return Err(ApiError::NotFound);
    }

    let created = state
        .service
        .create_grade(params.grade, params.student_id, &params.grade_type)
        .await?;
    if !created {
        return Err(ApiError::NotFound);
    }

    refreshed_view(&state, params.student_id).await
}

/// DELETE /grades/{id}/{gradeType} - delete a grade
async fn delete_grade(
    State(state): State<Arc<AppState>>,
    ApiPath((id, grade_type)): ApiPath<(i32, String)>,
) -> Result<Json<GradebookStudentResponse>, ApiError> {
    let Some(student_id) = state.service.delete_grade(id, &grade_type).await? else {
        return Err(ApiError::NotFound);
    };

    refreshed_view(&state, student_id).await
}

/// Grade routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/grades", post(create_grade))
        .route("/grades/{id}/{grade_type}", delete(delete_grade))
}
