//! Database migrations for gradebook tables

use sqlx::PgPool;

/// Run all gradebook migrations. Safe to call on every startup.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running gradebook migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id SERIAL PRIMARY KEY,
            firstname VARCHAR(255) NOT NULL,
            lastname VARCHAR(255) NOT NULL,
            email_address VARCHAR(255) NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS grades (
            id SERIAL PRIMARY KEY,
            student_id INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
            subject TEXT NOT NULL CHECK (subject IN ('math', 'science', 'history')),
            grade DOUBLE PRECISION NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_grades_student_subject ON grades(student_id, subject)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Gradebook migrations complete");
    Ok(())
}
