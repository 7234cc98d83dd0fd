use anyhow::{Context, anyhow};
use sqlx::{FromRow, PgPool};
use tracing::{info, instrument};

use spts_core::AppError;

use crate::modules::marks::model::{CreateMarksDto, MarkEntry, Marks, Student, StudentReport};

#[derive(FromRow)]
struct StudentWithClass {
    #[sqlx(flatten)]
    student: Student,
    grade: Option<String>,
    class_name: Option<String>,
}

pub struct MarksService;

impl MarksService {
    /// Records a mark on behalf of `teacher_id`.
    #[instrument(skip(db, dto), fields(student_id = dto.student_id, subject_id = dto.subject_id))]
    pub async fn create_marks(
        db: &PgPool,
        teacher_id: i32,
        dto: CreateMarksDto,
    ) -> Result<Marks, AppError> {
        let marks = sqlx::query_as::<_, Marks>(
            "INSERT INTO marks (student_id, subject_id, teacher_id, marks, term_year)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING marks_id, student_id, subject_id, teacher_id, marks, term_year",
        )
        .bind(dto.student_id)
        .bind(dto.subject_id)
        .bind(teacher_id)
        .bind(dto.marks)
        .bind(&dto.term_year)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict(anyhow!(
                        "Marks for this student, subject and term already exist"
                    ));
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow!("Unknown student, subject or teacher"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        info!(marks_id = marks.marks_id, teacher_id, "Marks recorded");
        Ok(marks)
    }

    /// Profile, class, and every mark of a student ordered by term then subject.
    #[instrument(skip(db))]
    pub async fn get_student_report(
        db: &PgPool,
        student_id: i32,
    ) -> Result<StudentReport, AppError> {
        let row = sqlx::query_as::<_, StudentWithClass>(
            "SELECT s.student_id, s.last_name, s.other_names, s.address, s.email,
                    s.date_of_birth, s.parent_name, s.gender, s.contact_number, s.parent_nic,
                    s.user_name, s.index_number, s.class_id, c.grade, c.class_name
             FROM student s
             LEFT JOIN class c ON c.class_id = s.class_id
             WHERE s.student_id = $1",
        )
        .bind(student_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch student")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))?;

        let marks = sqlx::query_as::<_, MarkEntry>(
            "SELECT marks_id, subject_id, teacher_id, term_year, marks
             FROM marks
             WHERE student_id = $1
             ORDER BY term_year, subject_id",
        )
        .bind(student_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch marks")
        .map_err(AppError::database)?;

        if marks.is_empty() {
            return Err(AppError::not_found(anyhow!(
                "No marks found for this student"
            )));
        }

        Ok(StudentReport {
            student: row.student,
            grade: row.grade,
            class_name: row.class_name,
            marks,
        })
    }
}
