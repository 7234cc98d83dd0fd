use std::collections::BTreeSet;

use anyhow::{Context, anyhow};
use sqlx::PgPool;
use tracing::{info, instrument};

use spts_core::{AppError, hash_password};
use spts_models::subjects::MANDATORY_CATEGORY;

use crate::modules::students::model::{
    ClassStudent, CreateStudentDto, Student, StudentListItem, UpdateStudentDto,
};

const STUDENT_COLUMNS: &str = "s.student_id, s.last_name, s.other_names, s.address, s.email, \
     s.date_of_birth, s.parent_name, s.gender, s.contact_number, s.parent_nic, s.user_name, \
     s.index_number, s.class_id";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db))]
    pub async fn get_students(db: &PgPool) -> Result<Vec<StudentListItem>, AppError> {
        let query = format!(
            "SELECT {STUDENT_COLUMNS}, c.grade, c.class_name, sl.permission
             FROM student s
             JOIN student_login sl ON sl.student_id = s.student_id
             LEFT JOIN class c ON c.class_id = s.class_id
             ORDER BY s.index_number"
        );

        let students = sqlx::query_as::<_, StudentListItem>(&query)
            .fetch_all(db)
            .await
            .context("Failed to fetch students")
            .map_err(AppError::database)?;

        info!(count = students.len(), "Fetched students");
        Ok(students)
    }

    /// Creates the profile, login row, and subject enrolment together.
    #[instrument(skip(db, dto), fields(index_number = %dto.index_number))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<i32, AppError> {
        let hashed_password = hash_password(&dto.password)?;

        let mut tx = db
            .begin()
            .await
            .context("Failed to start transaction")
            .map_err(AppError::database)?;

        let existing = sqlx::query_scalar::<_, i32>(
            "SELECT student_id FROM student WHERE index_number = $1 OR email = $2",
        )
        .bind(&dto.index_number)
        .bind(&dto.email)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to check for existing student")
        .map_err(AppError::database)?;

        if existing.is_some() {
            return Err(AppError::bad_request(anyhow!(
                "Student with this index number or email already exists"
            )));
        }

        let student_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO student (last_name, other_names, address, email, date_of_birth,
                                  parent_name, gender, contact_number, parent_nic, user_name,
                                  index_number, class_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING student_id",
        )
        .bind(&dto.last_name)
        .bind(&dto.other_names)
        .bind(&dto.address)
        .bind(&dto.email)
        .bind(dto.date_of_birth)
        .bind(&dto.parent_name)
        .bind(&dto.gender)
        .bind(&dto.contact_number)
        .bind(&dto.parent_nic)
        .bind(&dto.user_name)
        .bind(&dto.index_number)
        .bind(dto.class_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(write_error)?;

        sqlx::query(
            "INSERT INTO student_login (student_id, index_number, user_name, hashed_password, permission)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(student_id)
        .bind(&dto.index_number)
        .bind(&dto.user_name)
        .bind(&hashed_password)
        .bind(dto.permission)
        .execute(&mut *tx)
        .await
        .map_err(write_error)?;

        let mandatory = sqlx::query_scalar::<_, i32>(
            "SELECT subject_id FROM subject WHERE subject_category = $1",
        )
        .bind(MANDATORY_CATEGORY)
        .fetch_all(&mut *tx)
        .await
        .context("Failed to fetch mandatory subjects")
        .map_err(AppError::database)?;

        let subjects: BTreeSet<i32> = dto.selected_subjects.iter().copied().chain(mandatory).collect();

        for subject_id in &subjects {
            sqlx::query(
                "INSERT INTO student_subject (student_id, subject_id, class_id)
                 VALUES ($1, $2, $3)
                 ON CONFLICT DO NOTHING",
            )
            .bind(student_id)
            .bind(subject_id)
            .bind(dto.class_id)
            .execute(&mut *tx)
            .await
            .map_err(write_error)?;
        }

        tx.commit()
            .await
            .context("Failed to commit student creation")
            .map_err(AppError::database)?;

        info!(student_id, subjects = subjects.len(), "Student created");
        Ok(student_id)
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, student_id: i32) -> Result<Student, AppError> {
        let query = format!("SELECT {STUDENT_COLUMNS} FROM student s WHERE s.student_id = $1");

        sqlx::query_as::<_, Student>(&query)
            .bind(student_id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch student")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))
    }

    /// Updates the provided fields. A new password ends the current session.
    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        student_id: i32,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let hashed_password = dto.password.as_deref().map(hash_password).transpose()?;

        let mut tx = db
            .begin()
            .await
            .context("Failed to start transaction")
            .map_err(AppError::database)?;

        let query = format!(
            "UPDATE student s SET
                last_name = COALESCE($1, s.last_name),
                other_names = COALESCE($2, s.other_names),
                address = COALESCE($3, s.address),
                email = COALESCE($4, s.email),
                date_of_birth = COALESCE($5, s.date_of_birth),
                parent_name = COALESCE($6, s.parent_name),
                gender = COALESCE($7, s.gender),
                contact_number = COALESCE($8, s.contact_number),
                parent_nic = COALESCE($9, s.parent_nic),
                user_name = COALESCE($10, s.user_name),
                index_number = COALESCE($11, s.index_number),
                class_id = COALESCE($12, s.class_id)
             WHERE s.student_id = $13
             RETURNING {STUDENT_COLUMNS}"
        );

        let student = sqlx::query_as::<_, Student>(&query)
            .bind(&dto.last_name)
            .bind(&dto.other_names)
            .bind(&dto.address)
            .bind(&dto.email)
            .bind(dto.date_of_birth)
            .bind(&dto.parent_name)
            .bind(&dto.gender)
            .bind(&dto.contact_number)
            .bind(&dto.parent_nic)
            .bind(&dto.user_name)
            .bind(&dto.index_number)
            .bind(dto.class_id)
            .bind(student_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(write_error)?
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))?;

        sqlx::query(
            "UPDATE student_login SET
                user_name = COALESCE($1, user_name),
                index_number = COALESCE($2, index_number),
                hashed_password = COALESCE($3, hashed_password),
                jwt_token = CASE WHEN $3::TEXT IS NULL THEN jwt_token ELSE NULL END
             WHERE student_id = $4",
        )
        .bind(&dto.user_name)
        .bind(&dto.index_number)
        .bind(&hashed_password)
        .bind(student_id)
        .execute(&mut *tx)
        .await
        .map_err(write_error)?;

        tx.commit()
            .await
            .context("Failed to commit student update")
            .map_err(AppError::database)?;

        info!(
            student_id,
            password_changed = hashed_password.is_some(),
            "Student updated"
        );
        Ok(student)
    }

    /// Turning permission off also ends the current session.
    #[instrument(skip(db))]
    pub async fn set_permission(
        db: &PgPool,
        index_number: &str,
        permission: bool,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE student_login SET
                permission = $1,
                jwt_token = CASE WHEN $1 THEN jwt_token ELSE NULL END
             WHERE index_number = $2",
        )
        .bind(permission)
        .bind(index_number)
        .execute(db)
        .await
        .context("Failed to update student permission")
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Student not found")));
        }

        info!(index_number, permission, "Student permission updated");
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn get_students_by_class(
        db: &PgPool,
        class_id: i32,
    ) -> Result<Vec<ClassStudent>, AppError> {
        let students = sqlx::query_as::<_, ClassStudent>(
            "SELECT s.student_id, s.index_number, s.last_name, s.other_names, c.grade, c.class_name
             FROM student s
             JOIN class c ON c.class_id = s.class_id
             WHERE s.class_id = $1
             ORDER BY s.index_number",
        )
        .bind(class_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch class roster")
        .map_err(AppError::database)?;

        Ok(students)
    }
}

/// Maps constraint violations on student writes to client errors.
fn write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::bad_request(anyhow!(
                "Student with this index number, email or user name already exists"
            ));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::bad_request(anyhow!("Unknown class or subject"));
        }
    }
    AppError::database(anyhow::Error::from(e))
}
