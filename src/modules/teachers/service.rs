use anyhow::{Context, anyhow};
use sqlx::PgPool;
use tracing::{info, instrument};

use spts_core::{AppError, hash_password};

use crate::modules::teachers::model::{
    CreateTeacherDto, Teacher, TeacherListItem, UpdateTeacherDto,
};

const TEACHER_COLUMNS: &str = "t.teacher_id, t.last_name, t.other_names, t.address, t.email, \
     t.date_of_birth, t.personal_title, t.role, t.contact_number, t.user_name, t.nic_number, \
     t.emp_id";

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(db))]
    pub async fn get_teachers(db: &PgPool) -> Result<Vec<TeacherListItem>, AppError> {
        let query = format!(
            "SELECT {TEACHER_COLUMNS}, tl.permission
             FROM teacher t
             JOIN teacher_login tl ON tl.teacher_id = t.teacher_id
             ORDER BY t.emp_id"
        );

        let teachers = sqlx::query_as::<_, TeacherListItem>(&query)
            .fetch_all(db)
            .await
            .context("Failed to fetch teachers")
            .map_err(AppError::database)?;

        info!(count = teachers.len(), "Fetched teachers");
        Ok(teachers)
    }

    /// Creates the staff profile and its login row together.
    #[instrument(skip(db, dto), fields(emp_id = %dto.emp_id, role = %dto.role))]
    pub async fn create_teacher(db: &PgPool, dto: CreateTeacherDto) -> Result<i32, AppError> {
        let hashed_password = hash_password(&dto.password)?;

        let mut tx = db
            .begin()
            .await
            .context("Failed to start transaction")
            .map_err(AppError::database)?;

        let existing = sqlx::query_scalar::<_, i32>(
            "SELECT teacher_id FROM teacher WHERE emp_id = $1 OR email = $2",
        )
        .bind(&dto.emp_id)
        .bind(&dto.email)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to check for existing teacher")
        .map_err(AppError::database)?;

        if existing.is_some() {
            return Err(AppError::bad_request(anyhow!(
                "Teacher with this employee id or email already exists"
            )));
        }

        let teacher_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO teacher (last_name, other_names, address, email, date_of_birth,
                                  personal_title, role, contact_number, user_name, nic_number,
                                  emp_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING teacher_id",
        )
        .bind(&dto.last_name)
        .bind(&dto.other_names)
        .bind(&dto.address)
        .bind(&dto.email)
        .bind(dto.date_of_birth)
        .bind(&dto.personal_title)
        .bind(dto.role.as_str())
        .bind(&dto.contact_number)
        .bind(&dto.user_name)
        .bind(&dto.nic_number)
        .bind(&dto.emp_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(write_error)?;

        sqlx::query(
            "INSERT INTO teacher_login (teacher_id, emp_id, user_name, hashed_password, permission)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(teacher_id)
        .bind(&dto.emp_id)
        .bind(&dto.user_name)
        .bind(&hashed_password)
        .bind(dto.permission)
        .execute(&mut *tx)
        .await
        .map_err(write_error)?;

        tx.commit()
            .await
            .context("Failed to commit teacher creation")
            .map_err(AppError::database)?;

        info!(teacher_id, "Teacher created");
        Ok(teacher_id)
    }

    #[instrument(skip(db))]
    pub async fn get_teacher(db: &PgPool, teacher_id: i32) -> Result<Teacher, AppError> {
        let query = format!("SELECT {TEACHER_COLUMNS} FROM teacher t WHERE t.teacher_id = $1");

        sqlx::query_as::<_, Teacher>(&query)
            .bind(teacher_id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch teacher")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Teacher not found")))
    }

    /// Updates the provided fields. A new password or role ends the current
    /// session.
    #[instrument(skip(db, dto))]
    pub async fn update_teacher(
        db: &PgPool,
        teacher_id: i32,
        dto: UpdateTeacherDto,
    ) -> Result<Teacher, AppError> {
        let hashed_password = dto.password.as_deref().map(hash_password).transpose()?;
        let role = dto.role.map(|role| role.as_str());
        let ends_session = hashed_password.is_some() || role.is_some();

        let mut tx = db
            .begin()
            .await
            .context("Failed to start transaction")
            .map_err(AppError::database)?;

        let query = format!(
            "UPDATE teacher t SET
                last_name = COALESCE($1, t.last_name),
                other_names = COALESCE($2, t.other_names),
                address = COALESCE($3, t.address),
                email = COALESCE($4, t.email),
                date_of_birth = COALESCE($5, t.date_of_birth),
                personal_title = COALESCE($6, t.personal_title),
                role = COALESCE($7, t.role),
                contact_number = COALESCE($8, t.contact_number),
                user_name = COALESCE($9, t.user_name),
                nic_number = COALESCE($10, t.nic_number)
             WHERE t.teacher_id = $11
             RETURNING {TEACHER_COLUMNS}"
        );

        let teacher = sqlx::query_as::<_, Teacher>(&query)
            .bind(&dto.last_name)
            .bind(&dto.other_names)
            .bind(&dto.address)
            .bind(&dto.email)
            .bind(dto.date_of_birth)
            .bind(&dto.personal_title)
            .bind(role)
            .bind(&dto.contact_number)
            .bind(&dto.user_name)
            .bind(&dto.nic_number)
            .bind(teacher_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(write_error)?
            .ok_or_else(|| AppError::not_found(anyhow!("Teacher not found")))?;

        sqlx::query(
            "UPDATE teacher_login SET
                user_name = COALESCE($1, user_name),
                hashed_password = COALESCE($2, hashed_password),
                jwt_token = CASE WHEN $3 THEN NULL ELSE jwt_token END
             WHERE teacher_id = $4",
        )
        .bind(&dto.user_name)
        .bind(&hashed_password)
        .bind(ends_session)
        .bind(teacher_id)
        .execute(&mut *tx)
        .await
        .map_err(write_error)?;

        tx.commit()
            .await
            .context("Failed to commit teacher update")
            .map_err(AppError::database)?;

        info!(teacher_id, ends_session, "Teacher updated");
        Ok(teacher)
    }

    /// Turning permission off also ends the current session.
    #[instrument(skip(db))]
    pub async fn set_permission(
        db: &PgPool,
        emp_id: &str,
        permission: bool,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE teacher_login SET
                permission = $1,
                jwt_token = CASE WHEN $1 THEN jwt_token ELSE NULL END
             WHERE emp_id = $2",
        )
        .bind(permission)
        .bind(emp_id)
        .execute(db)
        .await
        .context("Failed to update teacher permission")
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Teacher not found")));
        }

        info!(emp_id, permission, "Teacher permission updated");
        Ok(())
    }
}

fn write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::bad_request(anyhow!(
                "Teacher with this employee id, email or user name already exists"
            ));
        }
        if db_err.is_check_violation() {
            return AppError::bad_request(anyhow!("Invalid staff role"));
        }
    }
    AppError::database(anyhow::Error::from(e))
}
