//! # SPTS CLI
//!
//! Administrative account creation for SPTS.
//!
//! Staff accounts cannot be bootstrapped through the API (creating one needs
//! a management token), so the first principal or admin is created here.
//!
//! ```ignore
//! use spts_cli::{NewStaff, create_staff};
//!
//! let teacher_id = create_staff(&pool, &staff).await?;
//! ```

use sqlx::PgPool;

use spts_auth::Role;
use spts_core::hash_password;

/// Staff account to create.
#[derive(Debug, Clone)]
pub struct NewStaff {
    pub user_name: String,
    pub password: String,
    pub role: Role,
    pub last_name: String,
    pub other_names: String,
    pub email: String,
    pub emp_id: String,
}

/// Inserts the `teacher` and `teacher_login` rows in one transaction and
/// returns the new teacher id.
pub async fn create_staff(
    db: &PgPool,
    staff: &NewStaff,
) -> Result<i32, Box<dyn std::error::Error>> {
    if !staff.role.is_staff() {
        return Err(format!("'{}' is not a staff role", staff.role).into());
    }

    let hashed_password = hash_password(&staff.password)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let mut tx = db.begin().await?;

    let teacher_id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO teacher (last_name, other_names, email, role, user_name, emp_id)
         VALUES ($1, $2, $3, $4, $5, $6)
         ON CONFLICT DO NOTHING
         RETURNING teacher_id",
    )
    .bind(&staff.last_name)
    .bind(&staff.other_names)
    .bind(&staff.email)
    .bind(staff.role.as_str())
    .bind(&staff.user_name)
    .bind(&staff.emp_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(teacher_id) = teacher_id else {
        tx.rollback().await?;
        return Err("Staff member with this employee id or email already exists".into());
    };

    sqlx::query(
        "INSERT INTO teacher_login (teacher_id, emp_id, user_name, hashed_password, permission)
         VALUES ($1, $2, $3, $4, TRUE)",
    )
    .bind(teacher_id)
    .bind(&staff.emp_id)
    .bind(&staff.user_name)
    .bind(&hashed_password)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(teacher_id)
}
