use anyhow::{Context, anyhow};
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{info, instrument};

use spts_core::AppError;

use crate::modules::attendance::model::{AttendanceRecord, ClassAttendance, CreateAttendanceDto};

pub struct AttendanceService;

impl AttendanceService {
    #[instrument(skip(db, dto), fields(student_id = dto.student_id, date = %dto.date))]
    pub async fn mark_attendance(
        db: &PgPool,
        marked_by: i32,
        dto: CreateAttendanceDto,
    ) -> Result<AttendanceRecord, AppError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            "INSERT INTO attendance (student_id, class_id, date, status, marked_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING attendance_id, student_id, class_id, date, status, marked_by",
        )
        .bind(dto.student_id)
        .bind(dto.class_id)
        .bind(dto.date)
        .bind(dto.status.as_str())
        .bind(marked_by)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict(anyhow!(
                        "Attendance already marked for this student on this date"
                    ));
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow!("Unknown student or class"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        info!(attendance_id = record.attendance_id, status = %dto.status, "Attendance marked");
        Ok(record)
    }

    #[instrument(skip(db))]
    pub async fn get_class_attendance(
        db: &PgPool,
        class_id: i32,
        date: NaiveDate,
    ) -> Result<Vec<ClassAttendance>, AppError> {
        let rows = sqlx::query_as::<_, ClassAttendance>(
            "SELECT a.attendance_id, a.student_id, s.index_number, s.last_name, s.other_names,
                    a.date, a.status
             FROM attendance a
             JOIN student s ON s.student_id = a.student_id
             WHERE a.class_id = $1 AND a.date = $2
             ORDER BY s.index_number",
        )
        .bind(class_id)
        .bind(date)
        .fetch_all(db)
        .await
        .context("Failed to fetch class attendance")
        .map_err(AppError::database)?;

        Ok(rows)
    }
}
