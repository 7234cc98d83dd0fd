use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use spts_core::AppError;

use crate::modules::subjects::model::{Subject, SubjectsByCategory, group_by_category};

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db))]
    pub async fn get_subjects(db: &PgPool) -> Result<SubjectsByCategory, AppError> {
        let subjects = sqlx::query_as::<_, Subject>(
            "SELECT subject_id, medium, subject_name, subject_category
             FROM subject
             ORDER BY subject_category, subject_name",
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch subjects")
        .map_err(AppError::database)?;

        Ok(group_by_category(subjects))
    }
}
