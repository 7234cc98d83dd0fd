//! PostgreSQL credential store.
//!
//! Staff logins live in `teacher_login` (role from the joined `teacher`
//! row), student logins in `student_login`. The live session token is the
//! `jwt_token` column of the login row.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use spts_auth::{AccountRecord, CredentialStore, CredentialTx, Partition, Role, StoreError};

const FIND_STAFF: &str = r#"
    SELECT tl.teacher_id AS user_id,
           tl.user_name AS username,
           tl.hashed_password AS password_hash,
           t.role,
           tl.permission,
           tl.jwt_token AS current_token
    FROM teacher_login tl
    JOIN teacher t ON t.teacher_id = tl.teacher_id
    WHERE tl.user_name = $1
    FOR UPDATE OF tl
"#;

const FIND_STUDENT: &str = r#"
    SELECT student_id AS user_id,
           user_name AS username,
           hashed_password AS password_hash,
           'student' AS role,
           permission,
           jwt_token AS current_token
    FROM student_login
    WHERE user_name = $1
    FOR UPDATE
"#;

const STORE_STAFF_TOKEN: &str =
    "UPDATE teacher_login SET jwt_token = $1 WHERE teacher_id = $2 AND user_name = $3";
const STORE_STUDENT_TOKEN: &str =
    "UPDATE student_login SET jwt_token = $1 WHERE student_id = $2 AND user_name = $3";

const READ_STAFF_TOKEN: &str =
    "SELECT jwt_token FROM teacher_login WHERE teacher_id = $1 AND user_name = $2";
const READ_STUDENT_TOKEN: &str =
    "SELECT jwt_token FROM student_login WHERE student_id = $1 AND user_name = $2";

#[derive(FromRow)]
struct LoginRow {
    user_id: i32,
    username: String,
    password_hash: String,
    role: String,
    permission: bool,
    current_token: Option<String>,
}

impl TryFrom<LoginRow> for AccountRecord {
    type Error = StoreError;

    fn try_from(row: LoginRow) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.role).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        Ok(AccountRecord {
            user_id: row.user_id,
            username: row.username,
            password_hash: row.password_hash,
            role,
            permission: row.permission,
            current_token: row.current_token,
        })
    }
}

fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_) => {
            StoreError::Corrupt(err.to_string())
        }
        other => StoreError::Unavailable(other.to_string()),
    }
}

#[derive(Clone, Debug)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn begin(&self) -> Result<Box<dyn CredentialTx>, StoreError> {
        let tx = self.pool.begin().await.map_err(store_error)?;
        Ok(Box::new(PgCredentialTx { tx }))
    }

    async fn read_token(
        &self,
        partition: Partition,
        user_id: i32,
        username: &str,
    ) -> Result<Option<String>, StoreError> {
        let query = match partition {
            Partition::Staff => READ_STAFF_TOKEN,
            Partition::Student => READ_STUDENT_TOKEN,
        };

        let token: Option<Option<String>> = sqlx::query_scalar(query)
            .bind(user_id)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(token.flatten())
    }
}

/// One login attempt. Rows read through it stay locked until commit or drop;
/// dropping without commit rolls back.
struct PgCredentialTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl CredentialTx for PgCredentialTx {
    async fn find_account(
        &mut self,
        partition: Partition,
        username: &str,
    ) -> Result<Option<AccountRecord>, StoreError> {
        let query = match partition {
            Partition::Staff => FIND_STAFF,
            Partition::Student => FIND_STUDENT,
        };

        let row = sqlx::query_as::<_, LoginRow>(query)
            .bind(username)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(store_error)?;

        row.map(AccountRecord::try_from).transpose()
    }

    async fn store_token(
        &mut self,
        partition: Partition,
        user_id: i32,
        username: &str,
        token: &str,
    ) -> Result<(), StoreError> {
        let query = match partition {
            Partition::Staff => STORE_STAFF_TOKEN,
            Partition::Student => STORE_STUDENT_TOKEN,
        };

        let result = sqlx::query(query)
            .bind(token)
            .bind(user_id)
            .bind(username)
            .execute(&mut *self.tx)
            .await
            .map_err(store_error)?;

        if result.rows_affected() != 1 {
            return Err(StoreError::Corrupt(format!(
                "expected one {} login row for user {}, updated {}",
                partition,
                user_id,
                result.rows_affected()
            )));
        }

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await.map_err(store_error)
    }
}
