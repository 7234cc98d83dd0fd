mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{apply_schema, insert_staff, insert_student, json_request, login, pg_app, send, test_issuer};
use serde_json::json;
use spts::spts_auth::{AuthError, AuthService, CredentialStore, Partition, Role};
use spts::spts_db::PgCredentialStore;
use sqlx::PgPool;

fn service(pool: &PgPool) -> AuthService {
    AuthService::new(Arc::new(PgCredentialStore::new(pool.clone())), test_issuer())
}

async fn stored_staff_token(pool: &PgPool, user_name: &str) -> Option<String> {
    sqlx::query_scalar("SELECT jwt_token FROM teacher_login WHERE user_name = $1")
        .bind(user_name)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = false)]
async fn test_login_writes_token_to_login_row(pool: PgPool) {
    apply_schema(&pool).await;
    let teacher_id = insert_staff(&pool, "kamala", "password123", "teacher", true).await;
    let auth = service(&pool);

    let outcome = auth.login("kamala", "password123").await.unwrap();

    assert_eq!(outcome.account.user_id, teacher_id);
    assert_eq!(outcome.account.role, Role::Teacher);
    assert_eq!(stored_staff_token(&pool, "kamala").await, Some(outcome.token));
}

#[sqlx::test(migrations = false)]
async fn test_staff_role_comes_from_teacher_table(pool: PgPool) {
    apply_schema(&pool).await;
    insert_staff(&pool, "principal", "password123", "principal", true).await;
    let auth = service(&pool);

    let outcome = auth.login("principal", "password123").await.unwrap();
    let claims = auth
        .verify(Some(&format!("Bearer {}", outcome.token)))
        .await
        .unwrap();
    assert_eq!(claims.role, Role::Principal);
}

#[sqlx::test(migrations = false)]
async fn test_student_login_and_verify(pool: PgPool) {
    apply_schema(&pool).await;
    let student_id = insert_student(&pool, "nimal", "password123", "IDX-001", None, true).await;
    let auth = service(&pool);

    let outcome = auth.login("nimal", "password123").await.unwrap();
    assert_eq!(outcome.account.role, Role::Student);

    let claims = auth.verify(Some(&outcome.token)).await.unwrap();
    assert_eq!(claims.user_id, student_id);
}

#[sqlx::test(migrations = false)]
async fn test_staff_partition_searched_first(pool: PgPool) {
    apply_schema(&pool).await;
    insert_staff(&pool, "shared", "staff-pass", "admin", true).await;
    insert_student(&pool, "shared", "student-pass", "IDX-002", None, true).await;
    let auth = service(&pool);

    let err = auth.login("shared", "student-pass").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));

    let outcome = auth.login("shared", "staff-pass").await.unwrap();
    assert_eq!(outcome.account.role, Role::Admin);
}

#[sqlx::test(migrations = false)]
async fn test_relogin_revokes_previous_token(pool: PgPool) {
    apply_schema(&pool).await;
    insert_staff(&pool, "kamala", "password123", "teacher", true).await;
    let auth = service(&pool);

    let first = auth.login("kamala", "password123").await.unwrap().token;
    let second = auth.login("kamala", "password123").await.unwrap().token;

    assert!(matches!(
        auth.verify(Some(&first)).await.unwrap_err(),
        AuthError::TokenInvalid
    ));
    assert!(auth.verify(Some(&second)).await.is_ok());
}

#[sqlx::test(migrations = false)]
async fn test_concurrent_logins_serialize_on_row_lock(pool: PgPool) {
    apply_schema(&pool).await;
    insert_staff(&pool, "kamala", "password123", "teacher", true).await;
    let auth = service(&pool);

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let auth = auth.clone();
            tokio::spawn(async move { auth.login("kamala", "password123").await })
        })
        .collect();

    let mut tokens = Vec::new();
    for handle in handles {
        tokens.push(handle.await.unwrap().unwrap().token);
    }

    let mut valid = 0;
    for token in &tokens {
        if auth.verify(Some(token)).await.is_ok() {
            valid += 1;
        }
    }
    assert_eq!(valid, 1);
}

#[sqlx::test(migrations = false)]
async fn test_permission_off_refuses_login(pool: PgPool) {
    apply_schema(&pool).await;
    insert_student(&pool, "nimal", "password123", "IDX-003", None, false).await;
    let auth = service(&pool);

    let err = auth.login("nimal", "password123").await.unwrap_err();
    assert!(matches!(err, AuthError::PermissionDenied));
}

#[sqlx::test(migrations = false)]
async fn test_unreadable_hash_is_a_mismatch(pool: PgPool) {
    apply_schema(&pool).await;
    insert_staff(&pool, "kamala", "password123", "teacher", true).await;
    sqlx::query("UPDATE teacher_login SET hashed_password = 'plain-text' WHERE user_name = 'kamala'")
        .execute(&pool)
        .await
        .unwrap();
    let auth = service(&pool);

    let err = auth.login("kamala", "plain-text").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[sqlx::test(migrations = false)]
async fn test_renamed_account_invalidates_token(pool: PgPool) {
    apply_schema(&pool).await;
    insert_staff(&pool, "kamala", "password123", "teacher", true).await;
    let auth = service(&pool);
    let token = auth.login("kamala", "password123").await.unwrap().token;

    sqlx::query("UPDATE teacher_login SET user_name = 'kamala2' WHERE user_name = 'kamala'")
        .execute(&pool)
        .await
        .unwrap();

    assert!(matches!(
        auth.verify(Some(&token)).await.unwrap_err(),
        AuthError::TokenInvalid
    ));
}

#[sqlx::test(migrations = false)]
async fn test_read_token_for_unknown_account(pool: PgPool) {
    apply_schema(&pool).await;
    let store = PgCredentialStore::new(pool.clone());

    let token = store
        .read_token(Partition::Student, 99, "nobody")
        .await
        .unwrap();
    assert_eq!(token, None);
}

#[sqlx::test(migrations = false)]
async fn test_http_login_and_verify(pool: PgPool) {
    apply_schema(&pool).await;
    insert_staff(&pool, "admin", "password123", "admin", true).await;
    let app = pg_app(&pool);

    let token = login(&app, "admin", "password123").await;

    let (status, body) = send(&app, json_request("GET", "/verify-token", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decoded_token"]["role"], "admin");

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/login",
            None,
            Some(json!({ "username": "admin", "password": "nope" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid user name or password");
}
