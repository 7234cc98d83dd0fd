//! In-memory [`CredentialStore`] used by tests.
//!
//! Each account row sits behind its own async mutex. A transaction holds the
//! guards of the rows it found until it commits or is dropped, which gives
//! the same per-account serialization as `SELECT ... FOR UPDATE` while
//! leaving other accounts untouched. Writes are staged and applied on commit.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use spts_core::hash_password;

use crate::account::{AccountRecord, Partition, Role};
use crate::error::StoreError;
use crate::store::{CredentialStore, CredentialTx};

type RowKey = (Partition, String);
type Row = Arc<Mutex<AccountRecord>>;

#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: RwLock<HashMap<RowKey, Row>>,
    unavailable: AtomicBool,
    fail_commits: AtomicBool,
}

/// Builds a record with a freshly bcrypt-hashed password and no token.
pub fn account_record(
    user_id: i32,
    username: &str,
    password: &str,
    role: Role,
    permission: bool,
) -> AccountRecord {
    AccountRecord {
        user_id,
        username: username.to_string(),
        password_hash: hash_password(password).expect("bcrypt hashing failed"),
        role,
        permission,
        current_token: None,
    }
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, partition: Partition, record: AccountRecord) {
        let key = (partition, record.username.clone());
        self.inner
            .rows
            .write()
            .await
            .insert(key, Arc::new(Mutex::new(record)));
    }

    /// Token currently stored for `username`, waiting for any in-flight login.
    pub async fn stored_token(&self, partition: Partition, username: &str) -> Option<String> {
        let row = self.row(partition, username).await?;
        let record = row.lock().await;
        record.current_token.clone()
    }

    pub async fn set_permission(&self, partition: Partition, username: &str, permission: bool) {
        if let Some(row) = self.row(partition, username).await {
            row.lock().await.permission = permission;
        }
    }

    /// Makes every subsequent store call fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Makes commits fail, leaving staged writes unapplied.
    pub fn set_fail_commits(&self, fail: bool) {
        self.inner.fail_commits.store(fail, Ordering::SeqCst);
    }

    async fn row(&self, partition: Partition, username: &str) -> Option<Row> {
        self.inner
            .rows
            .read()
            .await
            .get(&(partition, username.to_string()))
            .cloned()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.inner.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn begin(&self) -> Result<Box<dyn CredentialTx>, StoreError> {
        self.check_available()?;
        Ok(Box::new(InMemoryTx {
            store: self.clone(),
            locked: Vec::new(),
            pending: Vec::new(),
        }))
    }

    async fn read_token(
        &self,
        partition: Partition,
        user_id: i32,
        username: &str,
    ) -> Result<Option<String>, StoreError> {
        self.check_available()?;

        let Some(row) = self.row(partition, username).await else {
            return Ok(None);
        };
        let record = row.lock().await;

        if record.user_id != user_id {
            return Ok(None);
        }
        Ok(record.current_token.clone())
    }
}

struct InMemoryTx {
    store: InMemoryCredentialStore,
    locked: Vec<(RowKey, OwnedMutexGuard<AccountRecord>)>,
    pending: Vec<(RowKey, i32, String)>,
}

impl InMemoryTx {
    async fn lock_row(&mut self, key: &RowKey) -> Option<&mut OwnedMutexGuard<AccountRecord>> {
        if !self.locked.iter().any(|(k, _)| k == key) {
            let row = self.store.row(key.0, &key.1).await?;
            let guard = row.lock_owned().await;
            self.locked.push((key.clone(), guard));
        }
        self.locked
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, guard)| guard)
    }
}

#[async_trait]
impl CredentialTx for InMemoryTx {
    async fn find_account(
        &mut self,
        partition: Partition,
        username: &str,
    ) -> Result<Option<AccountRecord>, StoreError> {
        self.store.check_available()?;
        let key = (partition, username.to_string());
        Ok(self.lock_row(&key).await.map(|guard| (**guard).clone()))
    }

    async fn store_token(
        &mut self,
        partition: Partition,
        user_id: i32,
        username: &str,
        token: &str,
    ) -> Result<(), StoreError> {
        self.store.check_available()?;
        let key = (partition, username.to_string());

        let row_matches = self
            .lock_row(&key)
            .await
            .is_some_and(|guard| guard.user_id == user_id);
        if !row_matches {
            return Err(StoreError::Corrupt(format!(
                "no {} login row for user {}",
                partition, user_id
            )));
        }

        self.pending.push((key, user_id, token.to_string()));
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> Result<(), StoreError> {
        self.store.check_available()?;
        if self.store.inner.fail_commits.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("commit failed".to_string()));
        }

        let pending = std::mem::take(&mut self.pending);
        for (key, user_id, token) in pending {
            if let Some((_, guard)) = self.locked.iter_mut().find(|(k, _)| *k == key) {
                if guard.user_id == user_id {
                    guard.current_token = Some(token);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(user_id: i32, username: &str) -> AccountRecord {
        AccountRecord {
            user_id,
            username: username.to_string(),
            password_hash: "unused".to_string(),
            role: Role::Teacher,
            permission: true,
            current_token: None,
        }
    }

    #[tokio::test]
    async fn test_commit_publishes_token() {
        let store = InMemoryCredentialStore::new();
        store.insert(Partition::Staff, record(1, "alice")).await;

        let mut tx = store.begin().await.unwrap();
        tx.find_account(Partition::Staff, "alice").await.unwrap();
        tx.store_token(Partition::Staff, 1, "alice", "t1").await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(
            store.read_token(Partition::Staff, 1, "alice").await.unwrap(),
            Some("t1".to_string())
        );
    }

    #[tokio::test]
    async fn test_dropped_tx_discards_writes() {
        let store = InMemoryCredentialStore::new();
        store.insert(Partition::Staff, record(1, "alice")).await;

        {
            let mut tx = store.begin().await.unwrap();
            tx.store_token(Partition::Staff, 1, "alice", "t1").await.unwrap();
        }

        assert_eq!(store.stored_token(Partition::Staff, "alice").await, None);
    }

    #[tokio::test]
    async fn test_read_token_checks_user_id() {
        let store = InMemoryCredentialStore::new();
        let mut row = record(1, "alice");
        row.current_token = Some("t1".to_string());
        store.insert(Partition::Staff, row).await;

        assert_eq!(
            store.read_token(Partition::Staff, 2, "alice").await.unwrap(),
            None
        );
        assert_eq!(
            store.read_token(Partition::Student, 1, "alice").await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_store_token_for_missing_row_fails() {
        let store = InMemoryCredentialStore::new();
        let mut tx = store.begin().await.unwrap();
        assert!(matches!(
            tx.store_token(Partition::Student, 9, "ghost", "t").await,
            Err(StoreError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn test_unavailable_store() {
        let store = InMemoryCredentialStore::new();
        store.set_unavailable(true);
        assert!(store.begin().await.is_err());
        assert!(store.read_token(Partition::Staff, 1, "alice").await.is_err());
    }
}
