//! Credential store interface.
//!
//! The auth service only needs three things from persistence: find a login
//! row by username, overwrite its token, and read the token back. Login does
//! the first two inside a [`CredentialTx`] so that, per account, the
//! read-check-write sequence is serialized: `find_account` locks the row it
//! returns until the transaction commits or is dropped. Dropping a
//! transaction without calling [`CredentialTx::commit`] discards its writes
//! and releases the lock and connection.

use async_trait::async_trait;

use crate::account::{AccountRecord, Partition};
use crate::error::StoreError;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Starts a transaction scoped to one login attempt.
    async fn begin(&self) -> Result<Box<dyn CredentialTx>, StoreError>;

    /// Reads the live token stored against `(user_id, username)`.
    ///
    /// Returns `None` when the row does not exist or has no token.
    async fn read_token(
        &self,
        partition: Partition,
        user_id: i32,
        username: &str,
    ) -> Result<Option<String>, StoreError>;
}

#[async_trait]
pub trait CredentialTx: Send {
    /// Finds and locks the login row for `username` in `partition`.
    async fn find_account(
        &mut self,
        partition: Partition,
        username: &str,
    ) -> Result<Option<AccountRecord>, StoreError>;

    /// Overwrites the stored token. Visible to readers only after commit.
    async fn store_token(
        &mut self,
        partition: Partition,
        user_id: i32,
        username: &str,
        token: &str,
    ) -> Result<(), StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}
