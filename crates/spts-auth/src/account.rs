//! Account model shared by the credential stores and the auth service.
//!
//! Accounts live in two independent partitions: staff (teachers, principals,
//! admins) and students. A username is unique only within its partition.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role carried by an account and embedded in its tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Principal,
    Admin,
    Student,
}

impl Role {
    pub const STAFF: [Role; 3] = [Role::Teacher, Role::Principal, Role::Admin];
    pub const MANAGEMENT: [Role; 2] = [Role::Principal, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Principal => "principal",
            Role::Admin => "admin",
            Role::Student => "student",
        }
    }

    /// The partition whose token column backs sessions for this role.
    pub fn partition(&self) -> Partition {
        match self {
            Role::Student => Partition::Student,
            Role::Teacher | Role::Principal | Role::Admin => Partition::Staff,
        }
    }

    pub fn is_staff(&self) -> bool {
        self.partition() == Partition::Staff
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "teacher" => Ok(Role::Teacher),
            "principal" => Ok(Role::Principal),
            "admin" => Ok(Role::Admin),
            "student" => Ok(Role::Student),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// Account namespace. Login resolves staff before students.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    Staff,
    Student,
}

impl Partition {
    /// Lookup precedence used by login.
    pub const LOGIN_ORDER: [Partition; 2] = [Partition::Staff, Partition::Student];

    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Staff => "staff",
            Partition::Student => "student",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A login row as the credential store holds it.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub user_id: i32,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub permission: bool,
    pub current_token: Option<String>,
}

// Hand-written so hashes and live tokens never end up in logs.
impl fmt::Debug for AccountRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountRecord")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("role", &self.role)
            .field("permission", &self.permission)
            .field("has_token", &self.current_token.is_some())
            .finish_non_exhaustive()
    }
}

/// An account resolved by login, tagged with the partition it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Account {
    Staff(AccountRecord),
    Student(AccountRecord),
}

impl Account {
    pub fn from_partition(partition: Partition, record: AccountRecord) -> Self {
        match partition {
            Partition::Staff => Account::Staff(record),
            Partition::Student => Account::Student(record),
        }
    }

    pub fn partition(&self) -> Partition {
        match self {
            Account::Staff(_) => Partition::Staff,
            Account::Student(_) => Partition::Student,
        }
    }

    pub fn record(&self) -> &AccountRecord {
        match self {
            Account::Staff(record) | Account::Student(record) => record,
        }
    }

    pub fn summary(&self) -> AccountSummary {
        let record = self.record();
        AccountSummary {
            user_id: record.user_id,
            username: record.username.clone(),
            role: record.role,
            permission: record.permission,
        }
    }
}

/// The non-secret view of an account returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccountSummary {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
    pub permission: bool,
}
