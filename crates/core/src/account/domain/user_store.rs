use thiserror::Error;
use uuid::Uuid;

use crate::account::domain::user::User;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store (de)serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("no user with id {0}")]
    NotFound(Uuid),
}

/// Document-store port for account records.
///
/// Implementations persist on every mutation; readers get copies so the
/// service layer owns all invariants (e-mail uniqueness lives there, not
/// here).
pub trait UserStore: Send {
    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    fn insert(&mut self, user: User) -> Result<(), StoreError>;
    fn update(&mut self, user: &User) -> Result<(), StoreError>;
    fn remove(&mut self, id: Uuid) -> Result<(), StoreError>;
    fn list(&self) -> Result<Vec<User>, StoreError>;
}
