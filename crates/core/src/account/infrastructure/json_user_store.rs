use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

use crate::account::domain::user::User;
use crate::account::domain::user_store::{StoreError, UserStore};

/// File-backed document store: one JSON array of user records.
///
/// Loaded fully at open; every mutation rewrites the file through a
/// temp-file rename so a crash mid-write never corrupts the store.
pub struct JsonUserStore {
    path: PathBuf,
    users: Vec<User>,
}

impl JsonUserStore {
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let users = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            Vec::new()
        };
        Ok(Self { path, users })
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.users)?;
        let temp = self.path.with_extension("tmp");
        fs::write(&temp, json)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

impl UserStore for JsonUserStore {
    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.iter().find(|u| u.email == email).cloned())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    fn insert(&mut self, user: User) -> Result<(), StoreError> {
        self.users.push(user);
        self.persist()
    }

    fn update(&mut self, user: &User) -> Result<(), StoreError> {
        let slot = self
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(StoreError::NotFound(user.id))?;
        *slot = user.clone();
        self.persist()
    }

    fn remove(&mut self, id: Uuid) -> Result<(), StoreError> {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        if self.users.len() == before {
            return Err(StoreError::NotFound(id));
        }
        self.persist()
    }

    fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::domain::user::Role;

    fn user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: "h".to_string(),
            salt: "s".to_string(),
            role: Role::User,
            custom_filter: None,
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> JsonUserStore {
        JsonUserStore::open(dir.path().join("users.json")).unwrap()
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_insert_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        let u = user("a@b.c");

        let mut store = JsonUserStore::open(path.clone()).unwrap();
        store.insert(u.clone()).unwrap();
        drop(store);

        let reopened = JsonUserStore::open(path).unwrap();
        assert_eq!(reopened.find_by_email("a@b.c").unwrap(), Some(u));
    }

    #[test]
    fn test_find_by_id_and_email() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let u = user("a@b.c");
        store.insert(u.clone()).unwrap();

        assert_eq!(store.find_by_id(u.id).unwrap(), Some(u.clone()));
        assert_eq!(store.find_by_email("missing@x.y").unwrap(), None);
        assert_eq!(store.find_by_id(Uuid::new_v4()).unwrap(), None);
    }

    #[test]
    fn test_update_replaces_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let mut u = user("a@b.c");
        store.insert(u.clone()).unwrap();

        u.custom_filter = Some(PathBuf::from("uploads/u.png"));
        store.update(&u).unwrap();
        assert_eq!(
            store.find_by_id(u.id).unwrap().unwrap().custom_filter,
            Some(PathBuf::from("uploads/u.png"))
        );
    }

    #[test]
    fn test_update_unknown_user_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        assert!(matches!(
            store.update(&user("ghost@x.y")),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_remove_deletes_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let u = user("a@b.c");
        store.insert(u.clone()).unwrap();
        store.insert(user("d@e.f")).unwrap();

        store.remove(u.id).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
        assert!(matches!(store.remove(u.id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.insert(user("a@b.c")).unwrap();
        assert!(!dir.path().join("users.tmp").exists());
    }
}
