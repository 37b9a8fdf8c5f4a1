//! Account operations behind the demo: registration, login, bearer-token
//! sessions, custom overlay upload, and the admin dashboard actions.
//!
//! Tokens are opaque UUIDs held in memory for the process lifetime:
//! restarting the service logs everyone out but loses no stored data.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use crate::account::domain::user::{Role, User, UserSummary};
use crate::account::domain::user_store::{StoreError, UserStore};
use crate::account::infrastructure::password::{generate_salt, hash_password, verify_password};

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("user already exists")]
    DuplicateEmail,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("admin access required")]
    Forbidden,
    #[error("wrong admin secret")]
    AdminSecretRejected,
    #[error("user not found")]
    UserNotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("upload I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Successful register/login response.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub custom_filter: Option<PathBuf>,
}

pub struct AccountService {
    store: Box<dyn UserStore>,
    uploads_dir: PathBuf,
    admin_secret: Option<String>,
    sessions: HashMap<String, Uuid>,
}

impl AccountService {
    /// `admin_secret = None` disables admin registration entirely.
    ///
    /// The uploads directory is created eagerly; an unwritable location
    /// fails here rather than on the first upload.
    pub fn new(
        store: Box<dyn UserStore>,
        uploads_dir: PathBuf,
        admin_secret: Option<String>,
    ) -> Result<Self, AccountError> {
        fs::create_dir_all(&uploads_dir)?;
        Ok(Self {
            store,
            uploads_dir,
            admin_secret,
            sessions: HashMap::new(),
        })
    }

    /// Create an account and log it in.
    ///
    /// A duplicate e-mail is a client error and leaves the store
    /// untouched. Registering as admin requires the configured secret.
    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        role: Role,
        admin_secret: Option<&str>,
    ) -> Result<Session, AccountError> {
        if self.store.find_by_email(email)?.is_some() {
            return Err(AccountError::DuplicateEmail);
        }
        if role == Role::Admin {
            match (&self.admin_secret, admin_secret) {
                (Some(expected), Some(given)) if expected == given => {}
                _ => return Err(AccountError::AdminSecretRejected),
            }
        }

        let salt = generate_salt();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: hash_password(password, &salt),
            salt,
            role,
            custom_filter: None,
        };
        let id = user.id;
        self.store.insert(user)?;

        Ok(self.open_session(id, role, None))
    }

    /// Authenticate with e-mail + password.
    ///
    /// Unknown e-mail and wrong password are indistinguishable to the
    /// caller.
    pub fn login(&mut self, email: &str, password: &str) -> Result<Session, AccountError> {
        let user = self
            .store
            .find_by_email(email)?
            .ok_or(AccountError::InvalidCredentials)?;
        if !verify_password(password, &user.salt, &user.password_hash) {
            return Err(AccountError::InvalidCredentials);
        }
        Ok(self.open_session(user.id, user.role, user.custom_filter))
    }

    /// Resolve a bearer token to its user.
    pub fn authenticate(&self, token: &str) -> Result<User, AccountError> {
        let id = self.sessions.get(token).ok_or(AccountError::InvalidToken)?;
        self.store
            .find_by_id(*id)?
            .ok_or(AccountError::InvalidToken)
    }

    /// Drop a session token.
    pub fn logout(&mut self, token: &str) {
        self.sessions.remove(token);
    }

    /// Store an uploaded overlay image for the calling user.
    ///
    /// The file lands at `<uploads>/<user-id>_<original-name>` and the
    /// path is recorded on the user document, replacing any previous one.
    pub fn upload_filter(
        &mut self,
        token: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, AccountError> {
        let mut user = self.authenticate(token)?;

        let file_name = format!("{}_{}", user.id, sanitize_file_name(original_name));
        let path = self.uploads_dir.join(file_name);
        fs::write(&path, bytes)?;

        if let Some(old) = user.custom_filter.replace(path.clone()) {
            if old != path {
                let _ = fs::remove_file(old);
            }
        }
        self.store.update(&user)?;
        Ok(path)
    }

    /// The calling user's stored overlay path, if any.
    pub fn custom_filter(&self, token: &str) -> Result<Option<PathBuf>, AccountError> {
        Ok(self.authenticate(token)?.custom_filter)
    }

    /// Remove a user's custom overlay. Allowed for the owner or an admin.
    pub fn remove_custom_filter(&mut self, token: &str, user_id: Uuid) -> Result<(), AccountError> {
        let caller = self.authenticate(token)?;
        if caller.id != user_id && caller.role != Role::Admin {
            return Err(AccountError::Forbidden);
        }

        let mut user = self
            .store
            .find_by_id(user_id)?
            .ok_or(AccountError::UserNotFound)?;
        if let Some(path) = user.custom_filter.take() {
            let _ = fs::remove_file(path);
        }
        self.store.update(&user)?;
        Ok(())
    }

    /// Admin-only: list all accounts.
    pub fn list_users(&self, token: &str) -> Result<Vec<UserSummary>, AccountError> {
        self.require_admin(token)?;
        Ok(self.store.list()?.iter().map(UserSummary::from).collect())
    }

    /// Admin-only: delete an account and its uploaded overlay.
    pub fn delete_user(&mut self, token: &str, user_id: Uuid) -> Result<(), AccountError> {
        self.require_admin(token)?;
        let user = self
            .store
            .find_by_id(user_id)?
            .ok_or(AccountError::UserNotFound)?;
        if let Some(path) = &user.custom_filter {
            let _ = fs::remove_file(path);
        }
        self.store.remove(user_id)?;
        self.sessions.retain(|_, id| *id != user_id);
        Ok(())
    }

    fn require_admin(&self, token: &str) -> Result<User, AccountError> {
        let caller = self.authenticate(token)?;
        if caller.role != Role::Admin {
            return Err(AccountError::Forbidden);
        }
        Ok(caller)
    }

    fn open_session(&mut self, id: Uuid, role: Role, custom_filter: Option<PathBuf>) -> Session {
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(token.clone(), id);
        Session {
            token,
            role,
            custom_filter,
        }
    }
}

/// Strip any path components from a client-supplied file name.
fn sanitize_file_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "upload".to_string())
}
