//! User accounts
//!
//! A small username/password registry backed by a JSON file under the
//! data directory. Passwords are bcrypt-hashed; each account names its
//! own library snapshot file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the registry file inside the data directory.
pub const USERS_FILE: &str = "users.json";

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    password_hash: String,
}

impl User {
    /// File name of this user's library snapshot, relative to the data
    /// directory.
    pub fn library_file(&self) -> PathBuf {
        PathBuf::from(format!("{}.library.json", self.username))
    }
}

/// Username/password registry persisted as JSON.
#[derive(Debug)]
pub struct UserManager {
    users: HashMap<String, User>,
    path: PathBuf,
}

impl UserManager {
    /// Load the registry from the data directory, starting empty if none
    /// exists yet.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(USERS_FILE);
        let users = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read user registry: {:?}", path))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse user registry: {:?}", path))?
        } else {
            HashMap::new()
        };
        Ok(Self { users, path })
    }

    /// Register a new account. Returns false when the username is taken.
    pub fn sign_up(&mut self, username: &str, password: &str) -> Result<bool> {
        if self.users.contains_key(username) {
            return Ok(false);
        }
        let password_hash =
            bcrypt::hash(password, bcrypt::DEFAULT_COST).context("Failed to hash password")?;
        self.users.insert(
            username.to_string(),
            User {
                username: username.to_string(),
                password_hash,
            },
        );
        self.save()?;
        log::info!("Registered new user: {username}");
        Ok(true)
    }

    /// Verify credentials. Returns the account on success, None on an
    /// unknown username or wrong password.
    pub fn login(&self, username: &str, password: &str) -> Result<Option<&User>> {
        let Some(user) = self.users.get(username) else {
            return Ok(None);
        };
        let ok = bcrypt::verify(password, &user.password_hash)
            .context("Failed to verify password")?;
        Ok(ok.then_some(user))
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    fn save(&self) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(&self.users).context("Failed to serialize users")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write user registry: {:?}", self.path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sign_up_and_login() {
        let dir = TempDir::new().unwrap();
        let mut manager = UserManager::open(dir.path()).unwrap();

        assert!(manager.sign_up("alice", "hunter2").unwrap());
        assert!(!manager.sign_up("alice", "other").unwrap());

        assert!(manager.login("alice", "hunter2").unwrap().is_some());
        assert!(manager.login("alice", "wrong").unwrap().is_none());
        assert!(manager.login("bob", "hunter2").unwrap().is_none());
    }

    #[test]
    fn test_registry_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let mut manager = UserManager::open(dir.path()).unwrap();
            manager.sign_up("alice", "hunter2").unwrap();
        }

        let manager = UserManager::open(dir.path()).unwrap();
        assert_eq!(manager.user_count(), 1);
        let user = manager.login("alice", "hunter2").unwrap().unwrap();
        assert_eq!(user.library_file(), PathBuf::from("alice.library.json"));
    }
}
