use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{LodgerError, Result};

/// Stored administrator credential: random salt plus a SHA-256 digest of
/// salt + password. Lives in settings.json, never hardcoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub salt: String,
    pub password_hash: String,
}

/// Proof of a successful login, passed explicitly to every mutating
/// operation instead of keeping ambient logged-in state.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

impl Credentials {
    pub fn create(username: &str, password: &str) -> Credentials {
        let mut salt_bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt = hex::encode(salt_bytes);
        let password_hash = hash_password(&salt, password);
        Credentials {
            username: username.to_string(),
            salt,
            password_hash,
        }
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && hash_password(&self.salt, password) == self.password_hash
    }
}

pub fn login(credentials: &Credentials, username: &str, password: &str) -> Result<Session> {
    if credentials.verify(username, password) {
        Ok(Session {
            username: username.to_string(),
        })
    } else {
        Err(LodgerError::AuthFailure)
    }
}
