//! 管理员账号
//!
//! A single operator account configured through the environment. The password
//! is only ever held as an argon2 PHC string.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Admin credentials
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub username: String,
    /// argon2 hash; `None` disables admin login
    pub password_hash: Option<String>,
}

impl AdminAccount {
    /// 从环境变量加载 (ADMIN_USERNAME, ADMIN_PASSWORD_HASH)
    pub fn from_env() -> Self {
        Self {
            username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            password_hash: std::env::var("ADMIN_PASSWORD_HASH")
                .ok()
                .filter(|h| !h.trim().is_empty()),
        }
    }

    pub fn new(username: impl Into<String>, password_hash: Option<String>) -> Self {
        Self {
            username: username.into(),
            password_hash,
        }
    }

    pub fn login_enabled(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Verify a login attempt.
    ///
    /// A wrong username and a wrong password are indistinguishable to the
    /// caller.
    pub fn verify(&self, username: &str, password: &str) -> Result<bool, argon2::password_hash::Error> {
        let Some(hash) = &self.password_hash else {
            return Ok(false);
        };
        let parsed_hash = PasswordHash::new(hash)?;
        let password_ok = Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok();
        Ok(password_ok && username == self.username)
    }
}

/// Hash password using argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}
