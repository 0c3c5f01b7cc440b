//! Authentication service.
//!
//! An in-process stand-in for a hosted auth backend. Accounts live in memory
//! and passwords are hashed with Argon2id. Results are returned to the
//! caller; establishing the local session is the caller's job.

mod error;

pub use error::AuthError;

use std::collections::HashMap;
use std::time::Duration;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;
use tracing::instrument;

use viralcopy_core::{AvatarRef, Email, Identity, ProfileUpdate, Role, UserId};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Seeded admin account.
pub const DEMO_ADMIN_EMAIL: &str = "alex.creator@viralcopy.ai";

/// Seeded regular account.
pub const DEMO_USER_EMAIL: &str = "sam.writer@viralcopy.ai";

struct Account {
    identity: Identity,
    password_hash: String,
}

/// In-memory account directory.
pub struct MockAuthService {
    accounts: RwLock<HashMap<Email, Account>>,
    latency: Duration,
}

impl std::fmt::Debug for MockAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockAuthService")
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

impl MockAuthService {
    /// Create the service seeded with the demo admin and demo user, both
    /// using `demo_password`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if the demo password cannot be hashed.
    pub fn seeded(demo_password: &SecretString, latency: Duration) -> Result<Self, AuthError> {
        let password_hash = hash_password(demo_password.expose_secret())?;

        let admin = Identity {
            id: UserId::new("user-123"),
            email: Email::parse(DEMO_ADMIN_EMAIL)?,
            name: "Alex Creator".to_string(),
            role: Role::Admin,
            avatar_ref: Some(AvatarRef::Url("https://picsum.photos/100/100".to_string())),
            company: None,
            phone: None,
        };
        let user = Identity {
            id: UserId::new("user-456"),
            email: Email::parse(DEMO_USER_EMAIL)?,
            name: "Sam Writer".to_string(),
            role: Role::User,
            avatar_ref: None,
            company: None,
            phone: None,
        };

        let accounts = [admin, user]
            .into_iter()
            .map(|identity| {
                (
                    identity.email.clone(),
                    Account {
                        identity,
                        password_hash: password_hash.clone(),
                    },
                )
            })
            .collect();

        Ok(Self {
            accounts: RwLock::new(accounts),
            latency,
        })
    }

    /// Create a service with no accounts.
    #[must_use]
    pub fn empty(latency: Duration) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            latency,
        }
    }

    /// Verify credentials and return the identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for a malformed or unknown
    /// email and for a wrong password alike.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.simulate_latency().await;

        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;
        let accounts = self.accounts.read().await;
        let account = accounts.get(&email).ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &account.password_hash)?;

        tracing::info!(user_id = %account.identity.id, "Sign-in succeeded");
        Ok(account.identity.clone())
    }

    /// Create an account and return its identity.
    ///
    /// New accounts always get [`Role::User`]. A blank name defaults to the
    /// local part of the email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for a malformed email,
    /// `AuthError::WeakPassword` for a short password, and
    /// `AuthError::UserAlreadyExists` if the email is taken.
    #[instrument(skip(self, password))]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<Identity, AuthError> {
        self.simulate_latency().await;

        let email = Email::parse(email)?;
        validate_password(password)?;

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&email) {
            return Err(AuthError::UserAlreadyExists);
        }

        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map_or_else(|| email.local_part().to_string(), ToString::to_string);

        let identity = Identity {
            id: UserId::generate(),
            email: email.clone(),
            name,
            role: Role::User,
            avatar_ref: None,
            company: None,
            phone: None,
        };
        let password_hash = hash_password(password)?;
        accounts.insert(
            email,
            Account {
                identity: identity.clone(),
                password_hash,
            },
        );

        tracing::info!(user_id = %identity.id, "Account created");
        Ok(identity)
    }

    /// Notify the backend that `identity` signed out. Nothing is held
    /// server-side, so this only records the event.
    #[instrument(skip_all)]
    pub async fn sign_out(&self, identity: Option<&Identity>) {
        self.simulate_latency().await;
        if let Some(identity) = identity {
            tracing::info!(user_id = %identity.id, "Signed out");
        }
    }

    /// Apply a profile update and return the updated identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no account has `id`.
    #[instrument(skip(self, update))]
    pub async fn update_profile(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Identity, AuthError> {
        self.simulate_latency().await;

        let mut accounts = self.accounts.write().await;
        let account = accounts
            .values_mut()
            .find(|a| &a.identity.id == id)
            .ok_or(AuthError::UserNotFound)?;

        account.identity.apply(update);
        Ok(account.identity.clone())
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

/// Validate password strength.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> MockAuthService {
        MockAuthService::seeded(
            &SecretString::from("viralcopy-demo".to_string()),
            Duration::ZERO,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_sign_in_demo_accounts() {
        let auth = service();

        let admin = auth.sign_in(DEMO_ADMIN_EMAIL, "viralcopy-demo").await.unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.name, "Alex Creator");

        let user = auth
            .sign_in("  Sam.Writer@ViralCopy.ai ", "viralcopy-demo")
            .await
            .unwrap();
        assert_eq!(user.role, Role::User);
    }

    #[tokio::test]
    async fn test_sign_in_failures_are_indistinguishable() {
        let auth = service();

        let wrong_password = auth.sign_in(DEMO_ADMIN_EMAIL, "nope-nope").await;
        let unknown = auth.sign_in("ghost@viralcopy.ai", "viralcopy-demo").await;
        let malformed = auth.sign_in("not-an-email", "viralcopy-demo").await;

        for result in [wrong_password, unknown, malformed] {
            assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        }
    }

    #[tokio::test]
    async fn test_sign_up_creates_user_role() {
        let auth = MockAuthService::empty(Duration::ZERO);

        let identity = auth
            .sign_up("new.writer@example.com", "long-enough", Some("  "))
            .await
            .unwrap();
        assert_eq!(identity.role, Role::User);
        assert_eq!(identity.name, "new.writer");

        let again = auth.sign_in("new.writer@example.com", "long-enough").await.unwrap();
        assert_eq!(again.id, identity.id);
    }

    #[tokio::test]
    async fn test_sign_up_rejections() {
        let auth = service();

        assert!(matches!(
            auth.sign_up(DEMO_USER_EMAIL, "long-enough", None).await,
            Err(AuthError::UserAlreadyExists)
        ));
        assert!(matches!(
            auth.sign_up("fresh@example.com", "short", None).await,
            Err(AuthError::WeakPassword(_))
        ));
        assert!(matches!(
            auth.sign_up("fresh", "long-enough", None).await,
            Err(AuthError::InvalidEmail(_))
        ));
    }

    #[tokio::test]
    async fn test_update_profile_keeps_role_and_email() {
        let auth = service();
        let admin = auth.sign_in(DEMO_ADMIN_EMAIL, "viralcopy-demo").await.unwrap();

        let updated = auth
            .update_profile(
                &admin.id,
                &ProfileUpdate {
                    company: Some("Creator Co".to_string()),
                    ..ProfileUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.company.as_deref(), Some("Creator Co"));
        assert_eq!(updated.role, Role::Admin);
        assert_eq!(updated.email, admin.email);

        assert!(matches!(
            auth.update_profile(&UserId::new("missing"), &ProfileUpdate::default())
                .await,
            Err(AuthError::UserNotFound)
        ));
    }

    #[test]
    fn test_user_messages_do_not_enumerate_accounts() {
        assert_eq!(
            AuthError::InvalidCredentials.user_message(),
            AuthError::UserNotFound.user_message()
        );
        assert_eq!(
            AuthError::WeakPassword("password must be at least 8 characters".to_string())
                .user_message(),
            "Password must be at least 8 characters"
        );
    }
}
