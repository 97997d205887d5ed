//! # Auth Repository
//!
//! User accounts and the active session.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Auth Storage Layout                               │
//! │                                                                         │
//! │  allUsers     ──► [ {id, name, email, hashedPassword}, ... ]           │
//! │                   (whole list under one key, the frontend's layout)    │
//! │                                                                         │
//! │  userToken    ──► "9f2c4a..."          ┐ written together in one       │
//! │  userDetails  ──► {id, name, email}    ┘ transaction at sign-in        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Credential Handling
//! Passwords are hashed with salted Argon2 and session tokens come from the
//! OS RNG; see [`crate::password`] for why the original app's scheme was
//! replaced wholesale.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use bodega_core::validation::{normalize_email, validate_profile_update, validate_sign_up};
use bodega_core::{Credentials, ProfileUpdate, Session, SessionUser, SignUpForm, User};

use crate::cache::CollectionCache;
use crate::error::{StoreError, StoreResult};
use crate::keys;
use crate::kv::{KvStore, WriteBatch};
use crate::password;

/// Repository for account and session operations.
///
/// ## Usage
/// ```rust,ignore
/// let auth = store.auth();
///
/// auth.sign_up(form).await?;
/// let session = auth.sign_in(credentials).await?;
/// ```
#[derive(Debug, Clone)]
pub struct AuthRepository {
    kv: KvStore,
    cache: Arc<CollectionCache<User>>,
}

impl AuthRepository {
    /// Creates a new AuthRepository sharing the given cache.
    pub fn new(kv: KvStore, cache: Arc<CollectionCache<User>>) -> Self {
        AuthRepository { kv, cache }
    }

    /// Loads every account, from cache when populated.
    async fn load_users(&self) -> StoreResult<Vec<User>> {
        if let Some(cached) = self.cache.get().await {
            return Ok(cached);
        }

        let users = self
            .kv
            .get::<Vec<User>>(keys::USERS)
            .await?
            .unwrap_or_default();
        self.cache.replace(users.clone()).await;
        Ok(users)
    }

    /// Persists the full user list and refreshes the cache.
    async fn save_users(&self, users: Vec<User>) -> StoreResult<()> {
        self.kv.set(keys::USERS, &users).await?;
        self.cache.replace(users).await;
        Ok(())
    }

    /// Registers a new account.
    ///
    /// ## Errors
    /// * `StoreError::Validation` - blank fields, weak password, or
    ///   password/confirmation mismatch (checked before any write)
    /// * `StoreError::Conflict` - the normalized email already has an account
    pub async fn sign_up(&self, form: SignUpForm) -> StoreResult<User> {
        validate_sign_up(&form)?;

        let email = normalize_email(&form.email);
        let mut users = self.load_users().await?;

        if users.iter().any(|u| u.email == email) {
            return Err(StoreError::conflict("email", email));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: form.name.trim().to_string(),
            email,
            hashed_password: password::hash_password(&form.password)?,
        };

        users.push(user.clone());
        self.save_users(users).await?;

        info!(id = %user.id, "Account created");
        Ok(user)
    }

    /// Signs in and persists the session.
    ///
    /// Token and denormalized details are written in one transaction so a
    /// crash can't leave a token without details or vice versa.
    ///
    /// ## Errors
    /// * `StoreError::InvalidCredentials` - unknown email OR wrong password,
    ///   indistinguishable by design
    pub async fn sign_in(&self, credentials: Credentials) -> StoreResult<Session> {
        let email = normalize_email(&credentials.email);
        let users = self.load_users().await?;

        let user = users
            .iter()
            .find(|u| u.email == email)
            .ok_or(StoreError::InvalidCredentials)?;

        if !password::verify_password(&credentials.password, &user.hashed_password) {
            return Err(StoreError::InvalidCredentials);
        }

        let session = Session {
            token: password::generate_session_token(),
            user: SessionUser::from(user),
        };

        let mut batch = WriteBatch::new();
        batch.put(keys::SESSION_TOKEN, &session.token)?;
        batch.put(keys::SESSION_DETAILS, &session.user)?;
        self.kv.apply(batch).await?;

        info!(id = %session.user.id, "Signed in");
        Ok(session)
    }

    /// Returns the persisted session token, or `None` when signed out.
    pub async fn session_token(&self) -> StoreResult<Option<String>> {
        self.kv.get(keys::SESSION_TOKEN).await
    }

    /// Returns the persisted session user details, or `None` when signed out.
    pub async fn session_user(&self) -> StoreResult<Option<SessionUser>> {
        self.kv.get(keys::SESSION_DETAILS).await
    }

    /// Clears both session keys. Idempotent: signing out twice is a no-op.
    pub async fn sign_out(&self) -> StoreResult<()> {
        self.kv
            .remove_many(&[keys::SESSION_TOKEN, keys::SESSION_DETAILS])
            .await?;
        debug!("Signed out");
        Ok(())
    }

    /// Updates the signed-in user's name and email.
    ///
    /// Refreshes both the account record and the denormalized session
    /// details in one transaction.
    ///
    /// ## Errors
    /// * `StoreError::NotFound` - no active session, or the session points
    ///   at an account that no longer exists
    /// * `StoreError::Conflict` - new email belongs to a different account
    pub async fn update_profile(&self, update: ProfileUpdate) -> StoreResult<User> {
        validate_profile_update(&update)?;

        let details = self
            .session_user()
            .await?
            .ok_or_else(|| StoreError::not_found("Session", "current"))?;

        let mut users = self.load_users().await?;
        let position = users
            .iter()
            .position(|u| u.id == details.id)
            .ok_or_else(|| StoreError::not_found("User", &details.id))?;

        let email = normalize_email(&update.email);
        if users.iter().any(|u| u.email == email && u.id != details.id) {
            return Err(StoreError::conflict("email", email));
        }

        users[position].name = update.name.trim().to_string();
        users[position].email = email;
        let updated = users[position].clone();

        let mut batch = WriteBatch::new();
        batch.put(keys::USERS, &users)?;
        batch.put(keys::SESSION_DETAILS, &SessionUser::from(&updated))?;
        self.kv.apply(batch).await?;

        self.cache.replace(users).await;

        info!(id = %updated.id, "Profile updated");
        Ok(updated)
    }

    /// Clears the in-memory user cache unconditionally.
    pub async fn invalidate_cache(&self) {
        self.cache.invalidate().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
