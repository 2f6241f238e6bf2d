//! Authentication service layer.
//!
//! Users sign in with a Clerk session token. The token is verified locally against the Clerk
//! instance's public key and the helpdesk user mirrored from Clerk is created or refreshed.

pub mod token;

use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};

use crate::server::{
    data::{
        is_unique_violation,
        user::{NewUser, ProfileUpdate, UserRepository},
    },
    error::{auth::AuthError, Error},
    model::db::UserModel,
    service::{
        auth::token::{ClerkClaims, TokenVerifier},
        retry::RetryContext,
    },
};

/// Service for signing users in and resolving the signed in user.
pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    token_verifier: &'a TokenVerifier,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of AuthService.
    pub fn new(db: &'a DatabaseConnection, token_verifier: &'a TokenVerifier) -> Self {
        Self { db, token_verifier }
    }

    /// Exchanges a Clerk session token for the matching helpdesk user.
    ///
    /// Existing users get their profile refreshed from the claims present in the token, new
    /// users are created as end users. Either way the sign-in time is recorded.
    ///
    /// # Returns
    /// - `Ok(UserModel)` - Signed in user
    /// - `Err(Error::JwtError)` - Token failed verification
    /// - `Err(Error::AuthError(AuthError::MissingEmailClaim))` - First sign-in without an email claim
    /// - `Err(Error::AuthError(AuthError::UserSuspended))` - User is suspended
    /// - `Err(Error::AuthError(AuthError::UserInactive))` - User is deactivated
    /// - `Err(Error::DbErr)` - Database operation failed after retries
    pub async fn sign_in(&self, token: &str) -> Result<UserModel, Error> {
        let claims = self.token_verifier.verify(token)?;

        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("sign in for Clerk user {}", claims.sub), || {
            let db = db.clone();
            let claims = claims.clone();

            Box::pin(async move {
                let txn = db.begin().await?;
                let user_repo = UserRepository::new(&txn);

                let user = match user_repo.get_by_clerk_user_id(&claims.sub).await? {
                    Some(user) => refresh_existing(&user_repo, user, &claims).await?,
                    None => {
                        let email = claims
                            .email
                            .clone()
                            .ok_or_else(|| AuthError::MissingEmailClaim(claims.sub.clone()))?;
                        let new_user = NewUser {
                            clerk_user_id: claims.sub.clone(),
                            email,
                            first_name: claims.first_name.clone(),
                            last_name: claims.last_name.clone(),
                            image_url: claims.image_url.clone(),
                        };

                        match create_user(&txn, new_user).await? {
                            Ok(user) => {
                                tracing::info!("Created user ID {} on first sign-in", user.id);

                                user
                            }
                            // A concurrent first sign-in of the same Clerk user inserted first
                            Err(conflict) => {
                                let user = user_repo
                                    .get_by_clerk_user_id(&claims.sub)
                                    .await?
                                    .ok_or(conflict)?;

                                refresh_existing(&user_repo, user, &claims).await?
                            }
                        }
                    }
                };

                let user = user_repo.touch_last_login(user.id).await?.ok_or_else(|| {
                    Error::InternalError(format!(
                        "User ID {} disappeared during sign-in transaction",
                        user.id
                    ))
                })?;

                txn.commit().await?;

                Ok(user)
            })
        })
        .await
    }

    /// Loads the user stored in the session.
    ///
    /// # Returns
    /// - `Ok(Some(UserModel))` - User exists
    /// - `Ok(None)` - User was deleted since signing in
    /// - `Err(Error::DbErr)` - Database operation failed after retries
    pub async fn get_current_user(&self, user_id: i32) -> Result<Option<UserModel>, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("get user ID {}", user_id), || {
            let db = db.clone();

            Box::pin(async move {
                let user_repo = UserRepository::new(&db);

                Ok(user_repo.get_by_id(user_id).await?)
            })
        })
        .await
    }
}

/// Rejects suspended or deactivated users, otherwise refreshes their profile from `claims`
async fn refresh_existing<C: ConnectionTrait>(
    user_repo: &UserRepository<'_, C>,
    user: UserModel,
    claims: &ClerkClaims,
) -> Result<UserModel, Error> {
    if user.suspended {
        return Err(AuthError::UserSuspended(user.id).into());
    }
    if !user.is_active {
        return Err(AuthError::UserInactive(user.id).into());
    }

    let profile = ProfileUpdate {
        email: claims.email.clone(),
        first_name: claims.first_name.clone(),
        last_name: claims.last_name.clone(),
        image_url: claims.image_url.clone(),
    };
    user_repo.update_profile(user.id, profile).await?;

    Ok(user)
}

/// Inserts the user under a savepoint so a unique index violation leaves `txn` usable.
///
/// Returns the violation as `Ok(Err(_))`, any other failure as `Err(_)`.
async fn create_user(
    txn: &DatabaseTransaction,
    new_user: NewUser,
) -> Result<Result<UserModel, DbErr>, Error> {
    let savepoint = txn.begin().await?;

    match UserRepository::new(&savepoint).create(new_user).await {
        Ok(user) => {
            savepoint.commit().await?;
            Ok(Ok(user))
        }
        Err(err) if is_unique_violation(&err) => {
            savepoint.rollback().await?;
            Ok(Err(err))
        }
        Err(err) => Err(err.into()),
    }
}
