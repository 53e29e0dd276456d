use tracing::{debug, error, warn};

use crate::{
    auth::{
        repo::UserRepo,
        repo_types::{NewUser, User},
    },
    error::AccountError,
};

/// Insert a new user row and return it as stored.
pub async fn register(repo: &dyn UserRepo, new_user: &NewUser) -> Result<User, AccountError> {
    match repo.insert(new_user).await {
        Ok(user) => {
            debug!(user_id = %user.id, "user row inserted");
            Ok(user)
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "insert user failed");
            Err(AccountError::Storage(e))
        }
    }
}

/// Look up the user matching both email and password.
///
/// Unknown email and wrong password are reported identically.
pub async fn authenticate(
    repo: &dyn UserRepo,
    email: &str,
    password: &str,
) -> Result<User, AccountError> {
    match repo.find_by_credentials(email, password).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => {
            warn!(email = %email, "login rejected");
            Err(AccountError::InvalidCredentials)
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "find_by_credentials failed");
            Err(AccountError::Storage(e))
        }
    }
}
