use serde::{Deserialize, Serialize};

use crate::{
    auth::repo_types::{parse_date, NewUser, User},
    error::AccountError,
};

/// Request body for `POST /signup`.
///
/// Every field is optional on the wire; [`SignupRequest::validate`] decides
/// which ones are required.
#[derive(Debug, Default, Deserialize)]
pub struct SignupRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub dob: Option<String>,
    pub receive_marketing: Option<bool>,
    pub accept_cookies: Option<bool>,
    pub profile_picture: Option<String>,
}

impl SignupRequest {
    pub fn validate(self) -> Result<NewUser, AccountError> {
        let full_name = self.full_name.ok_or_else(|| AccountError::missing("full_name"))?;
        let email = self.email.ok_or_else(|| AccountError::missing("email"))?;
        let password = self.password.ok_or_else(|| AccountError::missing("password"))?;
        let dob = self.dob.ok_or_else(|| AccountError::missing("dob"))?;
        let date_of_birth =
            parse_date(&dob).map_err(|e| AccountError::invalid("dob", e.to_string()))?;

        Ok(NewUser {
            full_name,
            email,
            password,
            date_of_birth,
            receive_marketing: self.receive_marketing,
            accept_cookies: self.accept_cookies,
            profile_picture: self.profile_picture,
        })
    }
}

/// Request body for `POST /login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Credentials after presence checks. Empty strings are allowed.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(self) -> Result<Credentials, AccountError> {
        Ok(Credentials {
            email: self.email.ok_or_else(|| AccountError::missing("email"))?,
            password: self.password.ok_or_else(|| AccountError::missing("password"))?,
        })
    }
}

/// Success body shared by signup and login.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub message: &'static str,
    pub user: User,
}
