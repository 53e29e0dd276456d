use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::repo_types::{NewUser, User};

pub(crate) const INSERT_USER_SQL: &str = r#"
    INSERT INTO users (full_name, email, password, date_of_birth,
                       receive_marketing, accept_cookies, profile_picture)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
    RETURNING id, full_name, email, password, date_of_birth,
              receive_marketing, accept_cookies, profile_picture
"#;

pub(crate) const FIND_BY_CREDENTIALS_SQL: &str = r#"
    SELECT id, full_name, email, password, date_of_birth,
           receive_marketing, accept_cookies, profile_picture
    FROM users
    WHERE email = $1 AND password = $2
"#;

/// Persistence port for the `users` relation.
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Insert one row and return it as stored.
    async fn insert(&self, user: &NewUser) -> anyhow::Result<User>;

    /// First row whose email and password both match exactly.
    async fn find_by_credentials(&self, email: &str, password: &str)
        -> anyhow::Result<Option<User>>;
}

#[derive(Clone)]
pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn insert(&self, user: &NewUser) -> anyhow::Result<User> {
        let row = sqlx::query_as::<_, User>(INSERT_USER_SQL)
            .bind(&user.full_name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(user.date_of_birth)
            .bind(user.receive_marketing)
            .bind(user.accept_cookies)
            .bind(&user.profile_picture)
            .fetch_one(&self.db)
            .await?;
        Ok(row)
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, User>(FIND_BY_CREDENTIALS_SQL)
            .bind(email)
            .bind(password)
            .fetch_optional(&self.db)
            .await?;
        Ok(row)
    }
}
