use async_trait::async_trait;
use diesel::prelude::*;
use log::error;
use uuid::Uuid;

use crate::auth::types::UserDraft;
use crate::core::models::{NewUser, User};
use crate::core::utils::{DbPool, StoreError};

/// Account lookup and creation as consumed by the auth handlers.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn insert(&self, draft: UserDraft) -> Result<User, StoreError>;
}

pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, account_email: &str) -> Result<Option<User>, StoreError> {
        use crate::core::schema::users::dsl;

        let mut conn = self.pool.get().map_err(|e| {
            error!("Failed to get database connection: {e}");
            StoreError::Unavailable
        })?;

        let user = dsl::users
            .filter(dsl::email.eq(account_email))
            .first::<User>(&mut conn)
            .optional()?;
        Ok(user)
    }

    async fn insert(&self, draft: UserDraft) -> Result<User, StoreError> {
        use crate::core::schema::users::dsl;

        let mut conn = self.pool.get().map_err(|e| {
            error!("Failed to get database connection: {e}");
            StoreError::Unavailable
        })?;

        let user = diesel::insert_into(dsl::users)
            .values(&NewUser {
                id: Uuid::new_v4(),
                name: draft.name,
                email: draft.email,
                password_hash: draft.password_hash,
            })
            .get_result::<User>(&mut conn)?;
        Ok(user)
    }
}
