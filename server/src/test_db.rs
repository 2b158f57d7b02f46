//! Postgres fixtures for tests that exercise the real store.
//!
//! Set `TEST_DATABASE_URL` to a disposable database to run them; without it
//! they return early. Every test works on its own freshly created users.

use crate::auth::create_session;
use crate::db::{create_pool, DbPool};
use crate::models::{NewUser, User};
use crate::schema::users;
use diesel::prelude::*;
use std::sync::LazyLock;
use uuid::Uuid;

/// One pool per test binary so migrations run once.
static POOL: LazyLock<Option<DbPool>> = LazyLock::new(|| {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    Some(create_pool(&url))
});

pub fn pool() -> Option<DbPool> {
    let pool = (*POOL).clone();
    if pool.is_none() {
        eprintln!("TEST_DATABASE_URL not set, skipping database test");
    }
    pool
}

pub fn create_user(pool: &DbPool) -> User {
    let mut conn = pool.get().unwrap();
    let username = format!("test-{}", Uuid::new_v4());

    diesel::insert_into(users::table)
        .values(&NewUser {
            username: &username,
            password_hash: "not-a-real-hash",
        })
        .returning(User::as_returning())
        .get_result(&mut conn)
        .unwrap()
}

/// Create a user and a session for them, returning the bearer token.
pub fn signed_in_user(pool: &DbPool) -> (User, String) {
    let user = create_user(pool);
    let mut conn = pool.get().unwrap();
    let token = create_session(&mut conn, user.id).unwrap();
    (user, token)
}

/// Remove a user; sessions, surveys and recipes cascade.
pub fn delete_user(pool: &DbPool, user_id: Uuid) {
    let mut conn = pool.get().unwrap();
    diesel::delete(users::table.find(user_id))
        .execute(&mut conn)
        .unwrap();
}
