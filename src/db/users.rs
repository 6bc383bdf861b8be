// Storefront
// Copyright 2025 The Storefront Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Database abstraction to manipulate users and their sessions.
//!
//! Users and sessions are provisioned by a separate account-management process.  The operations
//! here exist to resolve the caller behind a bearer token and to seed test scenarios.

use crate::db::{DbError, DbResult, Executor};
#[cfg(feature = "postgres")]
use crate::db::postgres;
#[cfg(feature = "sqlite")]
use crate::db::sqlite;
use crate::model::{AccessToken, Rank, User, Username};
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(feature = "sqlite")]
use sqlx::sqlite::SqliteRow;

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for User {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let username: String = row.try_get("username").map_err(postgres::map_sqlx_error)?;
        let rank: String = row.try_get("rank").map_err(postgres::map_sqlx_error)?;

        Ok(User::new(id, Username::new(username)?, rank.parse::<Rank>()?))
    }
}

#[cfg(feature = "sqlite")]
impl TryFrom<SqliteRow> for User {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let username: String = row.try_get("username").map_err(sqlite::map_sqlx_error)?;
        let rank: String = row.try_get("rank").map_err(sqlite::map_sqlx_error)?;

        Ok(User::new(id, Username::new(username)?, rank.parse::<Rank>()?))
    }
}

/// Creates a new user named `username` with the privilege `rank`.
pub(crate) async fn create_user(
    ex: &mut Executor,
    username: &Username,
    rank: Rank,
) -> DbResult<User> {
    let id = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "INSERT INTO users (username, rank) VALUES ($1, $2) RETURNING id";
            let row = sqlx::query(query_str)
                .bind(username.as_str())
                .bind(rank.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(feature = "sqlite")]
        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO users (username, rank) VALUES (?, ?)";
            let done = sqlx::query(query_str)
                .bind(username.as_str())
                .bind(rank.as_str())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            i32::try_from(done.last_insert_rowid())
                .map_err(|e| DbError::DataIntegrityError(format!("Invalid row id: {}", e)))?
        }

        #[allow(unreachable_patterns)]
        _ => unreachable!(),
    };

    Ok(User::new(id, username.clone(), rank))
}

/// Gets information about an existing user with the given `id`.
pub(crate) async fn get_user(ex: &mut Executor, id: i32) -> DbResult<User> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, username, rank FROM users WHERE id = $1";
            let raw_user = sqlx::query(query_str)
                .bind(id)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            User::try_from(raw_user)
        }

        #[cfg(feature = "sqlite")]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, username, rank FROM users WHERE id = ?";
            let raw_user = sqlx::query(query_str)
                .bind(id)
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            User::try_from(raw_user)
        }

        #[allow(unreachable_patterns)]
        _ => unreachable!(),
    }
}

/// Saves a session resolving `access_token` to the user with `user_id`.
pub(crate) async fn put_session(
    ex: &mut Executor,
    access_token: &AccessToken,
    user_id: i32,
) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "INSERT INTO sessions (access_token, user_id) VALUES ($1, $2)";
            let done = sqlx::query(query_str)
                .bind(access_token.as_str())
                .bind(user_id)
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(feature = "sqlite")]
        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO sessions (access_token, user_id) VALUES (?, ?)";
            let done = sqlx::query(query_str)
                .bind(access_token.as_str())
                .bind(user_id)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unreachable_patterns)]
        _ => unreachable!(),
    };

    if rows_affected != 1 {
        return Err(DbError::BackendError("Insertion affected more than one row".to_owned()));
    }
    Ok(())
}

/// Gets the user that owns the session identified by `access_token`.
pub(crate) async fn get_session_user(
    ex: &mut Executor,
    access_token: &AccessToken,
) -> DbResult<User> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT users.id AS id, users.username AS username, users.rank AS rank
                FROM sessions JOIN users ON users.id = sessions.user_id
                WHERE sessions.access_token = $1";
            let raw_user = sqlx::query(query_str)
                .bind(access_token.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            User::try_from(raw_user)
        }

        #[cfg(feature = "sqlite")]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT users.id AS id, users.username AS username, users.rank AS rank
                FROM sessions JOIN users ON users.id = sessions.user_id
                WHERE sessions.access_token = ?";
            let raw_user = sqlx::query(query_str)
                .bind(access_token.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            User::try_from(raw_user)
        }

        #[allow(unreachable_patterns)]
        _ => unreachable!(),
    }
}
