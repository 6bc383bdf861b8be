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

//! Database abstraction to manipulate coupons and their ownership relations.

use crate::db::{DbError, DbResult, Executor};
#[cfg(feature = "postgres")]
use crate::db::postgres;
#[cfg(feature = "sqlite")]
use crate::db::sqlite;
use crate::model::{Coupon, OwnedCoupon};
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(feature = "sqlite")]
use sqlx::sqlite::SqliteRow;

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Coupon {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let coupon_type: String = row.try_get("coupon_type").map_err(postgres::map_sqlx_error)?;
        let amount: i32 = row.try_get("amount").map_err(postgres::map_sqlx_error)?;

        Ok(Coupon::new(id, name, coupon_type, amount))
    }
}

#[cfg(feature = "sqlite")]
impl TryFrom<SqliteRow> for Coupon {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let coupon_type: String = row.try_get("coupon_type").map_err(sqlite::map_sqlx_error)?;
        let amount: i32 = row.try_get("amount").map_err(sqlite::map_sqlx_error)?;

        Ok(Coupon::new(id, name, coupon_type, amount))
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for OwnedCoupon {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let user_id: i32 = row.try_get("user_id").map_err(postgres::map_sqlx_error)?;
        let coupon_id: i32 = row.try_get("coupon_id").map_err(postgres::map_sqlx_error)?;
        let coupon_type: String = row.try_get("coupon_type").map_err(postgres::map_sqlx_error)?;
        let is_used: bool = row.try_get("is_used").map_err(postgres::map_sqlx_error)?;

        Ok(OwnedCoupon::new(id, user_id, coupon_id, coupon_type, is_used))
    }
}

#[cfg(feature = "sqlite")]
impl TryFrom<SqliteRow> for OwnedCoupon {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let user_id: i32 = row.try_get("user_id").map_err(sqlite::map_sqlx_error)?;
        let coupon_id: i32 = row.try_get("coupon_id").map_err(sqlite::map_sqlx_error)?;
        let coupon_type: String = row.try_get("coupon_type").map_err(sqlite::map_sqlx_error)?;
        let is_used: bool = row.try_get("is_used").map_err(sqlite::map_sqlx_error)?;

        Ok(OwnedCoupon::new(id, user_id, coupon_id, coupon_type, is_used))
    }
}

/// Creates a new coupon.
pub(crate) async fn create_coupon(
    ex: &mut Executor,
    name: &str,
    coupon_type: &str,
    amount: i32,
) -> DbResult<Coupon> {
    let id = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO coupons (name, coupon_type, amount)
                VALUES ($1, $2, $3)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(name)
                .bind(coupon_type)
                .bind(amount)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(feature = "sqlite")]
        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO coupons (name, coupon_type, amount) VALUES (?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(name)
                .bind(coupon_type)
                .bind(amount)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            i32::try_from(done.last_insert_rowid())
                .map_err(|e| DbError::DataIntegrityError(format!("Invalid row id: {}", e)))?
        }

        #[allow(unreachable_patterns)]
        _ => unreachable!(),
    };

    Ok(Coupon::new(id, name.to_owned(), coupon_type.to_owned(), amount))
}

/// Gets an existing coupon by its `id`.
pub(crate) async fn get_coupon(ex: &mut Executor, id: i32) -> DbResult<Coupon> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, name, coupon_type, amount FROM coupons WHERE id = $1";
            let raw_coupon = sqlx::query(query_str)
                .bind(id)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Coupon::try_from(raw_coupon)
        }

        #[cfg(feature = "sqlite")]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, name, coupon_type, amount FROM coupons WHERE id = ?";
            let raw_coupon = sqlx::query(query_str)
                .bind(id)
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Coupon::try_from(raw_coupon)
        }

        #[allow(unreachable_patterns)]
        _ => unreachable!(),
    }
}

/// Gets all coupons, optionally restricted to those of type `coupon_type`, in creation order.
pub(crate) async fn list_coupons(
    ex: &mut Executor,
    coupon_type: Option<&str>,
) -> DbResult<Vec<Coupon>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let mut query_str =
                "SELECT id, name, coupon_type, amount FROM coupons".to_owned();
            if coupon_type.is_some() {
                query_str.push_str(" WHERE coupon_type = $1");
            }
            query_str.push_str(" ORDER BY id");

            let mut query = sqlx::query(&query_str);
            if let Some(coupon_type) = coupon_type {
                query = query.bind(coupon_type);
            }
            let raw_coupons = query.fetch_all(ex.conn()).await.map_err(postgres::map_sqlx_error)?;
            raw_coupons.into_iter().map(Coupon::try_from).collect()
        }

        #[cfg(feature = "sqlite")]
        Executor::Sqlite(ex) => {
            let mut query_str =
                "SELECT id, name, coupon_type, amount FROM coupons".to_owned();
            if coupon_type.is_some() {
                query_str.push_str(" WHERE coupon_type = ?");
            }
            query_str.push_str(" ORDER BY id");

            let mut query = sqlx::query(&query_str);
            if let Some(coupon_type) = coupon_type {
                query = query.bind(coupon_type);
            }
            let raw_coupons = query.fetch_all(ex.conn()).await.map_err(sqlite::map_sqlx_error)?;
            raw_coupons.into_iter().map(Coupon::try_from).collect()
        }

        #[allow(unreachable_patterns)]
        _ => unreachable!(),
    }
}

/// Registers `coupon` into the owned list of the user with `user_id`.
pub(crate) async fn create_owned_coupon(
    ex: &mut Executor,
    user_id: i32,
    coupon: &Coupon,
    is_used: bool,
) -> DbResult<OwnedCoupon> {
    let id = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO owned_coupons (user_id, coupon_id, coupon_type, is_used)
                VALUES ($1, $2, $3, $4)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(user_id)
                .bind(coupon.id())
                .bind(coupon.coupon_type())
                .bind(is_used)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(feature = "sqlite")]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO owned_coupons (user_id, coupon_id, coupon_type, is_used)
                VALUES (?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(user_id)
                .bind(coupon.id())
                .bind(coupon.coupon_type())
                .bind(is_used)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            i32::try_from(done.last_insert_rowid())
                .map_err(|e| DbError::DataIntegrityError(format!("Invalid row id: {}", e)))?
        }

        #[allow(unreachable_patterns)]
        _ => unreachable!(),
    };

    Ok(OwnedCoupon::new(id, user_id, *coupon.id(), coupon.coupon_type().clone(), is_used))
}

/// Gets the ownership relations of the user with `user_id`, in creation order.
///
/// The optional `coupon_type` and `is_used` restrictions compose with AND semantics.
pub(crate) async fn list_owned_coupons(
    ex: &mut Executor,
    user_id: i32,
    coupon_type: Option<&str>,
    is_used: Option<bool>,
) -> DbResult<Vec<OwnedCoupon>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let mut query_str = "
                SELECT id, user_id, coupon_id, coupon_type, is_used
                FROM owned_coupons WHERE user_id = $1"
                .to_owned();
            let mut position = 2;
            if coupon_type.is_some() {
                query_str.push_str(&format!(" AND coupon_type = ${}", position));
                position += 1;
            }
            if is_used.is_some() {
                query_str.push_str(&format!(" AND is_used = ${}", position));
            }
            query_str.push_str(" ORDER BY id");

            let mut query = sqlx::query(&query_str).bind(user_id);
            if let Some(coupon_type) = coupon_type {
                query = query.bind(coupon_type);
            }
            if let Some(is_used) = is_used {
                query = query.bind(is_used);
            }
            let raw_owned = query.fetch_all(ex.conn()).await.map_err(postgres::map_sqlx_error)?;
            raw_owned.into_iter().map(OwnedCoupon::try_from).collect()
        }

        #[cfg(feature = "sqlite")]
        Executor::Sqlite(ex) => {
            let mut query_str = "
                SELECT id, user_id, coupon_id, coupon_type, is_used
                FROM owned_coupons WHERE user_id = ?"
                .to_owned();
            if coupon_type.is_some() {
                query_str.push_str(" AND coupon_type = ?");
            }
            if is_used.is_some() {
                query_str.push_str(" AND is_used = ?");
            }
            query_str.push_str(" ORDER BY id");

            let mut query = sqlx::query(&query_str).bind(user_id);
            if let Some(coupon_type) = coupon_type {
                query = query.bind(coupon_type);
            }
            if let Some(is_used) = is_used {
                query = query.bind(is_used);
            }
            let raw_owned = query.fetch_all(ex.conn()).await.map_err(sqlite::map_sqlx_error)?;
            raw_owned.into_iter().map(OwnedCoupon::try_from).collect()
        }

        #[allow(unreachable_patterns)]
        _ => unreachable!(),
    }
}
