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

//! Database abstraction to manipulate product listings.

use crate::db::{DbError, DbResult, Executor};
#[cfg(feature = "postgres")]
use crate::db::postgres;
#[cfg(feature = "sqlite")]
use crate::db::sqlite;
use crate::model::Product;
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(feature = "sqlite")]
use sqlx::sqlite::SqliteRow;

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Product {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(postgres::map_sqlx_error)?;
        let price: i32 = row.try_get("price").map_err(postgres::map_sqlx_error)?;
        let stock: i32 = row.try_get("stock").map_err(postgres::map_sqlx_error)?;
        let owner_id: i32 = row.try_get("owner_id").map_err(postgres::map_sqlx_error)?;

        Ok(Product::new(id, title, price, stock, owner_id))
    }
}

#[cfg(feature = "sqlite")]
impl TryFrom<SqliteRow> for Product {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(sqlite::map_sqlx_error)?;
        let price: i32 = row.try_get("price").map_err(sqlite::map_sqlx_error)?;
        let stock: i32 = row.try_get("stock").map_err(sqlite::map_sqlx_error)?;
        let owner_id: i32 = row.try_get("owner_id").map_err(sqlite::map_sqlx_error)?;

        Ok(Product::new(id, title, price, stock, owner_id))
    }
}

/// Creates a new product listing owned by the user with `owner_id`.
pub(crate) async fn create_product(
    ex: &mut Executor,
    title: &str,
    price: i32,
    stock: i32,
    owner_id: i32,
) -> DbResult<Product> {
    let id = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO products (title, price, stock, owner_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(title)
                .bind(price)
                .bind(stock)
                .bind(owner_id)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(feature = "sqlite")]
        Executor::Sqlite(ex) => {
            let query_str =
                "INSERT INTO products (title, price, stock, owner_id) VALUES (?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(title)
                .bind(price)
                .bind(stock)
                .bind(owner_id)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            i32::try_from(done.last_insert_rowid())
                .map_err(|e| DbError::DataIntegrityError(format!("Invalid row id: {}", e)))?
        }

        #[allow(unreachable_patterns)]
        _ => unreachable!(),
    };

    Ok(Product::new(id, title.to_owned(), price, stock, owner_id))
}

/// Gets an existing product by its `id`.
pub(crate) async fn get_product(ex: &mut Executor, id: i32) -> DbResult<Product> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str =
                "SELECT id, title, price, stock, owner_id FROM products WHERE id = $1";
            let raw_product = sqlx::query(query_str)
                .bind(id)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Product::try_from(raw_product)
        }

        #[cfg(feature = "sqlite")]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, title, price, stock, owner_id FROM products WHERE id = ?";
            let raw_product = sqlx::query(query_str)
                .bind(id)
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Product::try_from(raw_product)
        }

        #[allow(unreachable_patterns)]
        _ => unreachable!(),
    }
}

/// Gets all products owned by the user with `owner_id`, in creation order.
pub(crate) async fn list_products_by_owner(
    ex: &mut Executor,
    owner_id: i32,
) -> DbResult<Vec<Product>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT id, title, price, stock, owner_id
                FROM products WHERE owner_id = $1 ORDER BY id";
            let raw_products = sqlx::query(query_str)
                .bind(owner_id)
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            raw_products.into_iter().map(Product::try_from).collect()
        }

        #[cfg(feature = "sqlite")]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT id, title, price, stock, owner_id
                FROM products WHERE owner_id = ? ORDER BY id";
            let raw_products = sqlx::query(query_str)
                .bind(owner_id)
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            raw_products.into_iter().map(Product::try_from).collect()
        }

        #[allow(unreachable_patterns)]
        _ => unreachable!(),
    }
}
