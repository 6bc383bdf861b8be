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

//! Database abstraction to manipulate country reference records.

use crate::db::{DbError, DbResult, Executor};
#[cfg(feature = "postgres")]
use crate::db::postgres;
#[cfg(feature = "sqlite")]
use crate::db::sqlite;
use crate::model::{Country, CountryCode, CountryColumn, CountryFilter};
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(feature = "sqlite")]
use sqlx::sqlite::SqliteRow;

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Country {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let country_code: String = row.try_get("country_code").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let d_code: String = row.try_get("d_code").map_err(postgres::map_sqlx_error)?;

        Ok(Country::new(id, CountryCode::new(country_code)?, name, d_code))
    }
}

#[cfg(feature = "sqlite")]
impl TryFrom<SqliteRow> for Country {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let country_code: String = row.try_get("country_code").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let d_code: String = row.try_get("d_code").map_err(sqlite::map_sqlx_error)?;

        Ok(Country::new(id, CountryCode::new(country_code)?, name, d_code))
    }
}

/// Placeholder syntax understood by the target backend.
#[derive(Clone, Copy)]
enum Placeholders {
    /// `$1`, `$2`, ... as used by PostgreSQL.
    Numbered,

    /// `?` as used by SQLite.
    Anonymous,
}

impl Placeholders {
    /// Formats the placeholder for the bind at 1-based `position`.
    fn format(&self, position: usize) -> String {
        match self {
            Placeholders::Numbered => format!("${}", position),
            Placeholders::Anonymous => "?".to_owned(),
        }
    }
}

/// Returns the schema column name for `column`.
fn column_name(column: CountryColumn) -> &'static str {
    match column {
        CountryColumn::CountryCode => "country_code",
        CountryColumn::DialCode => "d_code",
        CountryColumn::Name => "name",
    }
}

/// Renders `filter` as a SQL condition, appending the values to bind to `binds`.
fn render_filter(filter: &CountryFilter, ph: Placeholders, binds: &mut Vec<String>) -> String {
    match filter {
        CountryFilter::Equals(column, value) => {
            binds.push(value.clone());
            format!("{} = {}", column_name(*column), ph.format(binds.len()))
        }

        CountryFilter::Contains(column, value) => {
            binds.push(format!("%{}%", value));
            format!("{} LIKE {}", column_name(*column), ph.format(binds.len()))
        }

        CountryFilter::AnyOf(filters) => {
            // An empty disjunction matches nothing.
            if filters.is_empty() {
                return "1 = 0".to_owned();
            }
            let conditions: Vec<String> =
                filters.iter().map(|filter| render_filter(filter, ph, binds)).collect();
            format!("({})", conditions.join(" OR "))
        }
    }
}

/// Creates a new country record.
///
/// Name uniqueness is enforced by the schema, so a duplicate insert surfaces as
/// `DbError::AlreadyExists` regardless of any checks performed beforehand.
pub(crate) async fn create_country(
    ex: &mut Executor,
    country_code: &CountryCode,
    name: &str,
    d_code: &str,
) -> DbResult<Country> {
    let id = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO countries (country_code, name, d_code)
                VALUES ($1, $2, $3)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(country_code.as_str())
                .bind(name)
                .bind(d_code)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(feature = "sqlite")]
        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO countries (country_code, name, d_code) VALUES (?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(country_code.as_str())
                .bind(name)
                .bind(d_code)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            i32::try_from(done.last_insert_rowid())
                .map_err(|e| DbError::DataIntegrityError(format!("Invalid row id: {}", e)))?
        }

        #[allow(unreachable_patterns)]
        _ => unreachable!(),
    };

    Ok(Country::new(id, country_code.clone(), name.to_owned(), d_code.to_owned()))
}

/// Counts the country records whose name is exactly `name`.
pub(crate) async fn count_countries_by_name(ex: &mut Executor, name: &str) -> DbResult<i64> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT COUNT(*) AS count FROM countries WHERE name = $1";
            let row = sqlx::query(query_str)
                .bind(name)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("count").map_err(postgres::map_sqlx_error)
        }

        #[cfg(feature = "sqlite")]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT COUNT(*) AS count FROM countries WHERE name = ?";
            let row = sqlx::query(query_str)
                .bind(name)
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("count").map_err(sqlite::map_sqlx_error)
        }

        #[allow(unreachable_patterns)]
        _ => unreachable!(),
    }
}

/// Gets the country records matching `filter`, in creation order.
pub(crate) async fn search_countries(
    ex: &mut Executor,
    filter: &CountryFilter,
) -> DbResult<Vec<Country>> {
    let mut binds = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let condition = render_filter(filter, Placeholders::Numbered, &mut binds);
            let query_str = format!(
                "SELECT id, country_code, name, d_code FROM countries WHERE {} ORDER BY id",
                condition
            );
            let mut query = sqlx::query(&query_str);
            for bind in &binds {
                query = query.bind(bind);
            }
            let raw_countries =
                query.fetch_all(ex.conn()).await.map_err(postgres::map_sqlx_error)?;
            raw_countries.into_iter().map(Country::try_from).collect()
        }

        #[cfg(feature = "sqlite")]
        Executor::Sqlite(ex) => {
            let condition = render_filter(filter, Placeholders::Anonymous, &mut binds);
            let query_str = format!(
                "SELECT id, country_code, name, d_code FROM countries WHERE {} ORDER BY id",
                condition
            );
            let mut query = sqlx::query(&query_str);
            for bind in &binds {
                query = query.bind(bind);
            }
            let raw_countries =
                query.fetch_all(ex.conn()).await.map_err(sqlite::map_sqlx_error)?;
            raw_countries.into_iter().map(Country::try_from).collect()
        }

        #[allow(unreachable_patterns)]
        _ => unreachable!(),
    }
}
