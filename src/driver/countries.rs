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

//! Operations on country reference records.
//!
//! Both operations are restricted to manager-rank callers because country records feed the
//! account-registration flow and are not user data.

use crate::db::{self, DbError};
use crate::driver::{Driver, DriverError, DriverResult};
use crate::model::{Country, CountryCode, CountryColumn, CountryFilter, User};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// Matches the first dial-code-like fragment in a raw search query.
static DIAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+\d+").expect("Hardcoded regexp must be valid"));

/// Builds the search filter encoded in the `raw_query` string of a search request.
///
/// A fragment that looks like a dial code turns the search into an exact dial-code lookup and
/// everything else in the query is ignored.  Otherwise the keyword is whatever follows the first
/// `=`, and the search matches it against the name and the country code.
fn parse_search_query(raw_query: &str) -> CountryFilter {
    if let Some(dial_code) = DIAL_CODE_RE.find(raw_query) {
        return CountryFilter::Equals(CountryColumn::DialCode, dial_code.as_str().to_owned());
    }

    let keyword = match raw_query.split_once('=') {
        Some((_, rest)) => rest,
        None => raw_query,
    };
    let keyword = keyword.split('&').next().unwrap_or("");

    CountryFilter::AnyOf(vec![
        CountryFilter::Contains(CountryColumn::Name, keyword.to_owned()),
        CountryFilter::Contains(CountryColumn::CountryCode, keyword.to_owned()),
    ])
}

impl Driver {
    /// Creates a new country record from the given raw fields.
    ///
    /// The duplicate-name pre-check races against concurrent creations by design; the schema's
    /// unique constraint is the authority and its violation reports the same error.
    pub(crate) async fn create_country(
        self,
        caller: &User,
        name: String,
        country_code: String,
        d_code: String,
    ) -> DriverResult<Country> {
        if !caller.rank().is_manager() {
            return Err(DriverError::Unauthorized("Manager privileges required".to_owned()));
        }

        let country_code = CountryCode::new(country_code)?;
        if name.is_empty() {
            return Err(DriverError::InvalidInput("Country name cannot be empty".to_owned()));
        }

        let mut tx = self.db.begin().await?;
        if db::countries::count_countries_by_name(tx.ex(), &name).await? > 0 {
            return Err(DriverError::AlreadyExists(format!("Duplicate country name '{}'", name)));
        }
        let country =
            match db::countries::create_country(tx.ex(), &country_code, &name, &d_code).await {
                Ok(country) => country,
                Err(DbError::AlreadyExists) => {
                    return Err(DriverError::AlreadyExists(format!(
                        "Duplicate country name '{}'",
                        name
                    )))
                }
                Err(e) => return Err(e.into()),
            };
        tx.commit().await?;
        Ok(country)
    }

    /// Searches for the country records matching the `raw_query` string.
    pub(crate) async fn search_countries(
        self,
        caller: &User,
        raw_query: Option<String>,
    ) -> DriverResult<Vec<Country>> {
        if !caller.rank().is_manager() {
            return Err(DriverError::Unauthorized("Manager privileges required".to_owned()));
        }

        let filter = parse_search_query(raw_query.as_deref().unwrap_or(""));
        debug!("Searching countries with filter {:?}", filter);

        let mut ex = self.db.ex().await?;
        let countries = db::countries::search_countries(&mut ex, &filter).await?;
        Ok(countries)
    }
}
