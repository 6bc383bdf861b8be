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

//! API to search for country records.
//!
//! The search grammar lives in the raw query string, not in structured parameters, so this
//! handler passes the query through to the driver untouched.

use crate::driver::Driver;
use crate::rest::{auth, EmptyBody, RestError};
use axum::extract::{RawQuery, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    headers: HeaderMap,
    RawQuery(raw_query): RawQuery,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let caller = auth::require_user(&driver, &headers).await?;
    let countries = driver.search_countries(&caller, raw_query).await?;
    Ok(Json(countries))
}

#[cfg(test)]
mod tests {
    use crate::model::{Country, Rank};
    use crate::rest::testutils::*;
    use axum::http;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/api/countries".to_owned())
    }

    #[tokio::test]
    async fn test_search_by_keyword() {
        let context = TestContext::setup().await;

        let manager = context.create_user("manager", Rank::Manager).await;
        let token = context.login(&manager).await;

        let korea = context.create_country("+82", "Korea", "+82").await;
        let north_korea = context.create_country("+850", "North Korea", "+850").await;
        context.create_country("+1", "Canada", "+1").await;

        let response = OneShotBuilder::new(context.into_app(), route())
            .with_raw_query("name=Korea")
            .with_bearer_auth(token.as_str())
            .send_empty()
            .await
            .expect_json::<Vec<Country>>()
            .await;
        assert_eq!(vec![korea, north_korea], response);
    }

    #[tokio::test]
    async fn test_search_by_dial_code_ignores_other_parameters() {
        let context = TestContext::setup().await;

        let manager = context.create_user("manager", Rank::Manager).await;
        let token = context.login(&manager).await;

        let korea = context.create_country("+82", "Korea", "+82").await;
        context.create_country("+1", "Canada", "+1").await;

        let response = OneShotBuilder::new(context.into_app(), route())
            .with_raw_query("name=Canada&dCode=+82")
            .with_bearer_auth(token.as_str())
            .send_empty()
            .await
            .expect_json::<Vec<Country>>()
            .await;
        assert_eq!(vec![korea], response);
    }

    #[tokio::test]
    async fn test_empty_result() {
        let context = TestContext::setup().await;

        let manager = context.create_user("manager", Rank::Manager).await;
        let token = context.login(&manager).await;

        let response = OneShotBuilder::new(context.into_app(), route())
            .with_raw_query("name=Atlantis")
            .with_bearer_auth(token.as_str())
            .send_empty()
            .await
            .expect_json::<Vec<Country>>()
            .await;
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_unauthenticated() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_status(http::StatusCode::UNAUTHORIZED)
            .expect_error("Missing Authorization")
            .await;
    }

    #[tokio::test]
    async fn test_non_manager_is_forbidden() {
        let context = TestContext::setup().await;

        let operator = context.create_user("operator", Rank::Operator).await;
        let token = context.login(&operator).await;

        OneShotBuilder::new(context.into_app(), route())
            .with_raw_query("name=Korea")
            .with_bearer_auth(token.as_str())
            .send_empty()
            .await
            .expect_status(http::StatusCode::FORBIDDEN)
            .expect_error("Manager privileges required")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route());
}
