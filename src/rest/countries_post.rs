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

//! API to create a new country record.

use crate::driver::Driver;
use crate::rest::{auth, RestError};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
#[cfg(test)]
use serde::Serialize;

/// Message sent to the server to create a country record.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct CreateCountryRequest {
    /// Unique display name of the country.
    pub(crate) name: String,

    /// Calling code of the country.
    pub(crate) country_code: String,

    /// Dial code used when routing calls to the country.
    pub(crate) d_code: String,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    headers: HeaderMap,
    Json(request): Json<CreateCountryRequest>,
) -> Result<impl IntoResponse, RestError> {
    let caller = auth::require_user(&driver, &headers).await?;
    let country = driver
        .create_country(&caller, request.name, request.country_code, request.d_code)
        .await?;
    Ok((http::StatusCode::CREATED, Json(country)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Country, Rank};
    use crate::rest::testutils::*;
    use axum::http;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/api/countries".to_owned())
    }

    fn request() -> CreateCountryRequest {
        CreateCountryRequest {
            name: "Korea".to_owned(),
            country_code: "+82".to_owned(),
            d_code: "+82".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let manager = context.create_user("manager", Rank::Manager).await;
        let token = context.login(&manager).await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_bearer_auth(token.as_str())
            .send_json(request())
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Country>()
            .await;
        assert_eq!("Korea", response.name());
        assert_eq!("+82", response.country_code().as_str());
        assert_eq!("+82", response.d_code());
    }

    #[tokio::test]
    async fn test_unauthenticated() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route())
            .send_json(request())
            .await
            .expect_status(http::StatusCode::UNAUTHORIZED)
            .expect_error("Missing Authorization")
            .await;
    }

    #[tokio::test]
    async fn test_non_manager_is_forbidden() {
        let context = TestContext::setup().await;

        let regular = context.create_user("regular", Rank::Regular).await;
        let operator = context.create_user("operator", Rank::Operator).await;

        for user in [regular, operator] {
            let token = context.login(&user).await;
            OneShotBuilder::new(context.app(), route())
                .with_bearer_auth(token.as_str())
                .send_json(request())
                .await
                .expect_status(http::StatusCode::FORBIDDEN)
                .expect_error("Manager privileges required")
                .await;
        }
    }

    #[tokio::test]
    async fn test_invalid_country_code() {
        let context = TestContext::setup().await;

        let manager = context.create_user("manager", Rank::Manager).await;
        let token = context.login(&manager).await;

        let request = CreateCountryRequest {
            name: "Korea".to_owned(),
            country_code: "82".to_owned(),
            d_code: "+82".to_owned(),
        };
        OneShotBuilder::new(context.into_app(), route())
            .with_bearer_auth(token.as_str())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Invalid country code")
            .await;
    }

    #[tokio::test]
    async fn test_duplicate_name() {
        let context = TestContext::setup().await;

        let manager = context.create_user("manager", Rank::Manager).await;
        let token = context.login(&manager).await;
        context.create_country("+82", "Korea", "+82").await;

        OneShotBuilder::new(context.into_app(), route())
            .with_bearer_auth(token.as_str())
            .send_json(request())
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Duplicate country name")
            .await;
    }
}
