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

//! API for a user to register a coupon into their owned list.

use crate::driver::Driver;
use crate::rest::{auth, RestError};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
#[cfg(test)]
use serde::Serialize;

/// Message sent to the server to register a coupon.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct RegisterCouponRequest {
    /// Identifier of the coupon to register.
    pub(crate) coupon_id: i32,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    headers: HeaderMap,
    Json(request): Json<RegisterCouponRequest>,
) -> Result<impl IntoResponse, RestError> {
    let caller = auth::require_user(&driver, &headers).await?;
    let owned = driver.register_coupon(&caller, request.coupon_id).await?;
    Ok((http::StatusCode::CREATED, Json(owned)))
}
