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

//! API to list the coupons owned by an arbitrary user.

use crate::driver::Driver;
use crate::rest::{auth, EmptyBody, RestError};
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

/// Query parameters accepted by this API.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GetOwnedCouponsQuery {
    /// When present, restricts the listing to coupons of this type.
    coupon_type: Option<String>,

    /// When present, restricts the listing by usage state.
    is_used: Option<bool>,
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
    Query(query): Query<GetOwnedCouponsQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let _operator = auth::require_operator(&driver, &headers).await?;
    let owned = driver.get_owned_coupons(user_id, query.coupon_type, query.is_used).await?;
    Ok(Json(owned))
}
