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

//! API to create a new product listing.

use crate::driver::Driver;
use crate::rest::{auth, RestError};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
#[cfg(test)]
use serde::Serialize;

/// Message sent to the server to create a product.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct CreateProductRequest {
    /// Title of the listing.
    pub(crate) title: String,

    /// Asking price, in minor currency units.
    pub(crate) price: i32,

    /// Number of units available.
    pub(crate) stock: i32,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    headers: HeaderMap,
    Json(request): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, RestError> {
    let caller = auth::require_user(&driver, &headers).await?;
    let product =
        driver.create_product(&caller, request.title, request.price, request.stock).await?;
    Ok((http::StatusCode::CREATED, Json(product)))
}
