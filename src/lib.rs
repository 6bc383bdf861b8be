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

//! REST service for a small commerce backend.
//!
//! The service manages three independent resources behind a JSON API: country
//! reference data, discount coupons (and per-user coupon ownership), and
//! product listings.  Administrative operations are restricted to callers
//! with the manager or operator rank.
//!
//! The code follows a strict layering, and every module maps to one layer:
//!
//! 1.  `model`: High-level data types representing domain concepts.  Newtypes
//!     validate their contents at construction time and there is no logic in
//!     this layer.
//!
//! 1.  `db`: The persistence layer.  Domain operations are free functions
//!     over a backend-agnostic `Executor`, with PostgreSQL serving production
//!     and SQLite serving the unit tests.
//!
//! 1.  `driver`: The business logic layer.  The `Driver` type coordinates
//!     input validation, authorization decisions and database access for
//!     every operation.
//!
//! 1.  `rest`: The HTTP layer.  One handler per API, with errors translated
//!     to status codes at the boundary.
//!
//! 1.  `main`: The app launcher, which gathers configuration from environment
//!     variables and calls `serve`.
//!
//! Each layer has its own result and error types, and errors float to the
//! REST boundary via the `?` operator.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use crate::db::Db;
use crate::driver::Driver;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod db;
pub mod driver;
pub(crate) mod env;
pub mod model;
mod rest;

/// Instantiates all resources to serve the application on `bind_addr` against
/// an already-connected `db`.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db: Arc<dyn Db + Send + Sync>,
) -> Result<(), Box<dyn Error>> {
    let driver = Driver::new(db);
    let app = rest::app(driver).layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(bind_addr.into()).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
