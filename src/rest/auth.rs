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

//! Caller-resolution guards shared by the API handlers.
//!
//! Guard failures report 401 like the decorator-based guards of the upstream API did.  Rank
//! checks that live inside the business layer report 403 instead.

use crate::driver::{Driver, DriverError};
use crate::model::User;
use crate::rest::httputils::get_bearer_auth;
use crate::rest::{RestError, RestResult, REALM};
use http::header::HeaderMap;

/// Resolves the authenticated caller behind the request `headers`.
pub(crate) async fn require_user(driver: &Driver, headers: &HeaderMap) -> RestResult<User> {
    let token = get_bearer_auth(headers, REALM)?;
    match driver.whoami(&token).await {
        Ok(user) => Ok(user),
        Err(DriverError::Unauthorized(message)) => {
            Err(RestError::Unauthorized { scheme: "Bearer", realm: REALM, message })
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolves the authenticated caller behind the request `headers` and checks that they hold
/// operator privileges.
pub(crate) async fn require_operator(driver: &Driver, headers: &HeaderMap) -> RestResult<User> {
    let user = require_user(driver, headers).await?;
    if !user.rank().is_operator() {
        return Err(RestError::Unauthorized {
            scheme: "Bearer",
            realm: REALM,
            message: "Operator privileges required".to_owned(),
        });
    }
    Ok(user)
}
