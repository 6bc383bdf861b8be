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

//! The `Product` data type.

use derive_getters::Getters;
use derive_more::Constructor;
use serde::Serialize;
#[cfg(test)]
use serde::Deserialize;

/// Representation of a product listed by a user.
#[derive(Constructor, Getters, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(test, derive(Clone, Debug, Deserialize, PartialEq))]
pub struct Product {
    /// Identifier of the product.
    id: i32,

    /// Title of the listing.
    title: String,

    /// Asking price, in minor currency units.
    price: i32,

    /// Number of units available.
    stock: i32,

    /// Identifier of the user that listed the product.
    owner_id: i32,
}
