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

//! The `Coupon` and `OwnedCoupon` data types.

use derive_getters::Getters;
use derive_more::Constructor;
use serde::Serialize;
#[cfg(test)]
use serde::Deserialize;

/// Representation of a coupon created by an operator.
#[derive(Constructor, Getters, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(test, derive(Clone, Debug, Deserialize, PartialEq))]
pub struct Coupon {
    /// Identifier of the coupon.
    id: i32,

    /// Display name of the coupon.
    name: String,

    /// Classification of the coupon, used for filtered listings.
    coupon_type: String,

    /// Discount amount granted by the coupon.
    amount: i32,
}

/// A coupon registered into a user's owned list.
///
/// The coupon's type is denormalized into the relation at registration time so that ownership
/// listings can filter by type without joining against the coupons table.
#[derive(Constructor, Getters, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(test, derive(Clone, Debug, Deserialize, PartialEq))]
pub struct OwnedCoupon {
    /// Identifier of the ownership relation.
    id: i32,

    /// Identifier of the owning user.
    user_id: i32,

    /// Identifier of the owned coupon.
    coupon_id: i32,

    /// Classification copied from the coupon at registration time.
    coupon_type: String,

    /// Whether the user has already spent the coupon.
    is_used: bool,
}
