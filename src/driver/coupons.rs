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

//! Operations on coupons and their ownership relations.
//!
//! The administrative operations assume the REST layer has already verified that the caller has
//! operator privileges; the user-facing operations only need an authenticated caller.

use crate::db::{self, DbError};
use crate::driver::{Driver, DriverError, DriverResult};
use crate::model::{Coupon, OwnedCoupon, User};

impl Driver {
    /// Creates a new coupon from the given raw fields.
    pub(crate) async fn create_coupon(
        self,
        name: String,
        coupon_type: String,
        amount: i32,
    ) -> DriverResult<Coupon> {
        if name.is_empty() {
            return Err(DriverError::InvalidInput("Coupon name cannot be empty".to_owned()));
        }
        if coupon_type.is_empty() {
            return Err(DriverError::InvalidInput("Coupon type cannot be empty".to_owned()));
        }
        if amount < 0 {
            return Err(DriverError::InvalidInput("Coupon amount cannot be negative".to_owned()));
        }

        let mut ex = self.db.ex().await?;
        let coupon = db::coupons::create_coupon(&mut ex, &name, &coupon_type, amount).await?;
        Ok(coupon)
    }

    /// Gets all coupons, restricted to those of type `coupon_type` when given.
    pub(crate) async fn get_all_coupons(
        self,
        coupon_type: Option<String>,
    ) -> DriverResult<Vec<Coupon>> {
        let mut ex = self.db.ex().await?;
        let coupons = db::coupons::list_coupons(&mut ex, coupon_type.as_deref()).await?;
        Ok(coupons)
    }

    /// Gets the coupons owned by the user with `user_id`, applying the optional restrictions.
    ///
    /// Fails with `NotFound` when `user_id` does not name an existing user, so that a listing
    /// for an unknown user is distinguishable from a user with no coupons.
    pub(crate) async fn get_owned_coupons(
        self,
        user_id: i32,
        coupon_type: Option<String>,
        is_used: Option<bool>,
    ) -> DriverResult<Vec<OwnedCoupon>> {
        let mut ex = self.db.ex().await?;

        match db::users::get_user(&mut ex, user_id).await {
            Ok(_user) => (),
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound(format!("User {} not found", user_id)))
            }
            Err(e) => return Err(e.into()),
        }

        let owned =
            db::coupons::list_owned_coupons(&mut ex, user_id, coupon_type.as_deref(), is_used)
                .await?;
        Ok(owned)
    }

    /// Registers the coupon with `coupon_id` into `caller`'s owned list.
    pub(crate) async fn register_coupon(
        self,
        caller: &User,
        coupon_id: i32,
    ) -> DriverResult<OwnedCoupon> {
        let mut tx = self.db.begin().await?;

        let coupon = match db::coupons::get_coupon(tx.ex(), coupon_id).await {
            Ok(coupon) => coupon,
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound(format!("Coupon {} not found", coupon_id)))
            }
            Err(e) => return Err(e.into()),
        };

        let owned =
            db::coupons::create_owned_coupon(tx.ex(), *caller.id(), &coupon, false).await?;
        tx.commit().await?;
        Ok(owned)
    }

    /// Gets `caller`'s own coupons, applying the optional restrictions.
    pub(crate) async fn get_my_coupons(
        self,
        caller: &User,
        coupon_type: Option<String>,
        is_used: Option<bool>,
    ) -> DriverResult<Vec<OwnedCoupon>> {
        let mut ex = self.db.ex().await?;
        let owned = db::coupons::list_owned_coupons(
            &mut ex,
            *caller.id(),
            coupon_type.as_deref(),
            is_used,
        )
        .await?;
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;
    use crate::model::Rank;

    #[tokio::test]
    async fn test_create_coupon_ok() {
        let context = TestContext::setup().await;

        let coupon = context
            .driver()
            .create_coupon("Welcome".to_owned(), "DISCOUNT".to_owned(), 1000)
            .await
            .unwrap();
        assert_eq!("Welcome", coupon.name());
        assert_eq!("DISCOUNT", coupon.coupon_type());
        assert_eq!(&1000, coupon.amount());

        let mut ex = context.ex().await;
        assert_eq!(
            vec![coupon],
            db::coupons::list_coupons(&mut ex, None).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_create_coupon_invalid_input() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::InvalidInput("Coupon name cannot be empty".to_owned()),
            context
                .driver()
                .create_coupon("".to_owned(), "DISCOUNT".to_owned(), 1000)
                .await
                .unwrap_err()
        );
        assert_eq!(
            DriverError::InvalidInput("Coupon type cannot be empty".to_owned()),
            context
                .driver()
                .create_coupon("Welcome".to_owned(), "".to_owned(), 1000)
                .await
                .unwrap_err()
        );
        assert_eq!(
            DriverError::InvalidInput("Coupon amount cannot be negative".to_owned()),
            context
                .driver()
                .create_coupon("Welcome".to_owned(), "DISCOUNT".to_owned(), -5)
                .await
                .unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_get_all_coupons_with_and_without_filter() {
        let context = TestContext::setup().await;

        let welcome = context.create_coupon("Welcome", "DISCOUNT", 1000).await;
        let freebie = context.create_coupon("Freebie", "GIFT", 500).await;

        assert_eq!(
            vec![welcome.clone(), freebie.clone()],
            context.driver().get_all_coupons(None).await.unwrap()
        );
        assert_eq!(
            vec![freebie],
            context.driver().get_all_coupons(Some("GIFT".to_owned())).await.unwrap()
        );
        assert!(context
            .driver()
            .get_all_coupons(Some("UNKNOWN".to_owned()))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_get_owned_coupons_filters_compose() {
        let context = TestContext::setup().await;

        let user = context.create_user("walrus", Rank::Regular).await;
        let discount = context.create_coupon("Welcome", "DISCOUNT", 1000).await;
        let gift = context.create_coupon("Freebie", "GIFT", 500).await;

        let used_discount = context.create_owned_coupon(&user, &discount, true).await;
        let fresh_discount = context.create_owned_coupon(&user, &discount, false).await;
        let _fresh_gift = context.create_owned_coupon(&user, &gift, false).await;

        assert_eq!(
            vec![used_discount, fresh_discount.clone()],
            context
                .driver()
                .get_owned_coupons(*user.id(), Some("DISCOUNT".to_owned()), None)
                .await
                .unwrap()
        );
        assert_eq!(
            vec![fresh_discount],
            context
                .driver()
                .get_owned_coupons(*user.id(), Some("DISCOUNT".to_owned()), Some(false))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_get_owned_coupons_unknown_user() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("User 123 not found".to_owned()),
            context.driver().get_owned_coupons(123, None, None).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_get_owned_coupons_no_coupons_is_empty() {
        let context = TestContext::setup().await;

        let user = context.create_user("walrus", Rank::Regular).await;

        assert!(context
            .driver()
            .get_owned_coupons(*user.id(), None, None)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_register_coupon_ok() {
        let context = TestContext::setup().await;

        let user = context.create_user("walrus", Rank::Regular).await;
        let coupon = context.create_coupon("Welcome", "DISCOUNT", 1000).await;

        let owned = context.driver().register_coupon(&user, *coupon.id()).await.unwrap();
        assert_eq!(user.id(), owned.user_id());
        assert_eq!(coupon.id(), owned.coupon_id());
        assert_eq!("DISCOUNT", owned.coupon_type());
        assert_eq!(&false, owned.is_used());

        let mut ex = context.ex().await;
        assert_eq!(
            vec![owned],
            db::coupons::list_owned_coupons(&mut ex, *user.id(), None, None).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_register_coupon_unknown_coupon() {
        let context = TestContext::setup().await;

        let user = context.create_user("walrus", Rank::Regular).await;

        assert_eq!(
            DriverError::NotFound("Coupon 555 not found".to_owned()),
            context.driver().register_coupon(&user, 555).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_get_my_coupons_scoped_to_caller() {
        let context = TestContext::setup().await;

        let user = context.create_user("walrus", Rank::Regular).await;
        let other = context.create_user("other", Rank::Regular).await;
        let coupon = context.create_coupon("Welcome", "DISCOUNT", 1000).await;

        let mine = context.create_owned_coupon(&user, &coupon, false).await;
        let _theirs = context.create_owned_coupon(&other, &coupon, false).await;

        assert_eq!(
            vec![mine],
            context.driver().get_my_coupons(&user, None, None).await.unwrap()
        );
    }
}
