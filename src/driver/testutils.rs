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

//! Test utilities for the business layer.

use crate::db::{self, Db, Executor};
use crate::driver::Driver;
use crate::model::{AccessToken, Coupon, Country, CountryCode, OwnedCoupon, Product, Rank, User, Username};
use std::sync::Arc;

/// Scaffolding for driver tests: an in-memory database plus helpers to seed it directly,
/// bypassing the business layer under test.
pub(crate) struct TestContext {
    /// The database backing `driver`.
    db: Arc<dyn Db + Send + Sync>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes a driver backed by an empty in-memory database.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> = Arc::from(db::sqlite::testutils::setup().await);
        let driver = Driver::new(db.clone());
        Self { db, driver }
    }

    /// Returns a driver instance to invoke the operation under test on.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Returns a direct executor against the backing database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Creates a user with the given `username` and `rank`.
    pub(crate) async fn create_user(&self, username: &'static str, rank: Rank) -> User {
        db::users::create_user(&mut self.ex().await, &Username::from(username), rank)
            .await
            .unwrap()
    }

    /// Creates a session for `user` and returns its access token.
    pub(crate) async fn login(&self, user: &User) -> AccessToken {
        let token = AccessToken::generate();
        db::users::put_session(&mut self.ex().await, &token, *user.id()).await.unwrap();
        token
    }

    /// Creates a country record directly in the store.
    pub(crate) async fn create_country(
        &self,
        country_code: &'static str,
        name: &str,
        d_code: &str,
    ) -> Country {
        db::countries::create_country(
            &mut self.ex().await,
            &CountryCode::from(country_code),
            name,
            d_code,
        )
        .await
        .unwrap()
    }

    /// Creates a coupon directly in the store.
    pub(crate) async fn create_coupon(
        &self,
        name: &str,
        coupon_type: &str,
        amount: i32,
    ) -> Coupon {
        db::coupons::create_coupon(&mut self.ex().await, name, coupon_type, amount).await.unwrap()
    }

    /// Registers `coupon` into `user`'s owned list directly in the store.
    pub(crate) async fn create_owned_coupon(
        &self,
        user: &User,
        coupon: &Coupon,
        is_used: bool,
    ) -> OwnedCoupon {
        db::coupons::create_owned_coupon(&mut self.ex().await, *user.id(), coupon, is_used)
            .await
            .unwrap()
    }

    /// Creates a product owned by `owner` directly in the store.
    pub(crate) async fn create_product(
        &self,
        title: &str,
        price: i32,
        stock: i32,
        owner: &User,
    ) -> Product {
        db::products::create_product(&mut self.ex().await, title, price, stock, *owner.id())
            .await
            .unwrap()
    }
}
