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

//! Operations on product listings.

use crate::db::{self, DbError};
use crate::driver::{Driver, DriverError, DriverResult};
use crate::model::{Product, User};

impl Driver {
    /// Creates a new product listed by `caller` from the given raw fields.
    pub(crate) async fn create_product(
        self,
        caller: &User,
        title: String,
        price: i32,
        stock: i32,
    ) -> DriverResult<Product> {
        if title.is_empty() {
            return Err(DriverError::InvalidInput("Product title cannot be empty".to_owned()));
        }
        if price < 0 {
            return Err(DriverError::InvalidInput("Product price cannot be negative".to_owned()));
        }
        if stock < 0 {
            return Err(DriverError::InvalidInput("Product stock cannot be negative".to_owned()));
        }

        let mut ex = self.db.ex().await?;
        let product =
            db::products::create_product(&mut ex, &title, price, stock, *caller.id()).await?;
        Ok(product)
    }

    /// Gets the products listed by `caller`, and only those.
    pub(crate) async fn get_own_products(self, caller: &User) -> DriverResult<Vec<Product>> {
        let mut ex = self.db.ex().await?;
        let products = db::products::list_products_by_owner(&mut ex, *caller.id()).await?;
        Ok(products)
    }

    /// Gets the product with `product_id`.
    ///
    /// Unlike the other product operations this one takes no caller: single-product lookups
    /// back public storefront pages.
    pub(crate) async fn get_product(self, product_id: i32) -> DriverResult<Product> {
        let mut ex = self.db.ex().await?;
        match db::products::get_product(&mut ex, product_id).await {
            Ok(product) => Ok(product),
            Err(DbError::NotFound) => {
                Err(DriverError::NotFound(format!("Product {} not found", product_id)))
            }
            Err(e) => Err(e.into()),
        }
    }
}
