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

//! The `Country` data type and its search filters.

use crate::model::{ModelError, ModelResult};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{de::Visitor, Deserialize, Serialize};

/// Represents a correctly-formatted country calling code.
///
/// Country codes are a leading plus sign followed by one or more digits, as in `+82`.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    /// Creates a new country code from an untrusted string `s`, making sure it is valid.
    pub fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();

        let digits = match s.strip_prefix('+') {
            Some(digits) => digits,
            None => {
                return Err(ModelError(format!("Invalid country code '{}': must start with +", s)))
            }
        };
        if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(ModelError(format!(
                "Invalid country code '{}': expected + followed by digits",
                s
            )));
        }

        Ok(Self(s))
    }

    /// Returns a string view of the country code.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
impl From<&'static str> for CountryCode {
    /// Creates a new country code from a hardcoded string, which must be valid.
    fn from(code: &'static str) -> Self {
        CountryCode::new(code).expect("Hardcoded country codes must be valid")
    }
}

/// A deserialization visitor for a `CountryCode`.
struct CountryCodeVisitor;

impl Visitor<'_> for CountryCodeVisitor {
    type Value = CountryCode;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        CountryCode::new(v).map_err(|e| E::custom(e.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        CountryCode::new(v).map_err(|e| E::custom(e.to_string()))
    }
}

impl<'de> Deserialize<'de> for CountryCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_string(CountryCodeVisitor)
    }
}

/// Representation of one country reference record.
#[derive(Constructor, Getters, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(test, derive(Clone, Debug, Deserialize, PartialEq))]
pub struct Country {
    /// Identifier of the record.
    id: i32,

    /// Calling code of the country.
    country_code: CountryCode,

    /// Unique display name of the country.
    name: String,

    /// Dial code used when routing calls to the country.
    d_code: String,
}

/// Names the queryable columns of a country record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CountryColumn {
    /// The calling code column.
    CountryCode,

    /// The dial code column.
    DialCode,

    /// The display name column.
    Name,
}

/// A search filter over country records.
///
/// Filters form a small expression tree that the persistence layer translates into the backing
/// store's native query language.
#[derive(Debug, Eq, PartialEq)]
pub enum CountryFilter {
    /// Matches records whose column equals the value exactly.
    Equals(CountryColumn, String),

    /// Matches records whose column contains the value as a substring.
    Contains(CountryColumn, String),

    /// Matches records satisfying any of the nested filters.
    AnyOf(Vec<CountryFilter>),
}
