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

//! The `User` data type and its associated credentials.

use crate::model::{ModelError, ModelResult};
use derive_getters::Getters;
use derive_more::Constructor;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Maximum length of a username as specified in the schema.
pub(crate) const USERS_MAX_USERNAME_LENGTH: usize = 32;

/// Length of our access tokens, in characters.
///
/// This is not customizable because this size is replicated in the database schema and we cannot
/// simply change what it is at runtime.
const TOKEN_LENGTH: usize = 64;

/// Represents a correctly-formatted (but maybe non-existent) username.
///
/// Usernames are case-insensitive and, for simplicity reasons, we force them to be all in
/// lowercase.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Username(String);

impl Username {
    /// Creates a new username from an untrusted string `s`, making sure it is valid.
    pub fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();

        if s.is_empty() {
            return Err(ModelError("Username cannot be empty".to_owned()));
        }
        if s.len() > USERS_MAX_USERNAME_LENGTH {
            return Err(ModelError("Username is too long".to_owned()));
        }

        for ch in s.chars() {
            if !(ch.is_ascii_alphanumeric() || ".-_".find(ch).is_some()) {
                return Err(ModelError(format!(
                    "Unsupported character '{}' in username '{}'",
                    ch, s
                )));
            }
        }

        Ok(Self(s.to_lowercase()))
    }

    /// Returns a string view of the username.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
impl From<&'static str> for Username {
    /// Creates a new username from a hardcoded string, which must be valid.
    fn from(name: &'static str) -> Self {
        assert_eq!(name, name.to_lowercase(), "Hardcoded usernames must be lowercase");
        Username::new(name).expect("Hardcoded usernames must be valid")
    }
}

/// Privilege classification of a user.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rank {
    /// A plain authenticated user with no administrative privileges.
    Regular,

    /// A user allowed to administer coupons.
    Operator,

    /// A user allowed to administer reference data; implies operator privileges.
    Manager,
}

impl Rank {
    /// Returns true if this rank grants coupon-administration privileges.
    pub fn is_operator(&self) -> bool {
        matches!(self, Rank::Operator | Rank::Manager)
    }

    /// Returns true if this rank grants reference-data-administration privileges.
    pub fn is_manager(&self) -> bool {
        matches!(self, Rank::Manager)
    }

    /// Returns the canonical textual representation of the rank.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Regular => "regular",
            Rank::Operator => "operator",
            Rank::Manager => "manager",
        }
    }
}

impl FromStr for Rank {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        match s {
            "regular" => Ok(Rank::Regular),
            "operator" => Ok(Rank::Operator),
            "manager" => Ok(Rank::Manager),
            s => Err(ModelError(format!("Unknown rank '{}'", s))),
        }
    }
}

/// Representation of a user's information.
///
/// Users are provisioned by a separate account-management process, so this service treats them
/// as read-only records.
#[derive(Clone, Constructor, Getters)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct User {
    /// Identifier of the user.
    id: i32,

    /// Name of the user.
    username: Username,

    /// Privilege classification of the user.
    rank: Rank,
}

/// An opaque type representing a user's access token.
///
/// Access tokens are user-readable character sequences of a fixed size.
#[derive(Clone, Eq, Ord, PartialEq, PartialOrd)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new access token from an untrusted string `token`.
    pub fn new<S: Into<String>>(token: S) -> ModelResult<Self> {
        let token = token.into();
        if token.len() != TOKEN_LENGTH {
            return Err(ModelError("Invalid access token".to_owned()));
        }
        for ch in token.chars() {
            if !ch.is_ascii_alphanumeric() {
                return Err(ModelError("Invalid access token".to_owned()));
            }
        }
        Ok(Self(token))
    }

    /// Generates a new random access token.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let mut token = String::with_capacity(TOKEN_LENGTH);
        for _ in 0..TOKEN_LENGTH {
            let i = rng.random_range(0..(10 + 26 + 26));
            let ch = if i < 10 {
                (b'0' + i) as char
            } else if i < 10 + 26 {
                (b'a' + (i - 10)) as char
            } else {
                (b'A' + (i - 10 - 26)) as char
            };
            token.push(ch);
        }
        Self::new(token).expect("Auto-generated tokens must be valid")
    }

    /// Returns the string representation of the token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("scrubbed access token")
    }
}
