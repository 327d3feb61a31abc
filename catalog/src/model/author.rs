// III-IV
// Copyright 2023 Julio Merino
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


//! Authors of the books in the catalog.

use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an author, assigned by the database on insertion.
#[derive(
    Clone, Constructor, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct AuthorId(i64);

impl AuthorId {
    /// Returns the raw value of the identifier.
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An author as stored in the catalog.
///
/// This is also the summary that books embed to describe their author: an author never carries
/// its collection of books.
#[derive(Clone, Constructor, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Identifier of the author.
    id: AuthorId,

    /// Given name of the author.
    first_name: String,

    /// Family name of the author.
    last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_json() {
        let author = Author::new(AuthorId::new(3), "Ursula".to_owned(), "Le Guin".to_owned());
        assert_eq!(
            serde_json::json!({"id": 3, "firstName": "Ursula", "lastName": "Le Guin"}),
            serde_json::to_value(&author).unwrap()
        );
    }

    #[test]
    fn test_author_id_display() {
        assert_eq!("17", AuthorId::new(17).to_string());
    }
}
