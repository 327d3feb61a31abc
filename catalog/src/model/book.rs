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


//! Books in the catalog.

use crate::model::{Author, AuthorId};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::Date;

/// Identifier of a book, assigned by the database on insertion.
#[derive(
    Clone, Constructor, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    /// Returns the raw value of the identifier.
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The mutable contents of a book, as provided by clients when creating or replacing a book.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub struct BookFields {
    /// Title of the book.
    title: String,

    /// International Standard Book Number, unique across the catalog when present.
    isbn: Option<String>,

    /// Date in which the book was published.
    published_date: Option<Date>,

    /// Identifier of the author of the book.
    author_id: AuthorId,
}

/// A book as stored in the catalog, along with a summary of its author.
#[derive(Clone, Constructor, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Identifier of the book.
    id: BookId,

    /// Title of the book.
    title: String,

    /// International Standard Book Number.
    isbn: Option<String>,

    /// Date in which the book was published.
    published_date: Option<Date>,

    /// Summary of the author of the book.
    author: Author,
}

impl Book {
    /// Builds a book from its stored `id`, its `fields` and its `author`.
    ///
    /// The caller is responsible for ensuring that `author` is the one referenced by `fields`.
    pub fn from_fields(id: BookId, fields: BookFields, author: Author) -> Self {
        debug_assert_eq!(fields.author_id, *author.id());
        Self {
            id,
            title: fields.title,
            isbn: fields.isbn,
            published_date: fields.published_date,
            author,
        }
    }
}
