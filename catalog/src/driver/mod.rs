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


//! Business logic for the service.

use crate::model::{AuthorId, BookId};
use catalog_core::db::{Db, DbError};
use catalog_core::driver::DriverError;
use std::sync::Arc;

mod authors;
mod books;
#[cfg(test)]
pub(crate) mod testutils;

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they start and commit a
/// transaction, so it's incorrect for the caller to use two separate calls.  For this reason,
/// these operations consume the driver in an attempt to minimize the possibility of executing
/// two operations.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: Arc<dyn Db + Send + Sync>) -> Self {
        Self { db }
    }
}

/// Converts a database error `e` raised while accessing book `id` into a driver error that names
/// the missing book.
fn map_book_error(e: DbError, id: BookId) -> DriverError {
    match e {
        DbError::NotFound => DriverError::NotFound(format!("Book id={} not found", id)),
        e => e.into(),
    }
}

/// Converts a database error `e` raised while accessing author `id` into a driver error that
/// names the missing author.
fn map_author_error(e: DbError, id: AuthorId) -> DriverError {
    match e {
        DbError::NotFound => DriverError::NotFound(format!("Author id={} not found", id)),
        e => e.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_book_error() {
        assert_eq!(
            DriverError::NotFound("Book id=7 not found".to_owned()),
            map_book_error(DbError::NotFound, BookId::new(7))
        );
        assert_eq!(
            DriverError::BackendError("Unavailable".to_owned()),
            map_book_error(DbError::Unavailable, BookId::new(7))
        );
    }

    #[test]
    fn test_map_author_error() {
        assert_eq!(
            DriverError::NotFound("Author id=3 not found".to_owned()),
            map_author_error(DbError::NotFound, AuthorId::new(3))
        );
        assert_eq!(
            DriverError::AlreadyExists("Already exists".to_owned()),
            map_author_error(DbError::AlreadyExists, AuthorId::new(3))
        );
    }
}
