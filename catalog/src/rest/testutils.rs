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


//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::{Author, AuthorId, Book, BookFields, BookId};
use crate::rest::app;
use axum::Router;
use catalog_core::clocks::testutils::SettableClock;
use catalog_core::db::{Db, DbError};
use std::sync::Arc;
use time::OffsetDateTime;
use time::macros::datetime;

/// Instant at which the clock of every test is frozen.
pub(crate) const NOW: OffsetDateTime = datetime!(2024-03-15 12:00:00 UTC);

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the app.
    db: Arc<dyn Db + Send + Sync>,

    /// The app under test.
    app: Router,
}

impl TestContext {
    /// Initializes the app against a fresh in-memory database and a frozen clock.
    pub(crate) async fn setup() -> Self {
        let db = Arc::new(catalog_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        let app = app(driver, Arc::new(SettableClock::new(NOW)));
        Self { db, app }
    }

    /// Returns a copy of the app under test.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the app under test.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Creates an author directly in the database.
    pub(crate) async fn create_author(&self, first_name: &str, last_name: &str) -> Author {
        db::create_author(&mut self.db.ex().await.unwrap(), first_name, last_name).await.unwrap()
    }

    /// Creates a book directly in the database and returns it as the API would.
    pub(crate) async fn create_book(&self, fields: BookFields) -> Book {
        let mut ex = self.db.ex().await.unwrap();
        let id = db::create_book(&mut ex, &fields).await.unwrap();
        db::get_book(&mut ex, id).await.unwrap()
    }

    /// Creates a book with only a `title` directly in the database.
    pub(crate) async fn create_simple_book(&self, title: &str, author: &Author) -> Book {
        self.create_book(BookFields::new(title.to_owned(), None, None, *author.id())).await
    }

    /// Gets a book directly from the database, if it exists.
    pub(crate) async fn get_book(&self, id: BookId) -> Option<Book> {
        match db::get_book(&mut self.db.ex().await.unwrap(), id).await {
            Ok(book) => Some(book),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("{:?}", e),
        }
    }

    /// Gets an author directly from the database, if it exists.
    pub(crate) async fn get_author(&self, id: AuthorId) -> Option<Author> {
        match db::get_author(&mut self.db.ex().await.unwrap(), id).await {
            Ok(author) => Some(author),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("{:?}", e),
        }
    }

    /// Counts the books in the database.
    pub(crate) async fn count_books(&self) -> u64 {
        db::count_books(&mut self.db.ex().await.unwrap()).await.unwrap()
    }
}
