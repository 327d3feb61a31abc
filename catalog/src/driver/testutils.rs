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


//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use crate::model::{Author, AuthorId, BookFields, BookId};
use catalog_core::db::{Db, Executor};
use std::sync::Arc;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver.
    db: Arc<dyn Db + Send + Sync>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver against a fresh in-memory database.
    pub(crate) async fn setup() -> Self {
        let db = Arc::new(catalog_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        Self { db, driver }
    }

    /// Obtains a direct executor against the database.  Callers must drop it before using the
    /// driver, as the test database only has one connection.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Returns a copy of the driver under test.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Creates an author named after `last_name` directly in the database.
    pub(crate) async fn create_author(&self, last_name: &str) -> Author {
        db::create_author(&mut self.ex().await, "Some", last_name).await.unwrap()
    }

    /// Creates a book with only a `title` directly in the database.
    pub(crate) async fn create_book(&self, title: &str, author_id: AuthorId) -> BookId {
        let fields = BookFields::new(title.to_owned(), None, None, author_id);
        db::create_book(&mut self.ex().await, &fields).await.unwrap()
    }
}
