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


//! Operations on authors.

use crate::db;
use crate::driver::{Driver, map_author_error};
use crate::model::{Author, AuthorId};
use catalog_core::driver::DriverResult;
use log::info;

impl Driver {
    /// Creates a new author named `first_name` `last_name`.
    pub(crate) async fn create_author(
        self,
        first_name: String,
        last_name: String,
    ) -> DriverResult<Author> {
        let mut tx = self.db.begin().await?;
        let author = db::create_author(tx.ex(), &first_name, &last_name).await?;
        tx.commit().await?;

        info!("Created author {}", author.id());
        Ok(author)
    }

    /// Gets the author `id`.
    pub(crate) async fn get_author(self, id: AuthorId) -> DriverResult<Author> {
        let mut tx = self.db.begin().await?;
        let author = db::get_author(tx.ex(), id).await.map_err(|e| map_author_error(e, id))?;
        tx.commit().await?;
        Ok(author)
    }

    /// Deletes the author `id` along with all of the books they wrote.
    pub(crate) async fn delete_author(self, id: AuthorId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::get_author(tx.ex(), id).await.map_err(|e| map_author_error(e, id))?;
        let books = db::delete_books_by_author(tx.ex(), id).await?;
        db::delete_author(tx.ex(), id).await.map_err(|e| map_author_error(e, id))?;
        tx.commit().await?;

        info!("Deleted author {} and their {} books", id, books);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;
    use catalog_core::db::DbError;
    use catalog_core::driver::DriverError;

    #[tokio::test]
    async fn test_create_author_ok() {
        let context = TestContext::setup().await;

        let author =
            context.driver().create_author("Ada".to_owned(), "Lovelace".to_owned()).await.unwrap();
        assert_eq!("Ada", author.first_name().as_str());
        assert_eq!("Lovelace", author.last_name().as_str());

        assert_eq!(author, db::get_author(&mut context.ex().await, *author.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_author_ok() {
        let context = TestContext::setup().await;
        let author = context.create_author("Writer").await;

        assert_eq!(author, context.driver().get_author(*author.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_author_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("Author id=12 not found".to_owned()),
            context.driver().get_author(AuthorId::new(12)).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_delete_author_removes_books() {
        let context = TestContext::setup().await;
        let author1 = context.create_author("First").await;
        let author2 = context.create_author("Second").await;
        let book1 = context.create_book("One", *author1.id()).await;
        let book2 = context.create_book("Two", *author1.id()).await;
        let book3 = context.create_book("Three", *author2.id()).await;

        context.driver().delete_author(*author1.id()).await.unwrap();

        let mut ex = context.ex().await;
        assert_eq!(DbError::NotFound, db::get_author(&mut ex, *author1.id()).await.unwrap_err());
        assert_eq!(DbError::NotFound, db::get_book(&mut ex, book1).await.unwrap_err());
        assert_eq!(DbError::NotFound, db::get_book(&mut ex, book2).await.unwrap_err());
        db::get_book(&mut ex, book3).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_author_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("Author id=4 not found".to_owned()),
            context.driver().delete_author(AuthorId::new(4)).await.unwrap_err()
        );
    }
}
