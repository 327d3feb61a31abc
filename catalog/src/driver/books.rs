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


//! Operations on books.

use crate::db;
use crate::driver::{Driver, map_author_error, map_book_error};
use crate::model::{Author, Book, BookFields, BookId, BookSort};
use catalog_core::db::DbError;
use catalog_core::driver::{DriverError, DriverResult};
use catalog_core::model::{Page, PageRequest};
use log::info;

/// Converts a database error `e` raised while writing `fields` into a driver error.
///
/// Uniqueness violations can only come from the ISBN and referential violations can only come
/// from the author.
fn map_write_error(e: DbError, fields: &BookFields) -> DriverError {
    match e {
        DbError::AlreadyExists => DriverError::AlreadyExists(format!(
            "A book with ISBN {} already exists",
            fields.isbn().as_deref().unwrap_or("")
        )),
        e => map_author_error(e, *fields.author_id()),
    }
}

/// Returns the author of the `current` book if `fields` keep referencing it, or `None` if the
/// new author has to be looked up.
fn retained_author(current: Book, fields: &BookFields) -> Option<Author> {
    if current.author().id() == fields.author_id() {
        Some(current.author().clone())
    } else {
        None
    }
}

impl Driver {
    /// Gets one page of books sorted by `sort`.
    pub(crate) async fn list_books(
        self,
        page: PageRequest,
        sort: BookSort,
    ) -> DriverResult<Page<Book>> {
        let mut tx = self.db.begin().await?;
        let total = db::count_books(tx.ex()).await?;
        let books = db::list_books(tx.ex(), &page, sort).await?;
        tx.commit().await?;
        Ok(Page::new(books, &page, total))
    }

    /// Gets the book `id`.
    pub(crate) async fn get_book(self, id: BookId) -> DriverResult<Book> {
        let mut tx = self.db.begin().await?;
        let book = db::get_book(tx.ex(), id).await.map_err(|e| map_book_error(e, id))?;
        tx.commit().await?;
        Ok(book)
    }

    /// Creates a new book with `fields`.  The referenced author must exist.
    pub(crate) async fn create_book(self, fields: BookFields) -> DriverResult<Book> {
        let mut tx = self.db.begin().await?;
        let author = db::get_author(tx.ex(), *fields.author_id())
            .await
            .map_err(|e| map_author_error(e, *fields.author_id()))?;
        let id = db::create_book(tx.ex(), &fields).await.map_err(|e| map_write_error(e, &fields))?;
        tx.commit().await?;

        info!("Created book {} by author {}", id, author.id());
        Ok(Book::from_fields(id, fields, author))
    }

    /// Replaces the contents of book `id` with `fields`.
    ///
    /// The new author is only looked up when it differs from the book's current author.
    pub(crate) async fn update_book(self, id: BookId, fields: BookFields) -> DriverResult<Book> {
        let mut tx = self.db.begin().await?;
        let current = db::get_book(tx.ex(), id).await.map_err(|e| map_book_error(e, id))?;
        let author = match retained_author(current, &fields) {
            Some(author) => author,
            None => db::get_author(tx.ex(), *fields.author_id())
                .await
                .map_err(|e| map_author_error(e, *fields.author_id()))?,
        };
        db::update_book(tx.ex(), id, &fields).await.map_err(|e| map_write_error(e, &fields))?;
        tx.commit().await?;

        info!("Updated book {}", id);
        Ok(Book::from_fields(id, fields, author))
    }

    /// Deletes the book `id`.  Its author is left untouched.
    pub(crate) async fn delete_book(self, id: BookId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::delete_book(tx.ex(), id).await.map_err(|e| map_book_error(e, id))?;
        tx.commit().await?;

        info!("Deleted book {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;
    use crate::model::AuthorId;
    use time::macros::date;

    #[tokio::test]
    async fn test_list_books_page_metadata() {
        let context = TestContext::setup().await;
        let author = context.create_author("Writer").await;
        for title in ["C", "A", "B"] {
            context.create_book(title, *author.id()).await;
        }

        let page = context
            .driver()
            .list_books(PageRequest::new(Some(0), Some(2)), BookSort::default())
            .await
            .unwrap();
        let titles = page.content.iter().map(|b| b.title().as_str()).collect::<Vec<_>>();
        assert_eq!(vec!["A", "B"], titles);
        assert_eq!(0, page.number);
        assert_eq!(2, page.size);
        assert_eq!(3, page.total_elements);
        assert_eq!(2, page.total_pages);
        assert!(page.first);
        assert!(!page.last);
    }

    #[tokio::test]
    async fn test_list_books_empty() {
        let context = TestContext::setup().await;

        let page =
            context.driver().list_books(PageRequest::default(), BookSort::default()).await.unwrap();
        assert!(page.content.is_empty());
        assert_eq!(0, page.total_elements);
        assert_eq!(0, page.total_pages);
        assert!(page.first);
        assert!(page.last);
    }

    #[tokio::test]
    async fn test_get_book_ok() {
        let context = TestContext::setup().await;
        let author = context.create_author("Writer").await;
        let id = context.create_book("Title", *author.id()).await;

        let book = context.driver().get_book(id).await.unwrap();
        assert_eq!(Book::new(id, "Title".to_owned(), None, None, author), book);
    }

    #[tokio::test]
    async fn test_get_book_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("Book id=42 not found".to_owned()),
            context.driver().get_book(BookId::new(42)).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_create_book_ok() {
        let context = TestContext::setup().await;
        let author = context.create_author("Writer").await;

        let fields = BookFields::new(
            "Title".to_owned(),
            Some("978-3-16-148410-0".to_owned()),
            Some(date!(2001-02-03)),
            *author.id(),
        );
        let book = context.driver().create_book(fields.clone()).await.unwrap();
        assert_eq!(&author, book.author());

        let stored = db::get_book(&mut context.ex().await, *book.id()).await.unwrap();
        assert_eq!(Book::from_fields(*book.id(), fields, author), stored);
        assert_eq!(book, stored);
    }

    #[tokio::test]
    async fn test_create_book_author_not_found() {
        let context = TestContext::setup().await;

        let fields = BookFields::new("Title".to_owned(), None, None, AuthorId::new(5));
        assert_eq!(
            DriverError::NotFound("Author id=5 not found".to_owned()),
            context.driver().create_book(fields).await.unwrap_err()
        );
        assert_eq!(0, db::count_books(&mut context.ex().await).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_book_duplicate_isbn() {
        let context = TestContext::setup().await;
        let author = context.create_author("Writer").await;

        let fields =
            BookFields::new("First".to_owned(), Some("123".to_owned()), None, *author.id());
        let first = context.driver().create_book(fields).await.unwrap();

        let fields =
            BookFields::new("Second".to_owned(), Some("123".to_owned()), None, *author.id());
        assert_eq!(
            DriverError::AlreadyExists("A book with ISBN 123 already exists".to_owned()),
            context.driver().create_book(fields).await.unwrap_err()
        );

        assert_eq!(first, db::get_book(&mut context.ex().await, *first.id()).await.unwrap());
        assert_eq!(1, db::count_books(&mut context.ex().await).await.unwrap());
    }

    #[test]
    fn test_retained_author() {
        let author = Author::new(AuthorId::new(3), "Some".to_owned(), "Writer".to_owned());
        let current = Book::new(BookId::new(1), "Title".to_owned(), None, None, author.clone());

        let same = BookFields::new("Other".to_owned(), None, None, AuthorId::new(3));
        assert_eq!(Some(author), retained_author(current.clone(), &same));

        let different = BookFields::new("Title".to_owned(), None, None, AuthorId::new(4));
        assert_eq!(None, retained_author(current, &different));
    }

    #[tokio::test]
    async fn test_update_book_same_author() {
        let context = TestContext::setup().await;
        let author = context.create_author("Writer").await;
        let id = context.create_book("Draft", *author.id()).await;

        let fields = BookFields::new(
            "Final".to_owned(),
            Some("999".to_owned()),
            Some(date!(2020-10-10)),
            *author.id(),
        );
        let book = context.driver().update_book(id, fields.clone()).await.unwrap();
        assert_eq!(Book::from_fields(id, fields, author), book);
        assert_eq!(book, db::get_book(&mut context.ex().await, id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_book_clears_absent_values() {
        let context = TestContext::setup().await;
        let author = context.create_author("Writer").await;
        let fields = BookFields::new(
            "Title".to_owned(),
            Some("555".to_owned()),
            Some(date!(1999-12-31)),
            *author.id(),
        );
        let id = *context.driver().create_book(fields).await.unwrap().id();

        let fields = BookFields::new("Title".to_owned(), None, None, *author.id());
        context.driver().update_book(id, fields).await.unwrap();

        let book = db::get_book(&mut context.ex().await, id).await.unwrap();
        assert_eq!(&None, book.isbn());
        assert_eq!(&None, book.published_date());
    }

    #[tokio::test]
    async fn test_update_book_new_author() {
        let context = TestContext::setup().await;
        let author1 = context.create_author("First").await;
        let author2 = context.create_author("Second").await;
        let id = context.create_book("Title", *author1.id()).await;

        let fields = BookFields::new("Title".to_owned(), None, None, *author2.id());
        let book = context.driver().update_book(id, fields).await.unwrap();
        assert_eq!(&author2, book.author());
        assert_eq!(&author2, db::get_book(&mut context.ex().await, id).await.unwrap().author());
    }

    #[tokio::test]
    async fn test_update_book_not_found() {
        let context = TestContext::setup().await;
        let author = context.create_author("Writer").await;

        let fields = BookFields::new("Title".to_owned(), None, None, *author.id());
        assert_eq!(
            DriverError::NotFound("Book id=8 not found".to_owned()),
            context.driver().update_book(BookId::new(8), fields).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_update_book_author_not_found() {
        let context = TestContext::setup().await;
        let author = context.create_author("Writer").await;
        let id = context.create_book("Title", *author.id()).await;

        let fields = BookFields::new("Changed".to_owned(), None, None, AuthorId::new(77));
        assert_eq!(
            DriverError::NotFound("Author id=77 not found".to_owned()),
            context.driver().update_book(id, fields).await.unwrap_err()
        );

        let book = db::get_book(&mut context.ex().await, id).await.unwrap();
        assert_eq!("Title", book.title().as_str());
        assert_eq!(&author, book.author());
    }

    #[tokio::test]
    async fn test_update_book_duplicate_isbn() {
        let context = TestContext::setup().await;
        let author = context.create_author("Writer").await;
        let fields = BookFields::new("One".to_owned(), Some("111".to_owned()), None, *author.id());
        let one = context.driver().create_book(fields).await.unwrap();
        let two = context.create_book("Two", *author.id()).await;

        let fields = BookFields::new("Two".to_owned(), Some("111".to_owned()), None, *author.id());
        assert_eq!(
            DriverError::AlreadyExists("A book with ISBN 111 already exists".to_owned()),
            context.driver().update_book(two, fields).await.unwrap_err()
        );

        assert_eq!(one, db::get_book(&mut context.ex().await, *one.id()).await.unwrap());
        assert_eq!(&None, db::get_book(&mut context.ex().await, two).await.unwrap().isbn());
    }

    #[tokio::test]
    async fn test_delete_book_ok() {
        let context = TestContext::setup().await;
        let author = context.create_author("Writer").await;
        let id = context.create_book("Title", *author.id()).await;

        context.driver().delete_book(id).await.unwrap();

        assert_eq!(
            DriverError::NotFound(format!("Book id={} not found", id)),
            context.driver().get_book(id).await.unwrap_err()
        );
        assert_eq!(author, db::get_author(&mut context.ex().await, *author.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_book_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("Book id=3 not found".to_owned()),
            context.driver().delete_book(BookId::new(3)).await.unwrap_err()
        );
    }
}
