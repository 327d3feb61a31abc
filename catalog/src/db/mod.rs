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


//! Database abstraction in terms of the operations needed by the catalog.

use crate::model::{Author, AuthorId, Book, BookFields, BookId, BookSort, BookSortField};
#[cfg(feature = "postgres")]
use catalog_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use catalog_core::db::sqlite;
use catalog_core::db::{DbError, DbResult, Executor};
use catalog_core::model::{PageRequest, SortDirection};
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;
use time::Date;


/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Columns to fetch to build a `Book` along with its author summary.
const BOOK_COLUMNS: &str = "
    b.id, b.title, b.isbn, b.published_date,
    a.id AS author_id, a.first_name, a.last_name";

/// Implements the conversion of raw rows into our entity types for a given database backend.
///
/// Both backends expose the same column names and types, so only the row type and the error
/// mapping function differ.
macro_rules! impl_try_from_row [
    ( $row:ty, $map_err:path ) => {
        impl TryFrom<$row> for Author {
            type Error = DbError;

            fn try_from(row: $row) -> DbResult<Self> {
                let id: i64 = row.try_get("id").map_err($map_err)?;
                let first_name: String = row.try_get("first_name").map_err($map_err)?;
                let last_name: String = row.try_get("last_name").map_err($map_err)?;
                Ok(Author::new(AuthorId::new(id), first_name, last_name))
            }
        }

        impl TryFrom<$row> for Book {
            type Error = DbError;

            fn try_from(row: $row) -> DbResult<Self> {
                let id: i64 = row.try_get("id").map_err($map_err)?;
                let title: String = row.try_get("title").map_err($map_err)?;
                let isbn: Option<String> = row.try_get("isbn").map_err($map_err)?;
                let published_date: Option<Date> =
                    row.try_get("published_date").map_err($map_err)?;
                let author_id: i64 = row.try_get("author_id").map_err($map_err)?;
                let first_name: String = row.try_get("first_name").map_err($map_err)?;
                let last_name: String = row.try_get("last_name").map_err($map_err)?;

                let author = Author::new(AuthorId::new(author_id), first_name, last_name);
                Ok(Book::new(BookId::new(id), title, isbn, published_date, author))
            }
        }
    }
];

#[cfg(feature = "postgres")]
impl_try_from_row!(PgRow, postgres::map_sqlx_error);

#[cfg(any(feature = "sqlite", test))]
impl_try_from_row!(SqliteRow, sqlite::map_sqlx_error);

/// Interprets the number of rows affected by a statement that targets a single row.
fn expect_one_row(rows_affected: u64) -> DbResult<()> {
    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Statement affected more than one row".to_owned())),
    }
}

/// Creates a new author and returns it with its assigned identifier.
pub(crate) async fn create_author(
    ex: &mut Executor,
    first_name: &str,
    last_name: &str,
) -> DbResult<Author> {
    let id: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str =
                "INSERT INTO authors (first_name, last_name) VALUES ($1, $2) RETURNING id";
            let row = sqlx::query(query_str)
                .bind(first_name)
                .bind(last_name)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str =
                "INSERT INTO authors (first_name, last_name) VALUES (?, ?) RETURNING id";
            let row = sqlx::query(query_str)
                .bind(first_name)
                .bind(last_name)
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("id").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    Ok(Author::new(AuthorId::new(id), first_name.to_owned(), last_name.to_owned()))
}

/// Gets an existing author by its `id`.
pub(crate) async fn get_author(ex: &mut Executor, id: AuthorId) -> DbResult<Author> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, first_name, last_name FROM authors WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Author::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, first_name, last_name FROM authors WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Author::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Deletes an existing author by its `id`.  Any books that still reference the author are deleted
/// by the database.
pub(crate) async fn delete_author(ex: &mut Executor, id: AuthorId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let done = sqlx::query("DELETE FROM authors WHERE id = $1")
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let done = sqlx::query("DELETE FROM authors WHERE id = ?")
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    expect_one_row(rows_affected)
}

/// Deletes all books written by the author `id` and returns how many were deleted.
pub(crate) async fn delete_books_by_author(ex: &mut Executor, id: AuthorId) -> DbResult<u64> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let done = sqlx::query("DELETE FROM books WHERE author_id = $1")
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let done = sqlx::query("DELETE FROM books WHERE author_id = ?")
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    Ok(rows_affected)
}

/// Creates a new book with the given `fields` and returns its assigned identifier.
///
/// Fails with `NotFound` if the referenced author does not exist and with `AlreadyExists` if the
/// ISBN is already taken.
pub(crate) async fn create_book(ex: &mut Executor, fields: &BookFields) -> DbResult<BookId> {
    let id: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO books (title, isbn, published_date, author_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(fields.title())
                .bind(fields.isbn().as_deref())
                .bind(*fields.published_date())
                .bind(fields.author_id().as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO books (title, isbn, published_date, author_id)
                VALUES (?, ?, ?, ?)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(fields.title())
                .bind(fields.isbn().as_deref())
                .bind(*fields.published_date())
                .bind(fields.author_id().as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("id").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    Ok(BookId::new(id))
}

/// Gets an existing book by its `id`, along with a summary of its author.
pub(crate) async fn get_book(ex: &mut Executor, id: BookId) -> DbResult<Book> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = format!(
                "SELECT {} FROM books b JOIN authors a ON b.author_id = a.id WHERE b.id = $1",
                BOOK_COLUMNS
            );
            let row = sqlx::query(&query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Book::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = format!(
                "SELECT {} FROM books b JOIN authors a ON b.author_id = a.id WHERE b.id = ?",
                BOOK_COLUMNS
            );
            let row = sqlx::query(&query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Book::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Replaces all fields of the existing book `id` with `fields`.
///
/// Fails with `NotFound` if the book or the referenced author do not exist and with
/// `AlreadyExists` if the ISBN is taken by another book.
pub(crate) async fn update_book(
    ex: &mut Executor,
    id: BookId,
    fields: &BookFields,
) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE books SET title = $1, isbn = $2, published_date = $3, author_id = $4
                WHERE id = $5";
            let done = sqlx::query(query_str)
                .bind(fields.title())
                .bind(fields.isbn().as_deref())
                .bind(*fields.published_date())
                .bind(fields.author_id().as_i64())
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE books SET title = ?, isbn = ?, published_date = ?, author_id = ?
                WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(fields.title())
                .bind(fields.isbn().as_deref())
                .bind(*fields.published_date())
                .bind(fields.author_id().as_i64())
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    expect_one_row(rows_affected)
}

/// Deletes an existing book by its `id`.
pub(crate) async fn delete_book(ex: &mut Executor, id: BookId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let done = sqlx::query("DELETE FROM books WHERE id = $1")
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let done = sqlx::query("DELETE FROM books WHERE id = ?")
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    expect_one_row(rows_affected)
}

/// Counts all books in the catalog.
pub(crate) async fn count_books(ex: &mut Executor) -> DbResult<u64> {
    let count: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let row = sqlx::query("SELECT COUNT(*) AS count FROM books")
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("count").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let row = sqlx::query("SELECT COUNT(*) AS count FROM books")
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("count").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    u64::try_from(count)
        .map_err(|e| DbError::DataIntegrityError(format!("Invalid book count {}: {}", count, e)))
}

/// Returns the `ORDER BY` clause that implements `sort`.
///
/// Rows without a value for the sort column come last in both directions, and ties are broken by
/// ascending identifier so that pagination is stable.
fn order_by(sort: BookSort) -> String {
    let column = match sort.field {
        BookSortField::Id => "b.id",
        BookSortField::Title => "b.title",
        BookSortField::Isbn => "b.isbn",
        BookSortField::PublishedDate => "b.published_date",
    };
    let direction = match sort.direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    };
    format!("ORDER BY {} {} NULLS LAST, b.id ASC", column, direction)
}

/// Gets the books in the page described by `page` when all books are sorted by `sort`.
pub(crate) async fn list_books(
    ex: &mut Executor,
    page: &PageRequest,
    sort: BookSort,
) -> DbResult<Vec<Book>> {
    let limit = i64::from(page.size());
    let offset = i64::try_from(page.offset())
        .map_err(|e| DbError::BackendError(format!("Page offset out of range: {}", e)))?;

    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = format!(
                "SELECT {} FROM books b JOIN authors a ON b.author_id = a.id {} LIMIT $1 OFFSET $2",
                BOOK_COLUMNS,
                order_by(sort)
            );
            let rows = sqlx::query(&query_str)
                .bind(limit)
                .bind(offset)
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Book::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = format!(
                "SELECT {} FROM books b JOIN authors a ON b.author_id = a.id {} LIMIT ? OFFSET ?",
                BOOK_COLUMNS,
                order_by(sort)
            );
            let rows = sqlx::query(&query_str)
                .bind(limit)
                .bind(offset)
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(Book::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}
