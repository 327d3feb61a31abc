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


//! API to create a new book.

use crate::driver::Driver;
use crate::rest::requests::BookRequest;
use axum::Json;
use axum::extract::State;
use axum::http::{self, header};
use axum::response::IntoResponse;
use catalog_core::clocks::Clock;
use catalog_core::rest::{JsonBody, RestError};
use std::sync::Arc;

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    State(clock): State<Arc<dyn Clock + Send + Sync>>,
    JsonBody(request): JsonBody<BookRequest>,
) -> Result<impl IntoResponse, RestError> {
    let fields = request.into_fields(clock.today())?;

    let book = driver.create_book(fields).await?;

    let location = format!("/api/books/{}", book.id());
    Ok((http::StatusCode::CREATED, [(header::LOCATION, location)], Json(book)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AuthorId, Book, BookFields};
    use crate::rest::testutils::*;
    use catalog_core::rest::testutils::*;
    use time::macros::date;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/api/books".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let author = context.create_author("Isaac", "Asimov").await;

        let request = BookRequest {
            title: Some("Foundation".to_owned()),
            isbn: Some("978-0-553-29335-7".to_owned()),
            published_date: Some(date!(1951-06-01)),
            author_id: Some(*author.id()),
        };
        let response = OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::CREATED)
            .take_response();
        let location =
            response.headers().get(header::LOCATION).unwrap().to_str().unwrap().to_owned();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let book = serde_json::from_slice::<Book>(&body).unwrap();

        assert_eq!(format!("/api/books/{}", book.id()), location);
        assert_eq!("Foundation", book.title().as_str());
        assert_eq!(&Some("978-0-553-29335-7".to_owned()), book.isbn());
        assert_eq!(&Some(date!(1951-06-01)), book.published_date());
        assert_eq!(&author, book.author());

        assert_eq!(Some(book.clone()), context.get_book(*book.id()).await);
    }

    #[tokio::test]
    async fn test_published_today() {
        let context = TestContext::setup().await;

        let author = context.create_author("Isaac", "Asimov").await;

        let request = BookRequest {
            title: Some("Fresh".to_owned()),
            published_date: Some(NOW.date()),
            author_id: Some(*author.id()),
            ..Default::default()
        };
        let book = OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Book>()
            .await;
        assert_eq!(&Some(NOW.date()), book.published_date());
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let context = TestContext::setup().await;

        let request = BookRequest { title: Some("".to_owned()), ..Default::default() };
        let response = OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .take_error()
            .await;
        assert_eq!("Validation failed", response.message);
        assert_eq!("/api/books", response.path);
        let errors = response.validation_errors.unwrap();
        assert_eq!(Some("must not be blank"), errors.get("title").map(String::as_str));
        assert_eq!(Some("must not be null"), errors.get("authorId").map(String::as_str));
        assert_eq!(2, errors.len());

        assert_eq!(0, context.count_books().await);
    }

    #[tokio::test]
    async fn test_future_date() {
        let context = TestContext::setup().await;

        let author = context.create_author("Isaac", "Asimov").await;

        let request = BookRequest {
            title: Some("Tomorrow".to_owned()),
            published_date: Some(date!(2024-03-16)),
            author_id: Some(*author.id()),
            ..Default::default()
        };
        let response = OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .take_error()
            .await;
        let errors = response.validation_errors.unwrap();
        assert_eq!(
            Some("must be a date in the past or in the present"),
            errors.get("publishedDate").map(String::as_str)
        );

        assert_eq!(0, context.count_books().await);
    }

    #[tokio::test]
    async fn test_author_not_found() {
        let context = TestContext::setup().await;

        let request = BookRequest {
            title: Some("Orphan".to_owned()),
            author_id: Some(AuthorId::new(99)),
            ..Default::default()
        };
        OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Author id=99 not found")
            .await;

        assert_eq!(0, context.count_books().await);
    }

    #[tokio::test]
    async fn test_duplicate_isbn() {
        let context = TestContext::setup().await;

        let author = context.create_author("Isaac", "Asimov").await;
        let original = context
            .create_book(BookFields::new(
                "I, Robot".to_owned(),
                Some("123".to_owned()),
                None,
                *author.id(),
            ))
            .await;

        let request = BookRequest {
            title: Some("Impostor".to_owned()),
            isbn: Some("123".to_owned()),
            author_id: Some(*author.id()),
            ..Default::default()
        };
        let response = OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::CONFLICT)
            .take_error()
            .await;
        assert_eq!("Data integrity violation", response.message);
        assert_eq!("Conflict", response.error);

        assert_eq!(1, context.count_books().await);
        assert_eq!(Some(original.clone()), context.get_book(*original.id()).await);
    }

    #[tokio::test]
    async fn test_bad_date_format() {
        let context = TestContext::setup().await;

        let author = context.create_author("Isaac", "Asimov").await;

        let request = serde_json::json!({
            "title": "Bad date",
            "publishedDate": "15/03/2024",
            "authorId": author.id().as_i64(),
        });
        OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Failed to deserialize the JSON body")
            .await;

        assert_eq!(0, context.count_books().await);
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route());
}
