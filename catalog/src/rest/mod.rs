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


//! Entry point to the REST server.

use crate::driver::Driver;
use axum::Router;
use axum::extract::FromRef;
use catalog_core::clocks::Clock;
use catalog_core::rest::{map_errors, route_not_found};
use std::sync::Arc;

mod author_delete;
mod author_get;
mod authors_post;
mod book_delete;
mod book_get;
mod book_put;
mod books_get;
mod books_post;
mod requests;
#[cfg(test)]
mod testutils;

/// State shared by all handlers.
#[derive(Clone, FromRef)]
pub(crate) struct AppState {
    /// The business logic.
    driver: Driver,

    /// Source of the current date for validation purposes.
    clock: Arc<dyn Clock + Send + Sync>,
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver, clock: Arc<dyn Clock + Send + Sync>) -> Router {
    use axum::routing::{get, post};
    let state = AppState { driver, clock: clock.clone() };
    Router::new()
        .route("/api/books", get(books_get::handler).post(books_post::handler))
        .route(
            "/api/books/:id",
            get(book_get::handler).put(book_put::handler).delete(book_delete::handler),
        )
        .route("/api/authors", post(authors_post::handler))
        .route("/api/authors/:id", get(author_get::handler).delete(author_delete::handler))
        .fallback(route_not_found)
        .layer(axum::middleware::from_fn_with_state(clock, map_errors))
        .with_state(state)
}
