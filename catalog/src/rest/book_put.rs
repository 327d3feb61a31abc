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


//! API to replace the contents of an existing book.

use crate::driver::Driver;
use crate::model::BookId;
use crate::rest::requests::BookRequest;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use catalog_core::clocks::Clock;
use catalog_core::rest::{JsonBody, PathParam, RestError};
use std::sync::Arc;

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    State(clock): State<Arc<dyn Clock + Send + Sync>>,
    PathParam(id): PathParam<BookId>,
    JsonBody(request): JsonBody<BookRequest>,
) -> Result<impl IntoResponse, RestError> {
    let fields = request.into_fields(clock.today())?;

    let book = driver.update_book(id, fields).await?;

    Ok(Json(book))
}
