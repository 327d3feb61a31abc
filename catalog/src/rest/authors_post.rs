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


//! API to create a new author.

use crate::driver::Driver;
use crate::rest::requests::AuthorRequest;
use axum::Json;
use axum::extract::State;
use axum::http::{self, header};
use axum::response::IntoResponse;
use catalog_core::rest::{JsonBody, RestError};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<AuthorRequest>,
) -> Result<impl IntoResponse, RestError> {
    let (first_name, last_name) = request.into_names()?;

    let author = driver.create_author(first_name, last_name).await?;

    let location = format!("/api/authors/{}", author.id());
    Ok((http::StatusCode::CREATED, [(header::LOCATION, location)], Json(author)))
}
