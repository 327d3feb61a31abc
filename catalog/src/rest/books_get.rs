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


//! API to list books one page at a time.

use crate::driver::Driver;
use crate::model::BookSort;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use catalog_core::model::PageRequest;
use catalog_core::rest::{EmptyBody, QueryParams, RestError};
use serde::{Deserialize, Deserializer};

/// Deserializes an optional number, treating a blank value as absent.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Query parameters accepted by this API.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct ListQuery {
    /// Zero-based index of the page to return.
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    page: Option<i64>,

    /// Maximum number of books per page.
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    size: Option<i64>,

    /// Sort specification of the form `<property>[,<direction>]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<String>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    QueryParams(query): QueryParams<ListQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let page = PageRequest::new(query.page, query.size);
    let sort = match query.sort.filter(|s| !s.trim().is_empty()) {
        Some(sort) => BookSort::parse(&sort)?,
        None => BookSort::default(),
    };

    let books = driver.list_books(page, sort).await?;

    Ok(Json(books))
}
