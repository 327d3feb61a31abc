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


//! Payloads accepted by the APIs and their validation rules.

use crate::model::{AuthorId, BookFields};
use catalog_core::rest::{FieldErrors, RestResult};
use serde::Deserialize;
use time::Date;

/// Message for a publication date that lies in the future.
const MUST_NOT_BE_FUTURE: &str = "must be a date in the past or in the present";

/// Contents of a book as sent by clients to create or replace it.
///
/// All fields are optional at decoding time so that missing values can be reported as validation
/// failures together with any other problem.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookRequest {
    /// Title of the book.
    pub(crate) title: Option<String>,

    /// International Standard Book Number.
    pub(crate) isbn: Option<String>,

    /// Date in which the book was published.
    pub(crate) published_date: Option<Date>,

    /// Identifier of the author of the book.
    pub(crate) author_id: Option<AuthorId>,
}

impl BookRequest {
    /// Validates the request against the current date `today` and converts it into the fields
    /// of a book.
    pub(crate) fn into_fields(self, today: Date) -> RestResult<BookFields> {
        let mut errors = FieldErrors::default();
        let title = errors.require_not_blank("title", self.title);
        let author_id = errors.require_present("authorId", self.author_id);
        if let Some(published_date) = self.published_date {
            errors.check("publishedDate", published_date <= today, MUST_NOT_BE_FUTURE);
        }

        match (title, author_id) {
            (Some(title), Some(author_id)) if errors.is_empty() => {
                Ok(BookFields::new(title, self.isbn, self.published_date, author_id))
            }
            _ => Err(errors.into()),
        }
    }
}

/// Name of an author as sent by clients to create it.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthorRequest {
    /// Given name of the author.
    pub(crate) first_name: Option<String>,

    /// Family name of the author.
    pub(crate) last_name: Option<String>,
}

impl AuthorRequest {
    /// Validates the request and returns the first and last names of the author.
    pub(crate) fn into_names(self) -> RestResult<(String, String)> {
        let mut errors = FieldErrors::default();
        let first_name = errors.require_not_blank("firstName", self.first_name);
        let last_name = errors.require_not_blank("lastName", self.last_name);

        match (first_name, last_name) {
            (Some(first_name), Some(last_name)) if errors.is_empty() => Ok((first_name, last_name)),
            _ => Err(errors.into()),
        }
    }
}
