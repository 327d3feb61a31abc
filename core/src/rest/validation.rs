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


//! Helpers to validate the fields of decoded requests.

use crate::rest::RestError;
use std::collections::BTreeMap;

/// Message for a required text field that is missing or only contains whitespace.
pub const MUST_NOT_BE_BLANK: &str = "must not be blank";

/// Message for a required field that is missing.
pub const MUST_NOT_BE_NULL: &str = "must not be null";

/// Accumulator of per-field constraint violations.
///
/// Validation does not stop at the first problem: every field is checked and all violations are
/// reported together in a single `RestError::ValidationFailed`.
#[derive(Debug, Default)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Records that `field` violates a constraint described by `message`.  Only the first
    /// violation of each field is kept.
    pub fn add(&mut self, field: &str, message: &str) {
        self.0.entry(field.to_owned()).or_insert_with(|| message.to_owned());
    }

    /// Records a violation for `field` with `message` unless `ok` holds.
    pub fn check(&mut self, field: &str, ok: bool, message: &str) {
        if !ok {
            self.add(field, message);
        }
    }

    /// Requires `value` to be present and to contain at least one non-whitespace character.
    pub fn require_not_blank(&mut self, field: &str, value: Option<String>) -> Option<String> {
        match value {
            Some(value) if !value.trim().is_empty() => Some(value),
            _ => {
                self.add(field, MUST_NOT_BE_BLANK);
                None
            }
        }
    }

    /// Requires `value` to be present.
    pub fn require_present<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.add(field, MUST_NOT_BE_NULL);
        }
        value
    }

    /// Returns true if no violations have been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<FieldErrors> for RestError {
    fn from(errors: FieldErrors) -> Self {
        RestError::ValidationFailed(errors.0)
    }
}
