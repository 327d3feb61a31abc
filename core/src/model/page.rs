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


//! Pagination primitives.

use crate::model::{ModelError, ModelResult};
use serde::Serialize;

/// Page size used when the caller does not request one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size that a caller can request.  Larger requests are clamped to this value.
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Direction in which to sort a collection.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortDirection {
    /// Smallest values first.
    #[default]
    Asc,

    /// Largest values first.
    Desc,
}

impl SortDirection {
    /// Parses a direction name, ignoring case.
    pub fn parse(s: &str) -> ModelResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(ModelError(format!("Invalid sort direction '{}'", s))),
        }
    }
}

/// Position and size of the page that a caller wants to retrieve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageRequest {
    /// Zero-based index of the page.
    number: u32,

    /// Maximum number of elements in the page.
    size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { number: 0, size: DEFAULT_PAGE_SIZE }
    }
}

impl PageRequest {
    /// Creates a page request from untrusted `page` and `size` values, applying defaults to
    /// missing values and clamping out-of-range ones.
    pub fn new(page: Option<i64>, size: Option<i64>) -> Self {
        let number = match page {
            Some(page) if page > 0 => u32::try_from(page).unwrap_or(u32::MAX),
            _ => 0,
        };
        let size = match size {
            Some(size) if size >= 1 => {
                u32::try_from(size).unwrap_or(MAX_PAGE_SIZE).min(MAX_PAGE_SIZE)
            }
            _ => DEFAULT_PAGE_SIZE,
        };
        Self { number, size }
    }

    /// Returns the zero-based index of the page.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Returns the maximum number of elements in the page.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns the number of elements to skip to reach this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.number) * u64::from(self.size)
    }
}

/// A bounded, ordered slice of a larger result set with metadata describing its position.
#[derive(Debug, PartialEq, Serialize)]
#[cfg_attr(any(test, feature = "testutils"), derive(serde::Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Elements in this page.
    pub content: Vec<T>,

    /// Zero-based index of this page.
    pub number: u32,

    /// Requested page size, which can be larger than `content.len()`.
    pub size: u32,

    /// Number of elements in the whole result set.
    pub total_elements: u64,

    /// Number of pages needed to cover the whole result set.
    pub total_pages: u64,

    /// Whether this is the first page.
    pub first: bool,

    /// Whether this is the last page.
    pub last: bool,
}

impl<T> Page<T> {
    /// Creates a page holding `content` for the given `request` out of `total_elements`.
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(u64::from(request.size));
        Self {
            content,
            number: request.number,
            size: request.size,
            total_elements,
            total_pages,
            first: request.number == 0,
            last: u64::from(request.number) + 1 >= total_pages,
        }
    }
}
