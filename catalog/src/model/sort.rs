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


//! Ordering of book listings.

use catalog_core::model::{ModelError, ModelResult, SortDirection};

/// Properties of a book that listings can be sorted by.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BookSortField {
    /// Sort by identifier, which matches insertion order.
    Id,

    /// Sort by title.
    #[default]
    Title,

    /// Sort by ISBN.
    Isbn,

    /// Sort by publication date.
    PublishedDate,
}

impl BookSortField {
    /// Parses the public name of a property.
    fn parse(s: &str) -> ModelResult<Self> {
        match s {
            "id" => Ok(BookSortField::Id),
            "title" => Ok(BookSortField::Title),
            "isbn" => Ok(BookSortField::Isbn),
            "publishedDate" => Ok(BookSortField::PublishedDate),
            _ => Err(ModelError(format!("Unknown sort property '{}'", s))),
        }
    }
}

/// Sort order for book listings.
///
/// Books that compare equal under the primary order are further sorted by ascending identifier,
/// and books without a value for the sort property come last.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BookSort {
    /// Property to sort by.
    pub field: BookSortField,

    /// Direction in which to sort the property.
    pub direction: SortDirection,
}

impl BookSort {
    /// Parses a sort specification of the form `<property>[,<direction>]`.
    pub fn parse(s: &str) -> ModelResult<Self> {
        let (field, direction) = match s.split_once(',') {
            Some((field, direction)) => (field.trim(), direction.trim()),
            None => (s.trim(), ""),
        };
        let field = BookSortField::parse(field)?;
        let direction = match direction {
            "" => SortDirection::Asc,
            direction => SortDirection::parse(direction)?,
        };
        Ok(Self { field, direction })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_sort_default() {
        assert_eq!(
            BookSort { field: BookSortField::Title, direction: SortDirection::Asc },
            BookSort::default()
        );
    }

    #[test]
    fn test_book_sort_parse_ok() {
        assert_eq!(
            BookSort { field: BookSortField::Title, direction: SortDirection::Asc },
            BookSort::parse("title,asc").unwrap()
        );
        assert_eq!(
            BookSort { field: BookSortField::PublishedDate, direction: SortDirection::Desc },
            BookSort::parse("publishedDate,DESC").unwrap()
        );
        assert_eq!(
            BookSort { field: BookSortField::Isbn, direction: SortDirection::Asc },
            BookSort::parse("isbn").unwrap()
        );
        assert_eq!(
            BookSort { field: BookSortField::Id, direction: SortDirection::Desc },
            BookSort::parse(" id , desc ").unwrap()
        );
    }

    #[test]
    fn test_book_sort_parse_errors() {
        assert_eq!(
            ModelError("Unknown sort property 'author'".to_owned()),
            BookSort::parse("author,asc").unwrap_err()
        );
        assert_eq!(
            ModelError("Invalid sort direction 'sideways'".to_owned()),
            BookSort::parse("title,sideways").unwrap_err()
        );
        assert!(BookSort::parse("").is_err());
    }
}
