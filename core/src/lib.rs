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


//! Building blocks for the catalog service.
//!
//! Services built on top of this crate follow a layered architecture and structure their code
//! with these modules:
//!
//! 1.  `model`: High-level data types that represent concepts in the domain of the application.
//!     Types validate themselves at construction time and carry no business logic.
//!
//! 1.  `db`: The persistence layer.  Services expose free functions that take an `Executor` and
//!     issue queries against either of the supported database systems.
//!
//! 1.  `driver`: The business logic layer.  Services provide their own `Driver` type that owns
//!     the database handle and coordinates every operation inside a single transaction.
//!
//! 1.  `rest`: The HTTP layer.  Services provide an `axum::Router` whose handlers decode and
//!     validate requests, call into the `Driver`, and encode the results.
//!
//! 1.  `main`: The app launcher, which gathers configuration from environment variables and
//!     starts the server.
//!
//! Every layer has its own error type (`ModelError`, `DbError`, `DriverError` and `RestError`).
//! Errors float to the top of the app using the `?` operator and are rendered into a uniform
//! error payload by the error mapper in the `rest` module.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod clocks;
pub mod db;
pub mod driver;
pub mod env;
pub mod model;
pub mod rest;
