// Copyright 2025 The fieldscope authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]

//! # fieldscope
//!
//! A metadata-driven engine for validating, describing and tabulating
//! structured records. Given a declarative schema (field kinds,
//! constraints, enum semantics) and a runtime record instance, `fieldscope`
//! walks arbitrarily nested field trees (scalars, enums including bitmasks,
//! nested records, lists, maps) driven entirely by the schema metadata,
//! with no per-type code.
//!
//! ## Features
//!
//! - **Constraint validation** - required/alternative presence, length and
//!   value bounds, collection counts, recursive nested-record checks, with
//!   fail-fast, transport-ready error messages
//! - **Human-readable description** - records become ordered display maps
//!   (and YAML text) with display-name derivation, base64 bytes, and
//!   bitmask-aware enum rendering
//! - **Tabular projection** - records flatten into tables, including
//!   per-field list sources projected into their own tables
//! - **Closed kind model** - one exhaustive `match` per engine over the
//!   field-kind sum type, so a new kind cannot fall through unhandled
//! - **Immutable shared metadata** - registered once at startup, linked
//!   exactly once under concurrent first use, then read-only
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldscope::prelude::*;
//!
//! let descr = MessageDescription::new("ListAnnotationsRequest", "es.ListAnnotationsRequest")
//!     .field(FieldMeta::new("Name", FieldKind::String).required())
//!     .field(FieldMeta::new("Limit", FieldKind::Uint32).max(1000));
//!
//! let record = Record::new().with("Name", "test").with("Limit", 100u32);
//! Validator::default().validate(Some(&record), Some(&descr))?;
//!
//! let described = RecordDescriber::to_map(&record);
//! assert!(described.contains_key("Name"));
//! # Ok::<(), fieldscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata`] - the immutable schema model and registry
//! - [`access`] - the [`Value`](access::Value) sum type and the
//!   [`FieldAccessor`](access::FieldAccessor) capability
//! - [`validation`] - recursive, fail-fast constraint validation
//! - [`describe`] - record → ordered display map (and YAML text)
//! - [`tabular`] - record → flat tables (and text rendering)
//!
//! The engines are pure and synchronous: no I/O, no blocking, no shared
//! mutable state beyond the registry's one-shot linking pass. Once
//! metadata registration has completed at startup, calls may run
//! concurrently from any number of threads.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result). Validation
//! failures carry exact, stable message shapes (`"Name is required"`,
//! `"Limit: maximum value is 1000"`) that transport adapters may prefix
//! with a classification tag from [`Error::classification`].

#[macro_use]
pub(crate) mod error;

/// Record access: the closed value sum type and the accessor capability.
///
/// Engines depend only on the [`access::FieldAccessor`] trait and the
/// [`access::Value`] union; [`access::Record`] is the crate's
/// general-purpose dynamic implementation.
pub mod access;

/// Human-readable record description.
///
/// [`describe::RecordDescriber`] converts a record into an ordered,
/// display-keyed map ([`describe::DescribeMap`]) and renders it as YAML.
pub mod describe;

/// Schema metadata: message, field and enum descriptions plus the
/// immutable registry with its one-shot linking pass.
pub mod metadata;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use fieldscope::prelude::*;
///
/// let record = Record::new().with("Name", "test");
/// let map = RecordDescriber::to_map(&record);
/// assert_eq!(map.len(), 1);
/// ```
pub mod prelude;

/// Tabular projection of records into flat tables and rendered text.
pub mod tabular;

/// Constraint validation of records against message descriptions.
pub mod validation;

/// `fieldscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type
/// is always [`Error`], used consistently throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// `fieldscope` Error type
///
/// The main error type for all operations in this crate. See
/// [`Error::classification`] for the transport-facing grouping.
pub use error::Error;
