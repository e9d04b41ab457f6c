//! # xsdvalue
//!
//! Typed lexical values for the XML Schema (XSD) primitive datatypes.
//!
//! This library parses text lexical forms into compact typed in-memory
//! values, validates them eagerly against per-type constraints,
//! serializes them back to canonical lexical text, and defines the
//! ordering/equality semantics of the XML Schema Datatypes
//! specification.
//!
//! ## Features
//!
//! - Bit-packed temporal values (date, time, gYear, gYearMonth, gMonth,
//!   gMonthDay, gDay) behind a shared accessor contract
//! - dateTime with exact decimal seconds
//! - String-preserving arbitrary-precision decimal comparison
//! - Narrowest-representation nonNegativeInteger family
//! - ISO-8601-subset duration parsing with canonical output
//! - RFC 3986 syntactic URI validation with exact round-trip
//! - Insertion-ordered QName multimap
//!
//! ## Example
//!
//! ```rust
//! use xsdvalue::values::{Date, Decimal, Temporal};
//!
//! let date = Date::parse("2024-02-29Z").unwrap();
//! assert_eq!(date.day(), Some(29));
//! assert_eq!(date.lexical(), "2024-02-29Z");
//!
//! let a = Decimal::parse("1.50").unwrap();
//! let b = Decimal::parse("1.5").unwrap();
//! assert_eq!(a, b);               // compares by exact value
//! assert_eq!(a.lexical(), "1.50"); // spelling is preserved
//! ```
//!
//! All parsing and serialization is pure and synchronous. Every value is
//! immutable after construction and may be shared freely across threads;
//! the one mutable structure, [`namespaces::QNameMap`], is single-writer
//! and requires external synchronization when shared.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules - Wave 1: Foundation
pub mod error;
pub mod bits;

// Core modules - Wave 2: Names and namespaces
pub mod names;
pub mod namespaces;

// Value types - Wave 3+
pub mod values;

// Re-exports for convenience
pub use error::{Error, Result};
pub use namespaces::{NamespaceContext, PrefixResolver, QName, QNameMap};
pub use values::{parse_builtin, Temporal, Value};

/// Version of the xsdvalue library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XSD 1.0 namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XML namespace
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// XMLNS namespace
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";
