//! # Conversion from `graphql-parser` ASTs
//!
//! This crate doesn't parse GraphQL source text itself. This module, which is enabled by the
//! `graphql-parser` feature, converts documents that the
//! [`graphql-parser`](https://docs.rs/graphql-parser) crate produces into this crate's arena AST.
//!
//! The conversion keeps what's needed to classify definitions and resolve fragment spreads and
//! drops the rest, such as arguments, directives, and variable definitions.
//!
//! ```
//! use graphql_fragment_deps::ast::*;
//!
//! let ctx = ASTContext::new();
//! let document = Document::parse_with_graphql_parser(
//!     &ctx,
//!     "query Root { ...Fields } fragment Fields on Query { hello }",
//! )
//! .unwrap();
//!
//! assert!(document.definitions[0].is_query());
//! assert!(document.definitions[1].is_fragment());
//! ```

mod conversion;

pub use conversion::ConvertNode;
