//! `graphql_fragment_deps`
//! =========
//!
//! _Classify GraphQL Query Language definitions and resolve the fragments an operation depends on._
//!
//! GraphQL clients that send operations to an API have to send every fragment definition that an
//! operation spreads alongside it, including fragments that are only spread by other fragments.
//! The **`graphql_fragment_deps`** library answers two questions about a parsed document:
//!
//! - What kind of node is this? Definitions are classified as queries, mutations,
//!   subscriptions, or fragment definitions, and selections as fields, fragment spreads, or inline
//!   fragments.
//! - Which named fragments does this operation transitively depend on?
//!
//! The crate doesn't parse source text itself and accepts ASTs that an external parser produced.
//! With the default `graphql-parser` feature documents parsed by the
//! [`graphql-parser`](https://docs.rs/graphql-parser) crate are converted to this crate's AST.
//! The `serde` feature makes AST nodes serializable.
//!
//! [A good place to start learning more about this crate is the `fragments` module...](fragments)

pub mod ast;
pub mod error;
pub mod fragments;

#[cfg(feature = "graphql-parser")]
pub mod compat;

pub use bumpalo;
