//! # GraphQL Query Language AST
//!
//! The `graphql_fragment_deps::ast` module contains the part of the GraphQL query language AST
//! that's needed to classify definitions and selections and to follow fragment spreads to their
//! definitions. Source text isn't parsed by this crate. Instead, ASTs are either built by hand
//! using the node constructors or converted from an external parser's output, e.g. using
//! `Document::parse_with_graphql_parser` when the `graphql-parser` feature is enabled.
//! [Reference](https://spec.graphql.org/October2021/#sec-Language)
//!
//! Its main parts are:
//! - [`ASTContext`], a context containing an arena that defines the lifetime for an AST
//! - [`Definition`] and [`Selection`], whose variants are classified using predicates such as
//!   [`Definition::is_query`] or [`Selection::is_fragment_spread`]
//! - [`ASTKind`], the kind tag that these predicates compare
//!
//! ```
//! use graphql_fragment_deps::ast::*;
//!
//! let ctx = ASTContext::new();
//!
//! let selection_set = SelectionSet::from_iter_in([Field::new_leaf(&ctx, "field").into()], &ctx);
//! let operation = OperationDefinition::new(OperationKind::Query, None, selection_set);
//!
//! // Wrap a single operation in a Document
//! let document = Document::from_operation(&ctx, operation);
//! assert!(document.definitions[0].is_query());
//! assert_eq!(document.operations(&ctx).len(), 1);
//! ```

#[allow(clippy::module_inception)]
mod ast;

mod ast_conversion;
mod ast_kind;

pub use ast::*;
pub use ast_kind::ASTKind;
