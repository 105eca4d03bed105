//! # Resolving Fragment Dependencies
//!
//! The `graphql_fragment_deps::fragments` module finds the fragments that a selection set depends
//! on. A fragment is a dependency when it's spread in the selection set, or anywhere below it,
//! including inside of other fragments that are spread, to any depth.
//!
//! A client sending an operation to a GraphQL API must send all fragment definitions that the
//! operation depends on alongside it. [`get_fragment_names`] or the [`CollectFragmentNames`] trait
//! return the names of these fragments, and [`bundle_operation`] builds the Document containing the
//! operation and exactly those fragment definitions.
//!
//! ```
//! use graphql_fragment_deps::{ast::*, fragments::*};
//!
//! let ctx = ASTContext::new();
//! let spread = |name| SelectionSet::from_iter_in([FragmentSpread::new(name).into()], &ctx);
//! let hello = || SelectionSet::from_iter_in([Field::new_leaf(&ctx, "hello").into()], &ctx);
//!
//! // query Root { ...A }
//! // fragment A on Query { ...B }
//! // fragment B on Query { hello }
//! // fragment Unused on Query { hello }
//! let document = Document::from_iter_in([
//!     OperationDefinition::new(OperationKind::Query, Some("Root"), spread("A")).into(),
//!     FragmentDefinition::new("A", "Query", spread("B")).into(),
//!     FragmentDefinition::new("B", "Query", hello()).into(),
//!     FragmentDefinition::new("Unused", "Query", hello()).into(),
//! ], &ctx);
//!
//! let operation = document.operation(Some("Root")).unwrap();
//! let names = operation.fragment_names(&ctx, &document).unwrap();
//! assert_eq!(names.sorted(), ["A", "B"]);
//! ```
//!
//! Resolution fails when a spread names a fragment that isn't defined in the document, or when a
//! fragment is spread within itself, since such a document can't be sent as is.

mod bundle;
mod fragment_names;

pub use bundle::bundle_operation;
pub use fragment_names::{get_fragment_names, CollectFragmentNames, FragmentNames};
