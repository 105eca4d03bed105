use crate::ast::*;
use crate::error::{Error, ErrorType, Result};
use bumpalo::collections::CollectIn;
use graphql_parser::query::{self, Text};

/// Trait for converting `graphql-parser` AST Nodes into this crate's AST Nodes.
///
/// All names are copied onto the [`ASTContext`]'s arena, so the converted AST doesn't borrow from
/// the `graphql-parser` document or its source text.
pub trait ConvertNode<'a> {
    /// The AST Node of this crate that the node converts to.
    type Node;

    /// Convert the current `graphql-parser` node into an AST Node allocated on `ctx`.
    fn convert(&self, ctx: &'a ASTContext) -> Self::Node;
}

impl<'a, 'b, T: Text<'b>> ConvertNode<'a> for query::Document<'b, T> {
    type Node = Document<'a>;

    #[inline]
    fn convert(&self, ctx: &'a ASTContext) -> Document<'a> {
        Document {
            definitions: self
                .definitions
                .iter()
                .map(|definition| definition.convert(ctx))
                .collect_in(&ctx.arena),
        }
    }
}

impl<'a, 'b, T: Text<'b>> ConvertNode<'a> for query::Definition<'b, T> {
    type Node = Definition<'a>;

    #[inline]
    fn convert(&self, ctx: &'a ASTContext) -> Definition<'a> {
        match self {
            query::Definition::Operation(operation) => Definition::Operation(operation.convert(ctx)),
            query::Definition::Fragment(fragment) => Definition::Fragment(fragment.convert(ctx)),
        }
    }
}

impl<'a, 'b, T: Text<'b>> ConvertNode<'a> for query::OperationDefinition<'b, T> {
    type Node = OperationDefinition<'a>;

    fn convert(&self, ctx: &'a ASTContext) -> OperationDefinition<'a> {
        let (operation, name, selection_set) = match self {
            // The `{ ... }` shorthand is an anonymous query
            query::OperationDefinition::SelectionSet(selection_set) => {
                (OperationKind::Query, None, selection_set)
            }
            query::OperationDefinition::Query(operation) => (
                OperationKind::Query,
                operation.name.as_ref(),
                &operation.selection_set,
            ),
            query::OperationDefinition::Mutation(operation) => (
                OperationKind::Mutation,
                operation.name.as_ref(),
                &operation.selection_set,
            ),
            query::OperationDefinition::Subscription(operation) => (
                OperationKind::Subscription,
                operation.name.as_ref(),
                &operation.selection_set,
            ),
        };

        OperationDefinition::new(
            operation,
            name.map(|name| ctx.alloc_str(name.as_ref())),
            selection_set.convert(ctx),
        )
    }
}

impl<'a, 'b, T: Text<'b>> ConvertNode<'a> for query::FragmentDefinition<'b, T> {
    type Node = FragmentDefinition<'a>;

    #[inline]
    fn convert(&self, ctx: &'a ASTContext) -> FragmentDefinition<'a> {
        let query::TypeCondition::On(type_condition) = &self.type_condition;
        FragmentDefinition::new(
            ctx.alloc_str(self.name.as_ref()),
            ctx.alloc_str(type_condition.as_ref()),
            self.selection_set.convert(ctx),
        )
    }
}

impl<'a, 'b, T: Text<'b>> ConvertNode<'a> for query::SelectionSet<'b, T> {
    type Node = SelectionSet<'a>;

    #[inline]
    fn convert(&self, ctx: &'a ASTContext) -> SelectionSet<'a> {
        SelectionSet::from_iter_in(self.items.iter().map(|item| item.convert(ctx)), ctx)
    }
}

impl<'a, 'b, T: Text<'b>> ConvertNode<'a> for query::Selection<'b, T> {
    type Node = Selection<'a>;

    fn convert(&self, ctx: &'a ASTContext) -> Selection<'a> {
        match self {
            query::Selection::Field(field) => Selection::Field(Field {
                alias: field
                    .alias
                    .as_ref()
                    .map(|alias| ctx.alloc_str(alias.as_ref())),
                name: ctx.alloc_str(field.name.as_ref()),
                selection_set: field.selection_set.convert(ctx),
            }),
            query::Selection::FragmentSpread(spread) => Selection::FragmentSpread(
                FragmentSpread::new(ctx.alloc_str(spread.fragment_name.as_ref())),
            ),
            query::Selection::InlineFragment(fragment) => {
                let type_condition = fragment
                    .type_condition
                    .as_ref()
                    .map(|query::TypeCondition::On(name)| ctx.alloc_str(name.as_ref()));
                Selection::InlineFragment(InlineFragment::new(
                    type_condition,
                    fragment.selection_set.convert(ctx),
                ))
            }
        }
    }
}

impl<'a> Document<'a> {
    /// Convert a document that the `graphql-parser` crate has parsed into a Document.
    #[inline]
    pub fn from_graphql_parser<'b, T: Text<'b>>(
        ctx: &'a ASTContext,
        document: &query::Document<'b, T>,
    ) -> Self {
        document.convert(ctx)
    }

    /// Parse a query language source text using the `graphql-parser` crate and convert it into a
    /// Document.
    ///
    /// Parsing errors are returned as [`ErrorType::Syntax`] errors.
    pub fn parse_with_graphql_parser(ctx: &'a ASTContext, source: &str) -> Result<Self> {
        let document = query::parse_query::<&str>(source).map_err(|err| {
            log::debug!("Failed to parse document: {}", err);
            Error::new(err.to_string(), Some(ErrorType::Syntax))
        })?;
        Ok(document.convert(ctx))
    }
}
