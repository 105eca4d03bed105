use super::ast::*;
use bumpalo::collections::{CollectIn, Vec};

/// Trait for AST nodes that are created empty on an arena.
pub trait DefaultIn<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self;
}

impl<'a> DefaultIn<'a> for Document<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        Document {
            definitions: Vec::new_in(arena),
        }
    }
}

impl<'a> DefaultIn<'a> for SelectionSet<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        SelectionSet {
            selections: Vec::new_in(arena),
        }
    }
}

/// Trait for AST nodes that wrap a list and may be collected from an iterator into the arena.
pub trait FromIteratorIn<'a>: Sized {
    type Item;
    fn from_iter_in<I: IntoIterator<Item = Self::Item>>(iter: I, ctx: &'a ASTContext) -> Self;
}

impl<'a> FromIteratorIn<'a> for SelectionSet<'a> {
    type Item = Selection<'a>;
    #[inline]
    fn from_iter_in<I: IntoIterator<Item = Self::Item>>(iter: I, ctx: &'a ASTContext) -> Self {
        SelectionSet {
            selections: iter.into_iter().collect_in(&ctx.arena),
        }
    }
}

impl<'a> FromIteratorIn<'a> for Document<'a> {
    type Item = Definition<'a>;
    #[inline]
    fn from_iter_in<I: IntoIterator<Item = Self::Item>>(iter: I, ctx: &'a ASTContext) -> Self {
        Document {
            definitions: iter.into_iter().collect_in(&ctx.arena),
        }
    }
}

impl<'a> From<Field<'a>> for Selection<'a> {
    #[inline]
    fn from(field: Field<'a>) -> Self {
        Selection::Field(field)
    }
}

impl<'a> From<FragmentSpread<'a>> for Selection<'a> {
    #[inline]
    fn from(spread: FragmentSpread<'a>) -> Self {
        Selection::FragmentSpread(spread)
    }
}

impl<'a> From<InlineFragment<'a>> for Selection<'a> {
    #[inline]
    fn from(fragment: InlineFragment<'a>) -> Self {
        Selection::InlineFragment(fragment)
    }
}

impl<'a> From<OperationDefinition<'a>> for Definition<'a> {
    #[inline]
    fn from(operation: OperationDefinition<'a>) -> Self {
        Definition::Operation(operation)
    }
}

impl<'a> From<FragmentDefinition<'a>> for Definition<'a> {
    #[inline]
    fn from(fragment: FragmentDefinition<'a>) -> Self {
        Definition::Fragment(fragment)
    }
}
