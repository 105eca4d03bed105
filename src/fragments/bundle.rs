use super::fragment_names::CollectFragmentNames;
use crate::ast::*;
use crate::error::Result;
use bumpalo::collections::Vec;

/// Build the Document that's sent for a single operation of `document`.
///
/// The new Document starts with `operation`, followed by every fragment definition of `document`
/// that the operation transitively spreads, in the order in which they appear in `document`.
/// Fragments that the operation doesn't need are left out.
///
/// Fails when the operation's fragments can't be resolved, see
/// [`get_fragment_names`](super::get_fragment_names).
pub fn bundle_operation<'a>(
    ctx: &'a ASTContext,
    document: &'a Document<'a>,
    operation: &'a OperationDefinition<'a>,
) -> Result<Document<'a>> {
    let names = operation.fragment_names(ctx, document)?;

    let mut definitions = Vec::with_capacity_in(names.len() + 1, &ctx.arena);
    definitions.push(Definition::Operation(operation.clone()));
    for definition in document.definitions.iter() {
        if let Definition::Fragment(fragment) = definition {
            if names.contains(fragment.name.name) {
                definitions.push(Definition::Fragment(fragment.clone()));
            }
        }
    }

    log::trace!(
        "Bundled operation with {} fragment definition(s)",
        definitions.len() - 1
    );
    Ok(Document { definitions })
}

impl<'a, 'b> Document<'a> {
    /// Select an operation by name, or the lone operation when `None` is passed, and build the
    /// Document that's sent for it.
    ///
    /// See [`Document::operation`] and [`bundle_operation`]
    #[inline]
    pub fn bundle(&'a self, ctx: &'a ASTContext, by_name: Option<&'b str>) -> Result<Document<'a>> {
        let operation = self.operation(by_name)?;
        bundle_operation(ctx, self, operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;

    pub(super) fn fragment_names_of<'a>(document: &'a Document<'a>) -> std::vec::Vec<&'a str> {
        document
            .definitions
            .iter()
            .filter_map(|definition| definition.fragment())
            .map(|fragment| fragment.name.name)
            .collect()
    }

    fn spreading<'a>(ctx: &'a ASTContext, name: &'a str) -> SelectionSet<'a> {
        SelectionSet::from_iter_in([FragmentSpread::new(name).into()], ctx)
    }

    fn leaf<'a>(ctx: &'a ASTContext, name: &'a str) -> SelectionSet<'a> {
        SelectionSet::from_iter_in([Field::new_leaf(ctx, name).into()], ctx)
    }

    #[test]
    fn bundle_keeps_needed_fragments_in_order() {
        let ctx = ASTContext::new();
        let document = Document::from_iter_in(
            [
                FragmentDefinition::new("B", "Query", leaf(&ctx, "world")).into(),
                OperationDefinition::new(OperationKind::Query, Some("First"), spreading(&ctx, "A"))
                    .into(),
                OperationDefinition::new(OperationKind::Query, Some("Second"), spreading(&ctx, "C"))
                    .into(),
                FragmentDefinition::new("A", "Query", spreading(&ctx, "B")).into(),
                FragmentDefinition::new("C", "Query", leaf(&ctx, "hello")).into(),
            ],
            &ctx,
        );

        let bundled = document.bundle(&ctx, Some("First")).unwrap();
        let operations = bundled.operations(&ctx);
        assert_eq!(operations.len(), 1);
        assert_eq!(operations[0].name.unwrap().name, "First");
        assert!(bundled.definitions[0].is_query());
        // Fragments keep the order of the source document
        assert_eq!(fragment_names_of(&bundled), ["B", "A"]);

        let operation = document.operation(Some("Second")).unwrap();
        let bundled = bundle_operation(&ctx, &document, operation).unwrap();
        assert_eq!(fragment_names_of(&bundled), ["C"]);
    }

    #[test]
    fn bundle_without_fragments() {
        let ctx = ASTContext::new();
        let document = Document::from_iter_in(
            [
                OperationDefinition::new(
                    OperationKind::Mutation,
                    Some("Update"),
                    leaf(&ctx, "update"),
                )
                .into(),
                FragmentDefinition::new("Unused", "Query", leaf(&ctx, "hello")).into(),
            ],
            &ctx,
        );
        let bundled = document.bundle(&ctx, None).unwrap();
        assert_eq!(bundled.definitions.len(), 1);
        assert!(bundled.definitions[0].is_mutation());
    }

    #[test]
    fn bundle_propagates_errors() {
        let ctx = ASTContext::new();
        let operation =
            OperationDefinition::new(OperationKind::Query, Some("Q"), spreading(&ctx, "Missing"));
        let document = Document::from_operation(&ctx, operation);
        let error = document.bundle(&ctx, None).unwrap_err();
        assert_eq!(error.error_type(), ErrorType::MissingFragment);

        let error = document.bundle(&ctx, Some("Other")).unwrap_err();
        assert_eq!(error.error_type(), ErrorType::GraphQL);
    }
}
