use crate::ast::*;
use crate::error::{Error, ErrorType, Result};
use bumpalo::{collections::Vec, Bump};
use hashbrown::{hash_map::DefaultHashBuilder, hash_set, HashSet};

/// A set of fragment names, as returned when resolving the fragments a selection set depends on.
///
/// Every name is contained at most once, no matter how many times or at how many depths it's
/// been spread. The set's iteration order is arbitrary; use [`FragmentNames::sorted`] when a stable
/// order is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentNames<'a> {
    names: HashSet<&'a str, DefaultHashBuilder, &'a Bump>,
}

impl<'a> FragmentNames<'a> {
    /// Create an empty set of fragment names on the given AST Context's arena.
    pub fn new_in(ctx: &'a ASTContext) -> Self {
        FragmentNames {
            names: HashSet::new_in(&ctx.arena),
        }
    }

    /// Checks whether the set contains the given fragment name.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns the number of fragment names in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Checks whether the set contains no fragment names.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns an iterator over all fragment names in arbitrary order.
    #[inline]
    pub fn iter(&self) -> hash_set::Iter<'_, &'a str> {
        self.names.iter()
    }

    /// Returns all fragment names sorted alphabetically.
    pub fn sorted(&self) -> std::vec::Vec<&'a str> {
        let mut names: std::vec::Vec<&'a str> = self.names.iter().copied().collect();
        names.sort_unstable();
        names
    }

    /// Adds a fragment name to the set and returns whether it wasn't present before.
    #[inline]
    pub fn insert(&mut self, name: &'a str) -> bool {
        self.names.insert(name)
    }

    /// Adds all names of `other` to this set.
    #[inline]
    pub fn union_with(&mut self, other: &FragmentNames<'a>) {
        self.names.extend(other.names.iter().copied());
    }
}

impl<'a, 'b> IntoIterator for &'b FragmentNames<'a> {
    type Item = &'b &'a str;
    type IntoIter = hash_set::Iter<'b, &'a str>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

/// Resolves the fragment names that are reachable from a selection set.
///
/// The document's fragment definitions are looked up once and shared for the whole traversal.
/// While a fragment's selection set is expanded its name is kept on `path`, which detects spreads
/// that loop back into a fragment that's still being expanded.
struct FragmentResolver<'a> {
    fragments: Fragments<'a>,
    path: Vec<'a, &'a str>,
    expanded: HashSet<&'a str, DefaultHashBuilder, &'a Bump>,
    names: FragmentNames<'a>,
}

impl<'a> FragmentResolver<'a> {
    fn new(ctx: &'a ASTContext, document: &'a Document<'a>) -> Self {
        FragmentResolver {
            fragments: document.fragments(ctx),
            path: Vec::new_in(&ctx.arena),
            expanded: HashSet::new_in(&ctx.arena),
            names: FragmentNames::new_in(ctx),
        }
    }

    fn collect_selection_set(&mut self, selection_set: &'a SelectionSet<'a>) -> Result<()> {
        for selection in selection_set.selections.iter() {
            match selection {
                Selection::FragmentSpread(spread) => self.collect_spread(spread.name.name)?,
                Selection::Field(field) => self.collect_selection_set(&field.selection_set)?,
                Selection::InlineFragment(fragment) => {
                    self.collect_selection_set(&fragment.selection_set)?
                }
            }
        }
        Ok(())
    }

    fn collect_spread(&mut self, name: &'a str) -> Result<()> {
        if self.path.contains(&name) {
            let mut cycle = self.path.join(" -> ");
            cycle.push_str(" -> ");
            cycle.push_str(name);
            log::debug!("Fragment spread cycle: {}", cycle);
            return Err(Error::new_with_context(
                format!("Cannot spread fragment \"{name}\" within itself"),
                cycle,
                Some(ErrorType::FragmentCycle),
            ));
        }

        self.names.insert(name);
        if self.expanded.contains(name) {
            return Ok(());
        }

        let fragment = match self.fragments.get(name) {
            Some(fragment) => *fragment,
            None => {
                log::debug!("Fragment spread \"{}\" has no definition", name);
                return Err(Error::new(
                    format!("Unknown fragment \"{name}\""),
                    Some(ErrorType::MissingFragment),
                ));
            }
        };

        log::trace!("Expanding fragment \"{}\"", name);
        self.path.push(name);
        self.collect_selection_set(&fragment.selection_set)?;
        self.path.pop();
        self.expanded.insert(name);
        Ok(())
    }
}

/// Resolve all fragment names that are transitively reachable from `selection_set`.
///
/// A name is reachable if it's spread directly in the selection set, or if it's spread in the
/// selection set of any field, inline fragment, or spread fragment definition below it. The
/// fragment definitions are looked up in `document`.
///
/// An absent or empty selection set resolves to an empty set. An error is returned when a spread
/// names a fragment that `document` doesn't define ([`ErrorType::MissingFragment`]) or when a
/// fragment is spread within itself ([`ErrorType::FragmentCycle`]). Either means the document
/// isn't self-consistent, and no partial result is returned.
pub fn get_fragment_names<'a>(
    ctx: &'a ASTContext,
    selection_set: Option<&'a SelectionSet<'a>>,
    document: &'a Document<'a>,
) -> Result<FragmentNames<'a>> {
    match selection_set {
        Some(selection_set) if !selection_set.is_empty() => {
            let mut resolver = FragmentResolver::new(ctx, document);
            resolver.collect_selection_set(selection_set)?;
            Ok(resolver.names)
        }
        _ => Ok(FragmentNames::new_in(ctx)),
    }
}

/// Trait to resolve the fragment names that an AST Node's selection set depends on.
///
/// `operation.fragment_names(&ctx, &document)`
pub trait CollectFragmentNames<'a> {
    /// Resolve all fragment names that are transitively reachable from this node.
    ///
    /// See [`get_fragment_names`]
    fn fragment_names(
        &'a self,
        ctx: &'a ASTContext,
        document: &'a Document<'a>,
    ) -> Result<FragmentNames<'a>>;
}

impl<'a> CollectFragmentNames<'a> for SelectionSet<'a> {
    #[inline]
    fn fragment_names(
        &'a self,
        ctx: &'a ASTContext,
        document: &'a Document<'a>,
    ) -> Result<FragmentNames<'a>> {
        get_fragment_names(ctx, Some(self), document)
    }
}

impl<'a> CollectFragmentNames<'a> for OperationDefinition<'a> {
    #[inline]
    fn fragment_names(
        &'a self,
        ctx: &'a ASTContext,
        document: &'a Document<'a>,
    ) -> Result<FragmentNames<'a>> {
        get_fragment_names(ctx, Some(&self.selection_set), document)
    }
}

impl<'a> CollectFragmentNames<'a> for FragmentDefinition<'a> {
    #[inline]
    fn fragment_names(
        &'a self,
        ctx: &'a ASTContext,
        document: &'a Document<'a>,
    ) -> Result<FragmentNames<'a>> {
        get_fragment_names(ctx, Some(&self.selection_set), document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn names_of(names: &FragmentNames) -> std::vec::Vec<String> {
        names.sorted().into_iter().map(String::from).collect()
    }

    fn leaf<'a>(ctx: &'a ASTContext, name: &'a str) -> Selection<'a> {
        Field::new_leaf(ctx, name).into()
    }

    fn selections<'a, const N: usize>(
        ctx: &'a ASTContext,
        selections: [Selection<'a>; N],
    ) -> SelectionSet<'a> {
        SelectionSet::from_iter_in(selections, ctx)
    }

    fn fragment<'a, const N: usize>(
        ctx: &'a ASTContext,
        name: &'a str,
        selections_of: [Selection<'a>; N],
    ) -> Definition<'a> {
        FragmentDefinition::new(name, "Query", selections(ctx, selections_of)).into()
    }

    #[test]
    fn union_of_name_sets() {
        let ctx = ASTContext::new();
        let mut left = FragmentNames::new_in(&ctx);
        assert!(left.insert("A"));
        assert!(!left.insert("A"));
        let mut right = FragmentNames::new_in(&ctx);
        right.insert("A");
        right.insert("B");
        left.union_with(&right);
        assert_eq!(left.len(), 2);
        assert_eq!(left.sorted(), ["A", "B"]);
        assert_eq!((&left).into_iter().count(), 2);
        assert_eq!(left.iter().count(), 2);
    }

    #[test]
    fn absent_selection_set() {
        let ctx = ASTContext::new();
        let fragment_a = fragment(&ctx, "A", [leaf(&ctx, "hello")]);
        let document = Document::from_iter_in([fragment_a], &ctx);
        assert!(get_fragment_names(&ctx, None, &document).unwrap().is_empty());
    }

    #[test]
    fn empty_selection_set() {
        let ctx = ASTContext::new();
        let document = Document::default_in(&ctx.arena);
        let selection_set = SelectionSet::default_in(&ctx.arena);
        let names = get_fragment_names(&ctx, Some(&selection_set), &document).unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn direct_spread() {
        let ctx = ASTContext::new();
        let document = Document::from_iter_in([fragment(&ctx, "A", [])], &ctx);
        let selection_set = selections(&ctx, [FragmentSpread::new("A").into()]);
        let names = selection_set.fragment_names(&ctx, &document).unwrap();
        assert_eq!(names_of(&names), ["A"]);
    }

    #[test]
    fn transitive_spread() {
        let ctx = ASTContext::new();
        let document = Document::from_iter_in(
            [
                fragment(&ctx, "A", [FragmentSpread::new("B").into()]),
                fragment(&ctx, "B", [leaf(&ctx, "hello")]),
            ],
            &ctx,
        );
        let selection_set = selections(&ctx, [FragmentSpread::new("A").into()]);
        let names = get_fragment_names(&ctx, Some(&selection_set), &document).unwrap();
        assert_eq!(names_of(&names), ["A", "B"]);
    }

    #[test]
    fn diamond_spreads() {
        let ctx = ASTContext::new();
        let document = Document::from_iter_in(
            [
                fragment(&ctx, "A", [FragmentSpread::new("Shared").into()]),
                fragment(&ctx, "B", [FragmentSpread::new("Shared").into()]),
                fragment(&ctx, "Shared", [leaf(&ctx, "id")]),
            ],
            &ctx,
        );
        let first = selections(&ctx, [FragmentSpread::new("A").into()]);
        let second = selections(&ctx, [FragmentSpread::new("B").into()]);
        let selection_set = selections(
            &ctx,
            [
                Field::new_with_selections("first", first).into(),
                Field::new_with_selections("second", second).into(),
                FragmentSpread::new("A").into(),
            ],
        );
        let names = get_fragment_names(&ctx, Some(&selection_set), &document).unwrap();
        assert_eq!(names.len(), 3);
        assert_eq!(names_of(&names), ["A", "B", "Shared"]);
    }

    #[test]
    fn spreads_in_fields_and_inline_fragments() {
        let ctx = ASTContext::new();
        let document = Document::from_iter_in(
            [
                fragment(&ctx, "C", [leaf(&ctx, "id")]),
                fragment(&ctx, "D", [leaf(&ctx, "name")]),
            ],
            &ctx,
        );
        let inline = InlineFragment::new(
            Some("User"),
            selections(&ctx, [FragmentSpread::new("D").into()]),
        );
        let selection_set = selections(
            &ctx,
            [Field::new_with_selections(
                "user",
                selections(
                    &ctx,
                    [
                        leaf(&ctx, "id"),
                        Field::new_with_selections(
                            "friends",
                            selections(&ctx, [FragmentSpread::new("C").into()]),
                        )
                        .into(),
                        inline.into(),
                    ],
                ),
            )
            .into()],
        );
        let names = get_fragment_names(&ctx, Some(&selection_set), &document).unwrap();
        assert_eq!(names_of(&names), ["C", "D"]);
    }

    #[test]
    fn missing_fragment_definition() {
        let ctx = ASTContext::new();
        let document = Document::from_iter_in([fragment(&ctx, "A", [])], &ctx);
        let selection_set = selections(&ctx, [FragmentSpread::new("B").into()]);
        let error = get_fragment_names(&ctx, Some(&selection_set), &document).unwrap_err();
        assert_eq!(error.error_type(), ErrorType::MissingFragment);
        assert_eq!(error.message(), "Unknown fragment \"B\"");
    }

    #[test]
    fn mutually_spreading_fragments() {
        let ctx = ASTContext::new();
        let document = Document::from_iter_in(
            [
                fragment(&ctx, "A", [FragmentSpread::new("B").into()]),
                fragment(&ctx, "B", [FragmentSpread::new("A").into()]),
            ],
            &ctx,
        );
        let selection_set = selections(&ctx, [FragmentSpread::new("A").into()]);
        let error = get_fragment_names(&ctx, Some(&selection_set), &document).unwrap_err();
        assert_eq!(error.error_type(), ErrorType::FragmentCycle);
        assert_eq!(error.context(), Some("A -> B -> A"));
    }
}
