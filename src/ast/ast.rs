pub use super::ast_conversion::*;
use super::ast_kind::ASTKind;
use crate::error::{Error, ErrorType, Result};
use bumpalo::collections::{CollectIn, Vec};
use hashbrown::{hash_map::DefaultHashBuilder, HashMap};

/// A context for a GraphQL document which holds an arena allocator.
///
/// For the duration of converting, classifying, and resolving the fragments of an AST it's
/// performant and convenient to allocate memory in one chunk for the AST's operations. This
/// context represents the lifetime of an AST and its derivatives, including the fragment name sets
/// that are resolved from it.
///
/// An AST Context in other words represents the memory a query and the operations you perform on
/// it take up. This is efficient since once you're done with the query this entire allocated
/// memory can be dropped all at once. Hence however, it's inadvisable to reuse the AST Context
/// across multiple incoming GraphQL requests.
pub struct ASTContext {
    /// An arena allocator that holds the memory allocated for the AST Context's lifetime
    pub arena: bumpalo::Bump,
}

impl ASTContext {
    /// Create a new AST context with a preallocated arena.
    pub fn new() -> Self {
        let arena = bumpalo::Bump::new();
        ASTContext { arena }
    }

    /// Allocate an `&str` slice onto the arena and return a reference to it.
    ///
    /// This is useful when the original slice has an undefined lifetime, e.g. when it's borrowed
    /// from an AST that an external parser produced.
    #[inline]
    pub fn alloc_str(&self, str: &str) -> &str {
        self.arena.alloc_str(str)
    }
}

impl Default for ASTContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Map of all fragment names in a [`Document`] to their [`FragmentDefinition`].
///
/// This is the lookup table that [`FragmentSpread`] nodes are resolved against.
pub type Fragments<'a> =
    HashMap<&'a str, &'a FragmentDefinition<'a>, DefaultHashBuilder, &'a bumpalo::Bump>;

/// AST Node for Selection Sets, which provide a way to select more information on a given parent.
///
/// Leaf fields carry an empty Selection Set, as can be checked using `SelectionSet::is_empty`.
/// [Reference](https://spec.graphql.org/October2021/#sec-Selection-Sets)
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelectionSet<'a> {
    pub selections: Vec<'a, Selection<'a>>,
}

impl<'a> SelectionSet<'a> {
    /// Checks whether this Selection Set contains any selections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

/// AST Node for Fields, which can be likened to functions or properties on a parent object.
///
/// In JSON this would represent a property in a JSON object.
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Fields)
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Field<'a> {
    /// A Field's `alias`, which is used to request information under a different name than the
    /// Field's `name`.
    /// [Reference](https://spec.graphql.org/October2021/#sec-Field-Alias)
    pub alias: Option<&'a str>,
    /// A Field's `name`, which represents a resolver on a GraphQL schema's object type.
    pub name: &'a str,
    /// A sub-Selection Set that is passed below this field to add selections to this field's
    /// returned GraphQL object type.
    ///
    /// When no selections are present, this will be an empty
    /// list, as can be checked using `SelectionSet::is_empty`.
    /// See: [SelectionSet]
    pub selection_set: SelectionSet<'a>,
}

impl<'a> Field<'a> {
    /// Get the alias of the field, if present, otherwise get the name.
    #[inline]
    pub fn alias_or_name(&self) -> &'a str {
        self.alias.unwrap_or(self.name)
    }

    /// Creates a new leaf field with the given `name` and an empty Selection Set.
    #[inline]
    pub fn new_leaf(ctx: &'a ASTContext, name: &'a str) -> Self {
        Field {
            alias: None,
            name,
            selection_set: SelectionSet::default_in(&ctx.arena),
        }
    }

    /// Creates a new leaf field with the given `name` and `alias`.
    #[inline]
    pub fn new_aliased_leaf(ctx: &'a ASTContext, alias: &'a str, name: &'a str) -> Self {
        Field {
            alias: Some(alias),
            name,
            selection_set: SelectionSet::default_in(&ctx.arena),
        }
    }

    /// Creates a new field with the given `name` selecting the given sub-Selection Set.
    #[inline]
    pub fn new_with_selections(name: &'a str, selection_set: SelectionSet<'a>) -> Self {
        Field {
            alias: None,
            name,
            selection_set,
        }
    }
}

/// AST Node for a Fragment Spread, which refers to a [`FragmentDefinition`] by name.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Fragments)
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FragmentSpread<'a> {
    /// A given name of the [FragmentDefinition] that must be spread in place of this Fragment
    /// Spread on a GraphQL API.
    pub name: NamedType<'a>,
}

impl<'a> FragmentSpread<'a> {
    #[inline]
    pub fn new(name: &'a str) -> Self {
        FragmentSpread {
            name: NamedType { name },
        }
    }
}

/// AST Node for an inline Fragment definition with an additional [`SelectionSet`].
/// This may only be applied when the type condition matches or when no type condition is present.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Fragments)
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InlineFragment<'a> {
    /// A given type condition's type name that must match before this fragment is applied on a
    /// GraphQL API. On inline fragments this is optional and no type condition has to be passed.
    pub type_condition: Option<NamedType<'a>>,
    /// A sub-Selection Set that is applied when this Fragment is applied to the parent
    /// Selection Set.
    /// See: [SelectionSet]
    pub selection_set: SelectionSet<'a>,
}

impl<'a> InlineFragment<'a> {
    #[inline]
    pub fn new(type_condition: Option<&'a str>, selection_set: SelectionSet<'a>) -> Self {
        InlineFragment {
            type_condition: type_condition.map(|name| NamedType { name }),
            selection_set,
        }
    }
}

/// AST Node of a selection as contained inside a [`SelectionSet`].
///
/// Any given Selection Set may contain fields, fragment spread, and inline fragments.
/// [Reference](https://spec.graphql.org/October2021/#Selection)
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind"))]
pub enum Selection<'a> {
    Field(Field<'a>),
    FragmentSpread(FragmentSpread<'a>),
    InlineFragment(InlineFragment<'a>),
}

impl<'a> Selection<'a> {
    /// Returns the kind tag of this Selection.
    #[inline]
    pub fn kind(&self) -> ASTKind {
        match self {
            Selection::Field(_) => ASTKind::Field,
            Selection::FragmentSpread(_) => ASTKind::FragmentSpread,
            Selection::InlineFragment(_) => ASTKind::InlineFragment,
        }
    }

    /// Checks whether this Selection is a [`Field`].
    #[inline]
    pub fn is_field(&self) -> bool {
        self.kind() == ASTKind::Field
    }

    /// Checks whether this Selection is a [`FragmentSpread`].
    #[inline]
    pub fn is_fragment_spread(&self) -> bool {
        self.kind() == ASTKind::FragmentSpread
    }

    /// Checks whether this Selection is an [`InlineFragment`].
    #[inline]
    pub fn is_inline_fragment(&self) -> bool {
        self.kind() == ASTKind::InlineFragment
    }

    /// Helper method to return the [`Field`] if the Selection is a `Field`.
    #[inline]
    pub fn field(&'a self) -> Option<&'a Field<'a>> {
        match self {
            Selection::Field(field) => Some(field),
            Selection::FragmentSpread(_) => None,
            Selection::InlineFragment(_) => None,
        }
    }

    /// Helper method to return the [`FragmentSpread`] if the Selection is a `FragmentSpread`.
    #[inline]
    pub fn fragment_spread(&'a self) -> Option<&'a FragmentSpread<'a>> {
        match self {
            Selection::FragmentSpread(spread) => Some(spread),
            Selection::Field(_) => None,
            Selection::InlineFragment(_) => None,
        }
    }

    /// Helper method to return the [`InlineFragment`] if the Selection is an `InlineFragment`.
    #[inline]
    pub fn inline_fragment(&'a self) -> Option<&'a InlineFragment<'a>> {
        match self {
            Selection::InlineFragment(fragment) => Some(fragment),
            Selection::FragmentSpread(_) => None,
            Selection::Field(_) => None,
        }
    }
}

/// AST Node for a type name.
///
/// This AST uses this reference instead of a raw `&str`.
/// slice whenever the AST refers to a concrete object type, fragment name, or operation name.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NamedType<'a> {
    pub name: &'a str,
}

/// AST Node for a Fragment definition with an additional Selection Set.
///
/// This may only be applied when the type condition matches or when no type condition is present
/// and extends a Selection Set by being applied using a [`FragmentSpread`] selection.
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Fragments)
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FragmentDefinition<'a> {
    /// A given name of the Fragment Definition that is used by [FragmentSpread] selections to
    /// refer to this definition.
    pub name: NamedType<'a>,
    /// A given type condition's type name that must match before this fragment is applied on a
    /// GraphQL API.
    pub type_condition: NamedType<'a>,
    /// A sub-Selection Set that is applied when this Fragment is applied to the parent
    /// Selection Set.
    /// See: [SelectionSet]
    pub selection_set: SelectionSet<'a>,
}

impl<'a> FragmentDefinition<'a> {
    #[inline]
    pub fn new(name: &'a str, type_condition: &'a str, selection_set: SelectionSet<'a>) -> Self {
        FragmentDefinition {
            name: NamedType { name },
            type_condition: NamedType {
                name: type_condition,
            },
            selection_set,
        }
    }
}

/// AST Node for a kind of operation, as referred to by an [`OperationDefinition`].
///
/// In GraphQL there are three different operations, with each having a unique identifier on
/// Operation Definitions.
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Operations)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

/// AST Node for an Operation Definition, which defines the entrypoint for GraphQL's execution.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Operations)
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OperationDefinition<'a> {
    /// The kind of operation that this definition specifies
    pub operation: OperationKind,
    // An optional name, as given to the operation definition.
    //
    // A [Document] may contain multiple
    // Operation Definitions from which a single one can be selected during execution. When a
    // Document contains only a single operation, it doesn't have to have a name.
    pub name: Option<NamedType<'a>>,
    /// A sub-Selection Set that is applied when this Operation Definition is executed to the root
    /// type of the specified kind of operation.
    /// See: [SelectionSet]
    pub selection_set: SelectionSet<'a>,
}

impl<'a> OperationDefinition<'a> {
    #[inline]
    pub fn new(
        operation: OperationKind,
        name: Option<&'a str>,
        selection_set: SelectionSet<'a>,
    ) -> Self {
        OperationDefinition {
            operation,
            name: name.map(|name| NamedType { name }),
            selection_set,
        }
    }

    /// Checks whether this operation is a query.
    #[inline]
    pub fn is_query(&self) -> bool {
        self.operation == OperationKind::Query
    }

    /// Checks whether this operation is a mutation.
    #[inline]
    pub fn is_mutation(&self) -> bool {
        self.operation == OperationKind::Mutation
    }

    /// Checks whether this operation is a subscription.
    #[inline]
    pub fn is_subscription(&self) -> bool {
        self.operation == OperationKind::Subscription
    }
}

/// AST Root Node for a GraphQL query language document. This contains one or more definitions of
/// fragments or operations.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Document)
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Document<'a> {
    pub definitions: Vec<'a, Definition<'a>>,
}

impl<'a, 'b> Document<'a> {
    /// Creates a new Document that contains only the given operation.
    ///
    /// This adapts a lone operation into the shape of a full document, e.g. before passing it on
    /// to utilities that accept documents. The operation isn't checked in any way.
    pub fn from_operation(ctx: &'a ASTContext, operation: OperationDefinition<'a>) -> Self {
        let mut definitions = Vec::with_capacity_in(1, &ctx.arena);
        definitions.push(Definition::Operation(operation));
        Document { definitions }
    }

    /// Returns the kind tag of this Document, which is always [`ASTKind::Document`].
    #[inline]
    pub fn kind(&self) -> ASTKind {
        ASTKind::Document
    }

    /// Checks whether this document contains any definitions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Returns all query, mutation, and subscription definitions of this document in the order
    /// in which they appear, skipping over fragment definitions.
    pub fn operations(&'a self, ctx: &'a ASTContext) -> Vec<'a, &'a OperationDefinition<'a>> {
        self.definitions
            .iter()
            .filter(|definition| {
                definition.is_query() || definition.is_mutation() || definition.is_subscription()
            })
            .filter_map(|definition| definition.operation())
            .collect_in(&ctx.arena)
    }

    /// Returns a `Map` keyed by all fragment names mapped to their fragment definitions.
    /// This is useful for manually traversing the document and resolving [`FragmentSpread`] nodes to
    /// their definitions.
    ///
    /// When a document defines a fragment name more than once the last definition wins.
    pub fn fragments(&'a self, ctx: &'a ASTContext) -> Fragments<'a> {
        let mut map = HashMap::new_in(&ctx.arena);
        for definition in self.definitions.iter() {
            if let Some(fragment) = definition.fragment() {
                map.insert(fragment.name.name, fragment);
            }
        }
        map
    }

    /// Finds an operation definition by name or the single operation contained in the document
    /// when `None` is passed.
    ///
    /// [Reference](https://spec.graphql.org/October2021/#GetOperation())
    pub fn operation(&'a self, by_name: Option<&'b str>) -> Result<&'a OperationDefinition<'a>> {
        if let Some(by_name) = by_name {
            self.definitions
                .iter()
                .find_map(|definition| match definition {
                    Definition::Operation(
                        operation @ OperationDefinition {
                            name: Some(NamedType { name }),
                            ..
                        },
                    ) if *name == by_name => Some(operation),
                    _ => None,
                })
                .ok_or_else(|| {
                    Error::new(
                        format!("Operation with name {by_name} does not exist"),
                        Some(ErrorType::GraphQL),
                    )
                })
        } else {
            let mut operations = self
                .definitions
                .iter()
                .filter_map(|definition| definition.operation());
            match (operations.next(), operations.next()) {
                (None, _) => Err(Error::new(
                    "Document does not contain any operations",
                    Some(ErrorType::GraphQL),
                )),
                (Some(operation), None) => Ok(operation),
                (Some(_), Some(_)) => Err(Error::new(
                    "Document contains more than one operation, missing operation name",
                    Some(ErrorType::GraphQL),
                )),
            }
        }
    }
}

/// AST Node for a Definition inside a query language document, which may either be an Operation
/// Definition or a Fragment Definition.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Document)
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind"))]
pub enum Definition<'a> {
    #[cfg_attr(feature = "serde", serde(rename = "OperationDefinition"))]
    Operation(OperationDefinition<'a>),
    #[cfg_attr(feature = "serde", serde(rename = "FragmentDefinition"))]
    Fragment(FragmentDefinition<'a>),
}

impl<'a> Definition<'a> {
    /// Returns the kind tag of this Definition.
    #[inline]
    pub fn kind(&self) -> ASTKind {
        match self {
            Definition::Operation(_) => ASTKind::OperationDefinition,
            Definition::Fragment(_) => ASTKind::FragmentDefinition,
        }
    }

    /// Checks whether this Definition is an [`OperationDefinition`].
    #[inline]
    pub fn is_operation(&self) -> bool {
        self.kind() == ASTKind::OperationDefinition
    }

    /// Checks whether this Definition is a [`FragmentDefinition`].
    #[inline]
    pub fn is_fragment(&self) -> bool {
        self.kind() == ASTKind::FragmentDefinition
    }

    /// Checks whether this Definition is a query [`OperationDefinition`].
    #[inline]
    pub fn is_query(&self) -> bool {
        matches!(self, Definition::Operation(operation) if operation.is_query())
    }

    /// Checks whether this Definition is a mutation [`OperationDefinition`].
    #[inline]
    pub fn is_mutation(&self) -> bool {
        matches!(self, Definition::Operation(operation) if operation.is_mutation())
    }

    /// Checks whether this Definition is a subscription [`OperationDefinition`].
    #[inline]
    pub fn is_subscription(&self) -> bool {
        matches!(self, Definition::Operation(operation) if operation.is_subscription())
    }

    /// Helper method to return the [`OperationDefinition`] if the Definition is an `OperationDefinition`.
    #[inline]
    pub fn operation(&'a self) -> Option<&'a OperationDefinition<'a>> {
        match self {
            Definition::Operation(operation) => Some(operation),
            Definition::Fragment(_) => None,
        }
    }

    /// Helper method to return the [`FragmentDefinition`] if the Definition is a `FragmentDefinition`.
    #[inline]
    pub fn fragment(&'a self) -> Option<&'a FragmentDefinition<'a>> {
        match self {
            Definition::Fragment(fragment) => Some(fragment),
            Definition::Operation(_) => None,
        }
    }
}
