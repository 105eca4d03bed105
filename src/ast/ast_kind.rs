use std::fmt;

/// An enum of identifiers representing AST nodes.
///
/// This enum can be printed using the [`fmt::Display`] trait.
/// It's the `kind` tag of [`Document`](crate::ast::Document), [`Definition`](crate::ast::Definition)
/// and [`Selection`](crate::ast::Selection) nodes, as returned by their `kind()` methods, which the
/// classification predicates compare against.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ASTKind {
    /// See: [crate::ast::Document]
    Document,
    /// See: [crate::ast::OperationDefinition]
    OperationDefinition,
    /// See: [crate::ast::FragmentDefinition]
    FragmentDefinition,
    /// See: [crate::ast::Field]
    Field,
    /// See: [crate::ast::FragmentSpread]
    FragmentSpread,
    /// See: [crate::ast::InlineFragment]
    InlineFragment,
}

impl fmt::Display for ASTKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ASTKind::Document => f.write_str("Document"),
            ASTKind::OperationDefinition => f.write_str("Operation Definition"),
            ASTKind::FragmentDefinition => f.write_str("Fragment Definition"),
            ASTKind::Field => f.write_str("Field"),
            ASTKind::FragmentSpread => f.write_str("Fragment Spread"),
            ASTKind::InlineFragment => f.write_str("Inline Fragment"),
        }
    }
}
