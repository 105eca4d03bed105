//! # Error and Result for this crate
//!
//! This crate defines a common [Error] structure that's returned when a document can't be
//! processed, for instance when a fragment spread refers to a fragment that the document doesn't
//! define, or when parsing through the `graphql-parser` adapter fails.

use std::{error, fmt, result};

/// This crate's result type using the [Error] structure.
pub type Result<T> = result::Result<T, Error>;

/// This crate's error structure which internal errors are converted into.
///
/// The error is split into a general message and a context string. For fragment cycles, for
/// instance, the context string is populated with the path of spreads that loops back on itself.
///
/// The Error implements both the [`fmt::Display`] and [`fmt::Debug`] traits. It also implements
/// [`error::Error`] so that it can be used with existing patterns for error handling.
#[derive(PartialEq, Eq, Clone)]
pub struct Error {
    pub(crate) message: String,
    pub(crate) context: Option<String>,
    pub(crate) error_type: ErrorType,
}

/// The category of an [Error].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorType {
    /// A document-level lookup failed, e.g. selecting an operation by name.
    GraphQL,
    /// The source text could not be parsed.
    Syntax,
    /// A fragment spread names a fragment that isn't defined in the document.
    MissingFragment,
    /// A fragment is spread within itself, directly or through other fragments.
    FragmentCycle,
}

impl Error {
    /// Create a new Error with only a main message from an input string.
    pub fn new<S: Into<String>>(message: S, error_type: Option<ErrorType>) -> Self {
        Self {
            message: message.into(),
            context: None,
            error_type: error_type.unwrap_or(ErrorType::GraphQL),
        }
    }

    /// Create a new Error with a main message and a context string from two input strings.
    pub fn new_with_context<S: Into<String>>(
        message: S,
        context: S,
        error_type: Option<ErrorType>,
    ) -> Self {
        Self {
            message: message.into(),
            context: Some(context.into()),
            error_type: error_type.unwrap_or(ErrorType::GraphQL),
        }
    }

    /// Returns the message of the current error. The context is discarded.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Returns the context of the current error, if any was attached.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Returns the category of the current error.
    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// Formats this error, with the option to include the context information as well,
    /// which will cause the string to be multi-line.
    pub fn print(&self, include_ctx: bool) -> String {
        let formatted = match self.error_type {
            ErrorType::GraphQL => format!("GraphQL Error: {}", self.message),
            ErrorType::Syntax => format!("Syntax Error: {}", self.message),
            ErrorType::MissingFragment => format!("Missing Fragment: {}", self.message),
            ErrorType::FragmentCycle => format!("Fragment Cycle: {}", self.message),
        };

        match self.context {
            Some(ref context) if include_ctx => format!("{}\n{}", formatted, context),
            _ => formatted,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.print(true))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}\n", self)
    }
}

impl error::Error for Error {}
