//! Error types for resolution.
//!
//! [`UnsupportedTypeHint`] is the one designed failure of the resolution
//! engine. The other variants report misuse: asking for a type the
//! container has no way to build, or a hand-written manifest that does not
//! agree with itself.

use std::fmt;

use autowire_support::rendering::render_path;

use crate::hint::TypeHint;
use crate::key::DependencyKey;

/// Main error type for all container operations.
#[derive(Debug, thiserror::Error)]
pub enum AutowireError {
    /// A constructor or function parameter has no resolvable declared type.
    #[error(transparent)]
    UnsupportedTypeHint(#[from] UnsupportedTypeHint),

    /// The requested type cannot be autowired and nothing was registered
    /// for it.
    #[error("{}", .0)]
    NotRegistered(NotRegisteredError),

    /// A manifest produced arguments its `assemble` could not consume.
    #[error("Failed to construct {target}: {reason}")]
    ConstructionFailed {
        target: &'static str,
        reason: String,
    },
}

/// A parameter's declared type cannot be used to resolve a dependency.
///
/// Raised for missing declarations, union and intersection declarations,
/// and built-in types. The message is fixed; the accessors say where it
/// happened.
#[derive(Debug, Clone, thiserror::Error)]
#[error(
    "Missing or unsupported type hint. Union, intersection, and built-in types are not supported."
)]
pub struct UnsupportedTypeHint {
    target: &'static str,
    position: usize,
    hint: String,
}

impl UnsupportedTypeHint {
    pub(crate) fn new(target: &'static str, position: usize, hint: &TypeHint) -> Self {
        Self {
            target,
            position,
            hint: hint.to_string(),
        }
    }

    /// Type (or function) whose parameter was rejected.
    pub fn target(&self) -> &'static str {
        self.target
    }

    /// Zero-based position of the rejected parameter.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The rejected declaration, rendered.
    pub fn hint(&self) -> &str {
        &self.hint
    }
}

/// The requested type was neither registered nor autowirable.
#[derive(Debug)]
pub struct NotRegisteredError {
    /// The dependency that was requested
    pub requested: DependencyKey,
    /// Resolution path that led here, outermost first
    pub path: Vec<DependencyKey>,
    /// Registered types with similar names
    pub suggestions: Vec<String>,
}

impl fmt::Display for NotRegisteredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dependency not registered: {}", self.requested)?;

        if let Some(parent) = self.path.last() {
            write!(f, "\n  Required by: {parent}")?;
        }

        if self.path.len() > 1 {
            let names: Vec<&str> = self.path.iter().map(|k| k.type_name()).collect();
            write!(f, "\n  Resolution path: {}", render_path(&names))?;
        }

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n    - {suggestion}")?;
            }
        }

        write!(
            f,
            "\n  Hint: {} cannot be autowired. Register it with .add() or .provide() first",
            self.requested.short_name()
        )
    }
}

/// Convenient Result type for container operations.
pub type Result<T> = std::result::Result<T, AutowireError>;
