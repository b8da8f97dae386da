//! Parameter descriptors.
//!
//! Rust has no runtime reflection over constructor signatures, so every
//! autowirable type and every injectable function describes its parameters
//! up front as a list of [`TypeHint`]s. Each parameter type reports its own
//! hint through [`Parameter`]; only [`TypeHint::Named`] can be resolved.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use crate::component::Component;
use crate::container::Container;
use crate::error::{AutowireError, Result};
use crate::key::DependencyKey;

type ResolveFn = fn(&mut Container) -> Result<Box<dyn Any>>;

/// Declared type of one constructor or function parameter.
#[derive(Debug, Clone)]
pub enum TypeHint {
    /// A single nominal type the container can construct.
    Named(Dependency),
    /// A primitive or standard library value type.
    Builtin(&'static str),
    /// Any one of several types.
    Union(Vec<&'static str>),
    /// All of several types at once.
    Intersection(Vec<&'static str>),
    /// No declared type.
    Missing,
}

impl TypeHint {
    /// Hint for a parameter of type `Arc<T>`.
    pub fn named<T: ?Sized + Component>() -> Self {
        TypeHint::Named(Dependency::of::<T>())
    }

    /// Returns `true` for the only resolvable kind of hint.
    pub fn is_named(&self) -> bool {
        matches!(self, TypeHint::Named(_))
    }
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeHint::Named(dependency) => write!(f, "{}", dependency.key()),
            TypeHint::Builtin(name) => f.write_str(name),
            TypeHint::Union(names) => f.write_str(&names.join(" | ")),
            TypeHint::Intersection(names) => f.write_str(&names.join(" & ")),
            TypeHint::Missing => f.write_str("<missing>"),
        }
    }
}

/// A resolvable parameter: the key of its type plus the monomorphized
/// entry point that constructs it.
#[derive(Clone, Copy)]
pub struct Dependency {
    key: DependencyKey,
    resolve: ResolveFn,
}

impl Dependency {
    /// Dependency on `T`, supplied to the parameter as `Arc<T>`.
    pub fn of<T: ?Sized + Component>() -> Self {
        Self {
            key: DependencyKey::of::<T>(),
            resolve: construct_erased::<T>,
        }
    }

    /// Type identity of the dependency.
    pub fn key(&self) -> DependencyKey {
        self.key
    }

    pub(crate) fn resolve(&self, container: &mut Container) -> Result<Box<dyn Any>> {
        (self.resolve)(container)
    }
}

impl fmt::Debug for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Dependency").field(&self.key).finish()
    }
}

fn construct_erased<T: ?Sized + Component>(container: &mut Container) -> Result<Box<dyn Any>> {
    let instance: Arc<T> = container.construct::<T>()?;
    Ok(Box::new(instance))
}

/// A type that may appear as a constructor or function parameter.
///
/// `Arc<T>` for any [`Component`] `T` is resolvable. Primitives, `String`
/// and `&'static str` declare themselves as built-ins and `Box<dyn Any>`
/// declares no type at all; resolving either fails with
/// [`UnsupportedTypeHint`](crate::error::UnsupportedTypeHint).
pub trait Parameter: Sized + 'static {
    /// The declared type of this parameter.
    fn hint() -> TypeHint;

    /// Recovers the typed value from a resolved argument.
    fn from_argument(argument: Box<dyn Any>) -> Option<Self>;
}

impl<T: ?Sized + Component> Parameter for Arc<T> {
    fn hint() -> TypeHint {
        TypeHint::named::<T>()
    }

    fn from_argument(argument: Box<dyn Any>) -> Option<Self> {
        argument.downcast::<Arc<T>>().ok().map(|instance| *instance)
    }
}

impl Parameter for Box<dyn Any> {
    fn hint() -> TypeHint {
        TypeHint::Missing
    }

    fn from_argument(argument: Box<dyn Any>) -> Option<Self> {
        Some(argument)
    }
}

macro_rules! builtin_parameters {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Parameter for $ty {
                fn hint() -> TypeHint {
                    TypeHint::Builtin(stringify!($ty))
                }

                fn from_argument(_: Box<dyn Any>) -> Option<Self> {
                    None
                }
            }
        )*
    };
}

builtin_parameters!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, &'static str, (),
);

/// Resolved parameter values, consumed in declaration order.
pub struct Arguments {
    target: &'static str,
    values: std::vec::IntoIter<Box<dyn Any>>,
    position: usize,
}

impl Arguments {
    pub(crate) fn new(target: &'static str, values: Vec<Box<dyn Any>>) -> Self {
        Self {
            target,
            values: values.into_iter(),
            position: 0,
        }
    }

    /// Takes the next argument as a `P`.
    ///
    /// # Errors
    /// [`AutowireError::ConstructionFailed`] when the manifest declared
    /// fewer parameters than are taken, or a different type at this
    /// position.
    pub fn take<P: Parameter>(&mut self) -> Result<P> {
        let position = self.position;
        self.position += 1;

        let argument = self
            .values
            .next()
            .ok_or_else(|| AutowireError::ConstructionFailed {
                target: self.target,
                reason: format!("argument {position} was never declared"),
            })?;

        P::from_argument(argument).ok_or_else(|| AutowireError::ConstructionFailed {
            target: self.target,
            reason: format!("argument {position} is not a {}", type_name::<P>()),
        })
    }

    /// Number of arguments not taken yet.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` once every argument has been taken.
    pub fn is_empty(&self) -> bool {
        self.values.len() == 0
    }
}

impl fmt::Debug for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arguments")
            .field("target", &self.target)
            .field("position", &self.position)
            .field("remaining", &self.values.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Mailer;
    #[derive(Debug)]
    struct Courier;
    crate::component!(Mailer, Courier);

    #[test]
    fn arc_parameters_are_named() {
        let hint = <Arc<Mailer> as Parameter>::hint();
        assert!(hint.is_named());
        match hint {
            TypeHint::Named(dep) => assert_eq!(dep.key(), DependencyKey::of::<Mailer>()),
            other => panic!("Expected Named, got: {other:?}"),
        }
    }

    #[test]
    fn primitives_are_builtin() {
        assert!(matches!(<u32 as Parameter>::hint(), TypeHint::Builtin("u32")));
        assert!(matches!(<String as Parameter>::hint(), TypeHint::Builtin("String")));
        assert!(matches!(<bool as Parameter>::hint(), TypeHint::Builtin("bool")));
    }

    #[test]
    fn untyped_box_is_missing() {
        assert!(matches!(<Box<dyn Any> as Parameter>::hint(), TypeHint::Missing));
    }

    #[test]
    fn hint_display() {
        assert_eq!(TypeHint::Builtin("i64").to_string(), "i64");
        assert_eq!(TypeHint::Union(vec!["A", "B"]).to_string(), "A | B");
        assert_eq!(TypeHint::Intersection(vec!["A", "B"]).to_string(), "A & B");
        assert_eq!(TypeHint::Missing.to_string(), "<missing>");
        assert!(TypeHint::named::<Mailer>().to_string().ends_with("Mailer"));
    }

    #[test]
    fn take_in_order() {
        let first = Arc::new(Mailer);
        let mut arguments = Arguments::new(
            "Target",
            vec![
                Box::new(first.clone()) as Box<dyn Any>,
                Box::new(Arc::new(Mailer)) as Box<dyn Any>,
            ],
        );

        assert_eq!(arguments.len(), 2);
        let taken: Arc<Mailer> = arguments.take().unwrap();
        assert!(Arc::ptr_eq(&taken, &first));
        let _second: Arc<Mailer> = arguments.take().unwrap();
        assert!(arguments.is_empty());
    }

    #[test]
    fn take_past_the_end_fails() {
        let mut arguments = Arguments::new("Target", vec![]);
        let err = arguments.take::<Arc<Mailer>>().unwrap_err();
        assert!(err.to_string().contains("argument 0 was never declared"));
    }

    #[test]
    fn take_wrong_type_fails() {
        let mut arguments =
            Arguments::new("Target", vec![Box::new(Arc::new(Mailer)) as Box<dyn Any>]);
        let err = arguments.take::<Arc<Courier>>().unwrap_err();
        match err {
            AutowireError::ConstructionFailed { target, reason } => {
                assert_eq!(target, "Target");
                assert!(reason.contains("argument 0 is not a"));
                assert!(reason.contains("Courier"));
            }
            other => panic!("Expected ConstructionFailed, got: {other:?}"),
        }
    }
}
