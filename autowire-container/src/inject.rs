//! Injection into plain functions and closures.
//!
//! [`Container::call`] accepts anything callable once whose parameters are
//! all [`Parameter`]s, up to eight of them. The parameter types are read
//! from the signature, so closures need their parameters annotated:
//!
//! ```rust
//! use std::sync::Arc;
//! use autowire_container::{Arguments, Autowire, Container, Result, TypeHint};
//!
//! struct Greeting;
//!
//! impl Autowire for Greeting {
//!     fn parameters() -> Vec<TypeHint> { Vec::new() }
//!     fn assemble(_: Arguments) -> Result<Self> { Ok(Greeting) }
//! }
//!
//! let mut container = Container::new();
//! let len = container.call(|greeting: Arc<Greeting>| {
//!     let _ = greeting;
//!     5
//! });
//! assert_eq!(len.unwrap(), 5);
//! ```

use crate::error::Result;
use crate::hint::{Arguments, Parameter, TypeHint};

/// A callable whose parameters the container can supply.
///
/// `Args` is the tuple of parameter types; it only exists to tell the
/// arities apart and is inferred at the call site.
pub trait Injected<Args> {
    /// What the callable returns.
    type Output;

    /// Declared types of the parameters, in order.
    fn parameters() -> Vec<TypeHint>;

    /// Calls with resolved arguments.
    fn invoke(self, arguments: Arguments) -> Result<Self::Output>;
}

macro_rules! impl_injected {
    ($($param:ident),*) => {
        impl<F, R, $($param,)*> Injected<($($param,)*)> for F
        where
            F: FnOnce($($param),*) -> R,
            $($param: Parameter,)*
        {
            type Output = R;

            fn parameters() -> Vec<TypeHint> {
                vec![$($param::hint()),*]
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn invoke(self, mut arguments: Arguments) -> Result<R> {
                $( let $param = arguments.take::<$param>()?; )*
                Ok(self($($param),*))
            }
        }
    };
}

impl_injected!();
impl_injected!(P1);
impl_injected!(P1, P2);
impl_injected!(P1, P2, P3);
impl_injected!(P1, P2, P3, P4);
impl_injected!(P1, P2, P3, P4, P5);
impl_injected!(P1, P2, P3, P4, P5, P6);
impl_injected!(P1, P2, P3, P4, P5, P6, P7);
impl_injected!(P1, P2, P3, P4, P5, P6, P7, P8);

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;
    use std::sync::Arc;

    struct Clock;
    struct Mailer;
    crate::component!(Clock, Mailer);

    fn parameters_of<Args, F: Injected<Args>>(_: &F) -> Vec<TypeHint> {
        F::parameters()
    }

    #[test]
    fn zero_arity() {
        let f = || 1;
        assert!(parameters_of(&f).is_empty());
    }

    #[test]
    fn hints_follow_declaration_order() {
        let f = |_: Arc<Mailer>, _: Arc<Clock>, _: u8| ();
        let hints = parameters_of(&f);

        assert_eq!(hints.len(), 3);
        assert!(hints[0].to_string().ends_with("Mailer"));
        assert!(hints[1].to_string().ends_with("Clock"));
        assert!(matches!(hints[2], TypeHint::Builtin("u8")));
    }

    #[test]
    fn invoke_passes_arguments_in_order() {
        let mailer = Arc::new(Mailer);
        let clock = Arc::new(Clock);
        let arguments = Arguments::new(
            "test",
            vec![
                Box::new(mailer.clone()) as Box<dyn Any>,
                Box::new(clock.clone()) as Box<dyn Any>,
            ],
        );

        let f = |m: Arc<Mailer>, c: Arc<Clock>| (m, c);
        let (m, c) = f.invoke(arguments).unwrap();

        assert!(Arc::ptr_eq(&m, &mailer));
        assert!(Arc::ptr_eq(&c, &clock));
    }

    fn plain_function(clock: Arc<Clock>) -> Arc<Clock> {
        clock
    }

    #[test]
    fn function_items_are_injectable() {
        let hints = parameters_of(&plain_function);
        assert_eq!(hints.len(), 1);
    }
}
