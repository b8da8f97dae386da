//! Type identity keys.
//!
//! [`DependencyKey`] is the only addressing scheme of the container: both
//! registries are keyed by the nominal Rust type of what they hold.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

use autowire_support::rendering::shorten_type_name;

/// Identifies a dependency by its Rust type.
///
/// Two keys are equal iff they were created for the same type. The type
/// name is carried along for diagnostics only.
///
/// # Examples
/// ```
/// use autowire_container::key::DependencyKey;
///
/// let key = DependencyKey::of::<String>();
/// assert_eq!(key.type_name(), "alloc::string::String");
/// assert_eq!(key, DependencyKey::of::<String>());
/// assert_ne!(key, DependencyKey::of::<u8>());
/// ```
#[derive(Clone, Copy)]
pub struct DependencyKey {
    type_id: TypeId,
    type_name: &'static str,
}

impl DependencyKey {
    /// Creates a key for type `T`.
    ///
    /// Unsized types are fine: `DependencyKey::of::<dyn Trait>()` is how
    /// interface bindings are addressed.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`] of this dependency.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the fully qualified type name.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the type name without module prefixes.
    pub fn short_name(&self) -> String {
        shorten_type_name(self.type_name)
    }
}

impl PartialEq for DependencyKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for DependencyKey {}

impl Hash for DependencyKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DependencyKey({})", self.type_name)
    }
}

impl fmt::Display for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Mailer;

    trait Clock {}

    #[test]
    fn key_carries_type_name() {
        let key = DependencyKey::of::<Mailer>();
        assert!(key.type_name().ends_with("Mailer"));
        assert_eq!(key.short_name(), "Mailer");
    }

    #[test]
    fn same_type_same_key() {
        assert_eq!(DependencyKey::of::<Mailer>(), DependencyKey::of::<Mailer>());
    }

    #[test]
    fn handle_and_pointee_are_distinct() {
        assert_ne!(
            DependencyKey::of::<Mailer>(),
            DependencyKey::of::<Arc<Mailer>>()
        );
    }

    #[test]
    fn trait_object_keys() {
        let key = DependencyKey::of::<dyn Clock>();
        assert_eq!(key, DependencyKey::of::<dyn Clock>());
        assert_eq!(key.short_name(), "dyn Clock");
    }

    #[test]
    fn key_in_hashmap() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(DependencyKey::of::<Mailer>(), "mailer");
        map.insert(DependencyKey::of::<dyn Clock>(), "clock");
        assert_eq!(map.get(&DependencyKey::of::<dyn Clock>()), Some(&"clock"));
        assert_eq!(map.get(&DependencyKey::of::<bool>()), None);
    }
}
