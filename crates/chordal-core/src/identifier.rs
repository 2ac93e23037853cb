//! Entity identifiers backed by a global string interner.
//!
//! Every entity in a chord diagram is named by an [`Id`]. Ids are `Copy`,
//! cheap to hash and compare, and resolve back to their original text.

use std::{
    cmp::Ordering,
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> &'static Mutex<DefaultStringInterner> {
    INTERNER.get_or_init(|| Mutex::new(DefaultStringInterner::new()))
}

/// Interned entity identifier.
///
/// # Examples
///
/// ```
/// use chordal_core::identifier::Id;
///
/// let apple = Id::new("apple");
/// assert_eq!(apple, "apple");
/// assert_eq!(apple, Id::new("apple"));
/// assert_ne!(apple, Id::new("orange"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from its textual name, interning it on first use.
    pub fn new(name: &str) -> Self {
        let mut interner = interner().lock().expect("Failed to acquire interner lock");
        Self(interner.get_or_intern(name))
    }

    /// Returns `true` if the identifier resolves to an empty (or blank) string.
    pub fn is_blank(&self) -> bool {
        self.to_string().trim().is_empty()
    }

    /// Compares two identifiers by their text rather than by interning order.
    pub fn cmp_by_name(&self, other: &Id) -> Ordering {
        self.to_string().cmp(&other.to_string())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{str_value}")
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&String> for Id {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_interning_is_stable() {
        let a = Id::new("alpha");
        let b = Id::new("alpha");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "alpha");
    }

    #[test]
    fn test_id_from_str() {
        let id: Id = "beta".into();
        assert_eq!(id, "beta");
    }

    #[test]
    fn test_id_blank() {
        assert!(Id::new("").is_blank());
        assert!(Id::new("   ").is_blank());
        assert!(!Id::new("x").is_blank());
    }

    #[test]
    fn test_id_cmp_by_name() {
        // Intern in reverse order so symbol order differs from name order
        let z = Id::new("zz_cmp");
        let a = Id::new("aa_cmp");
        assert_eq!(a.cmp_by_name(&z), Ordering::Less);
        assert_eq!(z.cmp_by_name(&a), Ordering::Greater);
        assert_eq!(a.cmp_by_name(&a), Ordering::Equal);
    }
}
