//! Interned names for blocks, fields and reference segments.
//!
//! Every name that appears in an ACL document is stored once in a global
//! string interner and referred to through the copyable [`Id`] handle, so that
//! name lookups during reference resolution compare integers instead of strings.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by all documents.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// An interned identifier.
///
/// # Examples
///
/// ```
/// use acl_core::identifier::Id;
///
/// let network = Id::new("Network");
/// assert_eq!(network, Id::new("Network"));
/// assert_eq!(network, "Network");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its handle.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Calls `f` with the interned text of this identifier.
    ///
    /// The interner lock is held while `f` runs, so `f` must not create or
    /// display other identifiers.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        f(interner.resolve(self.0).unwrap_or_default())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.with_str(str::to_owned);
        f.write_str(&text)
    }
}

impl std::str::FromStr for Id {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.with_str(|name| name == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
