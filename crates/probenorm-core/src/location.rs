//! Location resolution: probe target host → display label.
//!
//! The alias table is owned by the caller and handed in as an
//! [`AliasLookup`]. Nothing here caches, reloads or mutates it. Each lookup
//! is one read; a table refreshed concurrently behind an [`RwLock`] is read
//! under its lock once per target with no retry.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

/// Read-only `target → display location` table.
pub trait AliasLookup {
    fn lookup(&self, target: &str) -> Option<String>;
}

impl AliasLookup for HashMap<String, String> {
    fn lookup(&self, target: &str) -> Option<String> {
        self.get(target).cloned()
    }
}

impl AliasLookup for BTreeMap<String, String> {
    fn lookup(&self, target: &str) -> Option<String> {
        self.get(target).cloned()
    }
}

impl<T: AliasLookup + ?Sized> AliasLookup for &T {
    fn lookup(&self, target: &str) -> Option<String> {
        (**self).lookup(target)
    }
}

impl<T: AliasLookup + ?Sized> AliasLookup for Arc<T> {
    fn lookup(&self, target: &str) -> Option<String> {
        (**self).lookup(target)
    }
}

/// An unset provider resolves nothing.
impl<T: AliasLookup> AliasLookup for Option<T> {
    fn lookup(&self, target: &str) -> Option<String> {
        self.as_ref().and_then(|table| table.lookup(target))
    }
}

impl<T: AliasLookup> AliasLookup for RwLock<T> {
    fn lookup(&self, target: &str) -> Option<String> {
        match self.read() {
            Ok(table) => table.lookup(target),
            // A writer panicked mid-refresh; the data is still readable.
            Err(poisoned) => poisoned.into_inner().lookup(target),
        }
    }
}

/// The empty table.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAliases;

impl AliasLookup for NoAliases {
    fn lookup(&self, _target: &str) -> Option<String> {
        None
    }
}

/// Resolve `target` to its display location, falling back to the target
/// itself when the table has no entry.
pub fn resolve_location(target: &str, aliases: &dyn AliasLookup) -> String {
    aliases.lookup(target).unwrap_or_else(|| target.to_string())
}
