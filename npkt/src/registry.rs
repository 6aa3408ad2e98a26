//! Mutable value-to-name catalogues with total lookup.

use std::collections::HashMap;

use tracing::debug;

use crate::named::{Domain, NamedNum};

/// The catalogue for one protocol-number domain.
///
/// Lookup is total: [`Registry::get`] resolves every value of the domain's
/// width, falling back to a synthesized `"unknown"` instance for values
/// without a binding. Synthesized instances are never inserted.
///
/// A registry is a plain owned value. Share it by `&` once populated, or
/// wrap it in an [`std::sync::RwLock`] when [`Registry::register`] must run
/// concurrently with lookups on other threads. There is no process-wide
/// instance; callers that want one own it themselves.
#[derive(Debug, Clone)]
pub struct Registry<D: Domain> {
    map: HashMap<D, NamedNum<D>>,
}

impl<D: Domain> Registry<D> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// A registry seeded with the domain's default catalogue.
    pub fn with_stock() -> Self {
        let stock = D::stock();
        let mut map = HashMap::with_capacity(stock.len());
        for &(raw, name) in stock {
            let value = D::from_raw(raw);
            map.insert(value, NamedNum::new_unchecked(value, name));
        }
        Self { map }
    }

    /// Resolve `value`, synthesizing an `"unknown"` instance when it has no
    /// binding. Never fails.
    pub fn get(&self, value: D) -> NamedNum<D> {
        self.map
            .get(&value)
            .cloned()
            .unwrap_or_else(|| NamedNum::unknown(value))
    }

    /// Non-synthesizing probe.
    pub fn lookup(&self, value: D) -> Option<&NamedNum<D>> {
        self.map.get(&value)
    }

    /// Insert or overwrite the binding for `named.value()`, returning the
    /// previous binding if one existed.
    ///
    /// The returned value is the only overwrite signal; no name-level
    /// deduplication is performed.
    pub fn register(&mut self, named: NamedNum<D>) -> Option<NamedNum<D>> {
        let prev = self.map.insert(named.value(), named);
        if let Some(old) = &prev {
            debug!(domain = D::NAME, value = %old.value_string(), "registry binding overwritten");
        }
        prev
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the registry holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over all bindings, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &NamedNum<D>> {
        self.map.values()
    }
}

impl<D: Domain> Default for Registry<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// A two-level catalogue for code spaces conditioned on an outer discriminant.
///
/// Keyed by the composite `(outer, inner)` pair: one map, one lock when
/// shared. An outer value with no bindings behaves as an empty inner
/// registry, so lookup stays total.
#[derive(Debug, Clone)]
pub struct ScopedRegistry<O: Domain, D: Domain> {
    map: HashMap<(O, D), NamedNum<D>>,
}

impl<O: Domain, D: Domain> ScopedRegistry<O, D> {
    /// An empty scoped registry.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Seed from a static `(outer, inner, name)` table.
    pub fn from_table(table: &'static [(O::Raw, D::Raw, &'static str)]) -> Self {
        let mut map = HashMap::with_capacity(table.len());
        for &(outer, inner, name) in table {
            let inner = D::from_raw(inner);
            map.insert(
                (O::from_raw(outer), inner),
                NamedNum::new_unchecked(inner, name),
            );
        }
        Self { map }
    }

    /// Resolve `inner` in the context of `outer`. Never fails; unregistered
    /// pairs (including unregistered outer values) yield `"unknown"`.
    pub fn get(&self, outer: O, inner: D) -> NamedNum<D> {
        self.map
            .get(&(outer, inner))
            .cloned()
            .unwrap_or_else(|| NamedNum::unknown(inner))
    }

    /// Non-synthesizing probe.
    pub fn lookup(&self, outer: O, inner: D) -> Option<&NamedNum<D>> {
        self.map.get(&(outer, inner))
    }

    /// Insert or overwrite the binding for `named.value()` under `outer`,
    /// returning the previous binding if one existed.
    pub fn register(&mut self, outer: O, named: NamedNum<D>) -> Option<NamedNum<D>> {
        let prev = self.map.insert((outer, named.value()), named);
        if let Some(old) = &prev {
            debug!(
                outer_domain = O::NAME,
                domain = D::NAME,
                value = %old.value_string(),
                "scoped registry binding overwritten"
            );
        }
        prev
    }

    /// Number of bindings across all outer values.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the registry holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<O: Domain, D: Domain> Default for ScopedRegistry<O, D> {
    fn default() -> Self {
        Self::new()
    }
}
