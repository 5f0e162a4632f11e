//! Content-addressed surrogate keys.
//!
//! A key is the lowercase hex SHA-256 of `salt || canonical(subtree)`.
//! The salt is the nearest ancestor's key, so identical subtrees under
//! different parents get different keys while re-processing the same subtree
//! under the same parent always yields the same key.
//!
//! [`IdGenerator`] is a per-run object with an optional memo cache; it never
//! changes the produced value, only avoids recomputing it.

use crate::model::element::Element;
use quick_xml::escape::escape;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Pure, uncached key derivation.
pub fn generate_id(subtree: &Element, salt: &str) -> String {
    digest(salt, &canonical(subtree))
}

/// Canonical serialization used as the hash input.
///
/// Attributes sorted by name, values and text escaped, text trimmed,
/// children in document order.
pub fn canonical(e: &Element) -> String {
    let mut out = String::new();
    write_canonical(e, &mut out);
    out
}

fn write_canonical(e: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&e.tag);

    let mut attrs: Vec<&(String, String)> = e.attributes.iter().collect();
    attrs.sort();
    for (k, v) in attrs {
        out.push(' ');
        out.push_str(k);
        out.push_str("=\"");
        out.push_str(&escape(v.as_str()));
        out.push('"');
    }
    out.push('>');

    out.push_str(&escape(e.text.trim()));
    for child in &e.children {
        write_canonical(child, out);
    }

    out.push_str("</");
    out.push_str(&e.tag);
    out.push('>');
}

fn digest(salt: &str, canonical: &str) -> String {
    let mut h = Sha256::new();
    h.update(salt.as_bytes());
    h.update(canonical.as_bytes());
    format!("{:x}", h.finalize())
}

/// Cache counters exposed in the run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IdCacheStats {
    pub enabled: bool,
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

/// Key generator scoped to one pipeline run.
#[derive(Debug, Default)]
pub struct IdGenerator {
    cache: Option<HashMap<(String, String), String>>,
    hits: usize,
    misses: usize,
}

impl IdGenerator {
    /// Generator with memoization enabled.
    pub fn cached() -> Self {
        Self {
            cache: Some(HashMap::new()),
            ..Self::default()
        }
    }

    /// Generator that hashes on every call.
    pub fn uncached() -> Self {
        Self::default()
    }

    pub fn new(cache: bool) -> Self {
        if cache { Self::cached() } else { Self::uncached() }
    }

    /// Derive the key for `subtree` salted with `salt`.
    pub fn generate(&mut self, subtree: &Element, salt: &str) -> String {
        let canon = canonical(subtree);
        let Some(cache) = self.cache.as_mut() else {
            self.misses += 1;
            return digest(salt, &canon);
        };

        let key = (salt.to_string(), canon);
        if let Some(id) = cache.get(&key) {
            self.hits += 1;
            return id.clone();
        }
        self.misses += 1;
        let id = digest(&key.0, &key.1);
        cache.insert(key, id.clone());
        id
    }

    pub fn stats(&self) -> IdCacheStats {
        IdCacheStats {
            enabled: self.cache.is_some(),
            hits: self.hits,
            misses: self.misses,
            entries: self.cache.as_ref().map_or(0, HashMap::len),
        }
    }
}
