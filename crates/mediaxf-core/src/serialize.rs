//! Canonical serialization of qualifier sets.
//!
//! # Algorithm
//!
//! 1. Drop unset qualifiers.
//! 2. Render each remaining qualifier as a token (`key_value`, `fl_name`,
//!    `key_namespace:value`).
//! 3. Stable-sort the tokens by key. This is the only source of ordering;
//!    the order in which qualifiers were set is discarded.
//! 4. Join with `,`.
//!
//! Output is recomputed on every call. Nothing is cached, so any mutation
//! made before rendering is reflected.

use std::fmt;

use crate::param::{keys, Qualifier, QualifierValue};

/// Separator between qualifier tokens of one action.
pub const QUALIFIER_SEPARATOR: &str = ",";

/// Serialize qualifiers into their canonical, key-ordered form.
pub fn serialize<'a>(qualifiers: impl IntoIterator<Item = &'a Qualifier>) -> String {
    let mut tokens: Vec<(&str, String)> = qualifiers
        .into_iter()
        .filter_map(|q| q.token().map(|token| (q.key(), token)))
        .collect();

    tokens.sort_by(|a, b| a.0.cmp(b.0));

    tracing::trace!(count = tokens.len(), "serialized qualifiers");

    tokens
        .into_iter()
        .map(|(_, token)| token)
        .collect::<Vec<_>>()
        .join(QUALIFIER_SEPARATOR)
}

/// The qualifiers attached to one action, at most one per key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    entries: Vec<Qualifier>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a qualifier, replacing any existing one with the same key.
    pub fn set(&mut self, qualifier: Qualifier) {
        match self.entries.iter_mut().find(|q| q.key() == qualifier.key()) {
            Some(existing) => *existing = qualifier,
            None => self.entries.push(qualifier),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Qualifier> {
        self.entries.iter().find(|q| q.key() == key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Qualifier> {
        let index = self.entries.iter().position(|q| q.key() == key)?;
        Some(self.entries.remove(index))
    }

    /// Turn a single flag on or off, leaving other flags untouched.
    pub fn set_flag(&mut self, name: &str, enabled: bool) {
        if let Some(existing) = self.entries.iter_mut().find(|q| q.key() == keys::FLAG) {
            if let QualifierValue::Flags(flags) = existing.value_mut() {
                if enabled {
                    flags.insert(name.to_string());
                } else {
                    flags.remove(name);
                }
                return;
            }
        }
        if enabled {
            self.set(Qualifier::flag(name));
        }
    }

    pub fn has_flag(&self, name: &str) -> bool {
        matches!(
            self.get(keys::FLAG).map(Qualifier::value),
            Some(QualifierValue::Flags(flags)) if flags.contains(name)
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &Qualifier> {
        self.entries.iter()
    }

    /// Number of qualifiers that will appear in the output.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|q| q.is_set()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(&self.entries))
    }
}

impl FromIterator<Qualifier> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = Qualifier>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for qualifier in iter {
            set.set(qualifier);
        }
        set
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: output does not depend on insertion order.
        #[test]
        fn prop_insertion_order_irrelevant(
            w in 1u32..5000,
            h in 1u32..5000,
            x in -500i32..500,
            rotate in 0usize..4,
        ) {
            let mut qualifiers = vec![
                Qualifier::number("w", w),
                Qualifier::number("h", h),
                Qualifier::number("x", x),
                Qualifier::new("c", "pad"),
            ];
            let forward: ParameterSet = qualifiers.clone().into_iter().collect();
            qualifiers.rotate_left(rotate);
            qualifiers.reverse();
            let shuffled: ParameterSet = qualifiers.into_iter().collect();

            prop_assert_eq!(forward.to_string(), shuffled.to_string());
        }

        /// Property: tokens come out in non-decreasing key order.
        #[test]
        fn prop_tokens_key_ordered(w in 1u32..5000, dpr in 1u32..4, z in 1u32..10) {
            let set: ParameterSet = vec![
                Qualifier::number("z", z),
                Qualifier::number("dpr", dpr),
                Qualifier::number("w", w),
            ]
            .into_iter()
            .collect();

            let rendered = set.to_string();
            let keys: Vec<&str> = rendered
                .split(QUALIFIER_SEPARATOR)
                .map(|t| t.split('_').next().unwrap_or(""))
                .collect();
            let mut sorted = keys.clone();
            sorted.sort();
            prop_assert_eq!(keys, sorted);
        }
    }
}
