//! Hierarchical GROUP BY result.
//!
//! A [`GroupedResult`] maps each group key to either an integer subtotal
//! or a nested `GroupedResult` (one nesting level per GROUP BY column).
//! Report code reads it three ways:
//!
//! - strict key access (`get`/`remove`, which fail on absent keys),
//! - permissive probing (`probe`, which never fails — report templates
//!   speculatively probe optional subtotal names and `<key>_percent`
//!   pseudo-names, and unknown names default to zero),
//! - derived queries (`total`, `leaf_values_count`).
//!
//! When the underlying query computed the grand total itself (GROUP BY
//! ... WITH ROLLUP), the total row's key is recorded as `total_key` and
//! excluded from summation — it *is* the total.

use std::cell::Cell;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::errors::AggregateError;
use crate::value::{GroupedValue, ScalarValue};

const PERCENT_SUFFIX: &str = "_percent";

/// The materialized result of a grouped aggregate query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupedResult {
    #[serde(flatten)]
    entries: FxHashMap<String, GroupedValue>,

    /// Name of the entry holding the precomputed grand total, if any.
    #[serde(skip)]
    total_key: Option<String>,

    /// Total computed from the entries at construction time. Percentage
    /// probes read this; later `insert`/`remove` calls do not update it.
    #[serde(skip)]
    cached_total: i64,

    /// Memoized leaf count. Only refreshed on explicit request.
    #[serde(skip)]
    leaf_count: Cell<Option<usize>>,
}

impl PartialEq for GroupedResult {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries && self.total_key == other.total_key
    }
}

impl GroupedResult {
    /// An empty result (no rows came back from the GROUP BY query).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a result from the given entries, copying them into internal
    /// storage, and eagerly compute the total.
    ///
    /// Fails fast if an entry is not summable (`InvalidEntryType`) or if
    /// `total_key` names an absent entry (`KeyNotFound`).
    pub fn from_entries<I, K, V>(
        entries: I,
        total_key: Option<&str>,
    ) -> Result<Self, AggregateError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<GroupedValue>,
    {
        let mut result = Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            total_key: total_key.map(str::to_string),
            cached_total: 0,
            leaf_count: Cell::new(None),
        };
        result.cached_total = result.total()?;
        Ok(result)
    }

    // ─── Container-style access ─────────────────────────────────────────

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Strict lookup. Absent keys are an error — use [`get_opt`] or
    /// [`probe`] for the permissive modes.
    ///
    /// [`get_opt`]: Self::get_opt
    /// [`probe`]: Self::probe
    pub fn get(&self, key: &str) -> Result<&GroupedValue, AggregateError> {
        self.entries
            .get(key)
            .ok_or_else(|| AggregateError::KeyNotFound { key: key.to_string() })
    }

    /// Permissive lookup; callers supply their own default via
    /// `unwrap_or`.
    pub fn get_opt(&self, key: &str) -> Option<&GroupedValue> {
        self.entries.get(key)
    }

    /// Insert or overwrite an entry. The construction-time cached total is
    /// deliberately left alone; `total()` recomputes on demand.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<GroupedValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Remove an entry. Absent keys are an error, matching [`get`].
    ///
    /// [`get`]: Self::get
    pub fn remove(&mut self, key: &str) -> Result<GroupedValue, AggregateError> {
        self.entries
            .remove(key)
            .ok_or_else(|| AggregateError::KeyNotFound { key: key.to_string() })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True iff the GROUP BY query produced no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupedValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Name of the entry holding the precomputed grand total, if any.
    pub fn total_key(&self) -> Option<&str> {
        self.total_key.as_deref()
    }

    // ─── Derived queries ────────────────────────────────────────────────

    /// The grand total of this level.
    ///
    /// An empty result totals 0. When `total_key` is set the database
    /// already computed the total (ROLLUP), so that entry is returned
    /// directly instead of summing it in twice. Otherwise integer entries
    /// add directly and nested entries contribute their own `total()`.
    /// Any other entry kind fails with `InvalidEntryType`.
    pub fn total(&self) -> Result<i64, AggregateError> {
        if self.entries.is_empty() {
            return Ok(0);
        }

        if let Some(name) = &self.total_key {
            let value = self.get(name)?;
            return value.as_integer().ok_or_else(|| AggregateError::InvalidEntryType {
                key: name.clone(),
                kind: value.kind(),
            });
        }

        let mut sum = 0i64;
        for (key, value) in &self.entries {
            match value {
                GroupedValue::Scalar(ScalarValue::Integer(n)) => sum += n,
                GroupedValue::Nested(nested) => sum += nested.total()?,
                other => {
                    return Err(AggregateError::InvalidEntryType {
                        key: key.clone(),
                        kind: other.kind(),
                    })
                }
            }
        }
        Ok(sum)
    }

    /// Permissive derived-name lookup for report templates. Never fails:
    ///
    /// - an existing entry with an integer subtotal yields that value,
    /// - `<key>_percent`, where `<key>` is an existing entry, yields that
    ///   entry's share of the construction-time total (0.0 when the total
    ///   is 0),
    /// - anything else yields 0.0.
    pub fn probe(&self, name: &str) -> f64 {
        if let Some(value) = self.entries.get(name) {
            return value.as_integer().map(|n| n as f64).unwrap_or(0.0);
        }

        if let Some(key) = name.strip_suffix(PERCENT_SUFFIX) {
            if self.entries.contains_key(key) {
                return self.percent_of(key);
            }
        }

        0.0
    }

    /// Percentage of the construction-time total contributed by `key`.
    /// `key` must exist; callers go through [`probe`].
    ///
    /// [`probe`]: Self::probe
    fn percent_of(&self, key: &str) -> f64 {
        if self.cached_total == 0 {
            return 0.0;
        }
        let contribution = match self.entries.get(key) {
            Some(GroupedValue::Scalar(ScalarValue::Integer(n))) => *n as f64,
            Some(GroupedValue::Nested(nested)) => match nested.total() {
                Ok(t) => t as f64,
                Err(_) => return 0.0,
            },
            _ => return 0.0,
        };
        contribution * 100.0 / self.cached_total as f64
    }

    /// Number of terminal (non-nested) values under this level.
    ///
    /// The count is memoized after the first call and returned unchanged
    /// by subsequent calls — even after `insert`/`remove` — until a call
    /// with `refresh = true` recomputes it. Nested levels keep their own
    /// memos and are never force-refreshed from the parent.
    ///
    /// Under `value_in_row`, a level that holds any leaf entries
    /// contributes exactly 1 for those leaves (one report row per
    /// terminal group) instead of one per leaf.
    pub fn leaf_values_count(&self, value_in_row: bool, refresh: bool) -> usize {
        if !refresh {
            if let Some(count) = self.leaf_count.get() {
                return count;
            }
        }

        let mut count = 0;
        for value in self.entries.values() {
            match value {
                GroupedValue::Nested(nested) => {
                    count += nested.leaf_values_count(value_in_row, false);
                }
                _ => count = if value_in_row { 1 } else { count + 1 },
            }
        }
        self.leaf_count.set(Some(count));
        count
    }
}
