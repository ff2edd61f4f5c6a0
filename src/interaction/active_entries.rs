use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{DataPoint, XValue};

/// Highlighted datum; `series` is only compared by per-series charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEntry {
    pub name: XValue,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
}

impl ActiveEntry {
    #[must_use]
    pub fn new(name: impl Into<XValue>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            series: None,
        }
    }

    #[must_use]
    pub fn with_series(mut self, series: impl Into<String>) -> Self {
        self.series = Some(series.into());
        self
    }

    #[must_use]
    pub fn from_point(point: &DataPoint) -> Self {
        Self::new(point.name.clone(), point.value)
    }
}

/// How a new activation treats entries that are already active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationPolicy {
    /// New entries are prepended to the active set.
    Accumulate,
    /// Everything is deactivated before the new entry becomes the only one.
    Exclusive,
}

/// Notification produced by an active-set mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntryChange {
    Activated {
        entry: ActiveEntry,
        entries: Vec<ActiveEntry>,
    },
    Deactivated {
        entry: ActiveEntry,
        entries: Vec<ActiveEntry>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEntries {
    entries: Vec<ActiveEntry>,
    policy: ActivationPolicy,
    match_series: bool,
}

impl ActiveEntries {
    #[must_use]
    pub fn new(policy: ActivationPolicy, match_series: bool) -> Self {
        Self {
            entries: Vec::new(),
            policy,
            match_series,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[ActiveEntry] {
        &self.entries
    }

    #[must_use]
    pub fn policy(&self) -> ActivationPolicy {
        self.policy
    }

    #[must_use]
    pub fn is_active(&self, entry: &ActiveEntry) -> bool {
        self.position(entry).is_some()
    }

    fn position(&self, entry: &ActiveEntry) -> Option<usize> {
        self.entries.iter().position(|active| {
            active.name == entry.name
                && active.value == entry.value
                && (!self.match_series || active.series == entry.series)
        })
    }

    pub fn activate(&mut self, entry: ActiveEntry) -> Vec<EntryChange> {
        match self.policy {
            ActivationPolicy::Accumulate => {
                if self.is_active(&entry) {
                    return Vec::new();
                }
                self.entries.insert(0, entry.clone());
                trace!(active = self.entries.len(), "entry activated");
                vec![EntryChange::Activated {
                    entry,
                    entries: self.entries.clone(),
                }]
            }
            ActivationPolicy::Exclusive => {
                let mut changes = self.deactivate_all();
                self.entries = vec![entry.clone()];
                changes.push(EntryChange::Activated {
                    entry,
                    entries: self.entries.clone(),
                });
                changes
            }
        }
    }

    /// Removes the matching entry; absent entries leave the set untouched.
    pub fn deactivate(&mut self, entry: ActiveEntry) -> Option<EntryChange> {
        let index = self.position(&entry)?;
        self.entries.remove(index);
        Some(EntryChange::Deactivated {
            entry,
            entries: self.entries.clone(),
        })
    }

    /// Clears the set, reporting each former entry with an empty entry list.
    pub fn deactivate_all(&mut self) -> Vec<EntryChange> {
        std::mem::take(&mut self.entries)
            .into_iter()
            .map(|entry| EntryChange::Deactivated {
                entry,
                entries: Vec::new(),
            })
            .collect()
    }
}
