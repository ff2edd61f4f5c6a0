use serde::{Deserialize, Serialize};

use crate::core::XDomain;
use crate::interaction::{ActiveEntry, EntryChange};

/// Notifications delivered to the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    /// The displayed X domain changed through brush, overview or keyboard.
    FilterChanged { domain: XDomain },
    Activate {
        entry: ActiveEntry,
        entries: Vec<ActiveEntry>,
    },
    Deactivate {
        entry: ActiveEntry,
        entries: Vec<ActiveEntry>,
    },
    Select { entry: ActiveEntry },
    TooltipHidden,
    Redrawn { update_count: u64 },
}

impl From<EntryChange> for ChartEvent {
    fn from(change: EntryChange) -> Self {
        match change {
            EntryChange::Activated { entry, entries } => Self::Activate { entry, entries },
            EntryChange::Deactivated { entry, entries } => Self::Deactivate { entry, entries },
        }
    }
}

/// Host hook receiving [`ChartEvent`]s in emission order.
///
/// Listeners observe events without access to engine internals.
pub trait ChartListener {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &ChartEvent);
}
