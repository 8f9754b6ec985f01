//! # Widget References
//!
//! Widget ids are UUIDs, which nobody wants to type. A session (for example
//! a CLI script) can instead name widgets by creation order:
//!
//! - `@1` is the first widget created in this session, `@2` the second, ...
//! - A literal UUID names any widget directly.
//!
//! Ordinals are stable for the life of a session: deleting `@1` does not
//! renumber `@2`. A deleted widget's ordinal still resolves to its id, and the
//! store then reports it as not found.

use crate::error::{Result, WidgetsError};
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

/// A user-supplied way of naming a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetRef {
    Ordinal(usize),
    Id(Uuid),
}

impl std::fmt::Display for WidgetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidgetRef::Ordinal(n) => write!(f, "@{}", n),
            WidgetRef::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for WidgetRef {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix('@') {
            return match rest.parse::<usize>() {
                Ok(n) if n > 0 => Ok(WidgetRef::Ordinal(n)),
                _ => Err(format!("Invalid widget reference: {}", s)),
            };
        }
        Uuid::parse_str(s)
            .map(WidgetRef::Id)
            .map_err(|_| format!("Invalid widget reference: {}", s))
    }
}

/// Creation-ordered ids seen in one session.
#[derive(Debug, Default)]
pub struct RefTable {
    created: Vec<Uuid>,
    ordinals: HashMap<Uuid, usize>,
}

impl RefTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a newly created widget and returns its ordinal.
    pub fn record(&mut self, id: Uuid) -> WidgetRef {
        self.created.push(id);
        let ordinal = self.created.len();
        self.ordinals.entry(id).or_insert(ordinal);
        WidgetRef::Ordinal(ordinal)
    }

    /// The ordinal a widget was recorded under, if any.
    pub fn ordinal_of(&self, id: &Uuid) -> Option<WidgetRef> {
        self.ordinals.get(id).copied().map(WidgetRef::Ordinal)
    }

    pub fn resolve(&self, widget_ref: &WidgetRef) -> Result<Uuid> {
        match widget_ref {
            WidgetRef::Id(id) => Ok(*id),
            WidgetRef::Ordinal(n) => n
                .checked_sub(1)
                .and_then(|i| self.created.get(i))
                .copied()
                .ok_or_else(|| {
                    WidgetsError::InvalidArgument(format!(
                        "{} does not name a widget created in this session",
                        widget_ref
                    ))
                }),
        }
    }
}
