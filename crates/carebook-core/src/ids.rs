//! # Identifiers
//!
//! Entity kinds and the sequential ID counters the store allocates from.
//!
//! ## ID Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Kind           Prefix   First ID     Next IDs                          │
//! │  ─────────────  ──────   ─────────    ─────────────────                 │
//! │  Patient        P        P1001        P1002, P1003, ...                 │
//! │  Staff          S        S2001        S2002, ...                        │
//! │  Admission      A        A3001        A3002, ...                        │
//! │  Prescription   R        R4001        R4002, ...                        │
//! │  Billing        B        B5001        B5002, ...                        │
//! │  Pharmacy       PH       (seeded: PH1, PH2 - never allocated)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Entity Kind
// =============================================================================

/// The six record collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Patient,
    Staff,
    Admission,
    Prescription,
    Billing,
    Pharmacy,
}

impl EntityKind {
    /// Every kind, in list-section order.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Patient,
        EntityKind::Staff,
        EntityKind::Admission,
        EntityKind::Prescription,
        EntityKind::Billing,
        EntityKind::Pharmacy,
    ];

    /// ID prefix for this kind.
    pub const fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Patient => "P",
            EntityKind::Staff => "S",
            EntityKind::Admission => "A",
            EntityKind::Prescription => "R",
            EntityKind::Billing => "B",
            EntityKind::Pharmacy => "PH",
        }
    }

    /// Starting counter value.
    ///
    /// Pharmacy's `1` only describes the seed (`PH1`, `PH2`); the store never
    /// allocates pharmacy IDs.
    pub const fn first_counter(&self) -> u64 {
        match self {
            EntityKind::Patient => 1001,
            EntityKind::Staff => 2001,
            EntityKind::Admission => 3001,
            EntityKind::Prescription => 4001,
            EntityKind::Billing => 5001,
            EntityKind::Pharmacy => 1,
        }
    }

    /// Whether the store allocates IDs for this kind.
    pub const fn is_counted(&self) -> bool {
        !matches!(self, EntityKind::Pharmacy)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Patient => "Patient",
            EntityKind::Staff => "Staff",
            EntityKind::Admission => "Admission",
            EntityKind::Prescription => "Prescription",
            EntityKind::Billing => "Billing",
            EntityKind::Pharmacy => "Pharmacy",
        };
        f.write_str(name)
    }
}

// =============================================================================
// ID Sequence
// =============================================================================

/// Monotonic counter for one counter-driven entity kind.
///
/// ## Invariant
/// `next` only ever grows, so every ID handed out is unique and strictly
/// greater than the previous one for the same kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    kind: EntityKind,
    next: u64,
}

impl IdSequence {
    /// Creates a sequence at the kind's first counter value.
    pub const fn new(kind: EntityKind) -> Self {
        IdSequence {
            kind,
            next: kind.first_counter(),
        }
    }

    /// The kind this sequence allocates for.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The counter value the next allocation will use.
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Formats the current counter as `<prefix><counter>` and advances it.
    pub fn allocate(&mut self) -> String {
        let id = format!("{}{}", self.kind.prefix(), self.next);
        self.next += 1;
        id
    }
}

/// Splits a generated ID back into its counter value.
///
/// Returns `None` if the prefix does not match `kind` or the rest is not a
/// plain decimal number.
pub fn parse_counter(kind: EntityKind, id: &str) -> Option<u64> {
    let digits = id.strip_prefix(kind.prefix())?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
