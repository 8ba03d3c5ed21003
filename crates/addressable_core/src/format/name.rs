//! Person name composition.
//!
//! # Invariants
//! - Returns `None` when no usable name part exists.
//! - `NameFallback::LastNameField` keeps the legacy `name`-only behavior:
//!   the branch returns the last-name field, which is always empty there.

use crate::format::non_empty;
use crate::model::addressable::Addressable;

/// Which name part leads the composed string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameOrder {
    /// `"First Last"`.
    FirstLast,
    /// `"Last, First"`.
    LastFirst,
}

/// What to return when only the generic `name` field is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameFallback {
    /// Legacy behavior: the last-name field (empty at that point).
    LastNameField,
    /// Return `name` itself.
    Name,
}

/// Composes a display name from first/last name parts.
pub fn compose_name<A: Addressable + ?Sized>(
    record: &A,
    order: NameOrder,
    fallback: NameFallback,
) -> Option<String> {
    let first = non_empty(record.firstname());
    let last = non_empty(record.lastname());
    let (leading, trailing, joiner) = match order {
        NameOrder::FirstLast => (first, last, " "),
        NameOrder::LastFirst => (last, first, ", "),
    };

    if let Some(leading) = leading {
        return Some(match trailing {
            Some(trailing) => format!("{leading}{joiner}{trailing}"),
            None => leading.to_string(),
        });
    }
    if let Some(trailing) = trailing {
        return Some(trailing.to_string());
    }

    let name = non_empty(record.name())?;
    match fallback {
        NameFallback::LastNameField => last.map(str::to_string),
        NameFallback::Name => Some(name.to_string()),
    }
}
