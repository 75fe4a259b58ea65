//! Structural combination of a partial-update payload onto a stored entity.
//!
//! Field rules:
//! - `None` (absent or JSON `null`) leaves the stored value untouched.
//! - A present scalar, string or sequence replaces the stored value; an
//!   explicitly empty sequence replaces with empty.
//! - Attribute maps are replaced whole, never merged key by key.
//! - On optional text columns a present empty string clears the value.
//!
//! Merging never validates; the payload has already passed its gate.

/// A partial payload that can be applied onto `T`
pub trait MergeInto<T> {
    fn merge_into(self, target: &mut T);
}

pub fn replace<T>(slot: &mut T, incoming: Option<T>) {
    if let Some(value) = incoming {
        *slot = value;
    }
}

pub fn replace_or_clear(slot: &mut Option<String>, incoming: Option<String>) {
    match incoming {
        Some(value) if value.is_empty() => *slot = None,
        Some(value) => *slot = Some(value),
        None => {}
    }
}
