//! Opaque qubit handles

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Generation counter shared by every manager in the process, so a handle
/// minted in one scope can never validate in another.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Opaque handle to an allocated qubit
///
/// A handle carries no numeric semantics visible to user code: equality is
/// by value, and the positional index a handle maps to inside a scope is an
/// implementation detail of the simulator. Handles are only valid within
/// the scope that allocated them.
///
/// # Example
/// ```
/// use sparq_core::QubitManager;
///
/// let mut manager = QubitManager::new();
/// let a = manager.allocate();
/// let b = manager.allocate();
/// assert_ne!(a, b);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Qubit {
    slot: u32,
    generation: u64,
}

impl Qubit {
    /// Mint a handle for the given slot with a fresh process-wide generation.
    pub(crate) fn mint(slot: u32) -> Self {
        Self {
            slot,
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// The slot index inside the allocating manager.
    #[inline]
    pub(crate) fn slot(&self) -> u32 {
        self.slot
    }

    /// The process-wide generation stamp.
    #[inline]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}#{}", self.slot, self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let a = Qubit::mint(0);
        let b = Qubit::mint(0);
        assert_ne!(a, b);
        assert_eq!(a.slot(), b.slot());
        assert_ne!(a.generation(), b.generation());
    }

    #[test]
    fn test_display_carries_identity() {
        let q = Qubit::mint(3);
        let text = format!("{}", q);
        assert!(text.starts_with("q3#"));
    }
}
