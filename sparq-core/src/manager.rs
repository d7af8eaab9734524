//! Qubit allocation and release-time safety

use crate::error::QuantumError;
use crate::qubit::Qubit;
use crate::Result;

/// Allocator for qubit handles, one per scope
///
/// Each allocation mints a fresh opaque handle. Membership is checked by
/// slot and generation, so handles from a different manager (or a dead
/// scope) always answer false. Releasing a qubit requires the caller to
/// prove it is back in |0⟩.
///
/// # Example
/// ```
/// use sparq_core::QubitManager;
///
/// let mut manager = QubitManager::new();
/// let q = manager.allocate();
/// assert!(manager.is_allocated(q));
///
/// manager.release(q, |_| None).unwrap();
/// assert!(!manager.is_allocated(q));
/// ```
#[derive(Debug, Default)]
pub struct QubitManager {
    /// Generation stamp per slot; `None` once the slot is released.
    slots: Vec<Option<u64>>,
}

impl QubitManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh handle. Slots are never reused within a manager.
    pub fn allocate(&mut self) -> Qubit {
        let q = Qubit::mint(self.slots.len() as u32);
        self.slots.push(Some(q.generation()));
        q
    }

    /// Whether the handle was allocated here and is still live.
    pub fn is_allocated(&self, q: Qubit) -> bool {
        self.slots
            .get(q.slot() as usize)
            .copied()
            .flatten()
            .map_or(false, |generation| generation == q.generation())
    }

    /// Number of live handles.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Release a handle, failing unless the zero-check confirms |0⟩.
    ///
    /// `check` receives the handle and returns `None` when the simulator
    /// sees its one-probability below the effective epsilon, or
    /// `Some(p_one)` when it does not.
    ///
    /// # Errors
    /// - the handle is foreign or already released
    /// - the qubit is not in |0⟩ ("must be reset")
    pub fn release<F>(&mut self, q: Qubit, check: F) -> Result<()>
    where
        F: FnOnce(Qubit) -> Option<f64>,
    {
        if !self.is_allocated(q) {
            return Err(QuantumError::UnknownQubit(q));
        }
        if let Some(p_one) = check(q) {
            return Err(QuantumError::ReleaseNotZero { qubit: q, p_one });
        }
        self.slots[q.slot() as usize] = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_membership() {
        let mut manager = QubitManager::new();
        let a = manager.allocate();
        let b = manager.allocate();

        assert!(manager.is_allocated(a));
        assert!(manager.is_allocated(b));
        assert_eq!(manager.live_count(), 2);
    }

    #[test]
    fn test_foreign_handle_is_rejected() {
        let mut owner = QubitManager::new();
        let other = QubitManager::new();
        let q = owner.allocate();

        assert!(!other.is_allocated(q));
    }

    #[test]
    fn test_release_requires_zero() {
        let mut manager = QubitManager::new();
        let q = manager.allocate();

        let err = manager.release(q, |_| Some(0.75)).unwrap_err();
        assert!(matches!(err, QuantumError::ReleaseNotZero { .. }));
        assert!(manager.is_allocated(q));

        manager.release(q, |_| None).unwrap();
        assert!(!manager.is_allocated(q));
    }

    #[test]
    fn test_double_release_fails() {
        let mut manager = QubitManager::new();
        let q = manager.allocate();
        manager.release(q, |_| None).unwrap();

        let err = manager.release(q, |_| None).unwrap_err();
        assert!(matches!(err, QuantumError::UnknownQubit(_)));
    }

    #[test]
    fn test_slot_not_reused_after_release() {
        let mut manager = QubitManager::new();
        let a = manager.allocate();
        manager.release(a, |_| None).unwrap();

        let b = manager.allocate();
        assert_ne!(a, b);
        assert!(!manager.is_allocated(a));
        assert!(manager.is_allocated(b));
    }
}
