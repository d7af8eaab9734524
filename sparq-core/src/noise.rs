//! Noise profile configuration

use crate::error::QuantumError;
use crate::Result;

/// Stochastic noise profile applied by the simulator
///
/// Four independent probabilities, all defaulting to 0:
/// - `gate_error`: post-gate X flip on each acted-on qubit
/// - `readout_error`: inversion of the reported measurement bit
/// - `t1`: amplitude damping strength toward |0⟩ per gate step
/// - `t2`: phase damping strength per gate step
///
/// A scope without a profile runs noiselessly.
///
/// # Example
/// ```
/// use sparq_core::NoiseModel;
///
/// let noise = NoiseModel::new()
///     .with_gate_error(0.01)
///     .unwrap()
///     .with_t1(0.002)
///     .unwrap();
/// assert_eq!(noise.gate_error(), 0.01);
/// assert_eq!(noise.readout_error(), 0.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NoiseModel {
    gate_error: f64,
    readout_error: f64,
    t1: f64,
    t2: f64,
}

fn checked(name: &'static str, value: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&value) {
        return Err(QuantumError::InvalidProbability { name, value });
    }
    Ok(value)
}

impl NoiseModel {
    /// A profile with every channel disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the post-gate bit-flip probability.
    ///
    /// # Errors
    /// Returns an error if the value is outside [0, 1].
    pub fn with_gate_error(mut self, p: f64) -> Result<Self> {
        self.gate_error = checked("gate_error", p)?;
        Ok(self)
    }

    /// Set the measurement inversion probability.
    ///
    /// # Errors
    /// Returns an error if the value is outside [0, 1].
    pub fn with_readout_error(mut self, p: f64) -> Result<Self> {
        self.readout_error = checked("readout_error", p)?;
        Ok(self)
    }

    /// Set the amplitude damping strength per gate step.
    ///
    /// # Errors
    /// Returns an error if the value is outside [0, 1].
    pub fn with_t1(mut self, p: f64) -> Result<Self> {
        self.t1 = checked("t1", p)?;
        Ok(self)
    }

    /// Set the phase damping strength per gate step.
    ///
    /// # Errors
    /// Returns an error if the value is outside [0, 1].
    pub fn with_t2(mut self, p: f64) -> Result<Self> {
        self.t2 = checked("t2", p)?;
        Ok(self)
    }

    #[inline]
    pub fn gate_error(&self) -> f64 {
        self.gate_error
    }

    #[inline]
    pub fn readout_error(&self) -> f64 {
        self.readout_error
    }

    #[inline]
    pub fn t1(&self) -> f64 {
        self.t1
    }

    #[inline]
    pub fn t2(&self) -> f64 {
        self.t2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_disable_everything() {
        let noise = NoiseModel::new();
        assert_eq!(noise.gate_error(), 0.0);
        assert_eq!(noise.readout_error(), 0.0);
        assert_eq!(noise.t1(), 0.0);
        assert_eq!(noise.t2(), 0.0);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(NoiseModel::new().with_gate_error(1.5).is_err());
        assert!(NoiseModel::new().with_readout_error(-0.1).is_err());
        assert!(NoiseModel::new().with_t1(f64::NAN).is_err());
    }

    #[test]
    fn test_builder_chains() {
        let noise = NoiseModel::new()
            .with_gate_error(0.1)
            .unwrap()
            .with_readout_error(0.2)
            .unwrap()
            .with_t1(0.3)
            .unwrap()
            .with_t2(0.4)
            .unwrap();
        assert_eq!(noise.gate_error(), 0.1);
        assert_eq!(noise.readout_error(), 0.2);
        assert_eq!(noise.t1(), 0.3);
        assert_eq!(noise.t2(), 0.4);
    }
}
