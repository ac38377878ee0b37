//! Rotors: catalog templates and per-machine rotor state.
//!
//! A [`RotorSpec`] is an immutable catalog entry (name, wiring, kind). A
//! machine builds fresh [`Rotor`] or [`MovingRotor`] values from specs each
//! time rotors are inserted, so rotor positions never leak between setups.
//!
//! Only [`MovingRotor`] exposes `advance` and `at_notch`; a fixed rotor or a
//! reflector cannot be stepped.

use std::sync::Arc;

use crate::error::EnigmaError;
use crate::permutation::Permutation;

/// The kind of a rotor, with kind-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
    /// Non-rotating rotor. Takes an initial setting but never advances.
    Fixed,
    /// Rotating rotor with the indices of its notch positions.
    Moving { notches: Vec<usize> },
    /// Non-rotating reflector whose wiring is a derangement.
    Reflecting,
}

/// Immutable catalog entry describing one rotor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorSpec {
    name: String,
    permutation: Permutation,
    kind: RotorKind,
}

impl RotorSpec {
    /// Creates a fixed (non-rotating) rotor.
    pub fn fixed(name: impl Into<String>, permutation: Permutation) -> Self {
        RotorSpec {
            name: name.into(),
            permutation,
            kind: RotorKind::Fixed,
        }
    }

    /// Creates a rotating rotor that triggers its left neighbor at each
    /// symbol of `notches`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnknownNotch`] if a notch symbol is outside
    /// the permutation's alphabet.
    pub fn moving(
        name: impl Into<String>,
        permutation: Permutation,
        notches: &str,
    ) -> Result<Self, EnigmaError> {
        let name = name.into();
        let mut indices = Vec::with_capacity(notches.len());
        for symbol in notches.chars() {
            let index = permutation
                .alphabet()
                .to_int(symbol)
                .map_err(|_| EnigmaError::UnknownNotch {
                    rotor: name.clone(),
                    symbol,
                })?;
            if !indices.contains(&index) {
                indices.push(index);
            }
        }
        Ok(RotorSpec {
            name,
            permutation,
            kind: RotorKind::Moving { notches: indices },
        })
    }

    /// Creates a reflector.
    ///
    /// # Errors
    /// Returns [`EnigmaError::NotADerangement`] if the wiring has a fixed point.
    pub fn reflector(
        name: impl Into<String>,
        permutation: Permutation,
    ) -> Result<Self, EnigmaError> {
        let name = name.into();
        if !permutation.derangement() {
            return Err(EnigmaError::NotADerangement(name));
        }
        Ok(RotorSpec {
            name,
            permutation,
            kind: RotorKind::Reflecting,
        })
    }

    /// Returns the catalog name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the wiring at setting 0.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Returns the rotor kind, including notches for rotating rotors.
    pub fn kind(&self) -> &RotorKind {
        &self.kind
    }

    /// Returns true for rotating rotors.
    pub fn rotates(&self) -> bool {
        matches!(self.kind, RotorKind::Moving { .. })
    }

    /// Returns true for reflectors.
    pub fn reflecting(&self) -> bool {
        matches!(self.kind, RotorKind::Reflecting)
    }
}

/// A rotor mounted in a machine: a catalog spec plus a current setting.
#[derive(Debug, Clone)]
pub struct Rotor {
    spec: Arc<RotorSpec>,
    setting: usize,
}

impl Rotor {
    /// Mounts `spec` at setting 0.
    pub fn new(spec: Arc<RotorSpec>) -> Self {
        Rotor { spec, setting: 0 }
    }

    /// Returns the catalog name of the mounted spec.
    pub fn name(&self) -> &str {
        self.spec.name()
    }

    /// Returns true if the mounted spec is a rotating rotor.
    pub fn rotates(&self) -> bool {
        self.spec.rotates()
    }

    /// Returns true if the mounted spec is a reflector.
    pub fn reflecting(&self) -> bool {
        self.spec.reflecting()
    }

    /// Returns the current setting as an alphabet index.
    pub fn setting(&self) -> usize {
        self.setting
    }

    /// Sets the rotor to the position of `symbol`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if `symbol` is absent.
    pub fn set(&mut self, symbol: char) -> Result<(), EnigmaError> {
        self.setting = self.spec.permutation.alphabet().to_int(symbol)?;
        Ok(())
    }

    /// Converts `e` right-to-left through the wiring at the current setting.
    pub fn convert_forward(&self, e: usize) -> usize {
        let perm = &self.spec.permutation;
        let s = self.setting as isize;
        perm.wrap(perm.permute(e as isize + s) as isize - s)
    }

    /// Converts `e` left-to-right through the wiring at the current setting.
    pub fn convert_backward(&self, e: usize) -> usize {
        let perm = &self.spec.permutation;
        let s = self.setting as isize;
        perm.wrap(perm.invert(e as isize + s) as isize - s)
    }
}

/// A rotating rotor. Adds stepping and notch queries to [`Rotor`].
#[derive(Debug, Clone)]
pub struct MovingRotor {
    rotor: Rotor,
    notches: Vec<usize>,
}

impl MovingRotor {
    /// Mounts `spec` at setting 0, or returns `None` if it does not rotate.
    pub fn new(spec: Arc<RotorSpec>) -> Option<Self> {
        let notches = match spec.kind() {
            RotorKind::Moving { notches } => notches.clone(),
            _ => return None,
        };
        Some(MovingRotor {
            rotor: Rotor::new(spec),
            notches,
        })
    }

    /// Returns the underlying rotor.
    pub fn rotor(&self) -> &Rotor {
        &self.rotor
    }

    /// Returns the underlying rotor for setting its position.
    pub fn rotor_mut(&mut self) -> &mut Rotor {
        &mut self.rotor
    }

    /// Returns true if the current setting is one of the notch positions.
    pub fn at_notch(&self) -> bool {
        self.notches.contains(&self.rotor.setting)
    }

    /// Advances the setting by one position, wrapping at the alphabet size.
    pub fn advance(&mut self) {
        let size = self.rotor.spec.permutation.size();
        self.rotor.setting = (self.rotor.setting + 1) % size;
    }
}
