//! Machine: rotor slots, plugboard, stepping and the signal path.
//!
//! Slot 0 always holds the reflector, slots `1..num_rotors - pawls` hold
//! fixed rotors and the rightmost `pawls` slots hold rotating rotors.
//!
//! Per character the machine first steps its rotating rotors, then sends the
//! signal through the plugboard, right-to-left through every slot including
//! the reflector, left-to-right back through slots `1..num_rotors`, and out
//! through the inverse plugboard.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::permutation::Permutation;
use crate::rotor::{MovingRotor, Rotor, RotorSpec};

/// Rotors currently mounted in a machine, grouped by kind.
///
/// Slot `i` of the machine maps to `reflector` for `i == 0`, to
/// `fixed[i - 1]` for the fixed region and to `moving[i - first_moving]`
/// for the rotating region.
#[derive(Debug, Clone)]
struct Slots {
    reflector: Rotor,
    fixed: Vec<Rotor>,
    moving: Vec<MovingRotor>,
}

impl Slots {
    /// Advances the rotating rotors for one key press.
    ///
    /// The rightmost rotor always steps. A rotor at its notch steps together
    /// with its left neighbor, which produces the double step. The advance set
    /// is collected before any rotor moves so every notch check sees the
    /// positions from before this key press, and no rotor steps twice.
    fn step(&mut self) {
        let n = self.moving.len();
        if n == 0 {
            return;
        }
        let mut advances = vec![false; n];
        advances[n - 1] = true;
        for i in (0..n - 1).rev() {
            if self.moving[i + 1].at_notch() {
                advances[i] = true;
                advances[i + 1] = true;
            }
        }
        for (rotor, advance) in self.moving.iter_mut().zip(advances) {
            if advance {
                rotor.advance();
            }
        }
    }

    /// Right-to-left pass, ending with the reflector.
    fn forward(&self, mut c: usize) -> usize {
        for rotor in self.moving.iter().rev() {
            c = rotor.rotor().convert_forward(c);
        }
        for rotor in self.fixed.iter().rev() {
            c = rotor.convert_forward(c);
        }
        self.reflector.convert_forward(c)
    }

    /// Left-to-right pass, starting just right of the reflector.
    fn backward(&self, mut c: usize) -> usize {
        for rotor in &self.fixed {
            c = rotor.convert_backward(c);
        }
        for rotor in &self.moving {
            c = rotor.rotor().convert_backward(c);
        }
        c
    }

    /// Rotors in slots `1..num_rotors`, left to right.
    fn settable(&self) -> impl Iterator<Item = &Rotor> {
        self.fixed
            .iter()
            .chain(self.moving.iter().map(MovingRotor::rotor))
    }

    fn settable_mut(&mut self) -> impl Iterator<Item = &mut Rotor> {
        self.fixed
            .iter_mut()
            .chain(self.moving.iter_mut().map(MovingRotor::rotor_mut))
    }
}

/// A complete rotor machine.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use enigma::{Alphabet, Machine, Permutation, RotorSpec};
///
/// let alpha = Arc::new(Alphabet::new("ABCD").unwrap());
/// let catalog = vec![
///     RotorSpec::reflector("R", Permutation::new("(AC)(BD)", alpha.clone()).unwrap()).unwrap(),
///     RotorSpec::moving("M", Permutation::new("(ABD)", alpha.clone()).unwrap(), "C").unwrap(),
/// ];
/// let mut machine = Machine::new(alpha.clone(), 2, 1, catalog).unwrap();
///
/// machine.insert_rotors(&["R", "M"]).unwrap();
/// machine.set_rotors("A").unwrap();
/// let cipher = machine.convert("ABBA").unwrap();
///
/// machine.set_rotors("A").unwrap();
/// assert_eq!(machine.convert(&cipher).unwrap(), "ABBA");
/// ```
#[derive(Debug, Clone)]
pub struct Machine {
    alphabet: Arc<Alphabet>,
    num_rotors: usize,
    pawls: usize,
    catalog: HashMap<String, Arc<RotorSpec>>,
    slots: Option<Slots>,
    plugboard: Permutation,
}

impl Machine {
    /// Creates a machine with `num_rotors` slots, `pawls` of them rotating,
    /// drawing rotors from `rotors`. The plugboard starts as the identity.
    ///
    /// # Errors
    /// - [`EnigmaError::InvalidShape`] unless `pawls < num_rotors`.
    /// - [`EnigmaError::DuplicateRotorName`] if two catalog entries share a name.
    pub fn new(
        alphabet: Arc<Alphabet>,
        num_rotors: usize,
        pawls: usize,
        rotors: impl IntoIterator<Item = RotorSpec>,
    ) -> Result<Self, EnigmaError> {
        if pawls >= num_rotors {
            return Err(EnigmaError::InvalidShape { num_rotors, pawls });
        }
        let mut catalog = HashMap::new();
        for spec in rotors {
            let name = spec.name().to_string();
            if catalog.insert(name.clone(), Arc::new(spec)).is_some() {
                return Err(EnigmaError::DuplicateRotorName(name));
            }
        }
        Ok(Machine {
            plugboard: Permutation::identity(alphabet.clone()),
            alphabet,
            num_rotors,
            pawls,
            catalog,
            slots: None,
        })
    }

    /// Returns the number of rotor slots.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Returns the number of pawls, which is the number of rotating slots.
    pub fn num_pawls(&self) -> usize {
        self.pawls
    }

    /// Returns the alphabet shared by every rotor and the plugboard.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Returns the current plugboard, the identity until one is set.
    pub fn plugboard(&self) -> &Permutation {
        &self.plugboard
    }

    /// Mounts the rotors named by `names`, leftmost (the reflector) first.
    ///
    /// Any previous assignment is cleared first, even if this call fails.
    /// Every mounted rotor starts at setting 0.
    ///
    /// # Errors
    /// - [`EnigmaError::WrongSlotCount`] if `names.len() != num_rotors()`.
    /// - [`EnigmaError::UnknownRotor`] if a name is not in the catalog.
    /// - [`EnigmaError::RepeatedRotor`] if a name appears twice.
    /// - [`EnigmaError::RotorKindMismatch`] if slot 0 is not a reflector, a
    ///   fixed slot gets a rotating rotor or reflector, or a rotating slot
    ///   gets a non-rotating rotor.
    pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), EnigmaError> {
        self.slots = None;
        if names.len() != self.num_rotors {
            return Err(EnigmaError::WrongSlotCount {
                expected: self.num_rotors,
                found: names.len(),
            });
        }

        let first_moving = self.num_rotors - self.pawls;
        let mut used = HashSet::with_capacity(names.len());
        let mut resolved = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let spec = self
                .catalog
                .get(name)
                .ok_or_else(|| EnigmaError::UnknownRotor(name.to_string()))?;
            if !used.insert(name) {
                return Err(EnigmaError::RepeatedRotor(name.to_string()));
            }
            resolved.push(spec.clone());
        }

        let mismatch = |slot: usize, expected: &'static str| EnigmaError::RotorKindMismatch {
            slot,
            name: names[slot].as_ref().to_string(),
            expected,
        };

        let mut specs = resolved.into_iter().enumerate();
        let reflector = match specs.next() {
            Some((_, spec)) if spec.reflecting() => Rotor::new(spec),
            _ => return Err(mismatch(0, "reflecting")),
        };
        let mut fixed = Vec::with_capacity(first_moving - 1);
        let mut moving = Vec::with_capacity(self.pawls);
        for (slot, spec) in specs {
            if slot < first_moving {
                if spec.rotates() || spec.reflecting() {
                    return Err(mismatch(slot, "fixed"));
                }
                fixed.push(Rotor::new(spec));
            } else {
                moving.push(MovingRotor::new(spec).ok_or_else(|| mismatch(slot, "rotating"))?);
            }
        }

        self.slots = Some(Slots {
            reflector,
            fixed,
            moving,
        });
        Ok(())
    }

    /// Sets slots `1..num_rotors` from `setting`, one symbol per slot, left to right.
    ///
    /// The setting is validated in full before any rotor changes.
    ///
    /// # Errors
    /// - [`EnigmaError::RotorsNotInserted`] before [`insert_rotors`](Self::insert_rotors).
    /// - [`EnigmaError::WrongSettingLength`] unless `setting` has `num_rotors() - 1` symbols.
    /// - [`EnigmaError::SymbolNotInAlphabet`] for a symbol outside the alphabet.
    pub fn set_rotors(&mut self, setting: &str) -> Result<(), EnigmaError> {
        let slots = self.slots.as_mut().ok_or(EnigmaError::RotorsNotInserted)?;
        let symbols: Vec<char> = setting.chars().collect();
        if symbols.len() != self.num_rotors - 1 {
            return Err(EnigmaError::WrongSettingLength {
                expected: self.num_rotors - 1,
                found: symbols.len(),
            });
        }
        if let Some(&bad) = symbols.iter().find(|&&c| !self.alphabet.contains(c)) {
            return Err(EnigmaError::SymbolNotInAlphabet(bad));
        }
        for (rotor, symbol) in slots.settable_mut().zip(symbols) {
            rotor.set(symbol)?;
        }
        Ok(())
    }

    /// Replaces the plugboard.
    pub fn set_plugboard(&mut self, plugboard: Permutation) {
        self.plugboard = plugboard;
    }

    /// Returns the current settings of slots `1..num_rotors` in the same
    /// layout [`set_rotors`](Self::set_rotors) accepts, or `None` if no
    /// rotors are mounted.
    pub fn positions(&self) -> Option<String> {
        let symbols = self.alphabet.symbols();
        self.slots
            .as_ref()
            .map(|slots| slots.settable().map(|r| symbols[r.setting()]).collect())
    }

    /// Steps the machine, then converts the alphabet index `c`.
    ///
    /// Mutates rotor positions, so calling it twice with the same input
    /// generally gives different results.
    ///
    /// # Errors
    /// Returns [`EnigmaError::RotorsNotInserted`] if no rotors are mounted.
    pub fn convert_index(&mut self, c: usize) -> Result<usize, EnigmaError> {
        let slots = self.slots.as_mut().ok_or(EnigmaError::RotorsNotInserted)?;
        slots.step();
        let c = self.plugboard.permute(c as isize);
        let c = slots.forward(c);
        let c = slots.backward(c);
        Ok(self.plugboard.invert(c as isize))
    }

    /// Converts `msg` symbol by symbol, stepping before each one.
    ///
    /// The whole message is checked against the alphabet first; on error the
    /// rotors are left where they were.
    ///
    /// # Errors
    /// - [`EnigmaError::RotorsNotInserted`] if no rotors are mounted.
    /// - [`EnigmaError::SymbolNotInAlphabet`] for the first symbol outside the alphabet.
    pub fn convert(&mut self, msg: &str) -> Result<String, EnigmaError> {
        if self.slots.is_none() {
            return Err(EnigmaError::RotorsNotInserted);
        }
        let indices = msg
            .chars()
            .map(|c| self.alphabet.to_int(c))
            .collect::<Result<Vec<_>, _>>()?;
        let mut out = String::with_capacity(msg.len());
        for index in indices {
            let converted = self.convert_index(index)?;
            out.push(self.alphabet.to_char(converted)?);
        }
        Ok(out)
    }
}
