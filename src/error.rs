//! Error types for the enigma library.

use std::fmt;

/// Errors produced by the enigma library.
///
/// Every error is fatal to the setup line or message that triggered it;
/// nothing in the library retries or recovers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnigmaError {
    /// Alphabet definition has no symbols.
    EmptyAlphabet,
    /// Alphabet definition lists the same symbol twice.
    DuplicateSymbol(char),
    /// Alphabet definition uses a symbol reserved for cycle notation.
    ReservedSymbol(char),
    /// Symbol lookup missed the alphabet.
    SymbolNotInAlphabet(char),
    /// Index lookup outside `0..size`.
    IndexOutOfRange { index: usize, size: usize },
    /// Cycle notation references a symbol outside the alphabet.
    UnknownCycleSymbol(char),
    /// A symbol appears more than once across the cycles of one permutation.
    RepeatedCycleSymbol(char),
    /// Cycle notation does not follow `(sym+)(sym+)...`.
    MalformedCycles(String),
    /// Rotor name not present in the catalog.
    UnknownRotor(String),
    /// Two catalog entries share a name.
    DuplicateRotorName(String),
    /// A rotor was placed in a slot that requires another kind.
    RotorKindMismatch {
        slot: usize,
        name: String,
        expected: &'static str,
    },
    /// Reflector permutation maps some symbol to itself.
    NotADerangement(String),
    /// A notch symbol is not in the alphabet.
    UnknownNotch { rotor: String, symbol: char },
    /// Rotor assignment has the wrong number of names.
    WrongSlotCount { expected: usize, found: usize },
    /// Rotor assignment names the same rotor twice.
    RepeatedRotor(String),
    /// Initial setting string has the wrong length.
    WrongSettingLength { expected: usize, found: usize },
    /// Machine shape violates `0 <= pawls < num_rotors`.
    InvalidShape { num_rotors: usize, pawls: usize },
    /// Setting or conversion attempted before rotors were inserted.
    RotorsNotInserted,
    /// Configuration text could not be parsed.
    MalformedConfig(String),
    /// Setup line could not be parsed.
    MalformedSetup(String),
    /// A message appeared before any setup line.
    MissingSetup,
}

impl fmt::Display for EnigmaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnigmaError::EmptyAlphabet => write!(f, "Alphabet must contain at least one symbol"),
            EnigmaError::DuplicateSymbol(c) => {
                write!(f, "Symbol '{}' appears more than once in the alphabet", c)
            }
            EnigmaError::ReservedSymbol(c) => {
                write!(f, "Symbol {:?} is reserved and cannot be in an alphabet", c)
            }
            EnigmaError::SymbolNotInAlphabet(c) => write!(f, "Symbol '{}' is not in the alphabet", c),
            EnigmaError::IndexOutOfRange { index, size } => {
                write!(f, "Index {} is outside the alphabet of size {}", index, size)
            }
            EnigmaError::UnknownCycleSymbol(c) => {
                write!(f, "Cycle references symbol '{}' which is not in the alphabet", c)
            }
            EnigmaError::RepeatedCycleSymbol(c) => {
                write!(f, "Symbol '{}' appears in more than one cycle position", c)
            }
            EnigmaError::MalformedCycles(s) => write!(f, "Malformed cycle notation: {}", s),
            EnigmaError::UnknownRotor(name) => write!(f, "Unknown rotor name '{}'", name),
            EnigmaError::DuplicateRotorName(name) => {
                write!(f, "Rotor '{}' is defined more than once", name)
            }
            EnigmaError::RotorKindMismatch {
                slot,
                name,
                expected,
            } => write!(
                f,
                "Rotor '{}' cannot go in slot {}: slot requires a {} rotor",
                name, slot, expected
            ),
            EnigmaError::NotADerangement(name) => {
                write!(f, "Reflector '{}' maps a symbol to itself", name)
            }
            EnigmaError::UnknownNotch { rotor, symbol } => write!(
                f,
                "Notch '{}' of rotor '{}' is not in the alphabet",
                symbol, rotor
            ),
            EnigmaError::WrongSlotCount { expected, found } => {
                write!(f, "Expected {} rotors, found {}", expected, found)
            }
            EnigmaError::RepeatedRotor(name) => {
                write!(f, "Rotor '{}' is repeated in the setting", name)
            }
            EnigmaError::WrongSettingLength { expected, found } => write!(
                f,
                "Initial setting must have {} symbols, found {}",
                expected, found
            ),
            EnigmaError::InvalidShape { num_rotors, pawls } => write!(
                f,
                "Number of pawls ({}) must be less than number of rotors ({})",
                pawls, num_rotors
            ),
            EnigmaError::RotorsNotInserted => write!(f, "No rotors have been inserted"),
            EnigmaError::MalformedConfig(s) => write!(f, "Malformed configuration: {}", s),
            EnigmaError::MalformedSetup(s) => write!(f, "Malformed setup line: {}", s),
            EnigmaError::MissingSetup => {
                write!(f, "Input must start with a setup line beginning with '*'")
            }
        }
    }
}

impl std::error::Error for EnigmaError {}
