//! Alphabet: bidirectional mapping between symbols and dense indices.

use std::collections::HashMap;

use crate::error::EnigmaError;

/// Symbols of the default alphabet.
const DEFAULT_SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// An ordered set of unique symbols. The symbol at position `k` has index `k`.
///
/// Immutable once built. Permutations, rotors and machines share one alphabet
/// through an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    indices: HashMap<char, usize>,
}

impl Default for Alphabet {
    fn default() -> Self {
        let symbols: Vec<char> = DEFAULT_SYMBOLS.chars().collect();
        let indices = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Alphabet { symbols, indices }
    }
}

impl Alphabet {
    /// Builds an alphabet from the symbols of `chars`, in order.
    ///
    /// # Errors
    /// - [`EnigmaError::EmptyAlphabet`] if `chars` is empty.
    /// - [`EnigmaError::DuplicateSymbol`] if a symbol repeats.
    /// - [`EnigmaError::ReservedSymbol`] for whitespace or parentheses, which
    ///   cycle notation uses as delimiters.
    pub fn new(chars: &str) -> Result<Self, EnigmaError> {
        let mut symbols = Vec::with_capacity(chars.len());
        let mut indices = HashMap::with_capacity(chars.len());
        for c in chars.chars() {
            if c.is_whitespace() || c == '(' || c == ')' {
                return Err(EnigmaError::ReservedSymbol(c));
            }
            if indices.insert(c, symbols.len()).is_some() {
                return Err(EnigmaError::DuplicateSymbol(c));
            }
            symbols.push(c);
        }
        if symbols.is_empty() {
            return Err(EnigmaError::EmptyAlphabet);
        }
        Ok(Alphabet { symbols, indices })
    }

    /// Returns the number of symbols.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if `symbol` is in this alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.indices.contains_key(&symbol)
    }

    /// Returns the symbol at `index`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::IndexOutOfRange`] unless `index < size()`.
    pub fn to_char(&self, index: usize) -> Result<char, EnigmaError> {
        self.symbols
            .get(index)
            .copied()
            .ok_or(EnigmaError::IndexOutOfRange {
                index,
                size: self.size(),
            })
    }

    /// Returns the index of `symbol`. Inverse of [`to_char`](Self::to_char).
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if `symbol` is absent.
    pub fn to_int(&self, symbol: char) -> Result<usize, EnigmaError> {
        self.indices
            .get(&symbol)
            .copied()
            .ok_or(EnigmaError::SymbolNotInAlphabet(symbol))
    }

    /// Returns the symbols in index order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}
