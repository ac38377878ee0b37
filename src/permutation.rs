//! Permutation: a bijection on alphabet indices defined in cycle notation.
//!
//! A permutation keeps two dense tables, `forward` and `backward`, with
//! `backward[forward[i]] == i` for every index. Indices that appear in no
//! cycle are fixed points.

use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;

/// A permutation of the indices of an [`Alphabet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    alphabet: Arc<Alphabet>,
    forward: Vec<usize>,
    backward: Vec<usize>,
}

impl Permutation {
    /// Builds the identity permutation over `alphabet`.
    pub fn identity(alphabet: Arc<Alphabet>) -> Self {
        let forward: Vec<usize> = (0..alphabet.size()).collect();
        let backward = forward.clone();
        Permutation {
            alphabet,
            forward,
            backward,
        }
    }

    /// Builds a permutation from cycle notation such as `"(ABC) (DE)"`.
    ///
    /// Whitespace between and inside groups is ignored. The empty string is
    /// the identity. A one-symbol cycle `(C)` leaves `C` fixed.
    ///
    /// # Errors
    /// - [`EnigmaError::UnknownCycleSymbol`] if a cycle uses a symbol outside `alphabet`.
    /// - [`EnigmaError::RepeatedCycleSymbol`] if a symbol appears twice.
    /// - [`EnigmaError::MalformedCycles`] for unbalanced or empty groups, or
    ///   symbols outside any group.
    pub fn new(cycles: &str, alphabet: Arc<Alphabet>) -> Result<Self, EnigmaError> {
        let mut perm = Self::identity(alphabet);
        let mut seen = vec![false; perm.size()];
        let mut current: Option<Vec<usize>> = None;

        for c in cycles.chars() {
            if c.is_whitespace() {
                continue;
            }
            match (c, current.as_mut()) {
                ('(', None) => current = Some(Vec::new()),
                ('(', Some(_)) => {
                    return Err(EnigmaError::MalformedCycles(format!(
                        "nested '(' in {:?}",
                        cycles
                    )))
                }
                (')', None) => {
                    return Err(EnigmaError::MalformedCycles(format!(
                        "unbalanced ')' in {:?}",
                        cycles
                    )))
                }
                (')', Some(cycle)) => {
                    if cycle.is_empty() {
                        return Err(EnigmaError::MalformedCycles(format!(
                            "empty cycle in {:?}",
                            cycles
                        )));
                    }
                    let cycle = std::mem::take(cycle);
                    perm.add_cycle(&cycle);
                    current = None;
                }
                (_, None) => {
                    return Err(EnigmaError::MalformedCycles(format!(
                        "symbol '{}' outside parentheses in {:?}",
                        c, cycles
                    )))
                }
                (_, Some(cycle)) => {
                    let index = perm
                        .alphabet
                        .to_int(c)
                        .map_err(|_| EnigmaError::UnknownCycleSymbol(c))?;
                    if seen[index] {
                        return Err(EnigmaError::RepeatedCycleSymbol(c));
                    }
                    seen[index] = true;
                    cycle.push(index);
                }
            }
        }

        if current.is_some() {
            return Err(EnigmaError::MalformedCycles(format!(
                "unclosed '(' in {:?}",
                cycles
            )));
        }
        Ok(perm)
    }

    /// Applies the cycle `c0 -> c1 -> ... -> cm -> c0`, then rebuilds the inverse.
    fn add_cycle(&mut self, cycle: &[usize]) {
        for (i, &from) in cycle.iter().enumerate() {
            self.forward[from] = cycle[(i + 1) % cycle.len()];
        }
        for (i, &to) in self.forward.iter().enumerate() {
            self.backward[to] = i;
        }
    }

    /// Reduces `p` modulo the alphabet size into `0..size`, wrapping negatives.
    pub fn wrap(&self, p: isize) -> usize {
        p.rem_euclid(self.size() as isize) as usize
    }

    /// Returns the size of the alphabet this permutation acts on.
    pub fn size(&self) -> usize {
        self.forward.len()
    }

    /// Applies the permutation to `p` modulo the alphabet size.
    pub fn permute(&self, p: isize) -> usize {
        self.forward[self.wrap(p)]
    }

    /// Applies the inverse permutation to `c` modulo the alphabet size.
    pub fn invert(&self, c: isize) -> usize {
        self.backward[self.wrap(c)]
    }

    /// Applies the permutation to a symbol.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if `p` is absent.
    pub fn permute_char(&self, p: char) -> Result<char, EnigmaError> {
        let index = self.alphabet.to_int(p)?;
        self.alphabet.to_char(self.forward[index])
    }

    /// Applies the inverse permutation to a symbol.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if `c` is absent.
    pub fn invert_char(&self, c: char) -> Result<char, EnigmaError> {
        let index = self.alphabet.to_int(c)?;
        self.alphabet.to_char(self.backward[index])
    }

    /// Returns the alphabet this permutation was built against.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Returns true iff no index maps to itself.
    pub fn derangement(&self) -> bool {
        self.forward.iter().enumerate().all(|(i, &p)| i != p)
    }
}
