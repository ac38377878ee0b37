//! Configuration text and setup lines.
//!
//! A configuration looks like:
//!
//! ```text
//! ABCDEFGHIJKLMNOPQRSTUVWXYZ
//! 5 3
//! I     MQ   (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//! Beta  N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//! B     R    (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP)
//!            (RX) (SZ) (TV)
//! ```
//!
//! The first line is the alphabet, the second the rotor and pawl counts, and
//! each rotor description is a name, a type letter (`M` moving, `N` fixed,
//! `R` reflector) followed by any notches, then the wiring cycles, which may
//! continue across lines.
//!
//! A setup line selects rotors, their initial setting and the plugboard:
//! `* B Beta I II III AXLE (HQ) (EX)`.

use std::iter::Peekable;
use std::str::SplitWhitespace;
use std::sync::Arc;

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::RotorSpec;

/// A parsed machine configuration: alphabet, shape and rotor catalog.
#[derive(Debug, Clone)]
pub struct MachineConfig {
    alphabet: Arc<Alphabet>,
    num_rotors: usize,
    pawls: usize,
    rotors: Vec<RotorSpec>,
}

impl MachineConfig {
    /// Parses configuration text.
    ///
    /// # Errors
    /// - [`EnigmaError::MalformedConfig`] for a missing alphabet, bad counts,
    ///   an unknown rotor type or a truncated rotor description.
    /// - [`EnigmaError::InvalidShape`] unless `pawls < num_rotors`.
    /// - Alphabet, permutation and rotor errors from the catalog entries.
    pub fn parse(text: &str) -> Result<Self, EnigmaError> {
        let text = text.trim_start();
        let (alphabet_line, rest) = text.split_once('\n').unwrap_or((text, ""));
        let alphabet_line = alphabet_line.trim();
        if alphabet_line.is_empty() {
            return Err(EnigmaError::MalformedConfig("missing alphabet".into()));
        }
        let alphabet = Arc::new(Alphabet::new(alphabet_line)?);

        let mut tokens = rest.split_whitespace().peekable();
        let num_rotors = parse_count(tokens.next(), "number of rotors")?;
        let pawls = parse_count(tokens.next(), "number of pawls")?;
        if pawls >= num_rotors {
            return Err(EnigmaError::InvalidShape { num_rotors, pawls });
        }

        let mut rotors = Vec::new();
        while tokens.peek().is_some() {
            rotors.push(parse_rotor(&mut tokens, &alphabet)?);
        }
        debug!(
            symbols = alphabet.size(),
            num_rotors,
            pawls,
            catalog = rotors.len(),
            "parsed machine configuration"
        );

        Ok(MachineConfig {
            alphabet,
            num_rotors,
            pawls,
            rotors,
        })
    }

    /// Builds a fresh machine from this configuration.
    ///
    /// # Errors
    /// Returns [`EnigmaError::DuplicateRotorName`] if two catalog entries share a name.
    pub fn build_machine(&self) -> Result<Machine, EnigmaError> {
        Machine::new(
            self.alphabet.clone(),
            self.num_rotors,
            self.pawls,
            self.rotors.iter().cloned(),
        )
    }

    /// Returns the configured alphabet.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Returns the number of rotor slots.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Returns the number of pawls.
    pub fn pawls(&self) -> usize {
        self.pawls
    }

    /// Returns the rotor catalog in file order.
    pub fn rotors(&self) -> &[RotorSpec] {
        &self.rotors
    }
}

fn parse_count(token: Option<&str>, what: &str) -> Result<usize, EnigmaError> {
    let token = token.ok_or_else(|| EnigmaError::MalformedConfig(format!("missing {}", what)))?;
    token
        .parse()
        .map_err(|_| EnigmaError::MalformedConfig(format!("bad {}: {:?}", what, token)))
}

/// Consumes cycle tokens, following groups that continue past whitespace.
fn take_cycles(tokens: &mut Peekable<SplitWhitespace<'_>>) -> String {
    let mut cycles = String::new();
    let mut depth: i32 = 0;
    while let Some(&token) = tokens.peek() {
        if depth <= 0 && !token.starts_with('(') {
            break;
        }
        tokens.next();
        for c in token.chars() {
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
        }
        if !cycles.is_empty() {
            cycles.push(' ');
        }
        cycles.push_str(token);
    }
    cycles
}

fn parse_rotor(
    tokens: &mut Peekable<SplitWhitespace<'_>>,
    alphabet: &Arc<Alphabet>,
) -> Result<RotorSpec, EnigmaError> {
    let name = tokens
        .next()
        .ok_or_else(|| EnigmaError::MalformedConfig("missing rotor name".into()))?;
    if name.starts_with('(') {
        return Err(EnigmaError::MalformedConfig(format!(
            "expected a rotor name, found cycles {:?}",
            name
        )));
    }
    let kind = tokens.next().ok_or_else(|| {
        EnigmaError::MalformedConfig(format!("truncated description of rotor {}", name))
    })?;
    let permutation = Permutation::new(&take_cycles(tokens), alphabet.clone())?;

    let mut chars = kind.chars();
    let type_letter = chars.next();
    let notches = chars.as_str();
    match type_letter {
        Some('M') => RotorSpec::moving(name, permutation, notches),
        Some('N') | Some('R') if !notches.is_empty() => Err(EnigmaError::MalformedConfig(
            format!("non-rotating rotor {} cannot have notches {:?}", name, notches),
        )),
        Some('N') => Ok(RotorSpec::fixed(name, permutation)),
        Some('R') => RotorSpec::reflector(name, permutation),
        _ => Err(EnigmaError::MalformedConfig(format!(
            "rotor {} has unknown type {:?}",
            name, kind
        ))),
    }
}

/// A parsed setup line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    rotors: Vec<String>,
    setting: String,
    plugboard: String,
}

impl Setup {
    /// Parses `* NAME... SETTING [CYCLES...]` for a machine with `num_rotors` slots.
    ///
    /// Exactly `num_rotors` names are taken. Any further non-cycle tokens are
    /// joined into the setting, so a line naming too many rotors fails later
    /// in [`Setup::apply`] with [`EnigmaError::WrongSettingLength`].
    ///
    /// # Errors
    /// Returns [`EnigmaError::MalformedSetup`] if the line does not start with
    /// `*` or names fewer than `num_rotors` rotors.
    pub fn parse(line: &str, num_rotors: usize) -> Result<Self, EnigmaError> {
        let body = line
            .trim_start()
            .strip_prefix('*')
            .ok_or_else(|| EnigmaError::MalformedSetup(format!("missing '*' in {:?}", line)))?;

        let mut tokens = body.split_whitespace().peekable();
        let mut rotors = Vec::with_capacity(num_rotors);
        while rotors.len() < num_rotors {
            match tokens.next() {
                Some(name) if !name.starts_with('(') => rotors.push(name.to_string()),
                _ => {
                    return Err(EnigmaError::MalformedSetup(format!(
                        "expected {} rotor names in {:?}",
                        num_rotors, line
                    )))
                }
            }
        }

        let mut setting = String::new();
        let mut plugboard = String::new();
        while let Some(&token) = tokens.peek() {
            if token.starts_with('(') {
                if !plugboard.is_empty() {
                    plugboard.push(' ');
                }
                plugboard.push_str(&take_cycles(&mut tokens));
            } else {
                setting.push_str(token);
                tokens.next();
            }
        }

        Ok(Setup {
            rotors,
            setting,
            plugboard,
        })
    }

    /// Returns the rotor names, leftmost first.
    pub fn rotors(&self) -> &[String] {
        &self.rotors
    }

    /// Returns the setting string for slots 1 onward.
    pub fn setting(&self) -> &str {
        &self.setting
    }

    /// Returns the plugboard cycles, empty for none.
    pub fn plugboard(&self) -> &str {
        &self.plugboard
    }

    /// Inserts the rotors, applies the setting and replaces the plugboard.
    ///
    /// # Errors
    /// Any error from [`Machine::insert_rotors`], [`Machine::set_rotors`] or
    /// the plugboard cycles.
    pub fn apply(&self, machine: &mut Machine) -> Result<(), EnigmaError> {
        let plugboard = Permutation::new(&self.plugboard, machine.alphabet().clone())?;
        machine.insert_rotors(self.rotors.as_slice())?;
        machine.set_rotors(&self.setting)?;
        machine.set_plugboard(plugboard);
        debug!(
            rotors = ?self.rotors,
            setting = %self.setting,
            plugboard = %self.plugboard,
            "applied setup"
        );
        Ok(())
    }
}
