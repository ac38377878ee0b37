//! Rotor cipher machine simulator.
//!
//! Simulates an Enigma-style machine: a fixed alphabet, a catalog of rotors
//! (rotating, fixed and reflecting), a plugboard, and the stepping mechanism
//! that advances rotors before each symbol, including the double step.
//!
//! # Architecture
//!
//! ```text
//! Alphabet     (symbols <-> indices 0..N)
//!     |
//! Permutation  (cycle notation, forward/inverse tables)
//!     |
//! RotorSpec    (catalog template: name, wiring, kind, notches)
//!     |  mounted fresh on every insert
//! Rotor / MovingRotor (wiring + current setting)
//!     |
//! Machine      (slots, plugboard, stepping, signal path)
//! ```
//!
//! [`config`] and [`session`] parse configuration text, setup lines and
//! message transcripts; the core types never perform I/O or logging.
//!
//! # Examples
//!
//! ```
//! use enigma::config::{MachineConfig, Setup};
//!
//! let config = MachineConfig::parse(
//!     "ABCDEFGHIJKLMNOPQRSTUVWXYZ
//!      4 3
//!      I   MQ (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//!      II  ME (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
//!      III MV (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
//!      B   R  (AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN) (MO) (TZ) (VW)",
//! )
//! .unwrap();
//!
//! let mut machine = config.build_machine().unwrap();
//! Setup::parse("* B I II III AAA", 4).unwrap().apply(&mut machine).unwrap();
//! assert_eq!(machine.convert("AAAAA").unwrap(), "BDZGO");
//!
//! machine.set_rotors("AAA").unwrap();
//! assert_eq!(machine.convert("BDZGO").unwrap(), "AAAAA");
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod config;
pub mod error;
pub mod machine;
pub mod permutation;
pub mod rotor;
pub mod session;

pub use alphabet::Alphabet;
pub use error::EnigmaError;
pub use machine::Machine;
pub use permutation::Permutation;
pub use rotor::{MovingRotor, Rotor, RotorKind, RotorSpec};
