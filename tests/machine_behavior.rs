//! Behavior tests for the public machine API.
//!
//! Coverage:
//! - `Machine` known-answer vectors and encrypt/decrypt symmetry
//! - stepping: rightmost rotor, notch carry, double step
//! - configuration rejections
//! - `Alphabet` and `Permutation` properties

use std::sync::Arc;

use enigma::config::{MachineConfig, Setup};
use enigma::{Alphabet, EnigmaError, Machine, Permutation, RotorSpec};

/// Naval four-rotor catalog with thin reflectors, plus the three-rotor
/// reflector B under the name `UKW-B`.
const CONFIG: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ
 5 3
 I MQ      (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
 II ME     (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
 III MV    (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
 IV MJ     (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
 V MZ      (AVOLDRWFIUQ)(BZKSMNHYC) (EGTJPX)
 Beta N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
 Gamma N   (AFNIRLBSQWVXGUZDKMTPCOYJHE)
 B R       (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP)
           (RX) (SZ) (TV)
 C R       (AR) (BD) (CO) (EJ) (FN) (GT) (HK) (IV) (LM) (PW)
           (QZ) (SX) (UY)
";

fn machine() -> Machine {
    MachineConfig::parse(CONFIG).unwrap().build_machine().unwrap()
}

fn setup(machine: &mut Machine, line: &str) {
    Setup::parse(line, machine.num_rotors())
        .unwrap()
        .apply(machine)
        .unwrap();
}

// ═══════════════════════════════════════════════════════════════════════
// Known-answer vectors
// ═══════════════════════════════════════════════════════════════════════

/// Rotors I II III at AAA with reflector B encipher AAAAA as BDZGO.
#[test]
fn three_rotor_reference_vector() {
    let alpha = Arc::new(Alphabet::default());
    let p = |cycles: &str| Permutation::new(cycles, alpha.clone()).unwrap();
    let catalog = vec![
        RotorSpec::moving("I", p("(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)"), "Q").unwrap(),
        RotorSpec::moving("II", p("(FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)"), "E")
            .unwrap(),
        RotorSpec::moving("III", p("(ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)"), "V").unwrap(),
        RotorSpec::reflector(
            "UKW-B",
            p("(AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN) (MO) (TZ) (VW)"),
        )
        .unwrap(),
    ];
    let mut m = Machine::new(alpha.clone(), 4, 3, catalog).unwrap();
    m.insert_rotors(&["UKW-B", "I", "II", "III"]).unwrap();
    m.set_rotors("AAA").unwrap();
    assert_eq!(m.convert("AAAAA").unwrap(), "BDZGO");
}

/// The four-rotor machine with Beta at A and thin reflector B matches the
/// three-rotor reference vector.
#[test]
fn four_rotor_matches_three_rotor_vector() {
    let mut m = machine();
    setup(&mut m, "* B Beta I II III AAAA");
    assert_eq!(m.convert("AAAAA").unwrap(), "BDZGO");
}

/// Frozen outputs for configurations with plugboards and non-zero settings.
#[test]
fn frozen_vectors() {
    let cases = [
        (
            "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BW)",
            "FROMHISSHOULDERHIAWATHA",
            "QVPQSOKOILPUYKJZPIUFXDB",
        ),
        (
            "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BW)",
            "HELLOWORLD",
            "UPVGJPUNSG",
        ),
        ("* B Gamma V II IV ZQEJ (AB)", "HELLOWORLD", "XXTNLIEXKA"),
        ("* C Gamma IV V II MZZD (PQ)(RS)", "ATTACKATDAWN", "GRWNAUORLOAU"),
    ];
    for (line, plain, cipher) in cases {
        let mut m = machine();
        setup(&mut m, line);
        assert_eq!(m.convert(plain).unwrap(), cipher, "encrypting under {}", line);
        setup(&mut m, line);
        assert_eq!(m.convert(cipher).unwrap(), plain, "decrypting under {}", line);
    }
}

#[test]
fn decrypt_reverses_encrypt_across_many_steps() {
    let mut m = machine();
    let line = "* C Beta V IV III QEVZ (AZ) (BY) (CX) (DW)";
    let plain: String = "THEENEMYISADVANCINGALONGTHERIVER".repeat(40);

    setup(&mut m, line);
    let cipher = m.convert(&plain).unwrap();
    assert_eq!(cipher.len(), plain.len());
    assert!(
        plain.chars().zip(cipher.chars()).all(|(p, c)| p != c),
        "no symbol may encipher to itself"
    );

    setup(&mut m, line);
    assert_eq!(m.convert(&cipher).unwrap(), plain);
}

// ═══════════════════════════════════════════════════════════════════════
// Stepping
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn single_step_moves_only_rightmost() {
    let mut m = machine();
    setup(&mut m, "* B Beta I II III AAAA");
    m.convert("X").unwrap();
    assert_eq!(m.positions().as_deref(), Some("AAAB"));
}

#[test]
fn notch_carries_to_left_neighbor() {
    let mut m = machine();
    setup(&mut m, "* B Beta I II III AAAV");
    m.convert("X").unwrap();
    assert_eq!(m.positions().as_deref(), Some("AABW"));
}

#[test]
fn double_step_sequence() {
    let mut m = machine();
    setup(&mut m, "* B Beta I II III AADU");
    let mut positions = Vec::new();
    for _ in 0..4 {
        m.convert("X").unwrap();
        positions.push(m.positions().unwrap());
    }
    assert_eq!(positions, ["AADV", "AAEW", "ABFX", "ABFY"]);
}

#[test]
fn fixed_rotor_and_reflector_positions_hold() {
    let mut m = machine();
    setup(&mut m, "* C Gamma I II III QZZZ");
    for _ in 0..50 {
        m.convert("ZZZZZZZZZZZZZZZZZZZZZZZZZZ").unwrap();
        assert!(m.positions().unwrap().starts_with('Q'));
    }
}

#[test]
fn full_cycle_returns_rightmost_rotor_home() {
    let mut m = machine();
    setup(&mut m, "* B Beta I II III AAAA");
    m.convert(&"A".repeat(26)).unwrap();
    let positions = m.positions().unwrap();
    assert!(positions.ends_with('A'), "got {}", positions);
    assert_eq!(&positions[..2], "AA");
}

// ═══════════════════════════════════════════════════════════════════════
// Rejections
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn rejects_wrong_slot_count() {
    let mut m = machine();
    assert_eq!(
        m.insert_rotors(&["B", "Beta", "I", "II", "III", "IV"]),
        Err(EnigmaError::WrongSlotCount {
            expected: 5,
            found: 6
        })
    );
}

#[test]
fn rejects_repeated_rotor() {
    let mut m = machine();
    assert_eq!(
        m.insert_rotors(&["B", "Beta", "III", "II", "III"]),
        Err(EnigmaError::RepeatedRotor("III".into()))
    );
}

#[test]
fn rejects_non_derangement_reflector() {
    let bad = CONFIG.replace("(RX) (SZ) (TV)", "(RX) (SZ)");
    assert_eq!(
        MachineConfig::parse(&bad).unwrap_err(),
        EnigmaError::NotADerangement("B".into())
    );
}

#[test]
fn rejects_bad_settings() {
    let mut m = machine();
    m.insert_rotors(&["B", "Beta", "I", "II", "III"]).unwrap();
    assert_eq!(
        m.set_rotors("AAAAA"),
        Err(EnigmaError::WrongSettingLength {
            expected: 4,
            found: 5
        })
    );
    assert_eq!(
        m.set_rotors("AA-A"),
        Err(EnigmaError::SymbolNotInAlphabet('-'))
    );
}

#[test]
fn rejects_kind_mismatch() {
    let mut m = machine();
    assert!(matches!(
        m.insert_rotors(&["I", "Beta", "B", "II", "III"]),
        Err(EnigmaError::RotorKindMismatch { slot: 0, .. })
    ));
    assert!(matches!(
        m.insert_rotors(&["B", "Beta", "Gamma", "II", "III"]),
        Err(EnigmaError::RotorKindMismatch { slot: 2, .. })
    ));
}

#[test]
fn rejects_message_outside_alphabet() {
    let mut m = machine();
    setup(&mut m, "* B Beta I II III AAAA");
    assert_eq!(
        m.convert("ABC1"),
        Err(EnigmaError::SymbolNotInAlphabet('1'))
    );
    assert_eq!(m.positions().as_deref(), Some("AAAA"));
}

#[test]
fn rejects_bad_shape() {
    let alpha = Arc::new(Alphabet::default());
    assert_eq!(
        Machine::new(alpha, 2, 2, Vec::new()).unwrap_err(),
        EnigmaError::InvalidShape {
            num_rotors: 2,
            pawls: 2
        }
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Alphabet and permutation properties
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn alphabet_round_trips() {
    let alpha = Alphabet::new("0123456789.,ABCxyz").unwrap();
    for i in 0..alpha.size() {
        assert_eq!(alpha.to_int(alpha.to_char(i).unwrap()).unwrap(), i);
    }
    for &c in alpha.symbols() {
        assert_eq!(alpha.to_char(alpha.to_int(c).unwrap()).unwrap(), c);
    }
}

#[test]
fn every_catalog_permutation_round_trips() {
    let config = MachineConfig::parse(CONFIG).unwrap();
    for spec in config.rotors() {
        let perm = spec.permutation();
        for i in 0..perm.size() as isize {
            assert_eq!(perm.invert(perm.permute(i) as isize), i as usize, "{}", spec.name());
            assert_eq!(perm.permute(perm.invert(i) as isize), i as usize, "{}", spec.name());
        }
    }
}

#[test]
fn plugboard_swaps_are_applied_both_ways() {
    let mut plain = machine();
    let mut plugged = machine();
    setup(&mut plain, "* B Beta I II III AAAA");
    setup(&mut plugged, "* B Beta I II III AAAA (AQ)");
    // Plugged input A enters the rotors as Q; a rotor output of A leaves as Q.
    let unplugged = plain.convert("Q").unwrap();
    let plugged_out = plugged.convert("A").unwrap();
    let expected = if unplugged == "A" {
        "Q".to_string()
    } else {
        unplugged
    };
    assert_eq!(plugged_out, expected);
}
