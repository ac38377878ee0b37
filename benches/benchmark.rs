//! Benchmarks for machine setup and message conversion.
//!
//! Measures configuration parsing, per-message setup, single-symbol
//! conversion and conversion throughput across message lengths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use enigma::config::{MachineConfig, Setup};
use enigma::Machine;

/// Configuration used consistently across all benchmarks.
const BENCH_CONFIG: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ
 5 3
 I MQ      (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
 II ME     (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
 III MV    (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
 IV MJ     (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
 Beta N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
 B R       (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP)
           (RX) (SZ) (TV)
";

/// Setup line applied before each conversion benchmark.
const BENCH_SETUP: &str = "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BW)";

fn configured_machine() -> Machine {
    let mut machine = MachineConfig::parse(BENCH_CONFIG)
        .unwrap()
        .build_machine()
        .unwrap();
    Setup::parse(BENCH_SETUP, machine.num_rotors())
        .unwrap()
        .apply(&mut machine)
        .unwrap();
    machine
}

/// Benchmarks parsing the configuration text and building a machine.
fn bench_config_parse(c: &mut Criterion) {
    c.bench_function("config_parse", |b| {
        b.iter(|| {
            let config = MachineConfig::parse(black_box(BENCH_CONFIG)).unwrap();
            config.build_machine().unwrap()
        });
    });
}

/// Benchmarks applying a setup line: rotor insertion, settings and plugboard.
fn bench_setup(c: &mut Criterion) {
    let mut machine = configured_machine();
    let setup = Setup::parse(BENCH_SETUP, machine.num_rotors()).unwrap();
    c.bench_function("apply_setup", |b| {
        b.iter(|| setup.apply(black_box(&mut machine)).unwrap());
    });
}

/// Benchmarks one stepped conversion. Rotor state advances between
/// iterations, so notch carries occur at their natural rate.
fn bench_convert_index(c: &mut Criterion) {
    let mut machine = configured_machine();
    let mut group = c.benchmark_group("convert_single_symbol");
    group.throughput(Throughput::Elements(1));
    group.bench_function("5_rotors_3_pawls", |b| {
        b.iter(|| machine.convert_index(black_box(7)).unwrap());
    });
    group.finish();
}

/// Benchmarks `convert()` throughput across message lengths.
fn bench_convert_message_scaling(c: &mut Criterion) {
    let lengths: &[usize] = &[16, 256, 4096];

    let mut group = c.benchmark_group("convert_message_scaling");
    for &len in lengths {
        let message: String = "ATTACKATDAWN".chars().cycle().take(len).collect();
        let mut machine = configured_machine();
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &message, |b, msg| {
            b.iter(|| {
                machine.set_rotors("AXLE").unwrap();
                machine.convert(black_box(msg)).unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_config_parse,
    bench_setup,
    bench_convert_index,
    bench_convert_message_scaling,
);
criterion_main!(benches);
