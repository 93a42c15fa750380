//! End-to-end sweeps against a simulated device.

mod common;

use align_probe::{AlignmentProbe, Condition, IoOp, Label, Mode, ProbeError, RunConfig};
use common::SimDevice;

const UNIT: u64 = 4096;
const DEVICE_LEN: usize = 128 * 1024;

fn probe(mode: Mode) -> AlignmentProbe {
    AlignmentProbe::with_config(RunConfig {
        block_size: UNIT,
        interval_size: UNIT,
        offset_step: 512,
        repeat_count: 16,
        skip_count: 1,
        mode,
    })
}

#[test]
fn aligned_partition_is_detected() {
    let (mut device, clock) = SimDevice::new(DEVICE_LEN, UNIT, 0);
    let result = probe(Mode::Read).run_with(&mut device, clock, |_| {}).unwrap();

    assert_eq!(result.samples.len(), 8);
    assert_eq!(result.labels[0], Label::Good);
    assert!(result.labels[1..].iter().all(|l| *l == Label::Bad));
    assert!(result.verdict.is_aligned);
    assert_eq!(result.verdict.recommended_offset, 0);
    assert_eq!(result.verdict.condition, Condition::Normal);
    assert_eq!(result.verdict.exit_code(), 0);
    assert_eq!(result.metadata.clock, "simulated");
}

#[test]
fn shifted_partition_recommends_boundary() {
    // Logical 0 sits 1536 bytes into a physical unit; next boundary is 2560
    let (mut device, clock) = SimDevice::new(DEVICE_LEN, UNIT, 1536);
    let result = probe(Mode::Read).run_with(&mut device, clock, |_| {}).unwrap();

    assert!(!result.verdict.is_aligned);
    assert_eq!(result.verdict.recommended_offset, 2560);
    assert_eq!(result.verdict.recommended_sectors(), 5);
    assert_eq!(result.good_offsets(), vec![2560]);
    assert_eq!(result.verdict.exit_code(), 1);

    // Fast trials move twice the data per unit of time
    let fast = result.samples[5].throughput;
    let slow = result.samples[0].throughput;
    assert!((fast / slow - 2.0).abs() < 1e-9);
}

#[test]
fn read_write_mode_classifies_the_same() {
    let (mut device, clock) = SimDevice::new(DEVICE_LEN, UNIT, 1536);
    let result = probe(Mode::ReadWrite)
        .run_with(&mut device, clock, |_| {})
        .unwrap();

    assert_eq!(result.verdict.recommended_offset, 2560);
    // Every repetition reads then writes
    assert_eq!(device.accesses.len(), 8 * 16 * 2);
    // Written data is what was read back
    assert!(device.bytes().iter().all(|b| *b == 0x5A));
}

#[test]
fn write_mode_overwrites_with_zeros() {
    let (mut device, clock) = SimDevice::new(DEVICE_LEN, UNIT, 0);
    let result = probe(Mode::Write).run_with(&mut device, clock, |_| {}).unwrap();

    assert!(result.verdict.is_aligned);
    assert!(device.accesses.iter().all(|(write, _)| *write));
    let bytes = device.bytes();
    assert!(bytes[..UNIT as usize].iter().all(|b| *b == 0x5A));
    assert!(bytes[UNIT as usize..2 * UNIT as usize].iter().all(|b| *b == 0));
}

#[test]
fn trial_offsets_stride_by_interval() {
    let (mut device, clock) = SimDevice::new(DEVICE_LEN, 512, 0);
    AlignmentProbe::new()
        .interval_size(4096)
        .offset_step(512)
        .repeat_count(4)
        .skip_count(2)
        .run_with(&mut device, clock, |_| {})
        .unwrap();

    let expected: Vec<(bool, u64)> = (0..8u64)
        .flat_map(|i| (2..6u64).map(move |rep| (false, i * 512 + 4096 * rep)))
        .collect();
    assert_eq!(device.accesses, expected);
}

#[test]
fn uniform_device_is_reported_inconclusive() {
    // Every 512-byte block fits inside a 512-byte unit: no offset is faster
    let (mut device, clock) = SimDevice::new(DEVICE_LEN, 512, 0);
    let result = AlignmentProbe::new()
        .interval_size(4096)
        .repeat_count(8)
        .run_with(&mut device, clock, |_| {})
        .unwrap();

    assert_eq!(result.verdict.condition, Condition::UniformThroughput);
    assert!(!result.verdict.is_aligned);
    assert_eq!(result.verdict.recommended_offset, 0);
    assert!(result.labels.iter().all(|l| *l == Label::Bad));
    assert!(result
        .diagnostics
        .warnings
        .iter()
        .any(|w| w.contains("identical throughput")));
}

#[test]
fn single_offset_is_never_aligned() {
    let (mut device, clock) = SimDevice::new(DEVICE_LEN, UNIT, 0);
    let result = AlignmentProbe::new()
        .repeat_count(8)
        .run_with(&mut device, clock, |_| {})
        .unwrap();

    assert_eq!(result.samples.len(), 1);
    assert_eq!(result.verdict.condition, Condition::SingleSample);
    assert!(!result.verdict.is_aligned);
    assert_eq!(result.verdict.recommended_offset, 0);
}

#[test]
fn read_failure_aborts_remaining_trials() {
    let (mut device, clock) = SimDevice::new(DEVICE_LEN, UNIT, 0);
    // Three full trials succeed, then the sixth read of the fourth fails
    device.fail_reads_after = Some(16 * 3 + 5);

    let mut started = Vec::new();
    let err = probe(Mode::Read)
        .run_with(&mut device, clock, |p| started.push(p.index))
        .unwrap_err();

    assert_eq!(started, vec![0, 1, 2, 3]);
    assert_eq!(err.op(), Some(IoOp::Read));
    assert_eq!(err.offset(), Some(1536 + UNIT * 6));
    assert!(matches!(err, ProbeError::Io { .. }));
}

#[test]
fn device_too_small_fails_before_any_trial() {
    let (mut device, clock) = SimDevice::new(16 * 1024, UNIT, 0);
    let mut started = 0;
    let err = probe(Mode::Read)
        .run_with(&mut device, clock, |_| started += 1)
        .unwrap_err();

    assert!(matches!(err, ProbeError::Preflight(_)));
    assert_eq!(started, 0);
    assert!(device.accesses.is_empty());
}
