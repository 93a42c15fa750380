//! Randomized checks of the classification rule.

use align_probe::analysis::{classify, is_good};
use align_probe::statistics::summarize;
use align_probe::{Condition, Label, Sample};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ITERATIONS: usize = 500;

fn random_samples(rng: &mut StdRng) -> Vec<Sample> {
    let n = rng.gen_range(2..32);
    (0..n)
        .map(|i| {
            let throughput = rng.gen_range(1.0..500.0);
            Sample::new(i as u64 * 512, 1.0, throughput)
        })
        .collect()
}

#[test]
fn summary_bounds_every_valid_sample() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..ITERATIONS {
        let samples = random_samples(&mut rng);
        let summary = summarize(&samples).unwrap();

        assert!(samples.iter().all(|s| s.throughput <= summary.max));
        assert!(samples.iter().any(|s| s.throughput == summary.max));
        let sum: f64 = samples.iter().map(|s| s.throughput).sum();
        assert_eq!(summary.mean, sum / samples.len() as f64);
        assert_eq!(summary.count, samples.len());
    }
}

#[test]
fn labels_follow_the_distance_rule() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..ITERATIONS {
        let samples = random_samples(&mut rng);
        let classification = classify(&samples);
        let summary = classification.summary.unwrap();
        if classification.verdict.condition != Condition::Normal {
            continue;
        }

        for (sample, label) in samples.iter().zip(&classification.labels) {
            let expected = is_good(sample.throughput, summary.max, summary.mean);
            assert_eq!(*label == Label::Good, expected);
        }
        // The maximum itself is always good when throughputs differ
        let fastest = samples
            .iter()
            .position(|s| s.throughput == summary.max)
            .unwrap();
        assert_eq!(classification.labels[fastest], Label::Good);
    }
}

#[test]
fn verdict_is_consistent_with_labels() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..ITERATIONS {
        let samples = random_samples(&mut rng);
        let classification = classify(&samples);
        let verdict = classification.verdict;

        assert_eq!(verdict.is_aligned, classification.labels[0] == Label::Good);
        match classification.labels.iter().position(|l| *l == Label::Good) {
            Some(first) => assert_eq!(verdict.recommended_offset, samples[first].base_offset),
            None => assert_eq!(verdict.recommended_offset, 0),
        }
        if verdict.is_aligned {
            assert_eq!(verdict.recommended_offset, 0);
        }
    }
}

#[test]
fn classification_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..ITERATIONS {
        let samples = random_samples(&mut rng);
        assert_eq!(classify(&samples), classify(&samples));
    }
}

#[test]
fn invalid_samples_do_not_shift_the_verdict() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..ITERATIONS {
        let samples = random_samples(&mut rng);
        let mut padded = samples.clone();
        let offset = samples.len() as u64 * 512;
        padded.push(Sample::from_trial(offset, 4096, 0.0));

        let plain = classify(&samples);
        let with_invalid = classify(&padded);
        assert_eq!(with_invalid.summary, plain.summary);
        assert_eq!(with_invalid.verdict, plain.verdict);
        assert_eq!(with_invalid.labels.last(), Some(&Label::Invalid));
    }
}
