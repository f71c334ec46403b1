use std::time::Duration;

use rand::{thread_rng, Rng};

use criterion::{
    criterion_group, criterion_main, measurement::WallTime, BenchmarkGroup, Criterion, SamplingMode,
};

use seqmatch::match_sequences;

const SAMPLE_SIZE: usize = 10;
const WARM_UP_TIME: Duration = Duration::from_secs(5);
const MEASURE_TIME: Duration = Duration::from_secs(10);

const MIN_LEN: usize = 100;
const MAX_LEN: usize = 1000;
const ALPHABETS: [u8; 3] = [4, 26, 255];

fn criterion_uniform(c: &mut Criterion) {
    let mut group = c.benchmark_group("uniform");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP_TIME);
    group.measurement_time(MEASURE_TIME);
    group.sampling_mode(SamplingMode::Flat);

    add_match_benches(&mut group, |rng, alphabet| rng.gen_range(0..alphabet));
}

fn criterion_mutated(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutated");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP_TIME);
    group.measurement_time(MEASURE_TIME);
    group.sampling_mode(SamplingMode::Flat);

    // Mostly-shared text with sparse edits, the common case for near-duplicate documents.
    let mut rng = thread_rng();
    let mut len = MIN_LEN;
    while len <= MAX_LEN {
        let a: Vec<u8> = (0..len).map(|_| rng.gen_range(b'a'..=b'z')).collect();
        let b: Vec<u8> = a
            .iter()
            .map(|&x| if rng.gen_range(0..50) == 0 { b' ' } else { x })
            .collect();
        group.bench_function(format!("gestalt/{len}"), |bencher| {
            bencher.iter(|| {
                if match_sequences(&a, &b).ratio > 1. {
                    panic!();
                }
            });
        });
        len *= 10;
    }
}

fn add_match_benches<F>(group: &mut BenchmarkGroup<WallTime>, mut gen: F)
where
    F: FnMut(&mut rand::rngs::ThreadRng, u8) -> u8,
{
    let mut rng = thread_rng();
    for &alphabet in &ALPHABETS {
        let mut len = MIN_LEN;
        while len <= MAX_LEN {
            let a: Vec<u8> = (0..len).map(|_| gen(&mut rng, alphabet)).collect();
            let b: Vec<u8> = (0..len).map(|_| gen(&mut rng, alphabet)).collect();
            group.bench_function(format!("gestalt/{alphabet}/{len}"), |bencher| {
                bencher.iter(|| {
                    if match_sequences(&a, &b).ratio > 1. {
                        panic!();
                    }
                });
            });
            len *= 10;
        }
    }
}

criterion_group!(benches, criterion_uniform, criterion_mutated);
criterion_main!(benches);
