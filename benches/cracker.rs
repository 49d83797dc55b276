use randcracker::{untemper, Mt19937, RandCracker};

use criterion::{criterion_group, criterion_main, Criterion};

fn observed_outputs() -> Vec<u32> {
    let mut rng = Mt19937::new(1234);
    (0..624).map(|_| rng.generate()).collect()
}

pub fn bench_untemper(c: &mut Criterion) {
    c.bench_function("untemper", |b| b.iter(|| untemper(0xdead_beef)));
}

pub fn bench_check(c: &mut Criterion) {
    let outputs = observed_outputs();
    c.bench_function("check", |b| {
        b.iter(|| {
            let mut cracker = RandCracker::new();
            for &output in &outputs {
                cracker.submit(output);
            }
            cracker.check(false).unwrap();
        })
    });
}

pub fn bench_offset_back(c: &mut Criterion) {
    let mut cracker = RandCracker::new();
    for output in observed_outputs() {
        cracker.submit(output);
    }
    cracker.check(false).unwrap();
    c.bench_function("offset_back_10_cycles", |b| {
        b.iter(|| {
            cracker.offset(-6240).unwrap();
            cracker.offset(6240).unwrap();
        })
    });
}

criterion_group!(benches, bench_untemper, bench_check, bench_offset_back);
criterion_main!(benches);
