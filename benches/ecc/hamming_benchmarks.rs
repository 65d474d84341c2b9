use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hamming_ecc::{Channel, HammingCode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_message(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len).map(|_| rng.gen()).collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamming/encode");
    let message = random_message(4096);
    group.throughput(Throughput::Bytes(message.len() as u64));

    for mode in [8, 26, 120] {
        let code = HammingCode::new(mode).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(mode), &message, |b, message| {
            b.iter(|| code.encode(black_box(message)))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamming/decode");
    let message = random_message(4096);
    group.throughput(Throughput::Bytes(message.len() as u64));

    for mode in [8, 26, 120] {
        let code = HammingCode::new(mode).unwrap();
        let mut channel = Channel::with_seed(mode, 1).unwrap();
        let noisy = channel.single_fault(&code.encode(&message)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(mode), &noisy, |b, noisy| {
            b.iter(|| code.decode(black_box(noisy)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
