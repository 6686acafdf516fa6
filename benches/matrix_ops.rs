use criterion::{criterion_group, criterion_main, Criterion};
use digital_net::{GeneratingMatrix,Polynomial};
use rand::thread_rng;

fn criterion_benchmark(crit: &mut Criterion) {
    let mut rng = thread_rng();
    for size in [16usize, 32, 63] {
        let a = GeneratingMatrix::random_unit_lower_triangular(size, size, &mut rng);
        let b = GeneratingMatrix::random(size, size, &mut rng);

        crit.bench_function(&format!("matrix mul {}", size), |crit| crit.iter(|| a.mul(&b)));
        crit.bench_function(&format!("matrix rank {}", size), |crit| crit.iter(|| b.rank()));
        crit.bench_function(&format!("matrix format {}", size), |crit| crit.iter(|| {
            b.format_to_columns_reverse()
        }));
    }

    let modulus = Polynomial::from_bits((1 << 31) | 0b1001);
    crit.bench_function("laurent digits 62", |crit| crit.iter(|| {
        Polynomial::from_bits(0x1234_5677).laurent_digits(modulus, 62)
    }));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
