use criterion::{black_box, criterion_group, criterion_main, Criterion};
use paste::paste;
use std::time::Duration;

macro_rules! impl_bench_generator {
    ($name: ident, $generator: expr) => {
        paste! {
            fn [<bench_generator_ $name>](criterion: &mut Criterion) {
                use pbc_kit::params::*;

                let generator = $generator;

                criterion.bench_function(
                    &format!("params_{} generate", stringify!($name)).to_string(),
                    move |b| {
                        let mut rng = rand::thread_rng();
                        b.iter(|| black_box(&generator).generate(&mut rng))
                    },
                );
            }
        }
    };
}

macro_rules! impl_bench_dpvs {
    ($n: literal) => {
        paste! {
            fn [<bench_dpvs_n $n>](criterion: &mut Criterion) {
                use pbc_kit::dpvs::{generate, IpParameters};
                use pbc_kit::pairing::Bls12Engine;

                let params = IpParameters::new(Bls12Engine::parameters(), $n).unwrap();

                criterion.bench_function(&format!("dpvs_n{} generate", $n).to_string(), move |b| {
                    let mut rng = rand::thread_rng();
                    b.iter(|| generate::<Bls12Engine, _>(black_box(&params), &mut rng))
                });
            }
        }
    };
}

impl_bench_generator!(type_a_160_512, TypeACurveGenerator::new(160, 512).unwrap());
impl_bench_generator!(type_a_160_512_gen, TypeACurveGenerator::new(160, 512).unwrap().with_generator(true));
impl_bench_generator!(type_a1_2_256, TypeA1CurveGenerator::new(2, 256).unwrap());
impl_bench_generator!(type_a1_3_16, TypeA1CurveGenerator::new(3, 16).unwrap());

impl_bench_dpvs!(1);
impl_bench_dpvs!(2);
impl_bench_dpvs!(5);

fn bench_hybrid(criterion: &mut Criterion) {
    use pbc_kit::cipher::aes_gcm::AesGcmCipher;
    use pbc_kit::hybrid::{KemCipher, KemCipherParameters};
    use pbc_kit::kem::elgamal::{keypair, ElGamalKem};

    let mut rng = rand::thread_rng();
    let (pk, sk) = keypair(&mut rng);
    let msg = [0x42u8; 1024];

    let mut cipher = KemCipher::new(AesGcmCipher::new(), ElGamalKem::default());
    let encapsulation = cipher
        .init(
            KemCipherParameters::Encryption {
                kem: pk,
                cipher_key_strength: 256,
            },
            &mut rng,
        )
        .unwrap()
        .unwrap();
    let ct = cipher.do_final(&msg).unwrap();

    criterion.bench_function("hybrid elgamal_aes256gcm encrypt 1KiB", move |b| {
        let mut rng = rand::thread_rng();
        let mut cipher = KemCipher::new(AesGcmCipher::new(), ElGamalKem::default());
        b.iter(|| {
            cipher
                .init(
                    KemCipherParameters::Encryption {
                        kem: pk,
                        cipher_key_strength: 256,
                    },
                    &mut rng,
                )
                .unwrap();
            cipher.do_final(black_box(&msg))
        })
    });

    criterion.bench_function("hybrid elgamal_aes256gcm decrypt 1KiB", move |b| {
        let mut rng = rand::thread_rng();
        let mut cipher = KemCipher::new(AesGcmCipher::new(), ElGamalKem::default());
        b.iter(|| {
            cipher
                .init(
                    KemCipherParameters::Decryption {
                        kem: sk,
                        cipher_key_strength: 256,
                        encapsulation: encapsulation.clone(),
                    },
                    &mut rng,
                )
                .unwrap();
            cipher.do_final(black_box(&ct))
        })
    });
}

criterion_group!(
    name = params_benches;
    config = Criterion::default().sample_size(10).warm_up_time(Duration::new(0, 500));
    targets =
    bench_generator_type_a_160_512,
    bench_generator_type_a_160_512_gen,
    bench_generator_type_a1_2_256,
    bench_generator_type_a1_3_16,
);

criterion_group!(
    name = dpvs_benches;
    config = Criterion::default().sample_size(10).warm_up_time(Duration::new(0, 500));
    targets =
    bench_dpvs_n1,
    bench_dpvs_n2,
    bench_dpvs_n5,
);

criterion_group!(
    name = hybrid_benches;
    config = Criterion::default().warm_up_time(Duration::new(0, 500));
    targets =
    bench_hybrid,
);

criterion_main!(params_benches, dpvs_benches, hybrid_benches);
