macro_rules! test_generator_determinism {
    ($name: ident, $generator: expr) => {
        #[test]
        fn $name() {
            use rand::SeedableRng;

            let generator = $generator;

            let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(0x5eed);
            let first = generator.generate(&mut rng).unwrap();

            let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(0x5eed);
            let second = generator.generate(&mut rng).unwrap();

            assert!(first.is_consistent());
            assert_eq!(first, second);
        }
    };
}

macro_rules! test_orthogonality {
    ($name: ident, $n: expr) => {
        #[test]
        fn $name() {
            use crate::dpvs::keygen::{generate, pairing_table, IpParameters};
            use crate::pairing::{Bls12Engine, PairingEngine};
            use group::Group;

            let mut rng = rand::thread_rng();
            let n: usize = $n;

            let params = IpParameters::new(Bls12Engine::parameters(), n).unwrap();
            let (pk, sk) = generate::<Bls12Engine, _>(&params, &mut rng).unwrap();
            let engine = Bls12Engine::from_parameters(params.curve()).unwrap();

            assert_eq!(pk.b.len(), n + 2);
            assert_eq!(sk.b_star.len(), n + 2);

            let table = pairing_table(&engine, &pk.b, &sk.b_star);
            for (i, row) in table.iter().enumerate() {
                for (j, e) in row.iter().enumerate() {
                    // The last public and secret vectors sit at different trailing indices.
                    if i == j && i <= n {
                        assert_eq!(*e, pk.sigma, "({}, {})", i, j);
                    } else {
                        assert!(bool::from(e.is_identity()), "({}, {})", i, j);
                    }
                }
            }
        }
    };
}
