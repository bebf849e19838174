//! This file produces a binary that prints one freshly generated parameter set
//! of each supported curve type.

use pbc_kit::params::{CurveGenerator, TypeA1CurveGenerator, TypeACurveGenerator};

macro_rules! print_params {
    ($label: expr, $generator: expr) => {{
        let mut rng = rand::thread_rng();
        let generator: CurveGenerator = $generator.into();
        let params = generator.generate(&mut rng)?;

        println!("{}", $label);
        println!("{}", params.to_map());
    }};
}

fn main() -> Result<(), pbc_kit::Error> {
    print_params!(
        "Type A (rbits 160, qbits 512):",
        TypeACurveGenerator::new(160, 512)?
    );
    print_params!(
        "Type A1 (3 primes of 16 bits):",
        TypeA1CurveGenerator::new(3, 16)?
    );

    Ok(())
}
