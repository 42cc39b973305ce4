pub mod keygen;
pub mod rng;
