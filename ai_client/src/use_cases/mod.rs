pub mod bridge;

pub use bridge::{BridgeConfig, run};
