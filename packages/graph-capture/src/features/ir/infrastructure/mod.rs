pub mod dce;

pub use dce::{LivenessAnalysis, LivenessInput, LivenessResult};
