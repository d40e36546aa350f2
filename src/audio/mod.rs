pub mod drum_synth;
pub mod sampler;

pub use sampler::SamplerHandle;
