pub mod utterance;

pub use utterance::*;
