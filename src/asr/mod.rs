pub mod asr_factory;
pub mod interface;
pub mod whisper_api;

pub use asr_factory::*;
pub use interface::*;
pub use whisper_api::*;
