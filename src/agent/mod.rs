pub mod debug_relay;
pub mod stateless_llm_factory;

pub mod stateless_llm;

pub use debug_relay::*;
pub use stateless_llm_factory::*;
pub use stateless_llm::*;
