pub mod error;
pub mod input_types;
pub mod output_types;
pub mod output_parser;
pub mod prompt;
pub mod agent_factory;
pub mod stateless_llm_factory;

pub mod agents;
pub mod stateless_llm;
pub mod tools;

#[cfg(test)]
pub(crate) mod test_upstream;

pub use error::*;
pub use input_types::*;
pub use agent_factory::*;
pub use agents::*;
