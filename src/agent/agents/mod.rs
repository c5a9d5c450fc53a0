pub mod agent_interface;
pub mod conversational_react_agent;

pub use agent_interface::*;
pub use conversational_react_agent::*;
