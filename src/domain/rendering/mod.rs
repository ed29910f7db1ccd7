//! Message rendering: the language-generation collaborator's contract

mod provider;

pub use provider::{MessageRenderer, RenderedMessage};

#[cfg(test)]
pub use provider::mock;
