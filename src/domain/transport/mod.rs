//! Outbound transport: the email/chat delivery collaborator's contract

mod provider;

pub use provider::OutboundTransport;

#[cfg(test)]
pub use provider::mock;
