//! Infrastructure layer - repository, ledger, and collaborator implementations

pub mod campaign;
pub mod customer;
pub mod dispatch;
pub mod logging;
pub mod notification;
pub mod rendering;
pub mod services;
pub mod transport;
