//! Membership-oracle adapters for an FTP-like System Under Learning.
//!
//! These are the external collaborators spec.md §1 calls out as
//! explicitly out of the learner's CORE scope: socket handling, timing,
//! banner consumption and connection lifecycle ([`tcp::TcpOracle`]), and
//! a bundled sample SUL ([`sim::FtpSim`]) used for tests and demos.

pub mod sim;
pub mod tcp;

pub use sim::FtpSim;
pub use tcp::{TcpOracle, TcpOracleConfig};
