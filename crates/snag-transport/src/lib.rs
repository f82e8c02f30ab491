//! # Snag Transport
//!
//! Report delivery for the Snag notifier.
//!
//! This crate provides the concrete [`Transport`](snag_core::Transport)
//! implementations the bootstrap chooses between.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  snag-core Client   │  (notify pipeline)
//! ├─────────────────────┤
//! │  Transport trait    │  (capability contract)
//! ├─────────────────────┤
//! │  snag-transport     │  <- This crate (implementations)
//! ├─────────────────────┤
//! │  HTTP (reqwest)     │
//! └─────────────────────┘
//! ```
//!
//! ## Transports
//!
//! | Transport | API key | Body | Use Case |
//! |-----------|---------|------|----------|
//! | [`ModernTransport`] | `Bugsnag-Api-Key` header | JSON | Current hosts |
//! | [`LegacyTransport`] | `apiKey` query parameter | `text/plain` | Hosts with only simple cross-domain requests |

pub mod legacy;
pub mod modern;
pub mod payload;

pub use legacy::LegacyTransport;
pub use modern::ModernTransport;
pub use payload::{PAYLOAD_VERSION, build_payload};
