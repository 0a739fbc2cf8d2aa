// ============================================================================
// Boathouse Library
// ============================================================================

pub mod cli;
pub mod connection;
pub mod core;
pub mod server;
pub mod session;

// Re-export main types for convenience
pub use self::core::{Boat, BoatData, BoatDraft, BoatId, ClientError, Result, Selection, SelectionKey};

// Re-export client API
pub use connection::{
    SendMethod, Transport, TransportFactory,
    config::{ConnectionConfig, Credentials},
    http::{HttpTransport, HttpTransportFactory},
};
pub use session::{Intent, LoginFlow, SessionController};
