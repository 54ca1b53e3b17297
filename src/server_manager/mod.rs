//! Server management: the contract for the component that knows how to reach the
//! system under test, and its default connection-based implementation.

pub mod connection;

pub use connection::*;

use crate::framework::LifecycleComponent;

/// A lifecycle component holding the connection to the system under test.
pub trait ServerManager: LifecycleComponent {
    /// Where load is sent, for logs and the state report.
    fn endpoint(&self) -> String;
}
