//! Network availability checks.
//!
//! The fetcher asks a [`Connectivity`] before every remote attempt. When it
//! reports no network, requests are answered from the disk cache alone.

use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

/// Default address probed by [`TcpProbe`].
pub const DEFAULT_PROBE_ADDRESS: &str = "1.1.1.1:443";

/// Default connect timeout for [`TcpProbe`].
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Reports whether remote fetches should be attempted.
pub trait Connectivity: Send + Sync {
    fn is_available(&self) -> bool;
}

impl<T: Connectivity + ?Sized> Connectivity for Arc<T> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

/// Connectivity fixed by the caller, switchable at runtime.
#[derive(Debug)]
pub struct StaticConnectivity {
    available: AtomicBool,
}

impl StaticConnectivity {
    pub fn new(available: bool) -> Self {
        Self {
            available: AtomicBool::new(available),
        }
    }

    pub fn online() -> Self {
        Self::new(true)
    }

    pub fn offline() -> Self {
        Self::new(false)
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Release);
    }
}

impl Default for StaticConnectivity {
    fn default() -> Self {
        Self::online()
    }
}

impl Connectivity for StaticConnectivity {
    fn is_available(&self) -> bool {
        self.available.load(Ordering::Acquire)
    }
}

/// Checks connectivity by opening a TCP connection to a probe address.
///
/// Every call resolves and connects anew; nothing is cached.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    address: String,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(address: impl Into<String>, timeout: Duration) -> Self {
        Self {
            address: address.into(),
            timeout,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    fn resolve(&self) -> Vec<SocketAddr> {
        match self.address.to_socket_addrs() {
            Ok(addrs) => addrs.collect(),
            Err(e) => {
                debug!(address = %self.address, error = %e, "Probe address did not resolve");
                Vec::new()
            }
        }
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_ADDRESS, DEFAULT_PROBE_TIMEOUT)
    }
}

impl Connectivity for TcpProbe {
    fn is_available(&self) -> bool {
        self.resolve()
            .iter()
            .any(|addr| TcpStream::connect_timeout(addr, self.timeout).is_ok())
    }
}
