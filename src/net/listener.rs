//! Port sequencer: bind a listener, tolerating busy ports.
//!
//! # Responsibilities
//! - Bind to the configured host/port
//! - Fall back to a plain bind when the reuse option is unsupported
//! - Walk to the next port when the address is already in use
//! - Give up after the configured attempt budget
//!
//! The two recovery paths compose in a fixed order: the reuse-option
//! fallback retries the *same* port exactly once, while an in-use address
//! consumes an attempt and moves to the next port. A fallback that
//! succeeds must therefore return the current port, never current + 1.

use std::io;
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;
use tokio::net::{TcpListener, TcpSocket};

use crate::config::ListenerConfig;

/// Error type for listener startup.
#[derive(Debug, Error)]
pub enum BindError {
    /// Every port in the attempted range was already taken.
    #[error("no free port in range {first}-{last} after {attempts} attempts")]
    Exhausted { first: u16, last: u16, attempts: u32 },

    /// A bind failed for a reason the sequencer does not recover from.
    #[error("failed to bind: {0}")]
    Io(#[from] io::Error),

    /// The configured host is not a parseable IP address.
    #[error("invalid listen host: {0}")]
    Host(std::net::AddrParseError),
}

/// A single bind attempt against one address.
///
/// The sequencer only ever observes `io::ErrorKind`, so scripted
/// implementations can exercise every recovery path in tests.
pub trait Bind {
    fn bind(&mut self, addr: SocketAddr, reuse_port: bool) -> io::Result<TcpListener>;
}

/// Production binder backed by `tokio::net::TcpSocket`.
pub struct TcpBinder {
    backlog: u32,
}

impl Default for TcpBinder {
    fn default() -> Self {
        Self { backlog: 1024 }
    }
}

impl Bind for TcpBinder {
    fn bind(&mut self, addr: SocketAddr, reuse_port: bool) -> io::Result<TcpListener> {
        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()?
        } else {
            TcpSocket::new_v6()?
        };
        if reuse_port {
            set_reuse_port(&socket)?;
        }
        socket.bind(addr)?;
        socket.listen(self.backlog)
    }
}

#[cfg(all(unix, not(target_os = "solaris"), not(target_os = "illumos")))]
fn set_reuse_port(socket: &TcpSocket) -> io::Result<()> {
    socket.set_reuseport(true)
}

/// Platforms without SO_REUSEPORT report the same condition a kernel
/// rejection would, so the sequencer's fallback covers both.
#[cfg(not(all(unix, not(target_os = "solaris"), not(target_os = "illumos"))))]
fn set_reuse_port(_socket: &TcpSocket) -> io::Result<()> {
    Err(io::Error::from(io::ErrorKind::Unsupported))
}

/// A successfully bound listener plus how it was obtained.
#[derive(Debug)]
pub struct BoundListener {
    listener: TcpListener,
    port: u16,
    attempts: u32,
}

impl BoundListener {
    /// The port that actually stuck, which may differ from the requested one.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Number of ports tried, including the successful one.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn into_listener(self) -> TcpListener {
        self.listener
    }
}

/// Walks ports upward from the configured one until a bind sticks.
#[derive(Debug)]
pub struct PortSequencer {
    host: IpAddr,
    initial_port: u16,
    max_attempts: u32,
    reuse_port: bool,
}

impl PortSequencer {
    pub fn from_config(config: &ListenerConfig) -> Result<Self, BindError> {
        let host = config.host.parse().map_err(BindError::Host)?;
        Ok(Self {
            host,
            initial_port: config.port,
            max_attempts: config.max_bind_attempts,
            reuse_port: config.reuse_port,
        })
    }

    /// Acquire a listener.
    ///
    /// Attempt order per port: bind with the reuse option; if the platform
    /// reports the option unsupported, bind the same port without it. An
    /// in-use address advances to the next port until the attempt budget
    /// runs out. Any other failure propagates immediately.
    pub fn bind<B: Bind>(&self, binder: &mut B) -> Result<BoundListener, BindError> {
        let mut port = self.initial_port;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            let addr = SocketAddr::new(self.host, port);

            let outcome = if self.reuse_port {
                match binder.bind(addr, true) {
                    Err(err) if err.kind() == io::ErrorKind::Unsupported => {
                        tracing::warn!(
                            port,
                            "reuse option unsupported on this platform, retrying without it"
                        );
                        binder.bind(addr, false)
                    }
                    other => other,
                }
            } else {
                binder.bind(addr, false)
            };

            match outcome {
                Ok(listener) => {
                    tracing::info!(port, attempt, "listener bound");
                    return Ok(BoundListener {
                        listener,
                        port,
                        attempts: attempt,
                    });
                }
                Err(err) if err.kind() == io::ErrorKind::AddrInUse => {
                    if attempt >= self.max_attempts {
                        tracing::error!(
                            first = self.initial_port,
                            last = port,
                            attempts = attempt,
                            "bind attempts exhausted"
                        );
                        return Err(BindError::Exhausted {
                            first: self.initial_port,
                            last: port,
                            attempts: attempt,
                        });
                    }
                    // Port space can end before the attempt budget does.
                    let next = match port.checked_add(1) {
                        Some(next) => next,
                        None => {
                            return Err(BindError::Exhausted {
                                first: self.initial_port,
                                last: port,
                                attempts: attempt,
                            })
                        }
                    };
                    tracing::info!(port, next, attempt, "port already in use");
                    port = next;
                }
                Err(err) => return Err(BindError::Io(err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Scripted behavior for one port.
    enum Outcome {
        Free,
        InUse,
        /// Reuse bind reports unsupported; plain bind succeeds.
        ReuseUnsupported,
        /// Reuse bind reports unsupported; plain bind finds the port taken.
        ReuseUnsupportedThenInUse,
        Denied,
    }

    struct ScriptedBinder {
        outcomes: HashMap<u16, Outcome>,
        calls: Vec<(u16, bool)>,
    }

    impl ScriptedBinder {
        fn new(outcomes: Vec<(u16, Outcome)>) -> Self {
            Self {
                outcomes: outcomes.into_iter().collect(),
                calls: Vec::new(),
            }
        }
    }

    impl Bind for ScriptedBinder {
        fn bind(&mut self, addr: SocketAddr, reuse_port: bool) -> io::Result<TcpListener> {
            self.calls.push((addr.port(), reuse_port));
            match self.outcomes.get(&addr.port()).unwrap_or(&Outcome::Free) {
                Outcome::Free => ephemeral_listener(),
                Outcome::InUse => Err(io::Error::from(io::ErrorKind::AddrInUse)),
                Outcome::ReuseUnsupported => {
                    if reuse_port {
                        Err(io::Error::from(io::ErrorKind::Unsupported))
                    } else {
                        ephemeral_listener()
                    }
                }
                Outcome::ReuseUnsupportedThenInUse => {
                    if reuse_port {
                        Err(io::Error::from(io::ErrorKind::Unsupported))
                    } else {
                        Err(io::Error::from(io::ErrorKind::AddrInUse))
                    }
                }
                Outcome::Denied => Err(io::Error::from(io::ErrorKind::PermissionDenied)),
            }
        }
    }

    fn ephemeral_listener() -> io::Result<TcpListener> {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        std_listener.set_nonblocking(true)?;
        TcpListener::from_std(std_listener)
    }

    fn sequencer(initial_port: u16, max_attempts: u32) -> PortSequencer {
        PortSequencer {
            host: "127.0.0.1".parse().unwrap(),
            initial_port,
            max_attempts,
            reuse_port: true,
        }
    }

    #[tokio::test]
    async fn binds_first_free_port_in_one_attempt() {
        let mut binder = ScriptedBinder::new(vec![(5000, Outcome::Free)]);
        let bound = sequencer(5000, 10).bind(&mut binder).unwrap();
        assert_eq!(bound.port(), 5000);
        assert_eq!(bound.attempts(), 1);
        assert_eq!(binder.calls, vec![(5000, true)]);
    }

    #[tokio::test]
    async fn skips_occupied_port() {
        let mut binder = ScriptedBinder::new(vec![(5000, Outcome::InUse), (5001, Outcome::Free)]);
        let bound = sequencer(5000, 10).bind(&mut binder).unwrap();
        assert_eq!(bound.port(), 5001);
        assert_eq!(bound.attempts(), 2);
    }

    #[tokio::test]
    async fn walks_past_three_occupied_ports() {
        let mut binder = ScriptedBinder::new(vec![
            (5000, Outcome::InUse),
            (5001, Outcome::InUse),
            (5002, Outcome::InUse),
            (5003, Outcome::Free),
        ]);
        let bound = sequencer(5000, 10).bind(&mut binder).unwrap();
        assert_eq!(bound.port(), 5003);
        assert_eq!(bound.attempts(), 4);
    }

    #[tokio::test]
    async fn exhausts_after_ten_occupied_ports() {
        let outcomes = (5000..5010).map(|p| (p, Outcome::InUse)).collect();
        let mut binder = ScriptedBinder::new(outcomes);
        let err = sequencer(5000, 10).bind(&mut binder).unwrap_err();
        match err {
            BindError::Exhausted {
                first,
                last,
                attempts,
            } => {
                assert_eq!(first, 5000);
                assert_eq!(last, 5009);
                assert_eq!(attempts, 10);
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }
        assert_eq!(binder.calls.len(), 10);
    }

    #[tokio::test]
    async fn reuse_fallback_stays_on_same_port() {
        let mut binder = ScriptedBinder::new(vec![(5000, Outcome::ReuseUnsupported)]);
        let bound = sequencer(5000, 10).bind(&mut binder).unwrap();
        // The fallback must not consume a port increment.
        assert_eq!(bound.port(), 5000);
        assert_eq!(bound.attempts(), 1);
        assert_eq!(binder.calls, vec![(5000, true), (5000, false)]);
    }

    #[tokio::test]
    async fn fallback_hitting_occupied_port_advances() {
        let mut binder = ScriptedBinder::new(vec![
            (5000, Outcome::ReuseUnsupportedThenInUse),
            (5001, Outcome::Free),
        ]);
        let bound = sequencer(5000, 10).bind(&mut binder).unwrap();
        assert_eq!(bound.port(), 5001);
        assert_eq!(bound.attempts(), 2);
    }

    #[tokio::test]
    async fn unexpected_error_propagates_without_retry() {
        let mut binder = ScriptedBinder::new(vec![(5000, Outcome::Denied)]);
        let err = sequencer(5000, 10).bind(&mut binder).unwrap_err();
        match err {
            BindError::Io(io_err) => assert_eq!(io_err.kind(), io::ErrorKind::PermissionDenied),
            other => panic!("expected Io, got {other:?}"),
        }
        assert_eq!(binder.calls.len(), 1);
    }

    #[tokio::test]
    async fn disabled_reuse_option_binds_plainly() {
        let mut binder = ScriptedBinder::new(vec![(5000, Outcome::Free)]);
        let seq = PortSequencer {
            reuse_port: false,
            ..sequencer(5000, 10)
        };
        let bound = seq.bind(&mut binder).unwrap();
        assert_eq!(bound.port(), 5000);
        assert_eq!(binder.calls, vec![(5000, false)]);
    }

    #[tokio::test]
    async fn exhaustion_at_end_of_port_space() {
        let mut binder = ScriptedBinder::new(vec![(u16::MAX, Outcome::InUse)]);
        let err = sequencer(u16::MAX, 10).bind(&mut binder).unwrap_err();
        match err {
            BindError::Exhausted {
                first,
                last,
                attempts,
            } => {
                assert_eq!(first, u16::MAX);
                assert_eq!(last, u16::MAX);
                assert_eq!(attempts, 1);
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }
    }
}
