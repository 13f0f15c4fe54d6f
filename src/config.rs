use core::fmt;

pub const ROWS: usize = 10;
pub const COLS: usize = 10;

/// Ship lengths used when a random layout is requested.
pub const STANDARD_FLEET: [usize; 6] = [2, 2, 2, 3, 3, 4];

/// Fixed layout served when no seed is given: three 2-long, two 3-long and
/// one 4-long ship, as (row, col) pairs.
pub const STANDARD_LAYOUT: [&[(usize, usize)]; 6] = [
    &[(0, 1), (0, 2)],
    &[(2, 5), (3, 5)],
    &[(6, 8), (7, 8)],
    &[(4, 0), (5, 0), (6, 0)],
    &[(9, 3), (9, 4), (9, 5)],
    &[(1, 7), (2, 7), (3, 7), (4, 7)],
];

/// Which side decides the outcome of a shot. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverMode {
    /// The server knows the ship layout and decides hit/miss/sunk.
    ServerAuthoritative,
    /// The caller asserts the outcome; the server records it.
    ClientAuthoritative,
}

impl fmt::Display for ResolverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverMode::ServerAuthoritative => write!(f, "server-authoritative"),
            ResolverMode::ClientAuthoritative => write!(f, "client-authoritative"),
        }
    }
}

#[cfg(feature = "std")]
pub use server_config::{ServerConfig, DEFAULT_PORT};

#[cfg(feature = "std")]
mod server_config {
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};

    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::{ResolverMode, STANDARD_FLEET};
    use crate::common::LayoutError;
    use crate::resolver::{ClientAuthoritative, ServerAuthoritative};
    use crate::session::GameSession;
    use crate::ship::ShipLayout;

    pub const DEFAULT_PORT: u16 = 3000;

    /// Runtime settings for the HTTP server.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ServerConfig {
        pub bind: IpAddr,
        pub port: u16,
        pub mode: ResolverMode,
        /// Seed for a random ship layout; `None` serves the standard layout.
        pub layout_seed: Option<u64>,
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                port: DEFAULT_PORT,
                mode: ResolverMode::ServerAuthoritative,
                layout_seed: None,
            }
        }
    }

    impl ServerConfig {
        pub fn addr(&self) -> SocketAddr {
            SocketAddr::new(self.bind, self.port)
        }

        /// Ship layout selected by this configuration.
        pub fn layout(&self) -> Result<ShipLayout, LayoutError> {
            match self.layout_seed {
                Some(seed) => {
                    let mut rng = SmallRng::seed_from_u64(seed);
                    ShipLayout::random(&mut rng, &STANDARD_FLEET)
                }
                None => ShipLayout::standard(),
            }
        }

        /// Build the game session for the configured mode.
        pub fn session(&self) -> Result<GameSession, LayoutError> {
            match self.mode {
                ResolverMode::ServerAuthoritative => Ok(GameSession::new(Box::new(
                    ServerAuthoritative::new(self.layout()?),
                ))),
                ResolverMode::ClientAuthoritative => {
                    if self.layout_seed.is_some() {
                        log::warn!("layout seed ignored in {} mode", self.mode);
                    }
                    Ok(GameSession::new(Box::new(ClientAuthoritative)))
                }
            }
        }
    }
}
