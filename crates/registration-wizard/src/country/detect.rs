//! Mobile country code detection from device network metadata.

use tracing::debug;

/// Network codes reported by one mobile connection, formatted "MCC-MNC".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkRegistration {
    /// Last known home network
    pub home_network: Option<String>,
    /// Last known network the device attached to
    pub last_network: Option<String>,
}

impl NetworkRegistration {
    pub fn new(home_network: Option<&str>, last_network: Option<&str>) -> Self {
        Self {
            home_network: home_network.map(str::to_string),
            last_network: last_network.map(str::to_string),
        }
    }

    /// Leading mobile country code, preferring the home network.
    pub fn mcc(&self) -> Option<u16> {
        let network = self
            .home_network
            .as_deref()
            .filter(|n| !n.is_empty())
            .or_else(|| self.last_network.as_deref().filter(|n| !n.is_empty()))?;

        let leading = network.split('-').next()?.trim();
        let digits: String = leading.chars().take_while(|c| c.is_ascii_digit()).collect();
        digits.parse().ok()
    }
}

/// Source of the device's mobile connections.
pub trait NetworkSource: Send + Sync {
    fn registrations(&self) -> Vec<NetworkRegistration>;
}

/// Fixed list of connections, e.g. read from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticNetworks(pub Vec<NetworkRegistration>);

impl StaticNetworks {
    /// Parse a comma-separated list of home network codes ("214-07,208-01").
    pub fn parse(list: &str) -> Self {
        Self(
            list.split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(|n| NetworkRegistration::new(Some(n), None))
                .collect(),
        )
    }
}

impl NetworkSource for StaticNetworks {
    fn registrations(&self) -> Vec<NetworkRegistration> {
        self.0.clone()
    }
}

/// Detect the mobile country code. The last connection that reports one wins.
pub fn detect_mcc(registrations: &[NetworkRegistration]) -> Option<u16> {
    let mcc = registrations.iter().filter_map(NetworkRegistration::mcc).last();
    debug!(connections = registrations.len(), ?mcc, "Detected mobile country code");
    mcc
}
