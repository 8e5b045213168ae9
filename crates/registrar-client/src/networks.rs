// KILT Blockchain – https://botlabs.org
// Copyright (C) 2019-2024 BOTLabs GmbH

// The KILT Blockchain is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The KILT Blockchain is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

// If you feel like getting in touch with us, you can do so at info@botlabs.org

//! Static network presets and their routing rules.

use crate::error::Error;

/// Environment variable selecting the active network.
pub const NETWORK_ENV: &str = "NETWORK";

/// Network used when [`NETWORK_ENV`] is unset.
pub const DEFAULT_NETWORK: &str = "dancelight";

/// A named network endpoint configuration.
///
/// The routing fields encode business rules that cannot be discovered from
/// chain metadata: which of the two sessions takes registrar submissions and
/// which pallet carries chain-spec registrations on this network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
	pub name: &'static str,
	pub primary_endpoint: &'static str,
	pub secondary_endpoint: Option<&'static str>,
	/// Submit reservation and raw registration calls on the secondary
	/// session when one is open.
	pub submit_on_secondary: bool,
	/// Pallet carrying `register` for chain-spec registrations, submitted on
	/// the primary session.
	pub spec_register_pallet: &'static str,
}

pub const NETWORKS: &[NetworkConfig] = &[
	NetworkConfig {
		name: "flashbox",
		primary_endpoint: "wss://fraa-flashbox-rpc.a.stagenet.tanssi.network",
		secondary_endpoint: Some("wss://fraa-flashbox-relay-rpc.a.stagenet.tanssi.network"),
		submit_on_secondary: true,
		spec_register_pallet: "Registrar",
	},
	NetworkConfig {
		name: "dancelight",
		primary_endpoint: "wss://services.tanssi-testnet.network/dancelight",
		secondary_endpoint: None,
		submit_on_secondary: false,
		spec_register_pallet: "ContainerRegistrar",
	},
	NetworkConfig {
		name: "mainnet",
		primary_endpoint: "wss://services.tanssi-mainnet.network/tanssi",
		secondary_endpoint: None,
		submit_on_secondary: false,
		spec_register_pallet: "ContainerRegistrar",
	},
];

/// Look up a network by name, case-insensitively.
pub fn resolve(name: &str) -> Result<&'static NetworkConfig, Error> {
	NETWORKS
		.iter()
		.find(|network| network.name.eq_ignore_ascii_case(name))
		.ok_or_else(|| Error::UnknownNetwork {
			name: name.to_string(),
			available: NETWORKS.iter().map(|network| network.name).collect::<Vec<_>>().join(", "),
		})
}

/// The network selected by the environment, falling back to
/// [`DEFAULT_NETWORK`].
pub fn active() -> Result<&'static NetworkConfig, Error> {
	let name = std::env::var(NETWORK_ENV).unwrap_or_else(|_| DEFAULT_NETWORK.to_string());
	resolve(&name)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolution_is_case_insensitive() {
		assert_eq!(resolve("MAINNET").unwrap(), resolve("mainnet").unwrap());
		assert_eq!(resolve("Flashbox").unwrap().name, "flashbox");
	}

	#[test]
	fn unknown_network_lists_all_configured_names() {
		let error = resolve("rococo").unwrap_err();
		let message = error.to_string();
		for network in NETWORKS {
			assert!(message.contains(network.name), "missing {} in: {message}", network.name);
		}
	}

	#[test]
	fn default_network_is_configured() {
		let network = resolve(DEFAULT_NETWORK).unwrap();
		assert_eq!(network.name, "dancelight");
		assert!(network.secondary_endpoint.is_none());
	}

	#[test]
	fn only_flashbox_routes_to_the_secondary_session() {
		for network in NETWORKS {
			assert_eq!(network.submit_on_secondary, network.secondary_endpoint.is_some());
		}
	}
}
