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

//! Conversion from a raw chain specification to the on-chain
//! `ContainerChainGenesisData` shape expected by the registrar pallet.
//!
//! The transform is pure: no network access, no side effects. Storage
//! entries are passed through byte-identical and in document order; only the
//! human-readable string fields are hex-encoded.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{codec::string_to_hex, error::Error};

/// Genesis data payload of a container-chain registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerChainGenesisData {
	pub storage: Vec<StorageItem>,
	/// Hex-encoded UTF-8 chain name.
	pub name: String,
	/// Hex-encoded UTF-8 chain id.
	pub id: String,
	/// Hex-encoded UTF-8 fork id; `None` when the spec declares none. An
	/// empty string in the spec encodes to `Some("0x")`, which is distinct.
	pub fork_id: Option<String>,
	/// Always the empty-payload marker.
	pub extensions: String,
	pub properties: GenesisProperties,
}

/// A single `key -> value` storage entry, both sides hex-encoded exactly as
/// they appear in the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageItem {
	pub key: String,
	pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenesisProperties {
	pub token_metadata: TokenMetadata,
	pub is_ethereum: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
	/// Hex-encoded UTF-8 token symbol.
	pub token_symbol: String,
	pub ss58_format: u32,
	pub token_decimals: u32,
}

/// The subset of a chain-spec document the transform reads.
#[derive(Debug, Deserialize)]
struct RawChainSpec {
	name: String,
	id: String,
	#[serde(rename = "forkId", default)]
	fork_id: Option<String>,
	genesis: Genesis,
	properties: SpecProperties,
}

#[derive(Debug, Deserialize)]
struct Genesis {
	raw: RawGenesis,
}

#[derive(Debug, Deserialize)]
struct RawGenesis {
	top: serde_json::Map<String, JsonValue>,
}

#[derive(Debug, Deserialize)]
struct SpecProperties {
	#[serde(rename = "tokenSymbol")]
	token_symbol: String,
	#[serde(rename = "ss58Format")]
	ss58_format: u32,
	#[serde(rename = "tokenDecimals")]
	token_decimals: u32,
	#[serde(rename = "isEthereum", default)]
	is_ethereum: bool,
}

/// Convert a parsed chain-spec document into registrar genesis data.
pub fn container_chain_genesis_data(chain_spec: &JsonValue) -> Result<ContainerChainGenesisData, Error> {
	let spec = RawChainSpec::deserialize(chain_spec).map_err(|error| Error::MalformedSpec(error.to_string()))?;

	let storage = spec
		.genesis
		.raw
		.top
		.iter()
		.map(|(key, value)| {
			let value = value
				.as_str()
				.ok_or_else(|| Error::MalformedSpec(format!("genesis.raw.top[\"{key}\"] is not a hex string")))?;
			Ok(StorageItem {
				key: key.clone(),
				value: value.to_string(),
			})
		})
		.collect::<Result<Vec<_>, Error>>()?;

	Ok(ContainerChainGenesisData {
		storage,
		name: string_to_hex(&spec.name),
		id: string_to_hex(&spec.id),
		fork_id: spec.fork_id.as_deref().map(string_to_hex),
		extensions: "0x".to_string(),
		properties: GenesisProperties {
			token_metadata: TokenMetadata {
				token_symbol: string_to_hex(&spec.properties.token_symbol),
				ss58_format: spec.properties.ss58_format,
				token_decimals: spec.properties.token_decimals,
			},
			is_ethereum: spec.properties.is_ethereum,
		},
	})
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn minimal_spec() -> JsonValue {
		json!({
			"name": "test",
			"id": "test-id",
			"genesis": { "raw": { "top": { "0x01": "0xAA" } } },
			"properties": { "tokenSymbol": "TEST", "ss58Format": 42, "tokenDecimals": 18 }
		})
	}

	#[test]
	fn transforms_the_minimal_document() {
		let data = container_chain_genesis_data(&minimal_spec()).unwrap();

		assert_eq!(
			data,
			ContainerChainGenesisData {
				storage: vec![StorageItem {
					key: "0x01".to_string(),
					value: "0xAA".to_string(),
				}],
				name: "0x74657374".to_string(),
				id: "0x746573742d6964".to_string(),
				fork_id: None,
				extensions: "0x".to_string(),
				properties: GenesisProperties {
					token_metadata: TokenMetadata {
						token_symbol: "0x54455354".to_string(),
						ss58_format: 42,
						token_decimals: 18,
					},
					is_ethereum: false,
				},
			}
		);
	}

	#[test]
	fn name_and_id_round_trip_through_hex() {
		let data = container_chain_genesis_data(&minimal_spec()).unwrap();

		let name = hex::decode(data.name.trim_start_matches("0x")).unwrap();
		let id = hex::decode(data.id.trim_start_matches("0x")).unwrap();
		assert_eq!(String::from_utf8(name).unwrap(), "test");
		assert_eq!(String::from_utf8(id).unwrap(), "test-id");
	}

	#[test]
	fn storage_preserves_document_order_and_values() {
		let mut spec = minimal_spec();
		spec["genesis"]["raw"]["top"] = json!({
			"0x0f": "0x01",
			"0x01": "0x02",
			"0xaa": "0x03",
		});

		let data = container_chain_genesis_data(&spec).unwrap();
		let keys = data.storage.iter().map(|item| item.key.as_str()).collect::<Vec<_>>();
		let values = data.storage.iter().map(|item| item.value.as_str()).collect::<Vec<_>>();

		assert_eq!(keys, vec!["0x0f", "0x01", "0xaa"]);
		assert_eq!(values, vec!["0x01", "0x02", "0x03"]);
	}

	#[test]
	fn absent_fork_id_is_distinct_from_empty() {
		let absent = container_chain_genesis_data(&minimal_spec()).unwrap();
		assert_eq!(absent.fork_id, None);

		let mut spec = minimal_spec();
		spec["forkId"] = json!("");
		let empty = container_chain_genesis_data(&spec).unwrap();
		assert_eq!(empty.fork_id, Some("0x".to_string()));

		let mut spec = minimal_spec();
		spec["forkId"] = json!("fork");
		let named = container_chain_genesis_data(&spec).unwrap();
		assert_eq!(named.fork_id, Some("0x666f726b".to_string()));
	}

	#[test]
	fn is_ethereum_mirrors_the_input_and_defaults_to_false() {
		assert!(!container_chain_genesis_data(&minimal_spec()).unwrap().properties.is_ethereum);

		let mut spec = minimal_spec();
		spec["properties"]["isEthereum"] = json!(true);
		assert!(container_chain_genesis_data(&spec).unwrap().properties.is_ethereum);
	}

	#[test]
	fn missing_raw_storage_is_malformed() {
		let spec = json!({
			"name": "test",
			"id": "test-id",
			"genesis": {},
			"properties": { "tokenSymbol": "TEST", "ss58Format": 42, "tokenDecimals": 18 }
		});
		assert!(matches!(
			container_chain_genesis_data(&spec),
			Err(Error::MalformedSpec(_))
		));
	}

	#[test]
	fn non_numeric_properties_are_malformed() {
		let mut spec = minimal_spec();
		spec["properties"]["ss58Format"] = json!("42");
		assert!(matches!(
			container_chain_genesis_data(&spec),
			Err(Error::MalformedSpec(_))
		));

		let mut spec = minimal_spec();
		spec["properties"]["tokenDecimals"] = json!(null);
		assert!(matches!(
			container_chain_genesis_data(&spec),
			Err(Error::MalformedSpec(_))
		));
	}

	#[test]
	fn non_string_storage_value_is_malformed() {
		let mut spec = minimal_spec();
		spec["genesis"]["raw"]["top"]["0x01"] = json!(7);
		assert!(matches!(
			container_chain_genesis_data(&spec),
			Err(Error::MalformedSpec(_))
		));
	}
}
