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

//! Hex helpers and the mapping between [`RegistrarCall`]s / chain events and
//! the dynamic scale values spoken by the client library.
//!
//! Calls are built dynamically against the connected chain's metadata, so
//! the crate carries no generated runtime bindings.

use subxt::{
	dynamic,
	error::DispatchError,
	events::EventDetails,
	ext::scale_value::{Composite, Primitive, Value, ValueDef},
	tx::DynamicPayload,
	utils::{AccountId32, H256},
	PolkadotConfig,
};

use crate::{
	chain_spec::ContainerChainGenesisData,
	error::Error,
	session::{ChainEvent, RegistrarCall},
};

/// Pallet carrying `reserve` and the raw `register` call.
const RELAY_REGISTRAR: &str = "Registrar";

/// `0x`-prefixed hex encoding of a string's UTF-8 bytes.
pub fn string_to_hex(input: &str) -> String {
	format!("0x{}", hex::encode(input))
}

/// Decode a hex string, tolerating surrounding whitespace and an optional
/// `0x` prefix.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, hex::FromHexError> {
	hex::decode(input.trim().trim_start_matches("0x"))
}

/// Parse a user-supplied block hash.
pub fn parse_block_hash(input: &str) -> Result<H256, Error> {
	let bytes =
		decode_hex(input).map_err(|error| Error::InvalidArgument(format!("invalid block hash {input}: {error}")))?;
	if bytes.len() != 32 {
		return Err(Error::InvalidArgument(format!(
			"invalid block hash {input}: expected 32 bytes, got {}",
			bytes.len()
		)));
	}
	Ok(H256::from_slice(&bytes))
}

/// Build the dynamic transaction payload for a registrar call.
pub(crate) fn registrar_call_payload(call: &RegistrarCall) -> Result<DynamicPayload, Error> {
	let payload = match call {
		RegistrarCall::Reserve => dynamic::tx(RELAY_REGISTRAR, "reserve", Vec::<Value>::new()),
		RegistrarCall::Register {
			para_id,
			genesis_head,
			validation_code,
		} => dynamic::tx(
			RELAY_REGISTRAR,
			"register",
			vec![
				Value::u128(u128::from(*para_id)),
				Value::from_bytes(genesis_head.clone()),
				Value::from_bytes(validation_code.clone()),
			],
		),
		RegistrarCall::RegisterContainer {
			pallet,
			para_id,
			genesis_data,
			head_data,
		} => dynamic::tx(
			*pallet,
			"register",
			vec![
				Value::u128(u128::from(*para_id)),
				genesis_data_value(genesis_data)?,
				option_bytes(head_data.as_deref()),
			],
		),
	};
	Ok(payload)
}

/// Encode genesis data as the runtime's `ContainerChainGenesisData` value.
/// Field names follow the runtime type, not the JSON document.
fn genesis_data_value(data: &ContainerChainGenesisData) -> Result<Value, Error> {
	let storage = data
		.storage
		.iter()
		.map(|item| {
			Ok(Value::named_composite([
				("key", Value::from_bytes(spec_hex("storage key", &item.key)?)),
				("value", Value::from_bytes(spec_hex("storage value", &item.value)?)),
			]))
		})
		.collect::<Result<Vec<_>, Error>>()?;

	let fork_id = match &data.fork_id {
		Some(fork_id) => some_bytes(spec_hex("forkId", fork_id)?),
		None => none_value(),
	};

	Ok(Value::named_composite([
		("storage", Value::unnamed_composite(storage)),
		("name", Value::from_bytes(spec_hex("name", &data.name)?)),
		("id", Value::from_bytes(spec_hex("id", &data.id)?)),
		("fork_id", fork_id),
		("extensions", Value::from_bytes(spec_hex("extensions", &data.extensions)?)),
		(
			"properties",
			Value::named_composite([
				(
					"token_metadata",
					Value::named_composite([
						(
							"token_symbol",
							Value::from_bytes(spec_hex(
								"tokenSymbol",
								&data.properties.token_metadata.token_symbol,
							)?),
						),
						(
							"ss58_format",
							Value::u128(u128::from(data.properties.token_metadata.ss58_format)),
						),
						(
							"token_decimals",
							Value::u128(u128::from(data.properties.token_metadata.token_decimals)),
						),
					]),
				),
				("is_ethereum", Value::bool(data.properties.is_ethereum)),
			]),
		),
	]))
}

fn spec_hex(field: &str, input: &str) -> Result<Vec<u8>, Error> {
	decode_hex(input).map_err(|error| Error::MalformedSpec(format!("{field} is not valid hex: {error}")))
}

fn option_bytes(bytes: Option<&[u8]>) -> Value {
	match bytes {
		Some(bytes) => some_bytes(bytes.to_vec()),
		None => none_value(),
	}
}

fn some_bytes(bytes: Vec<u8>) -> Value {
	Value::variant("Some", Composite::Unnamed(vec![Value::from_bytes(bytes)]))
}

fn none_value() -> Value {
	Value::variant("None", Composite::Unnamed(Vec::new()))
}

/// Decode one event into its pallet/variant names and display-rendered data
/// fields, in emission order.
pub(crate) fn decode_event(details: &EventDetails<PolkadotConfig>) -> ChainEvent {
	let fields = details
		.field_values()
		.map(|composite| match composite {
			Composite::Named(values) => values.iter().map(|(_, value)| render_field(value)).collect(),
			Composite::Unnamed(values) => values.iter().map(render_field).collect(),
		})
		.unwrap_or_default();

	ChainEvent {
		pallet: details.pallet_name().to_string(),
		variant: details.variant_name().to_string(),
		fields,
	}
}

/// Render a decoded field the way operators read it: numbers in decimal,
/// 32-byte account values as SS58 addresses, newtype wrappers such as
/// `ParaId(u32)` as their inner value, anything else in the value syntax of
/// the decoder.
pub(crate) fn render_field<T>(value: &Value<T>) -> String {
	match &value.value {
		ValueDef::Primitive(Primitive::U128(number)) => number.to_string(),
		ValueDef::Primitive(Primitive::I128(number)) => number.to_string(),
		ValueDef::Primitive(Primitive::Bool(boolean)) => boolean.to_string(),
		ValueDef::Primitive(Primitive::String(string)) => string.clone(),
		ValueDef::Composite(composite) => {
			if let Some(bytes) = account_bytes(value) {
				return AccountId32(bytes).to_string();
			}
			let inner = composite.values().collect::<Vec<_>>();
			match inner.as_slice() {
				[single] => render_field(single),
				_ => value.to_string(),
			}
		}
		_ => value.to_string(),
	}
}

/// A composite that flattens to exactly 32 bytes is rendered as an account.
fn account_bytes<T>(value: &Value<T>) -> Option<[u8; 32]> {
	fn collect<T>(value: &Value<T>, bytes: &mut Vec<u8>) -> bool {
		match &value.value {
			ValueDef::Composite(composite) => composite.values().all(|inner| collect(inner, bytes)),
			ValueDef::Primitive(Primitive::U128(byte)) if *byte <= u128::from(u8::MAX) => {
				bytes.push(*byte as u8);
				true
			}
			_ => false,
		}
	}

	if !matches!(&value.value, ValueDef::Composite(_)) {
		return None;
	}
	let mut bytes = Vec::with_capacity(32);
	if collect(value, &mut bytes) && bytes.len() == 32 {
		bytes.try_into().ok()
	} else {
		None
	}
}

/// Map a client error raised by a submission into the dispatch taxonomy:
/// module errors decode to `{pallet, error, docs}`, other runtime rejections
/// stay generic, everything else passes through.
pub(crate) fn dispatch_error(error: subxt::Error) -> Error {
	match error {
		subxt::Error::Runtime(DispatchError::Module(module_error)) => match module_error.details() {
			Ok(details) => Error::Dispatch {
				pallet: details.pallet.name().to_string(),
				error: details.variant.name.to_string(),
				docs: details.variant.docs.join(" ").trim().to_string(),
			},
			Err(_) => Error::DispatchOther(format!("{module_error:?}")),
		},
		subxt::Error::Runtime(other) => Error::DispatchOther(other.to_string()),
		other => Error::Client(other),
	}
}

/// Extract a list of para ids from a dynamically decoded storage value.
pub(crate) fn para_ids<T>(value: &Value<T>) -> Vec<u32> {
	match &value.value {
		ValueDef::Composite(composite) => composite.values().filter_map(para_id).collect(),
		_ => Vec::new(),
	}
}

fn para_id<T>(value: &Value<T>) -> Option<u32> {
	match &value.value {
		ValueDef::Primitive(Primitive::U128(id)) => u32::try_from(*id).ok(),
		// Newtype wrappers such as `ParaId(u32)`.
		ValueDef::Composite(composite) => {
			let inner = composite.values().collect::<Vec<_>>();
			match inner.as_slice() {
				[single] => para_id(single),
				_ => None,
			}
		}
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::chain_spec::container_chain_genesis_data;

	#[test]
	fn string_to_hex_encodes_utf8_bytes() {
		assert_eq!(string_to_hex("test"), "0x74657374");
		assert_eq!(string_to_hex(""), "0x");
	}

	#[test]
	fn decode_hex_tolerates_prefix_and_whitespace() {
		assert_eq!(decode_hex("0xaa").unwrap(), vec![0xaa]);
		assert_eq!(decode_hex("AA").unwrap(), vec![0xaa]);
		assert_eq!(decode_hex(" 0x0102 \n").unwrap(), vec![1, 2]);
		assert!(decode_hex("0xzz").is_err());
	}

	#[test]
	fn block_hashes_must_be_32_bytes() {
		let hash = parse_block_hash("0x4839f56e4fbbe7ebe99aadc10455261078730534f088d2e88cd164c15ae7ffc7").unwrap();
		assert_eq!(hash.0[0], 0x48);
		assert!(matches!(parse_block_hash("0x4839"), Err(Error::InvalidArgument(_))));
		assert!(matches!(parse_block_hash("not-hex"), Err(Error::InvalidArgument(_))));
	}

	#[test]
	fn primitive_fields_render_in_decimal() {
		assert_eq!(render_field(&Value::u128(7)), "7");
		assert_eq!(render_field(&Value::bool(true)), "true");
		assert_eq!(render_field(&Value::string("dancelight")), "dancelight");
	}

	#[test]
	fn account_composites_render_as_ss58() {
		let account = Value::unnamed_composite((0..32).map(|_| Value::u128(1)));
		assert_eq!(render_field(&account), AccountId32([1u8; 32]).to_string());
	}

	#[test]
	fn newtype_fields_render_as_their_inner_value() {
		// `Reserved` carries `ParaId(u32)`, which decodes to a one-element
		// composite; it must still render as a parseable decimal.
		let para_id = Value::unnamed_composite(vec![Value::u128(7)]);
		assert_eq!(render_field(&para_id), "7");
		assert_eq!(render_field(&para_id).parse::<u32>().unwrap(), 7);

		let wrapped_account =
			Value::unnamed_composite(vec![Value::unnamed_composite((0..32).map(|_| Value::u128(1)))]);
		assert_eq!(render_field(&wrapped_account), AccountId32([1u8; 32]).to_string());
	}

	#[test]
	fn short_composites_are_not_accounts() {
		let value = Value::unnamed_composite(vec![Value::u128(1), Value::u128(2)]);
		assert_ne!(render_field(&value), AccountId32([0u8; 32]).to_string());
		assert!(account_bytes(&value).is_none());
	}

	#[test]
	fn para_ids_unwrap_newtype_entries() {
		let storage = Value::unnamed_composite(vec![
			Value::u128(2000),
			Value::unnamed_composite(vec![Value::u128(2001)]),
		]);
		assert_eq!(para_ids(&storage), vec![2000, 2001]);
	}

	#[test]
	fn genesis_data_with_invalid_storage_hex_is_rejected() {
		let spec = json!({
			"name": "test",
			"id": "test-id",
			"genesis": { "raw": { "top": { "0xzz": "0xAA" } } },
			"properties": { "tokenSymbol": "TEST", "ss58Format": 42, "tokenDecimals": 18 }
		});
		let data = container_chain_genesis_data(&spec).unwrap();
		assert!(matches!(genesis_data_value(&data), Err(Error::MalformedSpec(_))));
	}

	#[test]
	fn well_formed_genesis_data_encodes() {
		let spec = json!({
			"name": "test",
			"id": "test-id",
			"forkId": "fork",
			"genesis": { "raw": { "top": { "0x01": "0xAA" } } },
			"properties": { "tokenSymbol": "TEST", "ss58Format": 42, "tokenDecimals": 18 }
		});
		let data = container_chain_genesis_data(&spec).unwrap();
		assert!(genesis_data_value(&data).is_ok());
		assert!(registrar_call_payload(&RegistrarCall::RegisterContainer {
			pallet: "ContainerRegistrar",
			para_id: 2000,
			genesis_data: data,
			head_data: None,
		})
		.is_ok());
	}

	#[test]
	fn non_runtime_errors_pass_through_the_dispatch_mapping() {
		let error = dispatch_error(subxt::Error::Other("socket closed".to_string()));
		assert!(matches!(error, Error::Client(_)));
	}
}
