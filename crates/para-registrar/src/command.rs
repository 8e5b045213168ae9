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

//! Subcommand dispatch.
//!
//! Local inputs (files, hashes, the signing account) are read and validated
//! before any connection is opened. Every open session is released after the
//! workflow future resolves, also when it resolved to an error.

use std::{fs, path::Path};

use registrar_client::{
	account, chain_spec, codec, connect_active,
	session::RegistrarCall,
	workflows::{
		events::{reserved_events_at, BlockEventsOutcome},
		register::{register, RegistrationOutcome},
		reserve::reserve_para_id,
		status::network_status,
	},
	Error,
};

use crate::cli::{Cli, Commands};

pub(crate) async fn run(cli: Cli) -> Result<(), Error> {
	match cli.subcommand {
		Commands::Reserve => reserve().await,
		Commands::Register {
			para_id,
			genesis_data,
			genesis_wasm,
		} => {
			let genesis_head = read_hex_file(&genesis_data)?;
			let validation_code = fs::read(&genesis_wasm)?;
			submit_registration(para_id, genesis_head, validation_code).await
		}
		Commands::RegisterChain {
			para_id,
			genesis_state,
			genesis_wasm,
		} => {
			let genesis_head = fs::read(&genesis_state)?;
			let validation_code = fs::read(&genesis_wasm)?;
			submit_registration(para_id, genesis_head, validation_code).await
		}
		Commands::RegisterSpec { para_id, chain_spec } => register_spec(para_id, &chain_spec).await,
		Commands::Events { block_hash, account } => events(&block_hash, account.as_deref()).await,
		Commands::Status => status().await,
	}
}

async fn reserve() -> Result<(), Error> {
	let signer = account::from_env()?;
	let owner = account::address(&signer);

	let connections = connect_active().await?;
	let result = reserve_para_id(connections.target(), &signer, Some(&owner)).await;
	connections.close().await;

	let outcome = result?;
	println!(
		"Reserved para id {} for {} in block {:?}",
		outcome.para_id, outcome.owner, outcome.block_hash
	);
	Ok(())
}

async fn submit_registration(para_id: u32, genesis_head: Vec<u8>, validation_code: Vec<u8>) -> Result<(), Error> {
	let signer = account::from_env()?;
	let call = RegistrarCall::Register {
		para_id,
		genesis_head,
		validation_code,
	};

	let connections = connect_active().await?;
	let result = register(connections.target(), &signer, call, para_id).await;
	connections.close().await;

	report_registration(&result?);
	Ok(())
}

async fn register_spec(para_id: u32, path: &Path) -> Result<(), Error> {
	let document: serde_json::Value =
		serde_json::from_str(&fs::read_to_string(path)?).map_err(|error| Error::MalformedSpec(error.to_string()))?;
	let genesis_data = chain_spec::container_chain_genesis_data(&document)?;
	let signer = account::from_env()?;

	let connections = connect_active().await?;
	let call = RegistrarCall::RegisterContainer {
		pallet: connections.network.spec_register_pallet,
		para_id,
		genesis_data,
		head_data: None,
	};
	let result = register(connections.primary.as_ref(), &signer, call, para_id).await;
	connections.close().await;

	report_registration(&result?);
	Ok(())
}

async fn events(block_hash: &str, account: Option<&str>) -> Result<(), Error> {
	let block_hash = codec::parse_block_hash(block_hash)?;

	let connections = connect_active().await?;
	let result = reserved_events_at(connections.primary.as_ref(), block_hash, account).await;
	connections.close().await;

	match result? {
		BlockEventsOutcome::BlockNotFound => println!("Block {block_hash:?} not found"),
		BlockEventsOutcome::Found(report) => {
			println!(
				"Block #{} (parent {:?}), {} events in total",
				report.block_number, report.parent_hash, report.total_events
			);
			if report.reserved.is_empty() {
				println!("No matching reservation events");
			}
			for event in &report.reserved {
				print_event(event);
			}
		}
	}
	Ok(())
}

async fn status() -> Result<(), Error> {
	let connections = connect_active().await?;
	let result = network_status(connections.primary.as_ref()).await;
	connections.close().await;

	let status = result?;
	println!("Best block: #{}", status.best_block);
	println!("Registered para ids ({}): {:?}", status.parachains.len(), status.parachains);
	Ok(())
}

fn report_registration(outcome: &RegistrationOutcome) {
	println!("Registered para id {} in block {:?}", outcome.para_id, outcome.block_hash);
	for event in &outcome.events {
		print_event(event);
	}
}

fn print_event(event: &registrar_client::ChainEvent) {
	println!("{}.{}: [{}]", event.pallet, event.variant, event.fields.join(", "));
}

fn read_hex_file(path: &Path) -> Result<Vec<u8>, Error> {
	let text = fs::read_to_string(path)?;
	codec::decode_hex(&text).map_err(|error| Error::InvalidArgument(format!("{}: {error}", path.display())))
}
