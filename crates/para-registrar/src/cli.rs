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

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
	name = "para-registrar",
	version,
	about = "Reserve para ids and register container chains on Tanssi networks"
)]
pub(crate) struct Cli {
	#[command(subcommand)]
	pub subcommand: Commands,
}

/// The network is selected through the `NETWORK` environment variable and
/// submitting commands read the signing account from `ACCOUNT_MNEMONIC`.
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
	/// Reserve the next free para id for the signing account.
	Reserve,

	/// Register a parachain from a hex-encoded genesis head file and a raw
	/// runtime wasm blob.
	Register {
		/// The previously reserved para id.
		para_id: u32,
		/// File holding the genesis head as hex text.
		genesis_data: PathBuf,
		/// File holding the raw runtime wasm.
		genesis_wasm: PathBuf,
	},

	/// Register a parachain from raw genesis state and runtime wasm blobs.
	RegisterChain {
		/// The previously reserved para id.
		para_id: u32,
		/// File holding the raw genesis state.
		genesis_state: PathBuf,
		/// File holding the raw runtime wasm.
		genesis_wasm: PathBuf,
	},

	/// Register a container chain from a raw chain specification document.
	RegisterSpec {
		/// The previously reserved para id.
		para_id: u32,
		/// Raw chain spec JSON file.
		chain_spec: PathBuf,
	},

	/// List the reservation events stored in a block.
	Events {
		/// Hash of the block to inspect.
		block_hash: String,
		/// Only report reservations owned by this SS58 address.
		account: Option<String>,
	},

	/// Show the registered para ids and the current best block.
	Status,
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::Cli;

	#[test]
	fn command_definition_is_consistent() {
		Cli::command().debug_assert();
	}
}
