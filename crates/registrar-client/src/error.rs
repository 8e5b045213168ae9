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

//! Error taxonomy shared by all workflows.
//!
//! Every workflow is attempt-once: errors propagate to the caller unchanged,
//! sessions are released by the caller's cleanup step and the process exits
//! non-zero.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// A network name outside the configured table.
	#[error("unknown network: {name}; available networks: {available}")]
	UnknownNetwork { name: String, available: String },

	/// `ACCOUNT_MNEMONIC` is required by every submitting workflow.
	#[error("ACCOUNT_MNEMONIC is not set in the environment")]
	MissingCredential,

	#[error("invalid account mnemonic: {0}")]
	InvalidMnemonic(String),

	/// The chain-spec document cannot be converted to genesis data.
	#[error("malformed chain spec: {0}")]
	MalformedSpec(String),

	/// Bad command-line input detected before any network access.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	#[error("failed to connect to {endpoint}: {source}")]
	Connection {
		endpoint: String,
		#[source]
		source: subxt::Error,
	},

	#[error("{operation} timed out")]
	Timeout { operation: &'static str },

	/// The node stopped reporting transaction status before a terminal state.
	#[error("transaction status stream closed before finalization")]
	StatusStreamClosed,

	/// An on-chain rejection that decoded to a named module error.
	#[error("dispatch error {pallet}.{error}: {docs}")]
	Dispatch {
		pallet: String,
		error: String,
		docs: String,
	},

	/// An on-chain rejection without a module-level decoding.
	#[error("dispatch error: {0}")]
	DispatchOther(String),

	/// The expected confirmation event is missing from the finalized block.
	#[error("no {pallet}.{variant} event found in the finalized block")]
	EventNotFound { pallet: String, variant: String },

	#[error("unexpected payload in {pallet}.{variant} event")]
	UnexpectedEventFields { pallet: String, variant: String },

	#[error("block {0} not found")]
	BlockNotFound(String),

	#[error("session to {0} is already closed")]
	SessionClosed(String),

	#[error(transparent)]
	Client(#[from] subxt::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}
