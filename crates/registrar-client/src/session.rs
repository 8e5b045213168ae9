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

//! The narrow collaborator interface the workflows are written against.
//!
//! Everything the external chain-client library does for this crate fits
//! behind [`ChainSession`]: submission with status watching, block event
//! queries, header lookups and teardown. Workflows stay testable against a
//! mock without a live node.

use async_trait::async_trait;
use futures::stream::BoxStream;
use subxt::utils::H256;
use subxt_signer::sr25519::Keypair;

use crate::{chain_spec::ContainerChainGenesisData, error::Error};

/// A registrar call to be signed and submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrarCall {
	/// `Registrar::reserve()` — reserve the next free para id.
	Reserve,
	/// `Registrar::register(id, genesis_head, validation_code)` on a relay
	/// registrar.
	Register {
		para_id: u32,
		genesis_head: Vec<u8>,
		validation_code: Vec<u8>,
	},
	/// `register(para_id, genesis_data, head_data)` on a container-chain
	/// registrar pallet; the pallet name is network configuration.
	RegisterContainer {
		pallet: &'static str,
		para_id: u32,
		genesis_data: ContainerChainGenesisData,
		head_data: Option<Vec<u8>>,
	},
}

/// A decoded chain event with its ordered, display-rendered data fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainEvent {
	pub pallet: String,
	pub variant: String,
	pub fields: Vec<String>,
}

impl ChainEvent {
	/// Match on `(pallet, variant)`. Pallet names are compared
	/// case-insensitively: metadata reports `Registrar` where the historical
	/// tooling wrote `registrar`.
	pub fn is(&self, pallet: &str, variant: &str) -> bool {
		self.pallet.eq_ignore_ascii_case(pallet) && self.variant == variant
	}
}

/// Status notifications for a single submission, reported in monotonically
/// increasing finality order. `Finalized` is terminal; dispatch failures
/// surface as stream errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
	Validated,
	Broadcast,
	/// The containing block is no longer part of the best chain; the
	/// transaction may still be included again.
	Retracted,
	InBlock {
		block_hash: H256,
	},
	Finalized {
		block_hash: H256,
		/// Events emitted by this extrinsic in the finalizing block.
		events: Vec<ChainEvent>,
	},
}

/// A block header, reduced to what the workflows report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
	pub number: u64,
	pub parent_hash: H256,
}

pub type SubmissionStream = BoxStream<'static, Result<SubmissionStatus, Error>>;

/// A session to one remote chain node.
///
/// Sessions are owned by a single workflow invocation and must be released
/// on every exit path; [`ChainSession::disconnect`] is idempotent and never
/// fails.
#[async_trait]
pub trait ChainSession: Send + Sync {
	/// The endpoint this session is connected to.
	fn endpoint(&self) -> &str;

	/// Sign and submit a registrar call, returning the status stream.
	async fn submit(&self, call: RegistrarCall, signer: &Keypair) -> Result<SubmissionStream, Error>;

	/// The full event list stored at the given block.
	async fn events_at(&self, block_hash: H256) -> Result<Vec<ChainEvent>, Error>;

	/// The header of the given block, or the current best block when `None`.
	/// Returns `Ok(None)` when the remote does not know the block.
	async fn header(&self, block_hash: Option<H256>) -> Result<Option<BlockHeader>, Error>;

	/// Para ids currently registered on this chain.
	async fn registered_parachains(&self) -> Result<Vec<u32>, Error>;

	/// Close the session. Safe to call repeatedly; only the first call has
	/// an effect.
	async fn disconnect(&self);
}
