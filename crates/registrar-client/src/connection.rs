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

//! Session management over the chain client.
//!
//! Every remote round trip is wrapped in an explicit timeout so a stalled
//! node fails the invocation instead of hanging it.

use std::{
	sync::{Arc, Mutex},
	time::Duration,
};

use async_trait::async_trait;
use futures::StreamExt;
use subxt::{
	backend::{legacy::LegacyRpcMethods, rpc::RpcClient},
	dynamic,
	ext::scale_value::Value,
	tx::{TxInBlock, TxProgress, TxStatus},
	utils::H256,
	OnlineClient, PolkadotConfig,
};
use subxt_signer::sr25519::Keypair;

use crate::{
	codec,
	error::Error,
	networks::{self, NetworkConfig},
	session::{BlockHeader, ChainEvent, ChainSession, RegistrarCall, SubmissionStatus, SubmissionStream},
	LOG_TARGET,
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const RPC_TIMEOUT: Duration = Duration::from_secs(60);

type Client = OnlineClient<PolkadotConfig>;

/// A live session to one node, backed by the chain client library.
pub struct SubxtSession {
	endpoint: String,
	inner: Mutex<Option<Inner>>,
}

#[derive(Clone)]
struct Inner {
	client: Client,
	rpc: RpcClient,
}

impl SubxtSession {
	fn inner(&self) -> Result<Inner, Error> {
		self.inner
			.lock()
			.expect("session lock poisoned")
			.clone()
			.ok_or_else(|| Error::SessionClosed(self.endpoint.clone()))
	}
}

/// Open a session and block until the remote signals readiness.
pub async fn connect(endpoint: &str) -> Result<Arc<SubxtSession>, Error> {
	log::info!(target: LOG_TARGET, "Connecting to {endpoint}");

	let inner = tokio::time::timeout(CONNECT_TIMEOUT, async {
		let rpc = RpcClient::from_url(endpoint).await?;
		let client = Client::from_rpc_client(rpc.clone()).await?;
		let legacy = LegacyRpcMethods::<PolkadotConfig>::new(rpc.clone());
		let chain = legacy.system_chain().await?;
		let version = legacy.system_version().await?;
		log::info!(target: LOG_TARGET, "Connected to {chain} ({version})");
		Ok::<_, subxt::Error>(Inner { client, rpc })
	})
	.await
	.map_err(|_| Error::Timeout { operation: "connecting" })?
	.map_err(|source| Error::Connection {
		endpoint: endpoint.to_string(),
		source,
	})?;

	Ok(Arc::new(SubxtSession {
		endpoint: endpoint.to_string(),
		inner: Mutex::new(Some(inner)),
	}))
}

/// The open sessions of one workflow invocation.
pub struct ActiveConnections {
	pub network: &'static NetworkConfig,
	pub primary: Arc<dyn ChainSession>,
	pub secondary: Option<Arc<dyn ChainSession>>,
}

impl ActiveConnections {
	/// The session registrar submissions are routed to on this network.
	pub fn target(&self) -> &dyn ChainSession {
		select_target_session(self.network, self.primary.as_ref(), self.secondary.as_deref())
	}

	/// Release every session. Idempotent: closing twice only disconnects
	/// once per session.
	pub async fn close(&self) {
		self.primary.disconnect().await;
		if let Some(secondary) = &self.secondary {
			secondary.disconnect().await;
		}
	}
}

/// Resolve the active network and open its session(s). The secondary
/// session is only opened when the network declares a second endpoint; if it
/// fails to open, the already-open primary session is released before the
/// error propagates.
pub async fn connect_active() -> Result<ActiveConnections, Error> {
	let network = networks::active()?;
	log::info!(target: LOG_TARGET, "Using the {} network", network.name);

	let primary: Arc<dyn ChainSession> = connect(network.primary_endpoint).await?;
	let secondary: Option<Arc<dyn ChainSession>> = match network.secondary_endpoint {
		Some(endpoint) => match connect(endpoint).await {
			Ok(session) => Some(session),
			Err(error) => {
				primary.disconnect().await;
				return Err(error);
			}
		},
		None => None,
	};

	Ok(ActiveConnections {
		network,
		primary,
		secondary,
	})
}

/// Pick the submission target: the secondary session when the network routes
/// there and one is open, the primary session otherwise.
pub fn select_target_session<'a>(
	network: &NetworkConfig,
	primary: &'a dyn ChainSession,
	secondary: Option<&'a dyn ChainSession>,
) -> &'a dyn ChainSession {
	match secondary {
		Some(secondary) if network.submit_on_secondary => secondary,
		_ => primary,
	}
}

#[async_trait]
impl ChainSession for SubxtSession {
	fn endpoint(&self) -> &str {
		&self.endpoint
	}

	async fn submit(&self, call: RegistrarCall, signer: &Keypair) -> Result<SubmissionStream, Error> {
		let inner = self.inner()?;
		let payload = codec::registrar_call_payload(&call)?;
		let progress = tokio::time::timeout(
			RPC_TIMEOUT,
			inner.client.tx().sign_and_submit_then_watch_default(&payload, signer),
		)
		.await
		.map_err(|_| Error::Timeout {
			operation: "transaction submission",
		})??;
		Ok(submission_stream(progress).boxed())
	}

	async fn events_at(&self, block_hash: H256) -> Result<Vec<ChainEvent>, Error> {
		let inner = self.inner()?;
		let events = tokio::time::timeout(RPC_TIMEOUT, async {
			let block = inner.client.blocks().at(block_hash).await?;
			block.events().await
		})
		.await
		.map_err(|_| Error::Timeout {
			operation: "block event query",
		})??;

		events
			.iter()
			.map(|details| Ok(codec::decode_event(&details.map_err(subxt::Error::from)?)))
			.collect()
	}

	async fn header(&self, block_hash: Option<H256>) -> Result<Option<BlockHeader>, Error> {
		let inner = self.inner()?;
		let legacy = LegacyRpcMethods::<PolkadotConfig>::new(inner.rpc.clone());
		let header = tokio::time::timeout(RPC_TIMEOUT, legacy.chain_get_header(block_hash))
			.await
			.map_err(|_| Error::Timeout {
				operation: "header query",
			})??;

		Ok(header.map(|header| BlockHeader {
			number: u64::from(header.number),
			parent_hash: header.parent_hash,
		}))
	}

	async fn registered_parachains(&self) -> Result<Vec<u32>, Error> {
		let inner = self.inner()?;
		let address = dynamic::storage("Paras", "Parachains", Vec::<Value>::new());
		let fetched = tokio::time::timeout(RPC_TIMEOUT, async {
			let storage = inner.client.storage().at_latest().await?;
			storage.fetch(&address).await
		})
		.await
		.map_err(|_| Error::Timeout {
			operation: "parachain list query",
		})??;

		match fetched {
			Some(value) => Ok(codec::para_ids(&value.to_value().map_err(subxt::Error::from)?)),
			None => Ok(Vec::new()),
		}
	}

	async fn disconnect(&self) {
		let open = self.inner.lock().expect("session lock poisoned").take();
		if open.is_some() {
			log::info!(target: LOG_TARGET, "Disconnected from {}", self.endpoint);
		}
	}
}

/// Adapt the client's transaction progress into the session status stream.
/// The stream ends after `Finalized` or the first error; dispatch failures
/// detected at finalization are decoded before they surface.
fn submission_stream(
	progress: TxProgress<PolkadotConfig, Client>,
) -> impl futures::Stream<Item = Result<SubmissionStatus, Error>> + Send {
	futures::stream::unfold(Some(progress), |state| async move {
		let mut progress = state?;
		match progress.next().await {
			None => None,
			Some(Err(error)) => Some((Err(Error::Client(error)), None)),
			Some(Ok(status)) => match status {
				TxStatus::Validated { .. } => Some((Ok(SubmissionStatus::Validated), Some(progress))),
				TxStatus::Broadcasted { .. } => Some((Ok(SubmissionStatus::Broadcast), Some(progress))),
				TxStatus::NoLongerInBestBlock { .. } => Some((Ok(SubmissionStatus::Retracted), Some(progress))),
				TxStatus::InBestBlock(in_block) => Some((
					Ok(SubmissionStatus::InBlock {
						block_hash: in_block.block_hash(),
					}),
					Some(progress),
				)),
				TxStatus::InFinalizedBlock(in_block) => Some((finalized_status(in_block).await, None)),
				TxStatus::Error { message } | TxStatus::Invalid { message } | TxStatus::Dropped { message } => {
					Some((Err(Error::DispatchOther(message)), None))
				}
			},
		}
	})
}

async fn finalized_status(in_block: TxInBlock<PolkadotConfig, Client>) -> Result<SubmissionStatus, Error> {
	let block_hash = in_block.block_hash();
	let events = in_block.wait_for_success().await.map_err(codec::dispatch_error)?;
	let events = events
		.iter()
		.map(|details| Ok(codec::decode_event(&details?)))
		.collect::<Result<Vec<_>, Error>>()?;
	Ok(SubmissionStatus::Finalized { block_hash, events })
}
