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

//! A scripted session standing in for a live node.

use std::{
	collections::HashMap,
	sync::{
		atomic::{AtomicBool, AtomicUsize, Ordering},
		Mutex,
	},
};

use async_trait::async_trait;
use futures::StreamExt;
use subxt::utils::H256;
use subxt_signer::sr25519::Keypair;

use crate::{
	error::Error,
	session::{BlockHeader, ChainEvent, ChainSession, RegistrarCall, SubmissionStatus, SubmissionStream},
};

pub(crate) struct MockSession {
	pub endpoint: String,
	/// Status notifications handed out by the next `submit`.
	pub statuses: Mutex<Vec<Result<SubmissionStatus, Error>>>,
	/// When set, `submit` returns a stream that never yields.
	pub hang_submission: bool,
	pub block_events: HashMap<H256, Vec<ChainEvent>>,
	pub headers: HashMap<H256, BlockHeader>,
	pub best_header: Option<BlockHeader>,
	pub parachains: Vec<u32>,
	pub submitted: Mutex<Vec<RegistrarCall>>,
	pub disconnected: AtomicBool,
	pub disconnects: AtomicUsize,
}

impl MockSession {
	pub fn new() -> Self {
		Self {
			endpoint: "ws://mock".to_string(),
			statuses: Mutex::new(Vec::new()),
			hang_submission: false,
			block_events: HashMap::new(),
			headers: HashMap::new(),
			best_header: None,
			parachains: Vec::new(),
			submitted: Mutex::new(Vec::new()),
			disconnected: AtomicBool::new(false),
			disconnects: AtomicUsize::new(0),
		}
	}

	pub fn with_statuses(statuses: Vec<Result<SubmissionStatus, Error>>) -> Self {
		let session = Self::new();
		*session.statuses.lock().expect("mock lock poisoned") = statuses;
		session
	}

	pub fn reserved_event(para_id: u32, owner: &str) -> ChainEvent {
		ChainEvent {
			pallet: "Registrar".to_string(),
			variant: "Reserved".to_string(),
			fields: vec![para_id.to_string(), owner.to_string()],
		}
	}
}

#[async_trait]
impl ChainSession for MockSession {
	fn endpoint(&self) -> &str {
		&self.endpoint
	}

	async fn submit(&self, call: RegistrarCall, _signer: &Keypair) -> Result<SubmissionStream, Error> {
		self.submitted.lock().expect("mock lock poisoned").push(call);
		if self.hang_submission {
			return Ok(futures::stream::pending().boxed());
		}
		let statuses = std::mem::take(&mut *self.statuses.lock().expect("mock lock poisoned"));
		Ok(futures::stream::iter(statuses).boxed())
	}

	async fn events_at(&self, block_hash: H256) -> Result<Vec<ChainEvent>, Error> {
		self.block_events
			.get(&block_hash)
			.cloned()
			.ok_or_else(|| Error::Client(subxt::Error::Other("no events recorded for block".to_string())))
	}

	async fn header(&self, block_hash: Option<H256>) -> Result<Option<BlockHeader>, Error> {
		match block_hash {
			Some(block_hash) => Ok(self.headers.get(&block_hash).cloned()),
			None => Ok(self.best_header.clone()),
		}
	}

	async fn registered_parachains(&self) -> Result<Vec<u32>, Error> {
		Ok(self.parachains.clone())
	}

	async fn disconnect(&self) {
		if !self.disconnected.swap(true, Ordering::SeqCst) {
			self.disconnects.fetch_add(1, Ordering::SeqCst);
		}
	}
}
