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

//! Historical block event queries.

use subxt::utils::H256;

use crate::{
	error::Error,
	session::{ChainEvent, ChainSession},
};

/// Reservation events found in one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEventsReport {
	pub block_number: u64,
	pub parent_hash: H256,
	/// Size of the block's full event list, before filtering.
	pub total_events: usize,
	/// The matching `registrar.Reserved` events, in emission order.
	pub reserved: Vec<ChainEvent>,
}

/// Outcome of an event query. An unknown block is a normal negative result,
/// reported separately from query failures, which propagate as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockEventsOutcome {
	Found(BlockEventsReport),
	BlockNotFound,
}

/// Fetch a block's stored events and filter for `registrar.Reserved`,
/// optionally requiring the event's second data field (the owning account)
/// to equal `account`.
pub async fn reserved_events_at(
	session: &dyn ChainSession,
	block_hash: H256,
	account: Option<&str>,
) -> Result<BlockEventsOutcome, Error> {
	let Some(header) = session.header(Some(block_hash)).await? else {
		return Ok(BlockEventsOutcome::BlockNotFound);
	};

	let events = session.events_at(block_hash).await?;
	let total_events = events.len();
	let reserved = events
		.into_iter()
		.filter(|event| {
			event.is("registrar", "Reserved")
				&& account.is_none_or(|account| event.fields.get(1).is_some_and(|field| field == account))
		})
		.collect();

	Ok(BlockEventsOutcome::Found(BlockEventsReport {
		block_number: header.number,
		parent_hash: header.parent_hash,
		total_events,
		reserved,
	}))
}
