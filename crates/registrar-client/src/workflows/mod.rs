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

//! The submission and query workflows.
//!
//! Each workflow is attempt-once: it drives a single call through
//! `Connecting → ChainSelected → AccountLoaded → Submitted → InBlock →
//! Finalized` and reports the outcome. The caller owns the sessions and
//! releases them after the workflow future resolves.

pub mod events;
pub mod register;
pub mod reserve;
pub mod status;

#[cfg(test)]
pub(crate) mod mock;

use std::time::Duration;

use futures::StreamExt;
use subxt::utils::H256;
use subxt_signer::sr25519::Keypair;

use crate::{
	error::Error,
	session::{ChainEvent, ChainSession, RegistrarCall, SubmissionStatus},
	LOG_TARGET,
};

/// Upper bound on the wait for the next status notification. Finalization
/// on the supported networks takes well under a minute; ten minutes covers
/// outages without hanging the invocation forever.
const STATUS_TIMEOUT: Duration = Duration::from_secs(600);

/// Submit a call and follow its status notifications until the finalizing
/// block is known, returning that block's hash and the extrinsic's events.
/// Effects are never acted on before the `Finalized` notification.
pub(crate) async fn watch_submission(
	session: &dyn ChainSession,
	call: RegistrarCall,
	signer: &Keypair,
) -> Result<(H256, Vec<ChainEvent>), Error> {
	let mut statuses = session.submit(call, signer).await?;

	loop {
		let status = tokio::time::timeout(STATUS_TIMEOUT, statuses.next())
			.await
			.map_err(|_| Error::Timeout {
				operation: "waiting for transaction status",
			})?
			.ok_or(Error::StatusStreamClosed)??;

		match status {
			SubmissionStatus::Validated => log::debug!(target: LOG_TARGET, "Transaction validated"),
			SubmissionStatus::Broadcast => log::debug!(target: LOG_TARGET, "Transaction broadcast"),
			SubmissionStatus::Retracted => {
				log::warn!(target: LOG_TARGET, "Transaction no longer in the best chain, waiting for re-inclusion")
			}
			SubmissionStatus::InBlock { block_hash } => {
				log::info!(target: LOG_TARGET, "Transaction included in block {block_hash:?}")
			}
			SubmissionStatus::Finalized { block_hash, events } => {
				log::info!(target: LOG_TARGET, "Transaction finalized in block {block_hash:?}");
				return Ok((block_hash, events));
			}
		}
	}
}
