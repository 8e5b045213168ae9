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

//! Para id reservation.

use subxt::utils::H256;
use subxt_signer::sr25519::Keypair;

use super::watch_submission;
use crate::{
	error::Error,
	session::{ChainSession, RegistrarCall},
};

const RESERVED_PALLET: &str = "registrar";
const RESERVED_VARIANT: &str = "Reserved";

/// A confirmed reservation, read back from the `registrar.Reserved` event of
/// the finalizing block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationOutcome {
	pub para_id: u32,
	/// SS58 address owning the reservation.
	pub owner: String,
	pub block_hash: H256,
}

/// Reserve the next free para id.
///
/// When `owner` is given, only `Reserved` events whose second data field
/// matches that address count as confirmation; a finalized transaction
/// without a matching event is [`Error::EventNotFound`].
pub async fn reserve_para_id(
	session: &dyn ChainSession,
	signer: &Keypair,
	owner: Option<&str>,
) -> Result<ReservationOutcome, Error> {
	let (block_hash, events) = watch_submission(session, RegistrarCall::Reserve, signer).await?;

	let event = events
		.iter()
		.find(|event| {
			event.is(RESERVED_PALLET, RESERVED_VARIANT)
				&& owner.is_none_or(|owner| event.fields.get(1).is_some_and(|field| field == owner))
		})
		.ok_or_else(|| Error::EventNotFound {
			pallet: RESERVED_PALLET.to_string(),
			variant: RESERVED_VARIANT.to_string(),
		})?;

	// First data field is the reserved id, second the owning account.
	let para_id = event
		.fields
		.first()
		.and_then(|field| field.parse::<u32>().ok())
		.ok_or_else(|| Error::UnexpectedEventFields {
			pallet: event.pallet.clone(),
			variant: event.variant.clone(),
		})?;
	let owner = event.fields.get(1).cloned().unwrap_or_default();

	Ok(ReservationOutcome {
		para_id,
		owner,
		block_hash,
	})
}
