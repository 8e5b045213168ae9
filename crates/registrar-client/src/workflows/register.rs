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

//! Chain registration, in all three call forms.

use subxt::utils::H256;
use subxt_signer::sr25519::Keypair;

use super::watch_submission;
use crate::{
	error::Error,
	session::{ChainEvent, ChainSession, RegistrarCall},
};

/// The `(pallet, variant)` pairs that confirm a registration, across the
/// registrar pallet generations of the supported networks.
const REGISTERED_EVENTS: &[(&str, &str)] = &[
	("registrar", "Registered"),
	("registrar", "ParaIdRegistered"),
	("containerRegistrar", "Registered"),
];

/// A confirmed registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
	pub para_id: u32,
	pub block_hash: H256,
	/// Every event the registration extrinsic emitted, for reporting.
	pub events: Vec<ChainEvent>,
}

/// Submit a registration call and require a confirmation event in the
/// finalizing block.
pub async fn register(
	session: &dyn ChainSession,
	signer: &Keypair,
	call: RegistrarCall,
	para_id: u32,
) -> Result<RegistrationOutcome, Error> {
	let (block_hash, events) = watch_submission(session, call, signer).await?;

	if !events
		.iter()
		.any(|event| REGISTERED_EVENTS.iter().any(|(pallet, variant)| event.is(pallet, variant)))
	{
		return Err(Error::EventNotFound {
			pallet: "registrar".to_string(),
			variant: "Registered".to_string(),
		});
	}

	Ok(RegistrationOutcome {
		para_id,
		block_hash,
		events,
	})
}
