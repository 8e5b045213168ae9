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

//! Registration status overview.

use crate::{error::Error, session::ChainSession};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkStatus {
	/// Para ids currently registered on the chain.
	pub parachains: Vec<u32>,
	/// Best block number at query time.
	pub best_block: u64,
}

/// Report the registered para ids and the current chain head.
pub async fn network_status(session: &dyn ChainSession) -> Result<NetworkStatus, Error> {
	let parachains = session.registered_parachains().await?;
	let best_block = session
		.header(None)
		.await?
		.map(|header| header.number)
		.ok_or_else(|| Error::BlockNotFound("best".to_string()))?;

	Ok(NetworkStatus { parachains, best_block })
}
