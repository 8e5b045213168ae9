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

//! Signing account loading.

use subxt_signer::{bip39::Mnemonic, sr25519::Keypair};

use crate::{error::Error, LOG_TARGET};

/// Environment variable holding the secret phrase of the signing account.
pub const MNEMONIC_ENV: &str = "ACCOUNT_MNEMONIC";

/// Derive the sr25519 keypair from a secret phrase. Deterministic: the same
/// phrase always yields the same address.
pub fn load(phrase: &str) -> Result<Keypair, Error> {
	let mnemonic = Mnemonic::parse(phrase.trim()).map_err(|error| Error::InvalidMnemonic(error.to_string()))?;
	let keypair = Keypair::from_phrase(&mnemonic, None).map_err(|error| Error::InvalidMnemonic(error.to_string()))?;
	log::info!(target: LOG_TARGET, "Loaded account {}", address(&keypair));
	Ok(keypair)
}

/// Load the signing account required by submitting workflows from the
/// environment.
pub fn from_env() -> Result<Keypair, Error> {
	let phrase = std::env::var(MNEMONIC_ENV).map_err(|_| Error::MissingCredential)?;
	load(&phrase)
}

/// The SS58 address of a loaded account.
pub fn address(keypair: &Keypair) -> String {
	keypair.public_key().to_account_id().to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	const DEV_PHRASE: &str = "bottom drive obey lake curtain smoke basket hold race lonely fit walk";

	#[test]
	fn loading_is_deterministic() {
		let first = load(DEV_PHRASE).unwrap();
		let second = load(DEV_PHRASE).unwrap();
		assert_eq!(address(&first), address(&second));
		assert!(address(&first).starts_with('5'));
	}

	#[test]
	fn surrounding_whitespace_is_ignored() {
		let trimmed = load(DEV_PHRASE).unwrap();
		let padded = load(&format!("  {DEV_PHRASE}\n")).unwrap();
		assert_eq!(address(&trimmed), address(&padded));
	}

	#[test]
	fn gibberish_is_rejected() {
		assert!(matches!(load("not a mnemonic"), Err(Error::InvalidMnemonic(_))));
	}
}
