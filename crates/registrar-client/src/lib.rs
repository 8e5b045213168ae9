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

//! Client library for para id reservation and container-chain registration.
//!
//! The heavy lifting (connections, signing, metadata decoding) is delegated
//! to `subxt` behind the narrow [`session::ChainSession`] interface; this
//! crate contributes the network presets, the chain-spec to genesis-data
//! transform and the submission workflows built on top of that interface.

pub mod account;
pub mod chain_spec;
pub mod codec;
pub mod connection;
pub mod error;
pub mod networks;
pub mod session;
pub mod workflows;

pub use connection::{connect, connect_active, select_target_session, ActiveConnections};
pub use error::Error;
pub use session::{BlockHeader, ChainEvent, ChainSession, RegistrarCall, SubmissionStatus};
pub use subxt::utils::H256;

pub const LOG_TARGET: &str = "registrar";
