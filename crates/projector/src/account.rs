//! Account projection.

use crate::projector::{Projector, Result};
use crate::view::{AccountView, ProjectedAccount};
use qrl_explorer_core::AccountResponse;

impl Projector {
    /// Project an address lookup response: the account address in both forms
    /// and the foundation multisig hashes in hex. Other state passes through.
    pub fn account(&self, response: &AccountResponse) -> Result<ProjectedAccount> {
        let state = &response.state;
        let address = self.address(&state.address)?;
        Ok(ProjectedAccount {
            state: AccountView {
                address: address.to_hex(),
                address_b32: address.to_text(),
                foundation_multi_sig_spend_txn_hash: state
                    .foundation_multi_sig_spend_txn_hash
                    .to_hex(),
                foundation_multi_sig_vote_txn_hash: state
                    .foundation_multi_sig_vote_txn_hash
                    .to_hex(),
                extra: state.extra.clone(),
            },
            extra: response.extra.clone(),
        })
    }
}
