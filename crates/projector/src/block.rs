//! Block projection.

use crate::projector::{Projector, Result};
use crate::token::{Layered, TokenLookup, TokenMetadata};
use crate::view::{BlockView, HeaderView, ProjectedBlock};
use qrl_explorer_core::{BlockResponse, TxKind};
use std::collections::HashMap;
use tracing::debug;

impl Projector {
    /// Project a block lookup response.
    ///
    /// Every transaction in a block is confirmed. Token transfers are resolved
    /// against tokens created earlier in the same block first, then `tokens`.
    pub fn block(
        &self,
        response: &BlockResponse,
        tokens: &dyn TokenLookup,
    ) -> Result<ProjectedBlock> {
        let block = &response.block_extended;
        debug!(
            block_number = ?block.header.block_number(),
            transactions = block.tx_count(),
            "projecting block"
        );

        let mut created: HashMap<Vec<u8>, TokenMetadata> = HashMap::new();
        let mut extended_transactions = Vec::with_capacity(block.tx_count());
        for ext in &block.extended_transactions {
            let lookup = Layered {
                first: &created,
                second: tokens,
            };
            extended_transactions.push(self.extended(ext, true, &lookup)?);

            if ext.tx.kind() == Some(TxKind::Token) {
                let token = TokenMetadata::from_transaction(&ext.tx)?;
                created.insert(token.txhash.clone(), token);
            }
        }

        Ok(ProjectedBlock {
            block_extended: BlockView {
                header: HeaderView::from(&block.header),
                extended_transactions,
                extra: block.extra.clone(),
            },
            extra: response.extra.clone(),
        })
    }
}
