//! Explorer projections of QRL ledger records.
//!
//! A [`Projector`] turns the records a node returns (transactions, blocks and
//! accounts) into display records: binary fields as hex, addresses in both
//! the `Q` hex and bech32 forms, amounts as decimal strings, and an `explorer`
//! summary per transaction.
//!
//! ```ignore
//! let projector = Projector::new(ProjectorConfig::default());
//! let view = projector.transaction(&response)?;
//! ```

mod account;
mod block;
pub mod json;
pub mod price;
pub mod projector;
pub mod token;
mod transaction;
pub mod view;

pub use price::{market_price, Market, QuoteError, QuoteSource};
pub use projector::{ProjectionError, Projector, ProjectorConfig, Result};
pub use token::{NoTokens, TokenLookup, TokenMetadata};
pub use view::{
    ExplorerDetail, ExplorerView, ExtendedProjection, ProjectedAccount, ProjectedBlock,
    ProjectedTransaction, Projection, ResponseProjection, TransactionView,
};
