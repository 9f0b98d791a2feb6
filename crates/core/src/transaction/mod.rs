//! Transaction domain.
//!
//! A transaction records money moving between two users, either a `Bill`
//! (the sender covered a shared cost) or a `Payback` (settling up). When a
//! transaction belongs to a friendship, its amount feeds that friendship's
//! running balance.
//!
//! - `types` - the entity, raw drafts, patches and listing filters
//! - `validation` - ordered field checks turning a draft into a `NewTransaction`
//! - `service` - create, update, delete and list orchestration
//! - `error` - service errors and their HTTP mapping

pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;
#[cfg(test)]
mod validation_props;

pub use error::TransactionError;
pub use service::TransactionService;
pub use types::*;
pub use validation::{MAX_AMOUNT, MAX_MEMO_CHARS, ValidationError, validate};
