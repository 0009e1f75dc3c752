//! Common types, protocol definitions, and errors shared across the shop core crates.

pub mod error;
pub mod protocol;
pub mod record;

pub use error::ServiceError;
pub use record::{
    EncryptedField, EncryptedPaymentCard, PaymentCard, PaymentCardSummary, ResetSecret, TagInput,
    TagMatch, TagSet,
};
