//! Row models for the back-office database.
//!
//! Each struct maps one table (`sqlx::FromRow`); the merged
//! [`quote::QuoteView`] is the one synthesized shape, unifying store quotes
//! and RFQ submissions the way the dashboards consume them.

pub mod artwork;
pub mod customer;
pub mod draft;
pub mod order;
pub mod quote;
pub mod subscriber;

pub use artwork::ArtworkFile;
pub use customer::{Customer, CustomerDirectory, CustomerRef, Inquiry};
pub use draft::EmailDraft;
pub use order::Order;
pub use quote::{Quote, QuoteView, RfqSubmission};
pub use subscriber::NewsletterSubscriber;
