//! External-service clients and the campaign pipeline.

pub mod dispatch;
pub mod mailer;
pub mod recipients;
pub mod templates;

pub use dispatch::{
    CampaignSender, ChunkOutcome, ChunkSender, DispatchReport, Dispatcher, personalize,
};
pub use mailer::{MailerClient, MailerError, OutboundEmail, Party, SendReceipt};
pub use recipients::{Recipient, Roster, RosterEntry, build_roster};
