//! Status state machines for quotes, artwork files, and orders.
//!
//! Statuses are stored as `text` columns, so every enum here carries a
//! canonical snake_case wire form via `as_str`/`FromStr`, with serde and
//! Postgres support delegating to that form.
//!
//! The `Quick*` enums model the simplified quick-access shortcut overlay. The
//! quick quote model is richer (six states) than the stored ground truth
//! (four states) and is *lossy-mapped* down on write: `win -> accepted`,
//! `lose -> rejected`, anything else -> `pending`. Once mapped down, the
//! original sub-state is gone. That is a deliberate tradeoff of the shortcut,
//! not a bug.

use serde::{Deserialize, Serialize};

/// Error returned when parsing a status string fails.
#[derive(thiserror::Error, Debug, Clone)]
#[error("invalid {kind} status: {value}")]
pub struct StatusParseError {
    /// Which state machine rejected the value.
    pub kind: &'static str,
    /// The offending input.
    pub value: String,
}

/// Generates `as_str`, `Display`, `FromStr`, and Postgres text glue for a
/// status enum.
macro_rules! text_status {
    ($ty:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// Canonical snake_case wire form.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            /// Every state, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];
        }

        impl ::core::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for $ty {
            type Err = StatusParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(StatusParseError {
                        kind: $kind,
                        value: other.to_owned(),
                    }),
                }
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Type<::sqlx::Postgres> for $ty {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <String as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <String as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $ty {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, ::sqlx::error::BoxDynError> {
                let s = <String as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
                Ok(s.parse()?)
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $ty {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <&str as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }
    };
}

/// Ground-truth quote / RFQ status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Expired,
}

text_status!(QuoteStatus, "quote", {
    Pending => "pending",
    Accepted => "accepted",
    Rejected => "rejected",
    Expired => "expired",
});

/// Artwork review status.
///
/// Transitions are unguarded: the review controller performs direct writes,
/// any state may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArtworkStatus {
    #[default]
    PendingReview,
    InReview,
    Prepress,
    ProofReady,
    RevisionNeeded,
    Approved,
    InProduction,
}

text_status!(ArtworkStatus, "artwork", {
    PendingReview => "pending_review",
    InReview => "in_review",
    Prepress => "prepress",
    ProofReady => "proof_ready",
    RevisionNeeded => "revision_needed",
    Approved => "approved",
    InProduction => "in_production",
});

impl ArtworkStatus {
    /// Whether the file is actively being worked by the studio.
    #[must_use]
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::InReview | Self::Prepress)
    }
}

/// Store order status.
///
/// `Deleted` is reached only via the soft-delete lifecycle and is filtered
/// out of status pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    PendingPayment,
    Confirmed,
    Production,
    Shipped,
    Delivered,
    Cancelled,
    Deleted,
}

text_status!(OrderStatus, "order", {
    Pending => "pending",
    PendingPayment => "pending_payment",
    Confirmed => "confirmed",
    Production => "production",
    Shipped => "shipped",
    Delivered => "delivered",
    Cancelled => "cancelled",
    Deleted => "deleted",
});

impl OrderStatus {
    /// Accepted but not yet closed out.
    #[must_use]
    pub const fn is_in_flight(self) -> bool {
        matches!(
            self,
            Self::PendingPayment | Self::Confirmed | Self::Production | Self::Shipped
        )
    }

    /// Closed-out states, excluded from the work queue and quick access.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled | Self::Deleted)
    }

    /// States offered in the order status picker (`Deleted` is not a
    /// selectable transition).
    #[must_use]
    pub fn picker_states() -> impl Iterator<Item = Self> {
        Self::ALL.iter().copied().filter(|s| *s != Self::Deleted)
    }
}

/// Quick-access quote model (UI-only, six states).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuickQuoteStatus {
    #[default]
    Received,
    WaitingSupplier,
    QuotedToCustomer,
    FollowUp,
    Win,
    Lose,
}

text_status!(QuickQuoteStatus, "quick quote", {
    Received => "received",
    WaitingSupplier => "waiting_supplier",
    QuotedToCustomer => "quoted_to_customer",
    FollowUp => "follow_up",
    Win => "win",
    Lose => "lose",
});

impl QuickQuoteStatus {
    /// Lossy down-mapping onto the stored four-state ground truth.
    ///
    /// `win` and `lose` are terminal outcomes; every intermediate quick state
    /// collapses to `pending`, discarding the richer sub-state.
    #[must_use]
    pub const fn ground_truth(self) -> QuoteStatus {
        match self {
            Self::Win => QuoteStatus::Accepted,
            Self::Lose => QuoteStatus::Rejected,
            _ => QuoteStatus::Pending,
        }
    }
}

/// Quick-access invoice/order model (UI-only, eight states).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuickInvoiceStatus {
    #[default]
    Pending,
    DepositReceived,
    SpecConfirmed,
    InProduction,
    ProductionFinished,
    FinalPayment,
    Shipped,
    Arrived,
}

text_status!(QuickInvoiceStatus, "quick invoice", {
    Pending => "pending",
    DepositReceived => "deposit_received",
    SpecConfirmed => "spec_confirmed",
    InProduction => "in_production",
    ProductionFinished => "production_finished",
    FinalPayment => "final_payment",
    Shipped => "shipped",
    Arrived => "arrived",
});

impl QuickInvoiceStatus {
    /// Lossy down-mapping onto [`OrderStatus`]. Like the quote mapping this
    /// is not round-trippable; the payment-milestone sub-states collapse.
    #[must_use]
    pub const fn ground_truth(self) -> OrderStatus {
        match self {
            Self::Pending => OrderStatus::Pending,
            Self::DepositReceived | Self::SpecConfirmed => OrderStatus::Confirmed,
            Self::InProduction | Self::ProductionFinished => OrderStatus::Production,
            Self::FinalPayment => OrderStatus::PendingPayment,
            Self::Shipped => OrderStatus::Shipped,
            Self::Arrived => OrderStatus::Delivered,
        }
    }
}

/// Quick-access artwork model (UI-only, two states).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuickArtworkStatus {
    #[default]
    Received,
    ConfirmedByCustomer,
}

text_status!(QuickArtworkStatus, "quick artwork", {
    Received => "received",
    ConfirmedByCustomer => "confirmed_by_customer",
});

impl QuickArtworkStatus {
    /// Down-mapping onto [`ArtworkStatus`].
    #[must_use]
    pub const fn ground_truth(self) -> ArtworkStatus {
        match self {
            Self::Received => ArtworkStatus::InReview,
            Self::ConfirmedByCustomer => ArtworkStatus::Approved,
        }
    }
}

/// What an artwork file is linked to, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    #[default]
    None,
    Order,
    Quote,
}

text_status!(LinkType, "link type", {
    None => "none",
    Order => "order",
    Quote => "quote",
});

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_status_round_trip() {
        for status in QuoteStatus::ALL {
            let parsed: QuoteStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, *status);
        }
    }

    #[test]
    fn test_artwork_status_round_trip() {
        for status in ArtworkStatus::ALL {
            let parsed: ArtworkStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, *status);
        }
    }

    #[test]
    fn test_invalid_status_rejected() {
        let err = "definitely_not_a_status".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.kind, "order");
    }

    #[test]
    fn test_quick_quote_down_mapping() {
        assert_eq!(QuickQuoteStatus::Win.ground_truth(), QuoteStatus::Accepted);
        assert_eq!(QuickQuoteStatus::Lose.ground_truth(), QuoteStatus::Rejected);
        // Every non-terminal quick state collapses to pending
        for quick in [
            QuickQuoteStatus::Received,
            QuickQuoteStatus::WaitingSupplier,
            QuickQuoteStatus::QuotedToCustomer,
            QuickQuoteStatus::FollowUp,
        ] {
            assert_eq!(quick.ground_truth(), QuoteStatus::Pending);
        }
    }

    #[test]
    fn test_quick_mapping_is_lossy() {
        // received and follow_up both collapse to pending; the mapping
        // cannot be inverted
        assert_eq!(
            QuickQuoteStatus::Received.ground_truth(),
            QuickQuoteStatus::FollowUp.ground_truth()
        );
    }

    #[test]
    fn test_order_picker_excludes_deleted() {
        assert!(!OrderStatus::picker_states().any(|s| s == OrderStatus::Deleted));
        assert_eq!(OrderStatus::picker_states().count(), 7);
    }

    #[test]
    fn test_serde_wire_form_matches_as_str() {
        let json = serde_json::to_string(&ArtworkStatus::PendingReview).unwrap();
        assert_eq!(json, "\"pending_review\"");
        let parsed: ArtworkStatus = serde_json::from_str("\"proof_ready\"").unwrap();
        assert_eq!(parsed, ArtworkStatus::ProofReady);
    }
}
