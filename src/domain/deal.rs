//! Deal record model and identifier generation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status a freshly recorded deal starts in.
pub const STATUS_OPEN: &str = "open";

/// Deal represents one recorded arbitrage transaction between two clients.
///
/// Field order matches the column order of the deal ledger CSV; the serde
/// renames carry the historical column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    /// Time-derived identifier, e.g. "D-20250115-143501".
    pub deal_id: String,
    /// When the deal was opened.
    pub opened_at: DateTime<Utc>,
    /// Side A client name (the RUB source).
    #[serde(rename = "client_A")]
    pub client_a: String,
    /// Side B client name (the payout side).
    #[serde(rename = "client_B")]
    pub client_b: String,
    /// RUB amount to move.
    pub rub_target: Decimal,
    /// Side A exchange rate, RUB per USD. Strictly positive.
    #[serde(rename = "rate_A_rub_per_usd")]
    pub rate_a_rub_per_usd: Decimal,
    /// Side A fee as a fraction of one (0.015 means 1.5%).
    #[serde(rename = "fee_A_pct")]
    pub fee_a_pct: Decimal,
    /// Side B exchange rate, RUB per USD. Strictly positive.
    #[serde(rename = "rate_B_rub_per_usd")]
    pub rate_b_rub_per_usd: Decimal,
    /// Side B fee as a fraction of one.
    #[serde(rename = "fee_B_pct")]
    pub fee_b_pct: Decimal,
    /// Currency side B is paid out in (free form, e.g. "USDT").
    #[serde(rename = "payout_currency_B")]
    pub payout_currency_b: String,
    /// Free-form status; "open" on creation.
    pub status: String,
    /// Estimated USD revenue, computed once when the deal is recorded and
    /// never recomputed afterwards.
    pub est_rev_usd: Decimal,
    /// Settled USD revenue, blank until known.
    pub final_rev_usd: Option<Decimal>,
    /// Free-form notes, may be empty.
    pub notes: String,
}

/// DealDraft holds the fields the dialogue collects before a deal is
/// recorded. Numeric fields are already normalized (fees as fractions of
/// one).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealDraft {
    pub client_a: String,
    pub client_b: String,
    pub rub_target: Decimal,
    pub rate_a: Decimal,
    pub fee_a: Decimal,
    pub rate_b: Decimal,
    pub fee_b: Decimal,
    pub payout_currency_b: String,
    pub notes: String,
}

impl Deal {
    /// Builds a complete open deal from a collected draft.
    pub fn open(
        deal_id: String,
        opened_at: DateTime<Utc>,
        draft: DealDraft,
        est_rev_usd: Decimal,
    ) -> Self {
        Deal {
            deal_id,
            opened_at,
            client_a: draft.client_a,
            client_b: draft.client_b,
            rub_target: draft.rub_target,
            rate_a_rub_per_usd: draft.rate_a,
            fee_a_pct: draft.fee_a,
            rate_b_rub_per_usd: draft.rate_b,
            fee_b_pct: draft.fee_b,
            payout_currency_b: draft.payout_currency_b,
            status: STATUS_OPEN.to_string(),
            est_rev_usd,
            final_rev_usd: None,
            notes: draft.notes,
        }
    }
}

/// Generates time-derived deal identifiers.
///
/// The base form is "D-YYYYMMDD-HHMMSS". One-second resolution collides for
/// deals opened within the same second, so repeats within a second get a
/// monotonic "-2", "-3", ... suffix.
#[derive(Debug, Default)]
pub struct DealIdGenerator {
    last_stamp: String,
    seq: u32,
}

impl DealIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the identifier for a deal opened at `now`.
    pub fn next(&mut self, now: DateTime<Utc>) -> String {
        let stamp = now.format("%Y%m%d-%H%M%S").to_string();

        if self.last_stamp == stamp {
            self.seq += 1;
            return format!("D-{}-{}", stamp, self.seq);
        }

        self.last_stamp = stamp;
        self.seq = 1;
        format!("D-{}", self.last_stamp)
    }
}
