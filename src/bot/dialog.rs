//! Per-chat dialogue state machine for recording one deal.

use rust_decimal::Decimal;

use crate::bot::messages;
use crate::domain::{DealDraft, normalize_number, to_fraction_of_one};

/// The field the dialogue is currently collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogStep {
    #[default]
    ClientA,
    ClientB,
    RubTarget,
    RateA,
    FeeA,
    RateB,
    FeeB,
    PayoutCurrency,
    Notes,
}

/// What the bot should do after feeding one user message to the dialogue.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome {
    /// Ask for the next field.
    Prompt(DialogStep),
    /// The input was rejected; re-ask the same field with this message.
    Retry(&'static str),
    /// All fields collected; the draft is ready to be recorded.
    Complete(DealDraft),
}

/// DealDialog accumulates the fields of one deal, one message at a time.
///
/// The machine itself does no I/O: the bot feeds it trimmed message text
/// and acts on the returned outcome.
#[derive(Debug, Clone, Default)]
pub struct DealDialog {
    step: DialogStep,
    draft: DealDraft,
}

impl DealDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The field the dialogue is waiting for.
    pub fn step(&self) -> DialogStep {
        self.step
    }

    /// Feeds one user message to the dialogue and advances it.
    ///
    /// Rejected input keeps the dialogue on the same step so the caller can
    /// re-prompt for that single field.
    pub fn apply(&mut self, input: &str) -> DialogOutcome {
        let input = input.trim();

        match self.step {
            DialogStep::ClientA => {
                if input.is_empty() {
                    return DialogOutcome::Retry(messages::EMPTY_NAME);
                }
                self.draft.client_a = input.to_string();
                self.advance(DialogStep::ClientB)
            }
            DialogStep::ClientB => {
                if input.is_empty() {
                    return DialogOutcome::Retry(messages::EMPTY_NAME);
                }
                self.draft.client_b = input.to_string();
                self.advance(DialogStep::RubTarget)
            }
            DialogStep::RubTarget => match normalize_number(input) {
                Ok(v) if v > Decimal::ZERO => {
                    self.draft.rub_target = v;
                    self.advance(DialogStep::RateA)
                }
                Ok(_) => DialogOutcome::Retry(messages::POSITIVE_AMOUNT),
                Err(_) => DialogOutcome::Retry(messages::BAD_NUMBER),
            },
            DialogStep::RateA => match normalize_number(input) {
                Ok(v) if v > Decimal::ZERO => {
                    self.draft.rate_a = v;
                    self.advance(DialogStep::FeeA)
                }
                Ok(_) => DialogOutcome::Retry(messages::POSITIVE_RATE),
                Err(_) => DialogOutcome::Retry(messages::BAD_NUMBER),
            },
            DialogStep::FeeA => match to_fraction_of_one(input) {
                Ok(v) if v >= Decimal::ZERO => {
                    self.draft.fee_a = v;
                    self.advance(DialogStep::RateB)
                }
                Ok(_) => DialogOutcome::Retry(messages::NEGATIVE_FEE),
                Err(_) => DialogOutcome::Retry(messages::BAD_NUMBER),
            },
            DialogStep::RateB => match normalize_number(input) {
                Ok(v) if v > Decimal::ZERO => {
                    self.draft.rate_b = v;
                    self.advance(DialogStep::FeeB)
                }
                Ok(_) => DialogOutcome::Retry(messages::POSITIVE_RATE),
                Err(_) => DialogOutcome::Retry(messages::BAD_NUMBER),
            },
            DialogStep::FeeB => match to_fraction_of_one(input) {
                Ok(v) if v >= Decimal::ZERO => {
                    self.draft.fee_b = v;
                    self.advance(DialogStep::PayoutCurrency)
                }
                Ok(_) => DialogOutcome::Retry(messages::NEGATIVE_FEE),
                Err(_) => DialogOutcome::Retry(messages::BAD_NUMBER),
            },
            DialogStep::PayoutCurrency => {
                if input.is_empty() {
                    return DialogOutcome::Retry(messages::EMPTY_CURRENCY);
                }
                self.draft.payout_currency_b = input.to_string();
                self.advance(DialogStep::Notes)
            }
            DialogStep::Notes => {
                self.draft.notes = if input == messages::SKIP_MARK {
                    String::new()
                } else {
                    input.to_string()
                };
                DialogOutcome::Complete(self.draft.clone())
            }
        }
    }

    fn advance(&mut self, next: DialogStep) -> DialogOutcome {
        self.step = next;
        DialogOutcome::Prompt(next)
    }
}
