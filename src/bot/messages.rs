//! User-facing dialogue texts and formatting (Russian, like the desk chat).

use rust_decimal::Decimal;

use crate::bot::dialog::DialogStep;
use crate::domain::Deal;

pub const WELCOME: &str = "👋 Привет! Я записываю арбитражные сделки между двумя клиентами.\n\n\
     ➕ Новая сделка — /newdeal\n\
     📋 Последние сделки — /deals\n\
     ✖️ Отмена ввода — /cancel";

pub const PROMPT_CLIENT_A: &str =
    "Клиент А (откуда берём рубли): выберите имя или введите новое";
pub const PROMPT_CLIENT_B: &str =
    "Клиент B (кому выплачиваем): выберите имя или введите новое";
pub const PROMPT_RUB_TARGET: &str = "Сумма сделки в RUB (например 100000)";
pub const PROMPT_RATE_A: &str = "Курс клиента А, RUB за USD (например 95,5)";
pub const PROMPT_FEE_A: &str = "Комиссия клиента А в % (например 1,5 или 0,015)";
pub const PROMPT_RATE_B: &str = "Курс клиента B, RUB за USD (например 96)";
pub const PROMPT_FEE_B: &str = "Комиссия клиента B в % (например 1 или 0,01)";
pub const PROMPT_PAYOUT_CURRENCY: &str = "Валюта выплаты клиенту B (например USDT)";
pub const PROMPT_NOTES: &str = "Заметки к сделке (или «-», чтобы пропустить)";

pub const BAD_NUMBER: &str =
    "⚠️ Не получилось разобрать число. Введите его цифрами, например 95,5";
pub const POSITIVE_AMOUNT: &str = "⚠️ Сумма должна быть больше нуля";
pub const POSITIVE_RATE: &str = "⚠️ Курс должен быть больше нуля";
pub const NEGATIVE_FEE: &str = "⚠️ Комиссия не может быть отрицательной";
pub const EMPTY_NAME: &str = "⚠️ Имя не может быть пустым";
pub const EMPTY_CURRENCY: &str = "⚠️ Укажите валюту выплаты";

/// Typing this instead of notes leaves them blank.
pub const SKIP_MARK: &str = "-";

pub const CANCELLED: &str = "✖️ Ввод сделки отменён";
pub const NOTHING_TO_CANCEL: &str = "Сейчас нечего отменять";
pub const NO_DEALS: &str = "Сделок пока нет";
pub const OPERATION_FAILED: &str = "⚠️ Что-то пошло не так, операция не выполнена";
pub const INVALID_RATE: &str = "⚠️ Курс должен быть больше нуля, сделка не записана";

/// Возвращает текст запроса для очередного шага диалога
pub fn prompt_for_step(step: DialogStep) -> &'static str {
    match step {
        DialogStep::ClientA => PROMPT_CLIENT_A,
        DialogStep::ClientB => PROMPT_CLIENT_B,
        DialogStep::RubTarget => PROMPT_RUB_TARGET,
        DialogStep::RateA => PROMPT_RATE_A,
        DialogStep::FeeA => PROMPT_FEE_A,
        DialogStep::RateB => PROMPT_RATE_B,
        DialogStep::FeeB => PROMPT_FEE_B,
        DialogStep::PayoutCurrency => PROMPT_PAYOUT_CURRENCY,
        DialogStep::Notes => PROMPT_NOTES,
    }
}

/// Форматирует сводку записанной сделки
pub fn deal_summary(deal: &Deal) -> String {
    format!(
        "✅ Сделка записана\n\n\
         ID: {}\n\
         {} → {}\n\
         Сумма: {} RUB\n\
         Курс А: {} (комиссия {}%)\n\
         Курс B: {} (комиссия {}%)\n\
         Выплата: {}\n\n\
         💰 Ожидаемый доход: ${}",
        deal.deal_id,
        deal.client_a,
        deal.client_b,
        deal.rub_target,
        deal.rate_a_rub_per_usd,
        fee_percent(deal.fee_a_pct),
        deal.rate_b_rub_per_usd,
        fee_percent(deal.fee_b_pct),
        deal.payout_currency_b,
        deal.est_rev_usd.round_dp(2),
    )
}

/// Форматирует список последних сделок
pub fn recent_deals(deals: &[Deal]) -> String {
    let mut out = String::from("📋 Последние сделки:\n");
    for deal in deals {
        out.push_str(&format!(
            "\n{} | {} → {} | {} RUB | ${} | {}",
            deal.deal_id,
            deal.client_a,
            deal.client_b,
            deal.rub_target,
            deal.est_rev_usd.round_dp(2),
            deal.status,
        ));
    }
    out
}

/// Converts a fraction-of-one fee back to percent units for display.
fn fee_percent(fee: Decimal) -> Decimal {
    (fee * Decimal::ONE_HUNDRED).normalize()
}
