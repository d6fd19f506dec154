//! # Booking Notices
//!
//! Human-readable notification text for newly booked appointments. The
//! wording is locale-dependent; the locale is picked once at startup from
//! `APP_LOCALE` and passed into the booking engine.

use std::env;

use time::{Month, OffsetDateTime, macros::format_description};
use tracing::info;

/// Supported locales for notification text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// English (United States)
    #[default]
    EnUs,
    /// Portuguese (Brazil)
    PtBr,
}

impl Locale {
    /// Reads the locale from the `APP_LOCALE` environment variable.
    ///
    /// Accepts `en-US` and `pt-BR` (case-insensitive); anything else falls
    /// back to `en-US`.
    pub fn from_env() -> Self {
        let locale = match env::var("APP_LOCALE") {
            Ok(value) if value.eq_ignore_ascii_case("pt-br") => Locale::PtBr,
            _ => Locale::EnUs,
        };
        info!(?locale, "Notification locale selected");
        locale
    }

    /// Formats the notice sent to a provider when `requester_name` books the
    /// slot starting at `date`.
    ///
    /// `date` is the hour-normalized slot start, not the raw timestamp the
    /// requester submitted.
    pub fn booking_notice(&self, requester_name: &str, date: OffsetDateTime) -> String {
        let clock = date
            .format(format_description!("[hour]:[minute]"))
            .expect("hour and minute always format");

        match self {
            Locale::EnUs => format!(
                "New appointment from {requester_name} on {} {} at {clock}",
                date.month(),
                date.day(),
            ),
            Locale::PtBr => format!(
                "Novo agendamento de {requester_name} para dia {} de {} às {clock}h",
                date.day(),
                pt_br_month(date.month()),
            ),
        }
    }
}

fn pt_br_month(month: Month) -> &'static str {
    match month {
        Month::January => "janeiro",
        Month::February => "fevereiro",
        Month::March => "março",
        Month::April => "abril",
        Month::May => "maio",
        Month::June => "junho",
        Month::July => "julho",
        Month::August => "agosto",
        Month::September => "setembro",
        Month::October => "outubro",
        Month::November => "novembro",
        Month::December => "dezembro",
    }
}
