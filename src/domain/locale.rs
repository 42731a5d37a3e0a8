//! Human-facing date and area formatting in a fixed locale.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::booking::{AreaType, BookingRecord};
use super::calendar::YearMonth;

const PT_MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Sunday-first names, matching the calendar grid.
const PT_WEEKDAYS: [&str; 7] = [
    "domingo",
    "segunda-feira",
    "terça-feira",
    "quarta-feira",
    "quinta-feira",
    "sexta-feira",
    "sábado",
];

const EN_WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const PT_INITIALS: [&str; 7] = ["D", "S", "T", "Q", "Q", "S", "S"];
const EN_INITIALS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported locale `{0}`")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Ok(Locale::PtBr),
            "en-us" | "en" => Ok(Locale::EnUs),
            _ => Err(UnknownLocale(raw.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::PtBr => write!(f, "pt-BR"),
            Locale::EnUs => write!(f, "en-US"),
        }
    }
}

impl Locale {
    pub fn month_name(&self, month: YearMonth) -> &'static str {
        let index = month.month0() as usize;
        match self {
            Locale::PtBr => PT_MONTHS[index],
            Locale::EnUs => EN_MONTHS[index],
        }
    }

    pub fn weekday_name(&self, weekday: Weekday) -> &'static str {
        let index = weekday.num_days_from_sunday() as usize;
        match self {
            Locale::PtBr => PT_WEEKDAYS[index],
            Locale::EnUs => EN_WEEKDAYS[index],
        }
    }

    /// Three-letter weekday abbreviation, e.g. `sáb` or `Sat`.
    pub fn weekday_short(&self, weekday: Weekday) -> String {
        self.weekday_name(weekday).chars().take(3).collect()
    }

    /// Column headers for a Sunday-first grid.
    pub fn weekday_initials(&self) -> [&'static str; 7] {
        match self {
            Locale::PtBr => PT_INITIALS,
            Locale::EnUs => EN_INITIALS,
        }
    }

    /// `junho de 2024` / `June 2024`.
    pub fn month_label(&self, month: YearMonth) -> String {
        let name = self.month_name(month);
        match self {
            Locale::PtBr => format!("{} de {}", name, month.year()),
            Locale::EnUs => format!("{} {}", name, month.year()),
        }
    }

    /// `sábado, 15 de junho de 2024` / `Saturday, June 15, 2024`.
    pub fn long_date(&self, date: NaiveDate) -> String {
        let weekday = self.weekday_name(date.weekday());
        let month = self.month_name(YearMonth::containing(date));
        match self {
            Locale::PtBr => format!("{}, {} de {} de {}", weekday, date.day(), month, date.year()),
            Locale::EnUs => format!("{}, {} {}, {}", weekday, month, date.day(), date.year()),
        }
    }

    /// `sáb 15` / `Sat 15`.
    pub fn short_day(&self, date: NaiveDate) -> String {
        format!("{} {:02}", self.weekday_short(date.weekday()), date.day())
    }

    pub fn area_label(&self, area: Option<AreaType>, custom_size: &str) -> String {
        match (self, area) {
            (Locale::PtBr, Some(AreaType::SmallMedium)) => "Até 200m²".into(),
            (Locale::PtBr, Some(AreaType::Large)) => "Até 400m²".into(),
            (Locale::PtBr, Some(AreaType::Custom)) => format!("{} (Personalizado)", custom_size),
            (Locale::PtBr, None) => "Não informado".into(),
            (Locale::EnUs, Some(AreaType::SmallMedium)) => "Up to 200m²".into(),
            (Locale::EnUs, Some(AreaType::Large)) => "Up to 400m²".into(),
            (Locale::EnUs, Some(AreaType::Custom)) => format!("{} (Custom)", custom_size),
            (Locale::EnUs, None) => "Not provided".into(),
        }
    }

    /// Menu label for choosing an area bracket.
    pub fn area_option(&self, area: AreaType) -> &'static str {
        match (self, area) {
            (Locale::PtBr, AreaType::SmallMedium) => "Até 200m²",
            (Locale::PtBr, AreaType::Large) => "Até 400m²",
            (Locale::PtBr, AreaType::Custom) => "Personalizado",
            (Locale::EnUs, AreaType::SmallMedium) => "Up to 200m²",
            (Locale::EnUs, AreaType::Large) => "Up to 400m²",
            (Locale::EnUs, AreaType::Custom) => "Custom",
        }
    }
}

/// Labelled lines describing a booking, shared by the review screen and the
/// submission log.
pub fn summary_lines(record: &BookingRecord, locale: Locale) -> Vec<(&'static str, String)> {
    let date = record
        .date
        .map(|date| capitalize(&locale.long_date(date)))
        .unwrap_or_default();
    let area = locale.area_label(record.area_type, &record.custom_area_size);
    let labels = match locale {
        Locale::PtBr => ["Data escolhida", "Tamanho da área", "Endereço", "Telefone"],
        Locale::EnUs => ["Chosen date", "Area size", "Address", "Phone"],
    };
    vec![
        (labels[0], date),
        (labels[1], area),
        (labels[2], record.address.trim().to_string()),
        (labels[3], record.phone.clone()),
    ]
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::BookingUpdate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_long_dates() {
        let day = date(2024, 6, 15);
        assert_eq!(Locale::PtBr.long_date(day), "sábado, 15 de junho de 2024");
        assert_eq!(Locale::EnUs.long_date(day), "Saturday, June 15, 2024");
    }

    #[test]
    fn formats_month_labels() {
        let month = YearMonth::new(2025, 3).unwrap();
        assert_eq!(Locale::PtBr.month_label(month), "março de 2025");
        assert_eq!(Locale::EnUs.month_label(month), "March 2025");
    }

    #[test]
    fn short_day_abbreviates_unicode_weekdays() {
        assert_eq!(Locale::PtBr.short_day(date(2024, 6, 15)), "sáb 15");
        assert_eq!(Locale::EnUs.short_day(date(2024, 6, 3)), "Mon 03");
    }

    #[test]
    fn parses_locale_tags() {
        assert_eq!("pt-BR".parse::<Locale>().unwrap(), Locale::PtBr);
        assert_eq!("en_us".parse::<Locale>().unwrap(), Locale::EnUs);
        let err = "fr-FR".parse::<Locale>().unwrap_err();
        assert_eq!(err, UnknownLocale("fr-FR".into()));
        assert_eq!(err.to_string(), "unsupported locale `fr-FR`");
    }

    #[test]
    fn month_names_follow_the_calendar_month() {
        let january = YearMonth::new(2024, 1).unwrap();
        let december = YearMonth::new(2024, 12).unwrap();
        assert_eq!(Locale::PtBr.month_name(january), "janeiro");
        assert_eq!(Locale::PtBr.month_name(december), "dezembro");
        assert_eq!(Locale::EnUs.month_name(december.succ()), "January");
    }

    #[test]
    fn area_labels_cover_custom_and_missing() {
        assert_eq!(
            Locale::PtBr.area_label(Some(AreaType::Custom), "850m²"),
            "850m² (Personalizado)"
        );
        assert_eq!(Locale::PtBr.area_label(None, ""), "Não informado");
    }

    #[test]
    fn summary_capitalizes_date() {
        let mut record = BookingRecord::new();
        record.merge(
            BookingUpdate::new()
                .date(date(2024, 6, 15))
                .address("Rua das Flores, 123 ")
                .area_type(AreaType::SmallMedium),
        );
        let lines = summary_lines(&record, Locale::PtBr);
        assert_eq!(lines[0].1, "Sábado, 15 de junho de 2024");
        assert_eq!(lines[1].1, "Até 200m²");
        assert_eq!(lines[2].1, "Rua das Flores, 123");
    }
}
