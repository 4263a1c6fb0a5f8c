//! Shared primitive types and the register's text date contract.

use chrono::NaiveDate;

/// A risk identifier. Unique by convention only.
pub type RiskId = String;

/// The fixed day-abbreviated-month-2digit-year pattern, e.g. `05-Jan-24`.
pub const REGISTER_DATE_FORMAT: &str = "%d-%b-%y";

/// Accepted on input only; the register never writes it.
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a register date. Unparsable text is treated as absent.
pub fn parse_register_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, REGISTER_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT))
        .ok()
}

pub fn format_register_date(date: NaiveDate) -> String {
    date.format(REGISTER_DATE_FORMAT).to_string()
}

/// Serde adapter writing `DD-Mon-YY` and reading it (or ISO).
///
/// Use with `#[serde(with = "crate::types::register_date")]` on any date
/// that crosses a text boundary.
pub mod register_date {
    use super::{format_register_date, parse_register_date};
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format_register_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        parse_register_date(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid date '{raw}': expected DD-Mon-YY")))
    }
}

/// Optional variant of [`register_date`]. `null` and `""` read as absent;
/// pair with `#[serde(default)]` so a missing field is absent too.
pub mod register_date_opt {
    use super::{format_register_date, parse_register_date};
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_some(&format_register_date(*d)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(d)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse_register_date(&raw).map(Some).ok_or_else(|| {
                D::Error::custom(format!("invalid date '{raw}': expected DD-Mon-YY"))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_register_pattern() {
        assert_eq!(
            parse_register_date("05-Jan-24"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(
            parse_register_date(" 29-Feb-24 "),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn accepts_iso_on_input() {
        assert_eq!(
            parse_register_date("2024-03-31"),
            NaiveDate::from_ymd_opt(2024, 3, 31)
        );
    }

    #[test]
    fn garbage_coerces_to_absent() {
        assert_eq!(parse_register_date(""), None);
        assert_eq!(parse_register_date("not a date"), None);
        assert_eq!(parse_register_date("31-Feb-24"), None);
    }

    #[test]
    fn formats_two_digit_year() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_register_date(d), "05-Jan-24");
    }

    #[derive(serde::Serialize, serde::Deserialize)]
    struct Stamped {
        #[serde(with = "super::register_date")]
        at: NaiveDate,
        #[serde(default, with = "super::register_date_opt")]
        closed: Option<NaiveDate>,
    }

    #[test]
    fn serde_adapters_write_register_text() {
        let stamped = Stamped {
            at: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            closed: None,
        };
        let json = serde_json::to_string(&stamped).unwrap();
        assert_eq!(json, r#"{"at":"05-Jan-24","closed":null}"#);

        let back: Stamped = serde_json::from_str(r#"{"at":"2024-01-05"}"#).unwrap();
        assert_eq!(back.at, stamped.at);
        assert_eq!(back.closed, None);
    }
}
