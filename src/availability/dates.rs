//! Calendar date expansion
//!
//! Reservations occupy the half-open interval [arrival, departure). All
//! arithmetic is on `NaiveDate`, so there is no time of day and no time zone.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::warn;

use crate::error::{GatewayError, Result};
use crate::upstream::Reservation;

/// Format used by the upstream and by the gateway's responses.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT)
        .map_err(|e| GatewayError::InvalidDate(format!("{:?}: {}", value, e)))
}

/// Every night of a stay: arrival inclusive, departure exclusive.
///
/// Yields nothing when `departure <= arrival`.
pub fn nights(arrival: NaiveDate, departure: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    arrival.iter_days().take_while(move |day| *day < departure)
}

/// Parses both ends of a reservation's stay.
pub fn stay_bounds(reservation: &Reservation) -> Result<(NaiveDate, NaiveDate)> {
    let arrival = required_date(reservation.arrival_date.as_deref(), "arrivalDate")?;
    let departure = required_date(reservation.departure_date.as_deref(), "departureDate")?;
    Ok((arrival, departure))
}

fn required_date(value: Option<&str>, field: &str) -> Result<NaiveDate> {
    match value {
        Some(value) => parse_calendar_date(value),
        None => Err(GatewayError::InvalidDate(format!("missing {}", field))),
    }
}

/// Union of the booked nights of all reservations, deduplicated and ascending.
///
/// A reservation whose dates are missing or do not parse books nothing and is
/// skipped with a warning; the others still count.
pub fn booked_nights(reservations: &[Reservation]) -> BTreeSet<NaiveDate> {
    let mut booked = BTreeSet::new();

    for reservation in reservations {
        match stay_bounds(reservation) {
            Ok((arrival, departure)) => booked.extend(nights(arrival, departure)),
            Err(e) => warn!("Skipping reservation with unusable dates: {}", e),
        }
    }

    booked
}

/// Renders dates as ISO strings.
pub fn to_iso_strings<'a>(dates: impl IntoIterator<Item = &'a NaiveDate>) -> Vec<String> {
    dates
        .into_iter()
        .map(|d| d.format(ISO_DATE_FORMAT).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> NaiveDate {
        parse_calendar_date(value).unwrap()
    }

    #[test]
    fn test_departure_is_excluded() {
        let booked = booked_nights(&[Reservation::new("2024-01-10", "2024-01-13")]);
        assert_eq!(
            to_iso_strings(&booked),
            vec!["2024-01-10", "2024-01-11", "2024-01-12"]
        );
    }

    #[test]
    fn test_no_reservations() {
        assert!(booked_nights(&[]).is_empty());
    }

    #[test]
    fn test_overlapping_reservations_are_deduplicated() {
        let booked = booked_nights(&[
            Reservation::new("2024-01-10", "2024-01-13"),
            Reservation::new("2024-01-12", "2024-01-15"),
        ]);
        assert_eq!(
            to_iso_strings(&booked),
            vec![
                "2024-01-10",
                "2024-01-11",
                "2024-01-12",
                "2024-01-13",
                "2024-01-14"
            ]
        );
    }

    #[test]
    fn test_back_to_back_stays_share_no_night() {
        let booked = booked_nights(&[
            Reservation::new("2024-03-01", "2024-03-03"),
            Reservation::new("2024-03-03", "2024-03-04"),
        ]);
        assert_eq!(booked.len(), 3);
    }

    #[test]
    fn test_same_day_departure_books_nothing() {
        assert_eq!(nights(date("2024-05-05"), date("2024-05-05")).count(), 0);
        assert_eq!(nights(date("2024-05-06"), date("2024-05-05")).count(), 0);
    }

    #[test]
    fn test_crosses_month_and_leap_day() {
        let all: Vec<_> = nights(date("2024-02-28"), date("2024-03-02")).collect();
        assert_eq!(
            to_iso_strings(&all),
            vec!["2024-02-28", "2024-02-29", "2024-03-01"]
        );
    }

    #[test]
    fn test_dst_transition_is_not_skipped() {
        // US spring-forward day
        let all: Vec<_> = nights(date("2024-03-09"), date("2024-03-12")).collect();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_malformed_date_is_rejected() {
        let result = stay_bounds(&Reservation::new("10/01/2024", "2024-01-13"));
        assert!(matches!(result, Err(GatewayError::InvalidDate(_))));
    }

    #[test]
    fn test_missing_date_is_rejected() {
        let reservation = Reservation {
            arrival_date: Some("2024-01-10".to_string()),
            departure_date: None,
        };
        assert!(matches!(
            stay_bounds(&reservation),
            Err(GatewayError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_unusable_reservation_is_skipped() {
        let booked = booked_nights(&[
            Reservation::new("2024-01-10", "2024-01-12"),
            Reservation::new("", "2024-02-01"),
            Reservation::new("soon", "later"),
            Reservation {
                arrival_date: None,
                departure_date: Some("2024-03-01".to_string()),
            },
        ]);
        assert_eq!(to_iso_strings(&booked), vec!["2024-01-10", "2024-01-11"]);
    }
}
