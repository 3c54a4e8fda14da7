//! Distinct visited places derived from a user's trip list.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{PlaceSummary, Trip};

/// One entry per unique place across a user's trips
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistinctVisitedPlace {
    pub place: PlaceSummary,
    /// Number of trips referencing this place, always >= 1
    pub visit_count: u32,
    /// Start date of the latest trip, as sent by the server
    pub last_visit: String,
}

/// Parses a trip date. Accepts plain `YYYY-MM-DD` and full RFC 3339
/// timestamps; anything else yields `None`.
pub fn parse_trip_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Reduces trips to their distinct places, most recently visited first.
///
/// `None` sorts below every real date, so a trip with an unparseable start
/// date never displaces a parseable one. Sorting is stable: places sharing
/// the same latest date stay in the order they were first seen.
pub fn distinct_visited_places(trips: &[Trip]) -> Vec<DistinctVisitedPlace> {
    let mut index: HashMap<Uuid, usize> = HashMap::new();
    let mut entries: Vec<(DistinctVisitedPlace, Option<NaiveDate>)> = Vec::new();

    for trip in trips {
        let date = parse_trip_date(&trip.date_debut);
        match index.get(&trip.lieu.id) {
            Some(&slot) => {
                let (entry, latest) = &mut entries[slot];
                entry.visit_count += 1;
                if date > *latest {
                    *latest = date;
                    entry.last_visit = trip.date_debut.clone();
                }
            }
            None => {
                index.insert(trip.lieu.id, entries.len());
                entries.push((
                    DistinctVisitedPlace {
                        place: trip.lieu.clone(),
                        visit_count: 1,
                        last_visit: trip.date_debut.clone(),
                    },
                    date,
                ));
            }
        }
    }

    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.into_iter().map(|(entry, _)| entry).collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::Country;

    pub fn place(n: u128, city: &str, code: &str, country: &str) -> PlaceSummary {
        PlaceSummary {
            id: Uuid::from_u128(n),
            nom_ville: city.to_string(),
            pays: Country {
                code_iso: code.to_string(),
                nom: country.to_string(),
            },
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    pub fn trip(n: u128, lieu: &PlaceSummary, date_debut: &str) -> Trip {
        Trip {
            id: Uuid::from_u128(1000 + n),
            utilisateur: None,
            lieu: lieu.clone(),
            date_debut: date_debut.to_string(),
            date_fin: None,
            note: None,
            commentaire: String::new(),
            date_creation: None,
            medias: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{place, trip};
    use super::*;

    #[test]
    fn test_empty_trip_list_gives_no_places() {
        assert!(distinct_visited_places(&[]).is_empty());
    }

    #[test]
    fn test_repeat_visits_are_counted_and_sorted() {
        let paris = place(1, "Paris", "FR", "France");
        let tokyo = place(2, "Tokyo", "JP", "Japan");
        let trips = vec![
            trip(1, &paris, "2024-01-10"),
            trip(2, &tokyo, "2024-03-01"),
            trip(3, &paris, "2024-02-05"),
        ];

        let places = distinct_visited_places(&trips);

        assert_eq!(places.len(), 2);
        assert_eq!(places[0].place.nom_ville, "Tokyo");
        assert_eq!(places[0].visit_count, 1);
        assert_eq!(places[0].last_visit, "2024-03-01");
        assert_eq!(places[1].place.nom_ville, "Paris");
        assert_eq!(places[1].visit_count, 2);
        assert_eq!(places[1].last_visit, "2024-02-05");
    }

    #[test]
    fn test_earlier_trip_does_not_replace_latest_date() {
        let rome = place(3, "Rome", "IT", "Italy");
        let trips = vec![
            trip(1, &rome, "2023-08-20"),
            trip(2, &rome, "2021-05-01"),
            trip(3, &rome, "2023-08-19"),
        ];

        let places = distinct_visited_places(&trips);

        assert_eq!(places.len(), 1);
        assert_eq!(places[0].visit_count, 3);
        assert_eq!(places[0].last_visit, "2023-08-20");
    }

    #[test]
    fn test_ties_keep_first_encounter_order() {
        let lyon = place(4, "Lyon", "FR", "France");
        let oslo = place(5, "Oslo", "NO", "Norway");
        let lima = place(6, "Lima", "PE", "Peru");
        let trips = vec![
            trip(1, &oslo, "2022-06-01"),
            trip(2, &lyon, "2022-06-01"),
            trip(3, &lima, "2022-06-01"),
        ];

        let names: Vec<String> = distinct_visited_places(&trips)
            .into_iter()
            .map(|p| p.place.nom_ville)
            .collect();

        assert_eq!(names, vec!["Oslo", "Lyon", "Lima"]);
    }

    #[test]
    fn test_unparseable_dates_never_win() {
        let porto = place(7, "Porto", "PT", "Portugal");
        let cairo = place(8, "Cairo", "EG", "Egypt");
        let trips = vec![
            trip(1, &porto, "not-a-date"),
            trip(2, &cairo, "2020-01-01"),
            trip(3, &porto, "2019-04-02"),
            trip(4, &porto, "2019-13-45"),
        ];

        let places = distinct_visited_places(&trips);

        assert_eq!(places[0].place.nom_ville, "Cairo");
        assert_eq!(places[1].place.nom_ville, "Porto");
        assert_eq!(places[1].visit_count, 3);
        assert_eq!(places[1].last_visit, "2019-04-02");
    }

    #[test]
    fn test_places_with_only_invalid_dates_sort_last() {
        let nice = place(9, "Nice", "FR", "France");
        let bern = place(10, "Bern", "CH", "Switzerland");
        let trips = vec![trip(1, &nice, ""), trip(2, &bern, "1999-12-31")];

        let places = distinct_visited_places(&trips);

        assert_eq!(places[0].place.nom_ville, "Bern");
        assert_eq!(places[1].place.nom_ville, "Nice");
        assert_eq!(places[1].last_visit, "");
    }

    #[test]
    fn test_counts_match_input_and_recompute_is_identical() {
        let a = place(11, "A", "AA", "Aland");
        let b = place(12, "B", "BB", "Bland");
        let c = place(13, "C", "CC", "Cland");
        let trips = vec![
            trip(1, &a, "2021-01-01"),
            trip(2, &b, "2021-02-01"),
            trip(3, &a, "2021-03-01"),
            trip(4, &c, "2020-01-01"),
            trip(5, &b, "2019-01-01"),
            trip(6, &a, "2018-01-01"),
        ];

        let first = distinct_visited_places(&trips);
        let second = distinct_visited_places(&trips);

        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        let total: u32 = first.iter().map(|p| p.visit_count).sum();
        assert_eq!(total as usize, trips.len());
        let dates: Vec<&str> = first.iter().map(|p| p.last_visit.as_str()).collect();
        assert_eq!(dates, vec!["2021-03-01", "2021-02-01", "2020-01-01"]);
    }

    #[test]
    fn test_parse_trip_date_accepts_timestamps() {
        assert_eq!(
            parse_trip_date("2024-05-06T10:00:00Z"),
            NaiveDate::from_ymd_opt(2024, 5, 6)
        );
        assert_eq!(parse_trip_date(" 2024-05-06 "), NaiveDate::from_ymd_opt(2024, 5, 6));
        assert_eq!(parse_trip_date("06/05/2024"), None);
    }
}
