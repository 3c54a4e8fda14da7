//! Place-name search helpers: request sequencing, GeoNames filtering,
//! ghost-text completion and the recent-searches history.

use serde::{Deserialize, Serialize};

use crate::{GeoNamesPlace, SearchResults};

/// Queries shorter than this are not sent
pub const MIN_QUERY_LEN: usize = 2;

/// Maximum number of entries kept in the recent-searches history
pub const RECENT_SEARCHES_CAP: usize = 6;

/// Whether a query is long enough to hit the network
pub fn is_searchable(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_LEN
}

/// Opaque tag attached to an outgoing search
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(u64);

/// Hands out monotonically increasing tickets and remembers the latest.
///
/// A response may only be applied if its ticket is still the latest one
/// issued, so a slow response can never overwrite results for a newer query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSequencer {
    latest: u64,
}

impl SearchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket for a new request, superseding every earlier one
    pub fn issue(&mut self) -> SearchTicket {
        self.latest += 1;
        SearchTicket(self.latest)
    }

    /// Invalidates all outstanding tickets, e.g. when the input is cleared
    pub fn cancel_all(&mut self) {
        self.latest += 1;
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.latest
    }
}

/// A GeoNames result with every field needed to create a place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub geoname_id: Option<i64>,
    pub name: String,
    pub country_name: String,
    pub country_code: String,
    pub lat: String,
    pub lng: String,
}

impl PlaceCandidate {
    /// "City, Country" label shown in the search box once selected
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country_name)
    }
}

/// Keeps only GeoNames entries that carry a name, a country name and code
/// and both coordinates
pub fn usable_geonames(raw: Vec<GeoNamesPlace>) -> Vec<PlaceCandidate> {
    fn present(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.trim().is_empty())
    }

    raw.into_iter()
        .filter_map(|place| {
            Some(PlaceCandidate {
                geoname_id: place.geoname_id,
                name: present(place.name)?,
                country_name: present(place.country_name)?,
                country_code: present(place.country_code)?,
                lat: present(place.lat)?,
                lng: present(place.lng)?,
            })
        })
        .collect()
}

/// Completion shown after the cursor: the first city (or failing that the
/// first country) when it extends what was typed, case-insensitively.
pub fn ghost_text(query: &str, results: &SearchResults) -> Option<String> {
    if query.is_empty() {
        return None;
    }
    let first = results
        .lieux
        .first()
        .map(|place| place.nom_ville.as_str())
        .or_else(|| results.pays.first().map(|country| country.nom.as_str()))?;

    let typed = query.chars().count();
    if first.chars().count() <= typed || !first.to_lowercase().starts_with(&query.to_lowercase()) {
        return None;
    }
    let rest: String = first.chars().skip(typed).collect();
    Some(format!("{}{}", query, rest))
}

/// Kind of entity a recent search points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecentKind {
    Lieu,
    Pays,
}

/// One remembered search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentSearch {
    pub label: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<RecentKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl RecentSearch {
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: None,
            id: None,
        }
    }

    fn dedup_key(&self) -> String {
        match &self.id {
            Some(id) => {
                let kind = match self.kind {
                    Some(RecentKind::Lieu) => "lieu",
                    Some(RecentKind::Pays) => "pays",
                    None => "",
                };
                format!("{}:{}", kind, id)
            }
            None => self.label.clone(),
        }
    }
}

/// Bounded, most-recent-first history persisted under the `recent` key
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecentSearches {
    items: Vec<RecentSearch>,
}

impl RecentSearches {
    /// Restores the history from its stored JSON. Older clients stored bare
    /// strings; those become text-only entries. Malformed input is dropped.
    pub fn from_json(raw: &str) -> Self {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Stored {
            Entry(RecentSearch),
            Label(String),
        }

        let items = serde_json::from_str::<Vec<Stored>>(raw)
            .map(|stored| {
                stored
                    .into_iter()
                    .map(|item| match item {
                        Stored::Entry(entry) => entry,
                        Stored::Label(label) => RecentSearch::text(label),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { items }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.items).unwrap_or_else(|_| "[]".to_string())
    }

    /// Puts `entry` first, removes duplicates and keeps the newest
    /// [`RECENT_SEARCHES_CAP`] entries. Blank labels are ignored.
    pub fn record(&mut self, entry: RecentSearch) {
        if entry.label.trim().is_empty() {
            return;
        }
        let mut seen = std::collections::HashSet::new();
        let mut next = Vec::with_capacity(RECENT_SEARCHES_CAP);
        for item in std::iter::once(entry).chain(self.items.drain(..)) {
            if seen.insert(item.dedup_key()) {
                next.push(item);
            }
        }
        next.truncate(RECENT_SEARCHES_CAP);
        self.items = next;
    }

    pub fn items(&self) -> &[RecentSearch] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visited::fixtures::place;
    use crate::Country;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let mut sequencer = SearchSequencer::new();
        let first = sequencer.issue();
        let second = sequencer.issue();

        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));

        sequencer.cancel_all();
        assert!(!sequencer.is_current(second));
    }

    #[test]
    fn test_short_queries_are_not_searchable() {
        assert!(!is_searchable(""));
        assert!(!is_searchable(" p "));
        assert!(is_searchable("pa"));
        assert!(is_searchable("Ōs"));
    }

    #[test]
    fn test_incomplete_geonames_are_dropped() {
        let complete = GeoNamesPlace {
            geoname_id: Some(2988507),
            name: Some("Paris".to_string()),
            country_name: Some("France".to_string()),
            country_code: Some("FR".to_string()),
            lat: Some("48.85341".to_string()),
            lng: Some("2.3488".to_string()),
        };
        let missing_code = GeoNamesPlace {
            country_code: None,
            ..complete.clone()
        };
        let blank_lat = GeoNamesPlace {
            lat: Some(" ".to_string()),
            ..complete.clone()
        };

        let usable = usable_geonames(vec![missing_code, complete, blank_lat]);

        assert_eq!(usable.len(), 1);
        assert_eq!(usable[0].label(), "Paris, France");
        assert_eq!(usable[0].geoname_id, Some(2988507));
    }

    #[test]
    fn test_ghost_text_extends_first_city() {
        let results = SearchResults {
            lieux: vec![place(1, "Paraty", "BR", "Brazil")],
            pays: vec![Country {
                code_iso: "PY".to_string(),
                nom: "Paraguay".to_string(),
            }],
        };
        assert_eq!(ghost_text("par", &results), Some("paraty".to_string()));
        assert_eq!(ghost_text("Paraty", &results), None);
        assert_eq!(ghost_text("lim", &results), None);
        assert_eq!(ghost_text("", &results), None);
    }

    #[test]
    fn test_ghost_text_falls_back_to_country() {
        let results = SearchResults {
            lieux: vec![],
            pays: vec![Country {
                code_iso: "PY".to_string(),
                nom: "Paraguay".to_string(),
            }],
        };
        assert_eq!(ghost_text("Parag", &results), Some("Paraguay".to_string()));
    }

    #[test]
    fn test_recent_searches_dedup_and_cap() {
        let mut recent = RecentSearches::default();
        for i in 0..8 {
            recent.record(RecentSearch::text(format!("q{}", i)));
        }
        recent.record(RecentSearch::text("q5"));
        recent.record(RecentSearch::text("  "));

        let labels: Vec<&str> = recent.items().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["q5", "q7", "q6", "q4", "q3", "q2"]);
    }

    #[test]
    fn test_recent_searches_keyed_by_id_when_present() {
        let mut recent = RecentSearches::default();
        recent.record(RecentSearch {
            label: "Paris, France".to_string(),
            kind: Some(RecentKind::Lieu),
            id: Some("abc".to_string()),
        });
        recent.record(RecentSearch {
            label: "Paris (renamed)".to_string(),
            kind: Some(RecentKind::Lieu),
            id: Some("abc".to_string()),
        });
        recent.record(RecentSearch::text("Paris, France"));

        assert_eq!(recent.items().len(), 2);
        assert_eq!(recent.items()[1].label, "Paris (renamed)");
    }

    #[test]
    fn test_recent_searches_accepts_legacy_strings() {
        let recent = RecentSearches::from_json(r#"["Tokyo", {"label": "Lima", "type": "lieu", "id": "x"}]"#);
        assert_eq!(recent.items().len(), 2);
        assert_eq!(recent.items()[0], RecentSearch::text("Tokyo"));
        assert_eq!(recent.items()[1].kind, Some(RecentKind::Lieu));

        assert!(RecentSearches::from_json("not json").items().is_empty());
    }
}
