//! Visited-country lookup for the world map legend and profile pages.

use std::collections::BTreeSet;

use crate::Country;

/// Alternate spellings the map data uses for a few countries
const ALIASES: &[(&str, &[&str])] = &[
    ("fra", &["fra", "fr", "france"]),
    ("deu", &["deu", "de", "germany"]),
    ("esp", &["esp", "es", "spain"]),
    ("jpn", &["jpn", "jp", "japan"]),
    ("mar", &["mar", "ma", "morocco"]),
];

/// Lowercased ISO codes of the countries a user has visited
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisitedCountries {
    codes: BTreeSet<String>,
}

impl VisitedCountries {
    pub fn from_countries<'a>(countries: impl IntoIterator<Item = &'a Country>) -> Self {
        let codes = countries
            .into_iter()
            .map(|country| country.code_iso.trim().to_lowercase())
            .filter(|code| !code.is_empty())
            .collect();
        Self { codes }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Whether a map feature's country code counts as visited, either
    /// directly or through the alias table
    pub fn contains(&self, code: &str) -> bool {
        let code = code.trim().to_lowercase();
        if code.is_empty() {
            return false;
        }
        if self.codes.contains(&code) {
            return true;
        }
        ALIASES.iter().any(|(standard, variations)| {
            variations.contains(&code.as_str()) && self.codes.contains(*standard)
        })
    }
}

/// Visited countries sorted by name, without duplicates
pub fn sorted_by_name(countries: &[Country]) -> Vec<Country> {
    let mut seen = BTreeSet::new();
    let mut unique: Vec<Country> = countries
        .iter()
        .filter(|country| seen.insert(country.code_iso.to_lowercase()))
        .cloned()
        .collect();
    unique.sort_by(|a, b| a.nom.to_lowercase().cmp(&b.nom.to_lowercase()));
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(code: &str, nom: &str) -> Country {
        Country {
            code_iso: code.to_string(),
            nom: nom.to_string(),
        }
    }

    #[test]
    fn test_direct_match_is_case_insensitive() {
        let visited = VisitedCountries::from_countries(&[country("IT", "Italie")]);
        assert!(visited.contains("it"));
        assert!(visited.contains("IT"));
        assert!(!visited.contains("es"));
        assert!(!visited.contains(""));
    }

    #[test]
    fn test_aliases_resolve_to_standard_code() {
        let visited = VisitedCountries::from_countries(&[country("FRA", "France")]);
        assert!(visited.contains("FR"));
        assert!(visited.contains("france"));
        assert!(!visited.contains("de"));
    }

    #[test]
    fn test_sorted_by_name_dedups() {
        let countries = vec![
            country("JP", "Japon"),
            country("FR", "France"),
            country("jp", "Japon"),
        ];
        let names: Vec<String> = sorted_by_name(&countries).into_iter().map(|c| c.nom).collect();
        assert_eq!(names, vec!["France", "Japon"]);
    }
}
