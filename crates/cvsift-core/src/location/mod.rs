//! Place names in free text: cities, countries and ISO country codes.

mod countries;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use countries::{canonical_country, CountryTable};

/// A city and the country it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub country: String,
}

impl City {
    #[must_use]
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
        }
    }
}

/// Places mentioned in a text, in order of first mention.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Place {
    pub cities: Vec<String>,
    pub countries: Vec<String>,
}

impl Place {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty() && self.countries.is_empty()
    }
}

pub trait LocationResolver: Send + Sync {
    /// Places found in `text`, or `None` when nothing is recognized.
    fn resolve(&self, text: &str) -> Option<Place>;
}

pub trait CountryCodeLookup: Send + Sync {
    /// Two-letter code of a country name.
    fn code(&self, name: &str) -> Option<String>;
}

/// Flattened location fields of an experience or education record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub city: String,
    pub country: String,
    pub country_code: String,
}

/// Resolves `text` to record fields: every city joined with ", ", the first
/// country and its code. Anything unrecognized stays empty.
#[must_use]
pub fn resolve_location(
    resolver: &dyn LocationResolver,
    codes: &dyn CountryCodeLookup,
    text: &str,
) -> ResolvedLocation {
    if text.trim().is_empty() {
        return ResolvedLocation::default();
    }

    let Some(place) = resolver.resolve(text) else {
        tracing::debug!(text, "No location found");
        return ResolvedLocation::default();
    };

    let country = place.countries.first().cloned().unwrap_or_default();
    let country_code = if country.is_empty() {
        String::new()
    } else {
        codes.code(&country).unwrap_or_default()
    };

    ResolvedLocation {
        city: place.cities.join(", "),
        country,
        country_code,
    }
}

/// Major cities known without any gazetteer file.
const DEFAULT_CITIES: &[(&str, &str)] = &[
    ("Amsterdam", "Netherlands"),
    ("Athens", "Greece"),
    ("Bangalore", "India"),
    ("Barcelona", "Spain"),
    ("Beijing", "China"),
    ("Berlin", "Germany"),
    ("Bordeaux", "France"),
    ("Boston", "United States"),
    ("Brussels", "Belgium"),
    ("Budapest", "Hungary"),
    ("Buenos Aires", "Argentina"),
    ("Cairo", "Egypt"),
    ("Casablanca", "Morocco"),
    ("Chicago", "United States"),
    ("Copenhagen", "Denmark"),
    ("Dubai", "United Arab Emirates"),
    ("Dublin", "Ireland"),
    ("Edinburgh", "United Kingdom"),
    ("Frankfurt", "Germany"),
    ("Geneva", "Switzerland"),
    ("Hamburg", "Germany"),
    ("Helsinki", "Finland"),
    ("Istanbul", "Turkey"),
    ("Johannesburg", "South Africa"),
    ("Lagos", "Nigeria"),
    ("Lisbon", "Portugal"),
    ("London", "United Kingdom"),
    ("Los Angeles", "United States"),
    ("Lyon", "France"),
    ("Madrid", "Spain"),
    ("Manchester", "United Kingdom"),
    ("Marseille", "France"),
    ("Melbourne", "Australia"),
    ("Milan", "Italy"),
    ("Montreal", "Canada"),
    ("Moscow", "Russian Federation"),
    ("Mumbai", "India"),
    ("Munich", "Germany"),
    ("Nairobi", "Kenya"),
    ("New York", "United States"),
    ("Oslo", "Norway"),
    ("Paris", "France"),
    ("Porto", "Portugal"),
    ("Prague", "Czechia"),
    ("Rome", "Italy"),
    ("San Francisco", "United States"),
    ("Sao Paulo", "Brazil"),
    ("Seattle", "United States"),
    ("Seoul", "South Korea"),
    ("Shanghai", "China"),
    ("Stockholm", "Sweden"),
    ("Sydney", "Australia"),
    ("Tokyo", "Japan"),
    ("Toronto", "Canada"),
    ("Toulouse", "France"),
    ("Tunis", "Tunisia"),
    ("Vancouver", "Canada"),
    ("Vienna", "Austria"),
    ("Warsaw", "Poland"),
    ("Zurich", "Switzerland"),
];

/// Gazetteer lookup: country names and known cities matched as whole words,
/// case-insensitively, longest name first.
pub struct GazetteerResolver {
    pattern: Option<Regex>,
    cities: HashMap<String, City>,
}

impl GazetteerResolver {
    /// Resolver over the built-in city list extended with `extra` cities.
    /// Extra entries override built-in ones of the same name.
    #[must_use]
    pub fn new(extra: &[City]) -> Self {
        let mut cities: HashMap<String, City> = DEFAULT_CITIES
            .iter()
            .map(|&(name, country)| (name.to_lowercase(), City::new(name, country)))
            .collect();
        for city in extra {
            cities.insert(city.name.to_lowercase(), city.clone());
        }

        let mut names: Vec<String> = countries::COUNTRIES
            .iter()
            .map(|(name, _)| (*name).to_string())
            .chain(countries::ALIASES.iter().map(|(alias, _)| (*alias).to_string()))
            .chain(cities.values().map(|c| c.name.clone()))
            .collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        names.dedup_by(|a, b| a.eq_ignore_ascii_case(b));

        let alternatives = names
            .iter()
            .map(|n| regex::escape(n))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = match RegexBuilder::new(&format!(r"\b(?:{alternatives})\b"))
            .case_insensitive(true)
            .size_limit(1 << 24)
            .build()
        {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                tracing::warn!("Failed to build gazetteer pattern: {}", e);
                None
            }
        };

        Self { pattern, cities }
    }
}

impl Default for GazetteerResolver {
    fn default() -> Self {
        Self::new(&[])
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

impl LocationResolver for GazetteerResolver {
    fn resolve(&self, text: &str) -> Option<Place> {
        let pattern = self.pattern.as_ref()?;
        let mut place = Place::default();
        let mut city_countries = Vec::new();

        for m in pattern.find_iter(text) {
            let key = m.as_str().to_lowercase();
            if let Some(country) = canonical_country(&key) {
                push_unique(&mut place.countries, country);
            }
            if let Some(city) = self.cities.get(&key) {
                push_unique(&mut place.cities, &city.name);
                let country = canonical_country(&city.country).unwrap_or(&city.country);
                push_unique(&mut city_countries, country);
            }
        }

        if place.countries.is_empty() {
            place.countries = city_countries;
        }

        (!place.is_empty()).then_some(place)
    }
}
