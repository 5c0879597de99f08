use std::sync::OnceLock;

use indexmap::IndexMap;

/// Resolves place names to regions the map surface knows.
pub trait GeoIndex: Send + Sync {
    /// Canonical region name for `name`, or `None` when unrecognized.
    fn resolve(&self, name: &str) -> Option<&str>;

    fn is_recognized(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }
}

/// Country-level index matching the region names of the default world map.
///
/// Lookup is case-insensitive and accepts common aliases (`USA`, `UK`, ...).
#[derive(Debug, Default, Clone, Copy)]
pub struct WorldCountryIndex;

const WORLD_COUNTRIES: &[&str] = &[
    "Afghanistan",
    "Albania",
    "Algeria",
    "Angola",
    "Argentina",
    "Armenia",
    "Australia",
    "Austria",
    "Azerbaijan",
    "Bangladesh",
    "Belarus",
    "Belgium",
    "Bolivia",
    "Bosnia and Herz.",
    "Brazil",
    "Bulgaria",
    "Cambodia",
    "Cameroon",
    "Canada",
    "Chile",
    "China",
    "Colombia",
    "Costa Rica",
    "Croatia",
    "Cuba",
    "Cyprus",
    "Czech Rep.",
    "Dem. Rep. Korea",
    "Denmark",
    "Ecuador",
    "Egypt",
    "Estonia",
    "Ethiopia",
    "Finland",
    "France",
    "Georgia",
    "Germany",
    "Ghana",
    "Greece",
    "Hungary",
    "Iceland",
    "India",
    "Indonesia",
    "Iran",
    "Iraq",
    "Ireland",
    "Israel",
    "Italy",
    "Japan",
    "Jordan",
    "Kazakhstan",
    "Kenya",
    "Korea",
    "Kuwait",
    "Laos",
    "Latvia",
    "Lebanon",
    "Lithuania",
    "Luxembourg",
    "Malaysia",
    "Malta",
    "Mexico",
    "Mongolia",
    "Morocco",
    "Myanmar",
    "Nepal",
    "Netherlands",
    "New Zealand",
    "Nigeria",
    "Norway",
    "Oman",
    "Pakistan",
    "Panama",
    "Peru",
    "Philippines",
    "Poland",
    "Portugal",
    "Qatar",
    "Romania",
    "Russia",
    "Saudi Arabia",
    "Serbia",
    "Singapore",
    "Slovakia",
    "Slovenia",
    "South Africa",
    "Spain",
    "Sri Lanka",
    "Sweden",
    "Switzerland",
    "Syria",
    "Taiwan",
    "Thailand",
    "Tunisia",
    "Turkey",
    "Ukraine",
    "United Arab Emirates",
    "United Kingdom",
    "United States",
    "Uruguay",
    "Uzbekistan",
    "Venezuela",
    "Vietnam",
];

const WORLD_ALIASES: &[(&str, &str)] = &[
    ("usa", "United States"),
    ("us", "United States"),
    ("united states of america", "United States"),
    ("uk", "United Kingdom"),
    ("great britain", "United Kingdom"),
    ("england", "United Kingdom"),
    ("south korea", "Korea"),
    ("republic of korea", "Korea"),
    ("north korea", "Dem. Rep. Korea"),
    ("czech republic", "Czech Rep."),
    ("czechia", "Czech Rep."),
    ("bosnia and herzegovina", "Bosnia and Herz."),
    ("russian federation", "Russia"),
    ("viet nam", "Vietnam"),
    ("uae", "United Arab Emirates"),
    ("türkiye", "Turkey"),
    ("turkiye", "Turkey"),
];

fn world_lookup() -> &'static IndexMap<String, &'static str> {
    static LOOKUP: OnceLock<IndexMap<String, &'static str>> = OnceLock::new();
    LOOKUP.get_or_init(|| {
        WORLD_COUNTRIES
            .iter()
            .map(|name| (name.to_lowercase(), *name))
            .chain(
                WORLD_ALIASES
                    .iter()
                    .map(|(alias, name)| ((*alias).to_owned(), *name)),
            )
            .collect()
    })
}

impl GeoIndex for WorldCountryIndex {
    fn resolve(&self, name: &str) -> Option<&str> {
        world_lookup()
            .get(name.trim().to_lowercase().as_str())
            .copied()
    }
}

/// Index over a caller-supplied region list, for custom map geometries.
#[derive(Debug, Clone, Default)]
pub struct StaticGeoIndex {
    regions: IndexMap<String, String>,
}

impl StaticGeoIndex {
    #[must_use]
    pub fn new<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let regions = regions
            .into_iter()
            .map(|region| {
                let region = region.into();
                (region.to_lowercase(), region)
            })
            .collect();
        Self { regions }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: &str, region: &str) -> Self {
        self.regions.insert(alias.to_lowercase(), region.to_owned());
        self
    }
}

impl GeoIndex for StaticGeoIndex {
    fn resolve(&self, name: &str) -> Option<&str> {
        self.regions
            .get(name.trim().to_lowercase().as_str())
            .map(String::as_str)
    }
}
