//! Per-screen configuration.
//!
//! Every list screen runs the same engine; what differs is captured here:
//! page size, whether answers are expanded into reply rows, which fields a
//! search looks at, which sorts the screen offers and which categorical
//! filters it exposes. Configs deserialize from YAML or JSON with camelCase
//! keys, and built-in presets cover the association site's screens.
//!
//! ```yaml
//! applicants:
//!   pageSize: 20
//!   searchFields: [author, phone, organization]
//!   dateFields: [date, regDate]
//!   filters:
//!     status: [pending, approved, rejected]
//! ```

use std::collections::BTreeMap;

use pacer_seeker::{
    Basis, FilterSpec, PageRequest, QueryEngine, Record, SearchField, SearchProfile, Slicing,
    SortKey,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Configuration of one list screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScreenConfig {
    pub name: String,
    pub page_size: usize,
    /// Expand answers into reply rows and paginate by question.
    pub threaded: bool,
    /// Fields searched when the field selector is `all`, and the only named
    /// fields a search may target.
    pub search_fields: Vec<String>,
    /// Fields a date-shaped query matches against.
    pub date_fields: Vec<String>,
    /// Field the `name` sort orders by.
    pub name_field: String,
    /// Sort keys the screen offers.
    pub sorts: Vec<SortKey>,
    pub default_sort: SortKey,
    /// Categorical filter keys and their allowed values. An empty list
    /// accepts any value.
    pub filters: BTreeMap<String, Vec<String>>,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        ScreenConfig {
            name: String::new(),
            page_size: PageRequest::DEFAULT_PAGE_SIZE,
            threaded: false,
            search_fields: vec![
                Record::TITLE.to_string(),
                Record::AUTHOR.to_string(),
                Record::CONTENT.to_string(),
            ],
            date_fields: Vec::new(),
            name_field: Record::AUTHOR.to_string(),
            sorts: SortKey::ALL.to_vec(),
            default_sort: SortKey::New,
            filters: BTreeMap::new(),
        }
    }
}

/// Query-string parameters resolved against a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenParams {
    pub spec: FilterSpec,
    pub request: PageRequest,
}

impl ScreenConfig {
    /// Names of the built-in presets.
    pub const PRESETS: [&'static str; 7] = [
        "notices",
        "faqs",
        "inquiries",
        "applicants",
        "organizations",
        "individuals",
        "galleries",
    ];

    pub fn new(name: impl Into<String>) -> Self {
        ScreenConfig {
            name: name.into(),
            ..ScreenConfig::default()
        }
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn threaded(mut self, threaded: bool) -> Self {
        self.threaded = threaded;
        self
    }

    pub fn search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn date_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn name_field(mut self, field: impl Into<String>) -> Self {
        self.name_field = field.into();
        self
    }

    pub fn sorts(mut self, sorts: impl IntoIterator<Item = SortKey>) -> Self {
        self.sorts = sorts.into_iter().collect();
        self
    }

    pub fn default_sort(mut self, sort: SortKey) -> Self {
        self.default_sort = sort;
        self
    }

    /// Adds a categorical filter; no values means any value is accepted.
    pub fn filter<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters
            .insert(key.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Looks up a built-in preset by name.
    pub fn preset(name: &str) -> Result<ScreenConfig, ConfigError> {
        let config = match name {
            "notices" => ScreenConfig::new(name)
                .search_fields([Record::TITLE, Record::CONTENT, Record::AUTHOR])
                .name_field(Record::TITLE)
                .sorts([SortKey::New, SortKey::Old, SortKey::Hit])
                .filter("visibility", ["public", "private"]),
            "faqs" => ScreenConfig::new(name)
                .threaded(true)
                .search_fields([Record::TITLE, Record::CONTENT])
                .name_field(Record::TITLE)
                .sorts([SortKey::New, SortKey::Old, SortKey::Hit])
                .filter("category", Vec::<String>::new()),
            "inquiries" => ScreenConfig::new(name)
                .threaded(true)
                .filter("status", ["open", "answered"]),
            "applicants" => ScreenConfig::new(name)
                .page_size(20)
                .search_fields([Record::AUTHOR, "phone", "organization"])
                .date_fields([Record::DATE, "regDate"])
                .sorts([SortKey::New, SortKey::Old, SortKey::Name])
                .filter("status", ["pending", "approved", "rejected"])
                .filter("year", Vec::<String>::new()),
            "organizations" => ScreenConfig::new(name)
                .page_size(20)
                .search_fields([Record::TITLE, Record::AUTHOR, "phone"])
                .date_fields(["regDate"])
                .name_field(Record::TITLE)
                .sorts([SortKey::New, SortKey::Old, SortKey::Name])
                .filter("memberType", ["regular", "associate"]),
            "individuals" => ScreenConfig::new(name)
                .page_size(20)
                .search_fields([Record::AUTHOR, "phone", "email"])
                .date_fields(["regDate"])
                .sorts([SortKey::New, SortKey::Old, SortKey::Name])
                .filter("memberType", ["regular", "associate"])
                .filter("status", Vec::<String>::new()),
            "galleries" => ScreenConfig::new(name)
                .page_size(12)
                .search_fields([Record::TITLE, Record::CONTENT])
                .date_fields(["eventDate"])
                .name_field(Record::TITLE)
                .sorts([SortKey::New, SortKey::Old, SortKey::Hit])
                .filter("kind", ["photo", "video"])
                .filter("year", Vec::<String>::new()),
            other => return Err(ConfigError::UnknownPreset(other.to_string())),
        };
        Ok(config)
    }

    /// Parses and validates a single screen from YAML.
    pub fn from_yaml(source: &str) -> Result<ScreenConfig, ConfigError> {
        let config: ScreenConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a single screen from JSON.
    pub fn from_json(source: &str) -> Result<ScreenConfig, ConfigError> {
        let config: ScreenConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the rules serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::invalid(&self.name, "pageSize must be at least 1"));
        }
        if self.sorts.is_empty() {
            return Err(ConfigError::invalid(&self.name, "at least one sort is required"));
        }
        if !self.sorts.contains(&self.default_sort) {
            return Err(ConfigError::invalid(
                &self.name,
                format!("default sort '{}' is not among the allowed sorts", self.default_sort),
            ));
        }
        if self.name_field.trim().is_empty() {
            return Err(ConfigError::invalid(&self.name, "nameField must not be empty"));
        }
        Ok(())
    }

    pub fn profile(&self) -> SearchProfile {
        SearchProfile::default()
            .text_fields(self.search_fields.iter().cloned())
            .date_fields(self.date_fields.iter().cloned())
            .name_field(self.name_field.clone())
    }

    pub fn engine(&self) -> QueryEngine {
        QueryEngine::new(self.profile())
    }

    /// Threaded screens page by question so answers stay with them.
    pub fn slicing(&self) -> Slicing {
        if self.threaded {
            Slicing::Threads
        } else {
            Slicing::Rows
        }
    }

    /// Threaded screens count questions, others count rows.
    pub fn basis(&self) -> Basis {
        if self.threaded {
            Basis::Parents
        } else {
            Basis::Rows
        }
    }

    /// The spec a freshly opened screen starts with.
    pub fn default_spec(&self) -> FilterSpec {
        FilterSpec::new().sort(self.default_sort)
    }

    pub fn first_page(&self) -> PageRequest {
        PageRequest::new(1, self.page_size as i64)
    }

    pub fn allows_sort(&self, sort: SortKey) -> bool {
        self.sorts.contains(&sort)
    }

    /// Accepts a filter value if the key is configured and the value is
    /// allowed. An empty value is accepted since it clears the filter.
    pub fn allows_filter(&self, key: &str, value: &str) -> bool {
        match self.filters.get(key) {
            Some(allowed) => {
                value.trim().is_empty()
                    || allowed.is_empty()
                    || allowed.iter().any(|v| v == value.trim())
            }
            None => false,
        }
    }

    /// Maps a search field onto what this screen can search.
    ///
    /// A named field the screen does not list degrades to `all`.
    pub fn resolve_field(&self, field: SearchField) -> SearchField {
        match field {
            SearchField::Field(name) if !self.search_fields.contains(&name) => {
                debug!(screen = %self.name, field = %name, "Unknown search field, using all");
                SearchField::All
            }
            other => other,
        }
    }

    /// Brings an arbitrary spec within what this screen allows.
    ///
    /// Disallowed sorts fall back to the screen default, unknown search
    /// fields to `all`, and unknown filter keys or values are dropped.
    pub fn normalize_spec(&self, spec: FilterSpec) -> FilterSpec {
        let FilterSpec {
            query,
            search_field,
            sort,
            filters,
        } = spec;

        let sort = if self.allows_sort(sort) {
            sort
        } else {
            debug!(screen = %self.name, sort = %sort, "Sort not offered, using default");
            self.default_sort
        };

        let mut normalized = FilterSpec::new()
            .query(query)
            .search_in(self.resolve_field(search_field))
            .sort(sort);
        for (key, value) in filters {
            if self.allows_filter(&key, &value) {
                normalized.set_filter(key, value.trim());
            } else {
                debug!(screen = %self.name, key = %key, value = %value, "Dropping filter");
            }
        }
        normalized
    }

    /// Turns raw query-string pairs into a typed spec and page request.
    ///
    /// Recognized keys are `q` (or `query`), `field`, `sort`, `page`, `size`
    /// and the screen's filter keys. Anything else, and any value that does
    /// not parse, is dropped.
    pub fn parse_params<I, K, V>(&self, params: I) -> ScreenParams
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut spec = self.default_spec();
        let mut page = 1i64;
        let mut size = self.page_size as i64;

        for (key, value) in params {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "q" | "query" => spec.query = value.trim().to_string(),
                "field" => match value.parse::<SearchField>() {
                    Ok(field) => spec.search_field = self.resolve_field(field),
                    Err(e) => debug!(screen = %self.name, error = %e, "Dropping field parameter"),
                },
                "sort" => match value.parse::<SortKey>() {
                    Ok(sort) if self.allows_sort(sort) => spec.sort = sort,
                    _ => debug!(screen = %self.name, sort = %value, "Dropping sort parameter"),
                },
                "page" => match value.trim().parse::<i64>() {
                    Ok(n) => page = n,
                    Err(_) => debug!(screen = %self.name, page = %value, "Dropping page parameter"),
                },
                "size" => match value.trim().parse::<i64>() {
                    Ok(n) => size = n,
                    Err(_) => debug!(screen = %self.name, size = %value, "Dropping size parameter"),
                },
                _ if self.allows_filter(key, value) => spec.set_filter(key, value.trim()),
                _ => debug!(screen = %self.name, key = %key, value = %value, "Dropping parameter"),
            }
        }

        ScreenParams {
            spec,
            request: PageRequest::new(page, size),
        }
    }

    /// The spec part of [`ScreenConfig::parse_params`].
    pub fn spec_from_params<I, K, V>(&self, params: I) -> FilterSpec
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.parse_params(params).spec
    }
}

/// Parses a YAML map of screen name to config and validates every entry.
///
/// A screen without an explicit `name` takes its map key.
pub fn load_screens(source: &str) -> Result<BTreeMap<String, ScreenConfig>, ConfigError> {
    let mut screens: BTreeMap<String, ScreenConfig> = serde_yaml::from_str(source)?;
    for (key, config) in screens.iter_mut() {
        if config.name.is_empty() {
            config.name = key.clone();
        }
        config.validate()?;
    }
    Ok(screens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_validates() {
        for name in ScreenConfig::PRESETS {
            let config = ScreenConfig::preset(name).unwrap();
            assert_eq!(config.name, name);
            config.validate().unwrap();
        }
    }

    #[test]
    fn date_search_only_on_applicant_member_and_event_screens() {
        for name in ["notices", "faqs", "inquiries"] {
            let config = ScreenConfig::preset(name).unwrap();
            assert!(config.date_fields.is_empty(), "{name} has date fields");
        }
        for name in ["applicants", "organizations", "individuals", "galleries"] {
            let config = ScreenConfig::preset(name).unwrap();
            assert!(!config.date_fields.is_empty(), "{name} lacks date fields");
        }
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let err = ScreenConfig::preset("sponsors").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPreset(ref n) if n == "sponsors"));
    }

    #[test]
    fn threaded_screens_page_by_question() {
        let faqs = ScreenConfig::preset("faqs").unwrap();
        assert_eq!(faqs.slicing(), Slicing::Threads);
        assert_eq!(faqs.basis(), Basis::Parents);

        let notices = ScreenConfig::preset("notices").unwrap();
        assert_eq!(notices.slicing(), Slicing::Rows);
        assert_eq!(notices.basis(), Basis::Rows);
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        let err = ScreenConfig::new("x").page_size(0).validate().unwrap_err();
        assert!(err.to_string().contains("pageSize"));
    }

    #[test]
    fn validate_rejects_default_sort_outside_sorts() {
        let config = ScreenConfig::new("x")
            .sorts([SortKey::New, SortKey::Old])
            .default_sort(SortKey::Hit);
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "screen 'x': default sort 'hit' is not among the allowed sorts"
        );
    }

    #[test]
    fn from_yaml_fills_defaults() {
        let config = ScreenConfig::from_yaml("name: faqs\nthreaded: true\n").unwrap();
        assert_eq!(config.page_size, 10);
        assert!(config.threaded);
        assert_eq!(config.default_sort, SortKey::New);
        assert_eq!(config.sorts.len(), 4);
    }

    #[test]
    fn from_json_reads_camel_case() {
        let config = ScreenConfig::from_json(
            r#"{"name":"g","pageSize":12,"dateFields":["eventDate"],"defaultSort":"old"}"#,
        )
        .unwrap();
        assert_eq!(config.page_size, 12);
        assert_eq!(config.date_fields, vec!["eventDate"]);
        assert_eq!(config.default_sort, SortKey::Old);
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let err = ScreenConfig::from_yaml("pageSize: [").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn load_screens_names_entries_by_key() {
        let yaml = r#"
inquiries:
  threaded: true
  dateFields: [date]
  filters:
    status: [open, answered]
galleries:
  pageSize: 12
"#;
        let screens = load_screens(yaml).unwrap();
        assert_eq!(screens.len(), 2);
        assert_eq!(screens["inquiries"].name, "inquiries");
        assert_eq!(screens["galleries"].page_size, 12);
    }

    #[test]
    fn load_screens_validates_each_entry() {
        let err = load_screens("broken:\n  pageSize: 0\n").unwrap_err();
        assert!(err.to_string().starts_with("screen 'broken'"));
    }

    #[test]
    fn parse_params_builds_typed_spec() {
        let inquiries = ScreenConfig::preset("inquiries").unwrap();
        let params = inquiries.parse_params([
            ("q", " refund "),
            ("field", "content"),
            ("sort", "hit"),
            ("status", "open"),
            ("page", "3"),
            ("size", "5"),
        ]);
        assert_eq!(params.spec.query, "refund");
        assert_eq!(params.spec.search_field, SearchField::Content);
        assert_eq!(params.spec.sort, SortKey::Hit);
        assert_eq!(params.spec.filters.get("status").map(String::as_str), Some("open"));
        assert_eq!(params.request, PageRequest::new(3, 5));
    }

    #[test]
    fn parse_params_drops_what_the_screen_does_not_offer() {
        let notices = ScreenConfig::preset("notices").unwrap();
        let params = notices.parse_params([
            ("sort", "name"),
            ("visibility", "secret"),
            ("status", "open"),
            ("page", "two"),
            ("utm_source", "mail"),
        ]);
        assert_eq!(params.spec, notices.default_spec());
        assert_eq!(params.request, notices.first_page());
    }

    #[test]
    fn unconfigured_search_field_degrades_to_all() {
        let applicants = ScreenConfig::preset("applicants").unwrap();
        let spec = applicants.spec_from_params([("field", "phone")]);
        assert_eq!(spec.search_field, SearchField::Field("phone".into()));

        let spec = applicants.spec_from_params([("field", "password")]);
        assert_eq!(spec.search_field, SearchField::All);
    }

    #[test]
    fn normalize_spec_falls_back_to_screen_default_sort() {
        let galleries = ScreenConfig::preset("galleries").unwrap();
        let spec = galleries.normalize_spec(
            FilterSpec::new()
                .sort(SortKey::Name)
                .filter("kind", "photo")
                .filter("color", "red"),
        );
        assert_eq!(spec.sort, SortKey::New);
        assert_eq!(spec.filters.len(), 1);
        assert_eq!(spec.filters["kind"], "photo");
    }

    #[test]
    fn open_filter_accepts_any_value() {
        let applicants = ScreenConfig::preset("applicants").unwrap();
        assert!(applicants.allows_filter("year", "2024"));
        assert!(applicants.allows_filter("status", ""));
        assert!(!applicants.allows_filter("status", "archived"));
        assert!(!applicants.allows_filter("kind", "photo"));
    }
}
