use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::{form_urlencoded, Url};

/// Query parameter that carries the active workspace panel
pub const CONTENT_PARAM: &str = "content";

/// Which workspace panel is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentType {
    MonthlyCalendar,
    Calendar,
    MonthlyList,
    List,
    Flow,
    #[default]
    Empty,
}

impl ContentType {
    /// Values that may appear in `?content=`. `empty` is the absence of a value.
    pub const URL_VALUES: [ContentType; 5] = [
        ContentType::MonthlyCalendar,
        ContentType::Calendar,
        ContentType::MonthlyList,
        ContentType::List,
        ContentType::Flow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::MonthlyCalendar => "monthlyCalendar",
            ContentType::Calendar => "calendar",
            ContentType::MonthlyList => "monthlyList",
            ContentType::List => "list",
            ContentType::Flow => "flow",
            ContentType::Empty => "empty",
        }
    }

    /// Parse a raw `content` query value; anything unrecognized is `None`
    pub fn from_url_value(value: &str) -> Option<Self> {
        Self::URL_VALUES.into_iter().find(|c| c.as_str() == value)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ContentType::Empty)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown content type '{0}'")]
pub struct UnknownContentType(pub String);

impl FromStr for ContentType {
    type Err = UnknownContentType;

    /// Only navigable values parse; `empty` is a state, not a destination.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::from_url_value(s).ok_or_else(|| UnknownContentType(s.to_string()))
    }
}

/// Ordered URL search parameters. Decoding is lossy and never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pairs: Vec<(String, String)>,
}

impl SearchParams {
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace every `key` entry with a single one, keeping the position of the first
    pub fn set(&mut self, key: &str, value: &str) {
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(first) => {
                self.pairs[first].1 = value.to_string();
                let mut index = 0;
                self.pairs.retain(|(k, _)| {
                    let keep = index <= first || k != key;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((key.to_string(), value.to_string())),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

/// Path plus search parameters of a workspace URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub params: SearchParams,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: SearchParams::default(),
        }
    }

    /// Accepts absolute URLs, absolute paths (`/workspace?content=list`) and bare
    /// query strings (`?content=list`). Unparseable input falls back to `default_path`.
    pub fn parse(input: &str, default_path: &str) -> Self {
        let input = input.trim();
        if let Some(query) = input.strip_prefix('?') {
            return Self {
                path: default_path.to_string(),
                params: SearchParams::parse(query),
            };
        }

        let parsed = Url::parse(input).or_else(|_| {
            Url::parse("http://workspace.invalid").and_then(|base| base.join(input))
        });

        match parsed {
            Ok(url) => Self {
                path: url.path().to_string(),
                params: SearchParams::parse(url.query().unwrap_or("")),
            },
            Err(e) => {
                tracing::debug!("Falling back to {} for unparseable location '{}': {}", default_path, input, e);
                Self::new(default_path)
            }
        }
    }

    pub fn href(&self) -> String {
        if self.params.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.params.to_query_string())
        }
    }
}

/// Resolve the panel named by `?content=`. Missing or unrecognized values yield `Empty`.
pub fn content_from_query(params: &SearchParams) -> ContentType {
    params
        .get(CONTENT_PARAM)
        .and_then(ContentType::from_url_value)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_values_round_trip_through_query() {
        for content in ContentType::URL_VALUES {
            let params = SearchParams::parse(&format!("content={}", content));
            assert_eq!(content_from_query(&params), content);
        }
    }

    #[test]
    fn unrecognized_values_resolve_to_empty() {
        for raw in ["", "empty", "List", "calendar ", "monthly_calendar", "%FF%FE", "flow%00"] {
            let params = SearchParams::parse(&format!("content={}", raw));
            assert_eq!(content_from_query(&params), ContentType::Empty, "value {:?}", raw);
        }
        assert_eq!(content_from_query(&SearchParams::parse("tab=2")), ContentType::Empty);
        assert_eq!(content_from_query(&SearchParams::default()), ContentType::Empty);
    }

    #[test]
    fn first_content_entry_wins() {
        let params = SearchParams::parse("content=flow&content=list");
        assert_eq!(content_from_query(&params), ContentType::Flow);
    }

    #[test]
    fn set_replaces_in_place_and_drops_duplicates() {
        let mut params = SearchParams::parse("?a=1&content=list&b=2&content=flow");
        params.set("content", "calendar");
        assert_eq!(params.to_query_string(), "a=1&content=calendar&b=2");

        let mut params = SearchParams::parse("a=1");
        params.set("content", "flow");
        assert_eq!(params.to_query_string(), "a=1&content=flow");
    }

    #[test]
    fn location_parses_paths_urls_and_bare_queries() {
        let loc = Location::parse("/workspace?content=list&tab=a", "/workspace");
        assert_eq!(loc.path, "/workspace");
        assert_eq!(loc.params.get("tab"), Some("a"));

        let loc = Location::parse("https://app.example.com/workspace/x?content=flow", "/workspace");
        assert_eq!(loc.path, "/workspace/x");
        assert_eq!(content_from_query(&loc.params), ContentType::Flow);

        let loc = Location::parse("?content=calendar", "/workspace");
        assert_eq!(loc.href(), "/workspace?content=calendar");
    }

    #[test]
    fn content_type_from_str_accepts_only_navigable_values() {
        assert_eq!("monthlyList".parse::<ContentType>(), Ok(ContentType::MonthlyList));
        assert_eq!(
            "empty".parse::<ContentType>(),
            Err(UnknownContentType("empty".to_string()))
        );
        assert!("bogus".parse::<ContentType>().is_err());
    }

    #[test]
    fn serde_uses_camel_case_names() {
        let json = serde_json::to_string(&ContentType::MonthlyCalendar).unwrap();
        assert_eq!(json, "\"monthlyCalendar\"");
    }
}
