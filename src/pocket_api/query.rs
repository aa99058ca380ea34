use std::fmt;

use serde::{Serialize, Serializer};

use crate::pocket_api::credentials::Credentials;

/// Which items to return by read state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum State {
    /// Only unread items (the server default)
    Unread,
    /// Only archived items
    Archive,
    /// Both unread and archived items
    All,
}

/// Restricts results by favorite flag. Leaving it unset means "any".
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Favorite {
    Unfavorited,
    Favorited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Article,
    /// Videos or articles with embedded videos
    Video,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Sort {
    Newest,
    Oldest,
    /// Alphabetically by title
    Title,
    /// Alphabetically by url
    Site,
}

/// Response verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DetailType {
    /// Only titles and urls
    Simple,
    /// All data including tags, images, authors and videos
    Complete,
}

/// Tag filter: either a tag name or the "untagged" sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagFilter {
    Named(String),
    Untagged,
}

impl TagFilter {
    pub const UNTAGGED_SENTINEL: &'static str = "_untagged_";

    fn wire_value(&self) -> &str {
        match self {
            TagFilter::Named(name) => name,
            TagFilter::Untagged => Self::UNTAGGED_SENTINEL,
        }
    }
}

impl From<&str> for TagFilter {
    fn from(value: &str) -> Self {
        if value == Self::UNTAGGED_SENTINEL {
            TagFilter::Untagged
        } else {
            TagFilter::Named(value.to_string())
        }
    }
}

impl Serialize for TagFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_value())
    }
}

impl Serialize for Favorite {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(match self {
            Favorite::Unfavorited => 0,
            Favorite::Favorited => 1,
        })
    }
}

impl fmt::Display for Favorite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Favorite::Unfavorited => "0",
            Favorite::Favorited => "1",
        })
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_value())
    }
}

macro_rules! display_wire_name {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    let name = serde_variant::to_variant_name(self).map_err(|_| fmt::Error)?;
                    f.write_str(name)
                }
            }
        )*
    };
}

display_wire_name!(State, ContentType, Sort, DetailType);

/// Optional filters of a retrieve call. Unset fields are left out of the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<State>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<Favorite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<TagFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_type: Option<DetailType>,
    /// Substring match on title or url
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Unix timestamp; only items modified since then
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Only meaningful together with `count`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl RetrieveFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// All articles, archived or not, with complete details and newest first.
    pub fn all_articles() -> Self {
        Self::new()
            .state(State::All)
            .content_type(ContentType::Article)
            .detail_type(DetailType::Complete)
            .sort(Sort::Newest)
    }

    pub fn state(mut self, state: State) -> Self {
        self.state = Some(state);
        self
    }

    pub fn favorite(mut self, favorite: Favorite) -> Self {
        self.favorite = Some(favorite);
        self
    }

    pub fn tag(mut self, tag: impl Into<TagFilter>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn detail_type(mut self, detail_type: DetailType) -> Self {
        self.detail_type = Some(detail_type);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn since(mut self, since: i64) -> Self {
        self.since = Some(since);
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Set filters as `name=value` pairs with their wire names and values, e.g. `state=all count=5`.
impl fmt::Display for RetrieveFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn pair(name: &str, value: Option<impl fmt::Display>) -> Option<String> {
            value.map(|value| format!("{name}={value}"))
        }

        let pairs: Vec<String> = [
            pair("state", self.state),
            pair("favorite", self.favorite),
            pair("tag", self.tag.as_ref()),
            pair("contentType", self.content_type),
            pair("sort", self.sort),
            pair("detailType", self.detail_type),
            pair("search", self.search.as_deref()),
            pair("domain", self.domain.as_deref()),
            pair("since", self.since),
            pair("count", self.count),
            pair("offset", self.offset),
        ]
        .into_iter()
        .flatten()
        .collect();

        if pairs.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&pairs.join(" "))
        }
    }
}

/// A complete retrieve request: credentials plus filters, flattened into one JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetrieveRequest {
    #[serde(flatten)]
    credentials: Credentials,
    #[serde(flatten)]
    filters: RetrieveFilters,
}

impl RetrieveRequest {
    pub fn new(credentials: &Credentials, filters: RetrieveFilters) -> Self {
        Self {
            credentials: credentials.clone(),
            filters,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn filters(&self) -> &RetrieveFilters {
        &self.filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn credentials() -> Credentials {
        Credentials::new("K", "T")
    }

    fn serialize(filters: RetrieveFilters) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(RetrieveRequest::new(&credentials(), filters)).unwrap() {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn request_keeps_credentials_and_filters() {
        let filters = RetrieveFilters::new().count(3);
        let request = RetrieveRequest::new(&credentials(), filters.clone());
        assert_eq!(request.credentials(), &credentials());
        assert_eq!(request.filters(), &filters);
    }

    #[test]
    fn no_filters_serializes_only_credentials() {
        let body = serialize(RetrieveFilters::new());
        assert_eq!(
            serde_json::Value::Object(body),
            serde_json::json!({"consumer_key": "K", "access_token": "T"})
        );
    }

    #[test]
    fn unset_filters_are_omitted() {
        let body = serialize(
            RetrieveFilters::new()
                .state(State::All)
                .content_type(ContentType::Article)
                .sort(Sort::Newest),
        );
        for key in ["consumer_key", "access_token", "state", "contentType", "sort"] {
            assert!(body.contains_key(key), "missing key {key}");
        }
        for key in [
            "favorite",
            "tag",
            "detailType",
            "search",
            "domain",
            "since",
            "count",
            "offset",
        ] {
            assert!(!body.contains_key(key), "unexpected key {key}");
        }
        assert_eq!(body["state"], "all");
        assert_eq!(body["contentType"], "article");
        assert_eq!(body["sort"], "newest");
    }

    #[test]
    fn all_filters_use_wire_names() {
        let body = serialize(
            RetrieveFilters::new()
                .state(State::Archive)
                .favorite(Favorite::Favorited)
                .tag("rust")
                .content_type(ContentType::Video)
                .sort(Sort::Site)
                .detail_type(DetailType::Simple)
                .search("async")
                .domain("example.com")
                .since(1_700_000_000)
                .count(10)
                .offset(20),
        );
        assert_eq!(
            serde_json::Value::Object(body),
            serde_json::json!({
                "consumer_key": "K",
                "access_token": "T",
                "state": "archive",
                "favorite": 1,
                "tag": "rust",
                "contentType": "video",
                "sort": "site",
                "detailType": "simple",
                "search": "async",
                "domain": "example.com",
                "since": 1_700_000_000,
                "count": 10,
                "offset": 20
            })
        );
    }

    #[rstest]
    #[case(Favorite::Unfavorited, 0)]
    #[case(Favorite::Favorited, 1)]
    fn favorite_is_sent_as_integer(#[case] favorite: Favorite, #[case] expected: u8) {
        let body = serialize(RetrieveFilters::new().favorite(favorite));
        assert_eq!(body["favorite"], expected);
    }

    #[rstest]
    #[case(TagFilter::Untagged, "_untagged_")]
    #[case(TagFilter::Named("go".into()), "go")]
    #[case(TagFilter::from("_untagged_"), "_untagged_")]
    fn tag_filter_wire_value(#[case] tag: TagFilter, #[case] expected: &str) {
        let body = serialize(RetrieveFilters::new().tag(tag));
        assert_eq!(body["tag"], expected);
    }

    #[test]
    fn offset_without_count_is_passed_through() {
        let body = serialize(RetrieveFilters::new().offset(0));
        assert_eq!(body["offset"], 0);
        assert!(!body.contains_key("count"));
    }

    #[test]
    fn all_articles_preset() {
        let filters = RetrieveFilters::all_articles();
        assert_eq!(filters.state, Some(State::All));
        assert_eq!(filters.content_type, Some(ContentType::Article));
        assert_eq!(filters.detail_type, Some(DetailType::Complete));
        assert_eq!(filters.sort, Some(Sort::Newest));
        assert_eq!(filters.count, None);
    }

    #[rstest]
    #[case(State::Unread.to_string(), "unread")]
    #[case(ContentType::Image.to_string(), "image")]
    #[case(Sort::Title.to_string(), "title")]
    #[case(DetailType::Complete.to_string(), "complete")]
    #[case(Favorite::Favorited.to_string(), "1")]
    fn display_uses_wire_name(#[case] displayed: String, #[case] expected: &str) {
        assert_eq!(displayed, expected);
    }

    #[rstest]
    #[case(RetrieveFilters::new(), "none")]
    #[case(
        RetrieveFilters::all_articles().count(5),
        "state=all contentType=article sort=newest detailType=complete count=5"
    )]
    #[case(
        RetrieveFilters::new()
            .favorite(Favorite::Unfavorited)
            .tag(TagFilter::Untagged)
            .search("rust")
            .domain("example.com")
            .since(1000)
            .offset(0),
        "favorite=0 tag=_untagged_ search=rust domain=example.com since=1000 offset=0"
    )]
    fn filters_display_set_pairs_with_wire_names(
        #[case] filters: RetrieveFilters,
        #[case] expected: &str,
    ) {
        assert_eq!(filters.to_string(), expected);
    }
}
