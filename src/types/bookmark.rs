use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Represents a saved bookmark as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    pub id: i64,
    pub url: String,
    /// Empty when the backend never captured a page title.
    #[serde(default, deserialize_with = "deserialize_title")]
    pub title: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_date: DateTime<Utc>,
    #[serde(rename = "visit", alias = "visit_count", default, deserialize_with = "deserialize_visits")]
    pub visit_count: u64,
}

impl Bookmark {
    /// Milliseconds since the UNIX epoch, used for numeric date ordering.
    pub fn timestamp_millis(&self) -> i64 {
        self.created_date.timestamp_millis()
    }

    /// Host of the bookmark URL without a leading `www.`.
    ///
    /// Falls back to the raw URL when it cannot be parsed.
    pub fn domain(&self) -> String {
        match url::Url::parse(&self.url) {
            Ok(parsed) => match parsed.host_str() {
                Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
                None => self.url.clone(),
            },
            Err(_) => self.url.clone(),
        }
    }
}

/// Changes to a bookmark submitted from the edit form.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookmarkEdit {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub thumbnail: Option<String>,
}

/// Body of a delete request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookmarkRef {
    pub id: i64,
    pub url: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
}

/// Accepts RFC 3339, RFC 2822 / HTTP-date, naive `YYYY-MM-DD HH:MM:SS` (UTC)
/// or integer epoch milliseconds.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Millis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {}", ms))),
        RawTimestamp::Text(text) => parse_timestamp(&text).map_err(serde::de::Error::custom),
    }
}

/// Parses the textual timestamp formats a bookmark backend may emit.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, String> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(format!("unrecognised timestamp: {}", text))
}

fn deserialize_title<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_visits<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    // Some backends send null for never-visited rows.
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}
