use std::time::{SystemTime, UNIX_EPOCH};

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::mode::AccessMode;

/// Sentinel stored in an access-mode field that has no URL.
pub const UNSET_URL: &str = "#";

/// Milliseconds since the UNIX epoch, used as a record's creation id.
///
/// The id only aids debugging; records are always located by name.
pub fn creation_id() -> i64 {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    i64::try_from(millis).unwrap_or(i64::MAX)
}

/// A single dashboard entry.
///
/// `name` is the lookup key for every mutation. Fields this type does not
/// know about are kept in `extra` so rewriting a snapshot never drops data.
/// A known field holding a value of the wrong JSON type (say a string `id`)
/// is kept in `extra` as well and written back unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WebsiteRecord {
    pub id: Option<i64>,
    /// Empty when the stored `name` is missing or not a string.
    pub name: String,
    pub description: Option<String>,
    /// Filename relative to the images directory.
    pub image: Option<String>,
    pub intranet: Option<String>,
    pub ipv6: Option<String>,
    pub frp: Option<String>,
    pub easytier: Option<String>,
    pub extra: Map<String, Value>,
}

/// Take `key` out of `fields` if it holds a string. `null` is dropped;
/// any other value stays where it is.
fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key) {
        Some(Value::String(_)) | Some(Value::Null) => match fields.remove(key) {
            Some(Value::String(value)) => Some(value),
            _ => None,
        },
        _ => None,
    }
}

fn take_id(fields: &mut Map<String, Value>) -> Option<i64> {
    match fields.get("id") {
        Some(Value::Number(n)) if n.is_i64() => {
            let id = n.as_i64();
            fields.remove("id");
            id
        }
        Some(Value::Null) => {
            fields.remove("id");
            None
        }
        _ => None,
    }
}

impl<'de> Deserialize<'de> for WebsiteRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            id: take_id(&mut fields),
            name: take_string(&mut fields, "name").unwrap_or_default(),
            description: take_string(&mut fields, "description"),
            image: take_string(&mut fields, "image"),
            intranet: take_string(&mut fields, "intranet"),
            ipv6: take_string(&mut fields, "ipv6"),
            frp: take_string(&mut fields, "frp"),
            easytier: take_string(&mut fields, "easytier"),
            extra: fields,
        })
    }
}

impl Serialize for WebsiteRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        let mut written: Vec<&str> = Vec::with_capacity(8);

        if let Some(id) = self.id {
            map.serialize_entry("id", &id)?;
            written.push("id");
        }
        if !(self.name.is_empty() && self.extra.contains_key("name")) {
            map.serialize_entry("name", &self.name)?;
            written.push("name");
        }
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
            written.push("description");
        }
        // `image` is always present, as `null` when unset.
        if self.image.is_some() || !self.extra.contains_key("image") {
            map.serialize_entry("image", &self.image)?;
            written.push("image");
        }
        for mode in AccessMode::ALL {
            if let Some(url) = self.raw_url(mode) {
                map.serialize_entry(mode.key(), url)?;
                written.push(mode.key());
            }
        }
        for (key, value) in &self.extra {
            if !written.contains(&key.as_str()) {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

impl WebsiteRecord {
    /// A record with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style setter for one access-mode URL.
    pub fn with_url(mut self, mode: AccessMode, url: impl Into<String>) -> Self {
        *self.url_slot(mode) = Some(url.into());
        self
    }

    /// Raw stored value for a mode, including the `#` sentinel.
    pub fn raw_url(&self, mode: AccessMode) -> Option<&str> {
        match mode {
            AccessMode::Intranet => self.intranet.as_deref(),
            AccessMode::Ipv6 => self.ipv6.as_deref(),
            AccessMode::Frp => self.frp.as_deref(),
            AccessMode::Easytier => self.easytier.as_deref(),
        }
    }

    /// The navigable URL for a mode, or `None` when absent, empty, or `#`.
    pub fn url_for(&self, mode: AccessMode) -> Option<&str> {
        self.raw_url(mode)
            .map(str::trim)
            .filter(|url| !url.is_empty() && *url != UNSET_URL)
    }

    /// Mutable access to the field backing `mode`.
    pub fn url_slot(&mut self, mode: AccessMode) -> &mut Option<String> {
        match mode {
            AccessMode::Intranet => &mut self.intranet,
            AccessMode::Ipv6 => &mut self.ipv6,
            AccessMode::Frp => &mut self.frp,
            AccessMode::Easytier => &mut self.easytier,
        }
    }

    /// Whether an icon file is attached.
    pub fn has_image(&self) -> bool {
        self.image.as_deref().is_some_and(|image| !image.trim().is_empty())
    }

    /// Uppercased first letter of the name, shown when there is no image.
    pub fn placeholder_letter(&self) -> Option<char> {
        self.name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
    }
}

/// The complete persisted collection.
///
/// `categories` is retained for compatibility with older data files and is
/// never interpreted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WebsiteSnapshot {
    #[serde(default)]
    pub websites: Vec<WebsiteRecord>,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub categories: Vec<Value>,
}

/// `categories` is never read, so a non-list value is treated as empty
/// instead of making the whole file unreadable.
fn list_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    })
}

impl WebsiteSnapshot {
    pub fn new(websites: Vec<WebsiteRecord>) -> Self {
        Self {
            websites,
            categories: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.websites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.websites.is_empty()
    }

    /// Index of the first record named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.websites.iter().position(|w| w.name == name)
    }

    /// First record named `name`.
    pub fn find(&self, name: &str) -> Option<&WebsiteRecord> {
        self.websites.iter().find(|w| w.name == name)
    }

    /// Names in display order.
    pub fn names(&self) -> Vec<&str> {
        self.websites.iter().map(|w| w.name.as_str()).collect()
    }
}
