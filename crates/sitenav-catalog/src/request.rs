use serde::{Deserialize, Serialize};
use sitenav_types::{creation_id, AccessMode, WebsiteRecord, UNSET_URL};

/// Fields accepted when creating a website.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWebsite {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub intranet: Option<String>,
    #[serde(default)]
    pub ipv6: Option<String>,
    #[serde(default)]
    pub frp: Option<String>,
    #[serde(default)]
    pub easytier: Option<String>,
}

impl NewWebsite {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_url(mut self, mode: AccessMode, url: impl Into<String>) -> Self {
        *self.url_slot(mode) = Some(url.into());
        self
    }

    fn url_slot(&mut self, mode: AccessMode) -> &mut Option<String> {
        match mode {
            AccessMode::Intranet => &mut self.intranet,
            AccessMode::Ipv6 => &mut self.ipv6,
            AccessMode::Frp => &mut self.frp,
            AccessMode::Easytier => &mut self.easytier,
        }
    }

    /// Build the stored record, stamping a creation id.
    ///
    /// Access modes left empty are stored as the `#` sentinel.
    pub fn into_record(mut self) -> WebsiteRecord {
        let mut record = WebsiteRecord {
            id: Some(creation_id()),
            name: self.name.clone(),
            description: non_empty(self.description.take()),
            image: non_empty(self.image.take()),
            ..Default::default()
        };
        for mode in AccessMode::ALL {
            let url = non_empty(self.url_slot(mode).take()).unwrap_or_else(|| UNSET_URL.into());
            *record.url_slot(mode) = Some(url);
        }
        record
    }
}

/// A partial update. `None` or an empty string keeps the stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteUpdate {
    /// New name; the path key only locates the record.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub intranet: Option<String>,
    #[serde(default)]
    pub ipv6: Option<String>,
    #[serde(default)]
    pub frp: Option<String>,
    #[serde(default)]
    pub easytier: Option<String>,
}

impl WebsiteUpdate {
    /// The rename target, if one was supplied.
    pub fn new_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }

    /// Merge the supplied fields into `record`.
    pub fn apply_to(self, record: &mut WebsiteRecord) {
        if let Some(name) = non_empty(self.name) {
            record.name = name;
        }
        if let Some(description) = non_empty(self.description) {
            record.description = Some(description);
        }
        if let Some(image) = non_empty(self.image) {
            record.image = Some(image);
        }
        let urls = [
            (AccessMode::Intranet, self.intranet),
            (AccessMode::Ipv6, self.ipv6),
            (AccessMode::Frp, self.frp),
            (AccessMode::Easytier, self.easytier),
        ];
        for (mode, url) in urls {
            if let Some(url) = non_empty(url) {
                *record.url_slot(mode) = Some(url);
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_website_fills_sentinels() {
        let record = NewWebsite::named("nas")
            .with_url(AccessMode::Intranet, "http://192.168.1.5")
            .into_record();

        assert_eq!(record.name, "nas");
        assert!(record.id.is_some());
        assert_eq!(record.intranet.as_deref(), Some("http://192.168.1.5"));
        assert_eq!(record.ipv6.as_deref(), Some(UNSET_URL));
        assert_eq!(record.frp.as_deref(), Some(UNSET_URL));
        assert_eq!(record.easytier.as_deref(), Some(UNSET_URL));
        assert_eq!(record.image, None);
    }

    #[test]
    fn new_website_drops_blank_description() {
        let mut req = NewWebsite::named("x");
        req.description = Some("   ".into());
        req.image = Some(String::new());
        let record = req.into_record();
        assert_eq!(record.description, None);
        assert_eq!(record.image, None);
    }

    #[test]
    fn update_merges_only_supplied_fields() {
        let mut record = WebsiteRecord::named("old")
            .with_url(AccessMode::Intranet, "http://a")
            .with_url(AccessMode::Frp, "http://frp");
        record.image = Some("image-1.png".into());

        let update = WebsiteUpdate {
            intranet: Some("http://b".into()),
            frp: Some(String::new()),
            ..Default::default()
        };
        update.apply_to(&mut record);

        assert_eq!(record.name, "old");
        assert_eq!(record.intranet.as_deref(), Some("http://b"));
        assert_eq!(record.frp.as_deref(), Some("http://frp"));
        assert_eq!(record.image.as_deref(), Some("image-1.png"));
    }

    #[test]
    fn update_renames() {
        let mut record = WebsiteRecord::named("old");
        let update = WebsiteUpdate {
            name: Some("new".into()),
            ..Default::default()
        };
        assert_eq!(update.new_name(), Some("new"));
        update.apply_to(&mut record);
        assert_eq!(record.name, "new");
    }

    #[test]
    fn blank_rename_is_ignored() {
        let update = WebsiteUpdate {
            name: Some(" ".into()),
            ..Default::default()
        };
        assert_eq!(update.new_name(), None);
    }
}
