use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Network path a client uses to reach a website.
///
/// Every [`WebsiteRecord`](crate::WebsiteRecord) stores one URL per mode; the
/// dashboard switches between them globally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    Intranet,
    Ipv6,
    Frp,
    Easytier,
}

impl AccessMode {
    /// All modes in display order.
    pub const ALL: [AccessMode; 4] = [Self::Intranet, Self::Ipv6, Self::Frp, Self::Easytier];

    /// The JSON field name used for this mode's URL.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Intranet => "intranet",
            Self::Ipv6 => "ipv6",
            Self::Frp => "frp",
            Self::Easytier => "easytier",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Intranet => "Intranet",
            Self::Ipv6 => "IPv6",
            Self::Frp => "Frp",
            Self::Easytier => "EasyTier",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Intranet => "Access over the local network",
            Self::Ipv6 => "Access over public IPv6",
            Self::Frp => "Access through an frp reverse tunnel",
            Self::Easytier => "Access over an EasyTier mesh network",
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AccessMode {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| TypeError::UnknownAccessMode(s.to_string()))
    }
}
