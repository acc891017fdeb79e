//! Customer contact details collected at checkout.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Messaging platform a customer can be reached on.
///
/// The storefront has no accounts; orders are fulfilled by a human who
/// contacts the customer on one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Telegram,
    Whatsapp,
    Facebook,
}

impl SocialPlatform {
    /// Label used in order summaries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Telegram => "Telegram",
            Self::Whatsapp => "WhatsApp",
            Self::Facebook => "Facebook",
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How to reach the customer who placed an order.
///
/// Fields arrive as free text from the checkout form; order assembly is
/// where they are validated (non-blank name, at least one reachable
/// contact method). A `BTreeMap` keeps social handles in a stable order
/// for notification rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerContact {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub social: BTreeMap<SocialPlatform, String>,
}

impl CustomerContact {
    /// True when at least one way of reaching the customer is present:
    /// a non-blank phone number or a non-blank social handle.
    #[must_use]
    pub fn has_contact_method(&self) -> bool {
        let phone_given = self
            .phone
            .as_deref()
            .is_some_and(|p| !p.trim().is_empty());
        phone_given || self.social.values().any(|h| !h.trim().is_empty())
    }
}
