//! Contacts — the built-in reference directory plus user-added entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::subject::none_if_blank;
use crate::{Error, Result};

// ─── User contacts ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContact {
  pub id:           i64,
  pub name:         String,
  pub contact_type: Option<String>,
  pub email:        Option<String>,
  pub phone:        Option<String>,
  pub url:          Option<String>,
  pub description:  Option<String>,
  pub notes:        Option<String>,
  pub created_at:   DateTime<Utc>,
}

/// Validated input for adding a contact.
#[derive(Debug, Clone)]
pub struct NewUserContact {
  pub name:         String,
  pub contact_type: Option<String>,
  pub email:        Option<String>,
  pub url:          Option<String>,
  pub description:  Option<String>,
}

impl NewUserContact {
  pub fn new(
    name: impl Into<String>,
    contact_type: Option<String>,
    email: Option<String>,
    url: Option<String>,
    description: Option<String>,
  ) -> Result<Self> {
    let name = name.into().trim().to_owned();
    if name.is_empty() {
      return Err(Error::Validation("name is required".into()));
    }
    Ok(Self {
      name,
      contact_type: none_if_blank(contact_type),
      email: none_if_blank(email),
      url: none_if_blank(url),
      description: none_if_blank(description),
    })
  }
}

// ─── Preset contacts ─────────────────────────────────────────────────────────

/// A built-in, non-persisted reference organization.
#[derive(Debug, Clone, Serialize)]
pub struct PresetContact {
  pub name:        &'static str,
  #[serde(rename = "type")]
  pub kind:        &'static str,
  pub contact:     &'static str,
  pub url:         &'static str,
  pub description: &'static str,
}

/// The fixed directory of organizations that can help with research,
/// verification, and reporting. Read-only; never written to the store.
pub const PRESET_CONTACTS: &[PresetContact] = &[
  PresetContact {
    name:        "Amnesty International - Iran",
    kind:        "Human Rights",
    contact:     "iran@amnesty.org",
    url:         "https://www.amnesty.org/en/location/middle-east-and-north-africa/iran/",
    description: "Global human rights organization",
  },
  PresetContact {
    name:        "Human Rights Watch - Iran",
    kind:        "Human Rights",
    contact:     "hrwpress@hrw.org",
    url:         "https://www.hrw.org/middle-east/n-africa/iran",
    description: "Reports on human rights abuses",
  },
  PresetContact {
    name:        "Iran Human Rights (IHR)",
    kind:        "Human Rights",
    contact:     "info@iranhr.net",
    url:         "https://iranhr.net/en/",
    description: "Norway-based documentation",
  },
  PresetContact {
    name:        "Center for Human Rights in Iran",
    kind:        "Human Rights",
    contact:     "info@iranhumanrights.org",
    url:         "https://iranhumanrights.org/",
    description: "Independent research",
  },
  PresetContact {
    name:        "Bellingcat",
    kind:        "Journalism",
    contact:     "contact@bellingcat.com",
    url:         "https://www.bellingcat.com/",
    description: "Open source investigations",
  },
  PresetContact {
    name:        "OCCRP",
    kind:        "Journalism",
    contact:     "info@occrp.org",
    url:         "https://www.occrp.org/",
    description: "Investigative journalism",
  },
  PresetContact {
    name:        "OFAC (US Treasury)",
    kind:        "Government",
    contact:     "ofac_feedback@treasury.gov",
    url:         "https://home.treasury.gov/",
    description: "US sanctions",
  },
  PresetContact {
    name:        "Access Now Helpline",
    kind:        "Digital Security",
    contact:     "help@accessnow.org",
    url:         "https://www.accessnow.org/help/",
    description: "24/7 digital security",
  },
];

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn contact_name_required() {
    let err = NewUserContact::new(" ", None, None, None, None).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
  }

  #[test]
  fn presets_are_nonempty_and_typed() {
    assert_eq!(PRESET_CONTACTS.len(), 8);
    assert!(PRESET_CONTACTS.iter().all(|c| !c.name.is_empty()));
    assert!(PRESET_CONTACTS.iter().all(|c| c.url.starts_with("https://")));
  }
}
