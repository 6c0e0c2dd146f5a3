//! Deterministic search-URL generation.
//!
//! Pure string templating against a fixed set of third-party endpoints:
//! people search, sanctions lookups, corporate registries, social media,
//! general web, and a parallel localized category when a Persian name is
//! supplied. No network calls are made; only URLs are constructed.

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

/// Query-string escaping matching the conventional URL quoting rules:
/// unreserved characters (`A-Z a-z 0-9 _ . - ~`) and `/` pass through,
/// everything else is percent-encoded (a space becomes `%20`).
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
  .remove(b'_')
  .remove(b'.')
  .remove(b'-')
  .remove(b'~')
  .remove(b'/');

fn quote(s: &str) -> String {
  utf8_percent_encode(s, QUERY).to_string()
}

/// One labelled URL set per search category. Serializes to the API's
/// `category -> { label -> url }` mapping; `persian` is omitted entirely
/// when no localized name was supplied.
#[derive(Debug, Clone, Serialize)]
pub struct SearchUrls {
  pub linkedin:     BTreeMap<&'static str, String>,
  pub sanctions:    BTreeMap<&'static str, String>,
  pub corporate:    BTreeMap<&'static str, String>,
  pub social_media: BTreeMap<&'static str, String>,
  pub web_search:   BTreeMap<&'static str, String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub persian:      Option<BTreeMap<&'static str, String>>,
}

/// Generate the full URL set for a name and optional localized name.
pub fn generate(name: &str, name_fa: Option<&str>) -> SearchUrls {
  let q = quote(name);

  let linkedin = BTreeMap::from([
    (
      "people_search",
      format!("https://www.linkedin.com/search/results/people/?keywords={q}"),
    ),
    (
      "google_public",
      format!(
        "https://www.google.com/search?q={}",
        quote(&format!("site:linkedin.com/in \"{name}\""))
      ),
    ),
    (
      "iran_connection",
      format!(
        "https://www.google.com/search?q={}",
        quote(&format!("site:linkedin.com/in \"{name}\" (Iran OR Tehran OR IRGC)"))
      ),
    ),
  ]);

  let sanctions = BTreeMap::from([
    (
      "ofac",
      format!("https://sanctionssearch.ofac.treas.gov/Details.aspx?id={q}"),
    ),
    ("opensanctions", format!("https://www.opensanctions.org/search/?q={q}")),
    (
      "uk_sanctions",
      format!("https://search-uk-sanctions-list.service.gov.uk/?searchTerm={q}"),
    ),
    ("eu_sanctions", format!("https://www.sanctionsmap.eu/#/main?search={q}")),
  ]);

  let corporate = BTreeMap::from([
    ("opencorporates", format!("https://opencorporates.com/companies?q={q}")),
    (
      "uk_companies",
      format!(
        "https://find-and-update.company-information.service.gov.uk/search?q={q}"
      ),
    ),
    ("icij_offshore", format!("https://offshoreleaks.icij.org/search?q={q}")),
  ]);

  let social_media = BTreeMap::from([
    ("twitter", format!("https://twitter.com/search?q={q}&f=user")),
    (
      "instagram",
      format!(
        "https://www.google.com/search?q={}",
        quote(&format!("site:instagram.com \"{name}\""))
      ),
    ),
    (
      "facebook",
      format!(
        "https://www.google.com/search?q={}",
        quote(&format!("site:facebook.com \"{name}\""))
      ),
    ),
  ]);

  let web_search = BTreeMap::from([
    ("google", format!("https://www.google.com/search?q={q}")),
    ("google_news", format!("https://www.google.com/search?q={q}&tbm=nws")),
    ("duckduckgo", format!("https://duckduckgo.com/?q={q}")),
  ]);

  let persian = name_fa.filter(|fa| !fa.trim().is_empty()).map(|fa| {
    let qfa = quote(fa);
    BTreeMap::from([
      ("google", format!("https://www.google.com/search?q={qfa}")),
      (
        "linkedin",
        format!("https://www.linkedin.com/search/results/people/?keywords={qfa}"),
      ),
      ("twitter", format!("https://twitter.com/search?q={qfa}")),
    ])
  });

  SearchUrls { linkedin, sanctions, corporate, social_media, web_search, persian }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn quote_matches_url_quoting_rules() {
    assert_eq!(quote("Ali Khamenei"), "Ali%20Khamenei");
    assert_eq!(quote("a_b.c-d~e/f"), "a_b.c-d~e/f");
    assert_eq!(quote("\"x\""), "%22x%22");
  }

  #[test]
  fn all_fixed_categories_carry_the_encoded_name() {
    let urls = generate("Ali Khamenei", None);
    let categories = [
      &urls.linkedin,
      &urls.sanctions,
      &urls.corporate,
      &urls.social_media,
      &urls.web_search,
    ];
    for cat in categories {
      assert!(!cat.is_empty());
      for url in cat.values() {
        assert!(url.contains("Ali%20Khamenei"), "missing name in {url}");
      }
    }
  }

  #[test]
  fn persian_category_only_with_localized_name() {
    let without = generate("Ali Khamenei", None);
    assert!(without.persian.is_none());
    let json = serde_json::to_value(&without).unwrap();
    assert!(json.get("persian").is_none());

    let with = generate("Ali Khamenei", Some("علی خامنه‌ای"));
    let persian = with.persian.expect("persian category");
    assert_eq!(persian.len(), 3);
    assert!(persian.values().all(|u| u.contains('%')));
  }

  #[test]
  fn blank_localized_name_is_ignored() {
    let urls = generate("Ali Khamenei", Some("  "));
    assert!(urls.persian.is_none());
  }

  #[test]
  fn generation_is_deterministic() {
    let a = serde_json::to_string(&generate("Jane Doe", Some("ژان"))).unwrap();
    let b = serde_json::to_string(&generate("Jane Doe", Some("ژان"))).unwrap();
    assert_eq!(a, b);
  }
}
