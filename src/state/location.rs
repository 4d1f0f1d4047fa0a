/// Page location and the `open` deep-link parameter
///
/// The gallery behaves like a page served from a URL: the currently open
/// item is mirrored into the `open` query parameter so a copied link
/// reproduces the same view. Updates replace the current location in place,
/// there is no history stack to step back through.

use std::fmt;
use std::str::FromStr;
use url::Url;

/// Query parameter holding the id of the item shown in the modal
pub const OPEN_PARAM: &str = "open";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    pub fn new(url: Url) -> Self {
        Location { url }
    }

    /// Current value of the `open` parameter, if present and non-empty
    pub fn open_param(&self) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == OPEN_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    }

    /// Replace (or remove, with `None`) the `open` parameter.
    ///
    /// Every other query parameter and the fragment are kept as they were.
    pub fn replace_open(&mut self, id: Option<&str>) {
        let kept: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(key, _)| key != OPEN_PARAM)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        if kept.is_empty() && id.is_none() {
            self.url.set_query(None);
            return;
        }

        let mut query = self.url.query_pairs_mut();
        query.clear();
        query.extend_pairs(kept.iter());
        if let Some(id) = id {
            query.append_pair(OPEN_PARAM, id);
        }
    }

    /// Resolve a possibly relative reference against this page, the way a
    /// browser resolves `src` attributes.
    pub fn resolve(&self, reference: &str) -> Result<Url, url::ParseError> {
        self.url.join(reference)
    }
}

impl FromStr for Location {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Url::parse(s).map(Location::new)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
