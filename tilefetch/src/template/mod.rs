//! Tile URL templates with round-robin subdomains.
//!
//! A template such as `http://{a,b,c}.tile.example.com/{z}/{x}/{y}.png` is
//! scanned once by [`parse_template`]. Each request then takes the next
//! subdomain from a [`SubdomainRotator`], replaces the `{a,b,c}` mask with it,
//! and substitutes the coordinate placeholders.
//!
//! ```text
//! "http://{a,b,c}.host/{z}/{x}/{y}"
//!          └─mask─┘
//!   request 1 → http://a.host/15/100/200
//!   request 2 → http://b.host/15/101/200
//!   request 3 → http://c.host/15/102/200
//!   request 4 → http://a.host/15/103/200
//! ```

mod parser;
mod rotator;

pub use parser::{parse_template, ParsedTemplate};
pub use rotator::SubdomainRotator;

use crate::coord::TileCoord;

/// A parsed tile URL template bound to its own rotation cursor.
///
/// Re-parsing a URL means building a new `UrlTemplate`, which also resets
/// the cursor.
#[derive(Debug)]
pub struct UrlTemplate {
    template: String,
    rotator: SubdomainRotator,
}

impl UrlTemplate {
    /// Parses `template` and positions the cursor at the first subdomain.
    pub fn parse(template: impl Into<String>) -> Self {
        let template = template.into();
        let rotator = SubdomainRotator::new(parse_template(&template));
        Self { template, rotator }
    }

    /// The raw template string.
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Subdomain tokens found in the template.
    pub fn subdomains(&self) -> &[String] {
        self.rotator.subdomains()
    }

    /// The substring replaced per request, empty when there is none.
    pub fn mask(&self) -> &str {
        self.rotator.mask()
    }

    pub fn subdomain_count(&self) -> usize {
        self.rotator.len()
    }

    /// Builds the request URL for `coord`, advancing the subdomain cursor.
    pub fn url_for(&self, coord: &TileCoord) -> String {
        match self.rotator.next_subdomain() {
            Some(subdomain) => coord.format(&self.template.replace(self.mask(), subdomain)),
            None => coord.format(&self.template),
        }
    }

    /// Builds the URL `coord` would get from the first subdomain, without
    /// touching the cursor.
    pub fn preview_url(&self, coord: &TileCoord) -> String {
        match self.subdomains().first() {
            Some(subdomain) if !self.mask().is_empty() => {
                coord.format(&self.template.replace(self.mask(), subdomain))
            }
            _ => coord.format(&self.template),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_rotates_subdomains() {
        let template = UrlTemplate::parse("http://{a,b,c}.tile.example.com/{z}/{x}/{y}.png");
        let tile = TileCoord::new(15, 100, 200);

        assert_eq!(
            template.url_for(&tile),
            "http://a.tile.example.com/15/100/200.png"
        );
        assert_eq!(
            template.url_for(&tile),
            "http://b.tile.example.com/15/100/200.png"
        );
        assert_eq!(
            template.url_for(&tile),
            "http://c.tile.example.com/15/100/200.png"
        );
        assert_eq!(
            template.url_for(&tile),
            "http://a.tile.example.com/15/100/200.png"
        );
    }

    #[test]
    fn test_url_for_without_subdomains() {
        let template = UrlTemplate::parse("https://tiles.example.com/{z}/{y}/{x}");
        let tile = TileCoord::new(3, 1, 2);

        assert_eq!(template.url_for(&tile), "https://tiles.example.com/3/2/1");
        assert_eq!(template.subdomain_count(), 0);
        assert_eq!(template.mask(), "");
    }

    #[test]
    fn test_preview_does_not_advance() {
        let template = UrlTemplate::parse("http://{a,b}.host/{z}/{x}/{y}");
        let tile = TileCoord::new(1, 0, 1);

        assert_eq!(template.preview_url(&tile), "http://a.host/1/0/1");
        assert_eq!(template.preview_url(&tile), "http://a.host/1/0/1");
        assert_eq!(template.url_for(&tile), "http://a.host/1/0/1");
        assert_eq!(template.url_for(&tile), "http://b.host/1/0/1");
    }

    #[test]
    fn test_reparse_resets_cursor() {
        let url = "http://{a,b}.host/{z}/{x}/{y}";
        let tile = TileCoord::new(1, 0, 0);

        let template = UrlTemplate::parse(url);
        template.url_for(&tile);
        let template = UrlTemplate::parse(template.as_str());

        assert_eq!(template.url_for(&tile), "http://a.host/1/0/0");
    }

    #[test]
    fn test_parse_twice_yields_same_tokens() {
        let url = "http://{ a , b ,}.x.com/{z}";
        let first = UrlTemplate::parse(url);
        let second = UrlTemplate::parse(url);
        assert_eq!(first.subdomains(), second.subdomains());
        assert_eq!(first.mask(), second.mask());
    }
}
