//! Single-pass scanner for tile URL templates.
//!
//! Finds the first `{...}` block that lists subdomains (e.g. `{a,b,c}`) and
//! records it as the mask to substitute per request. Blocks containing a
//! coordinate letter (`x`, `y`, `z`) are placeholders, not subdomain lists.

/// Result of scanning a URL template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTemplate {
    /// Subdomain tokens in declaration order.
    pub subdomains: Vec<String>,
    /// Literal template substring replaced by one subdomain per request.
    /// Empty when no subdomain block was found.
    pub mask: String,
}

impl ParsedTemplate {
    /// Whether per-request subdomain substitution applies.
    pub fn has_substitution(&self) -> bool {
        !self.subdomains.is_empty() && !self.mask.is_empty()
    }
}

/// Scanner state for one candidate block.
#[derive(Default)]
struct Block {
    start: usize,
    token: String,
    tokens: Vec<String>,
}

impl Block {
    fn open(start: usize) -> Self {
        Self {
            start,
            ..Self::default()
        }
    }

    fn flush(&mut self) {
        let token = self.token.trim();
        if !token.is_empty() {
            self.tokens.push(token.to_string());
        }
        self.token.clear();
    }
}

/// Parses a tile URL template.
///
/// Malformed templates never fail: anything that does not form a closed
/// subdomain block yields an empty subdomain list and an empty mask.
///
/// # Example
///
/// ```
/// use tilefetch::template::parse_template;
///
/// let parsed = parse_template("http://{a,b,c}.tile.example.com/{z}/{x}/{y}.png");
/// assert_eq!(parsed.subdomains, vec!["a", "b", "c"]);
/// assert_eq!(parsed.mask, "{a,b,c}");
/// ```
pub fn parse_template(template: &str) -> ParsedTemplate {
    let mut current: Option<Block> = None;
    let mut closed: Option<(usize, usize, Vec<String>)> = None;

    for (i, ch) in template.char_indices() {
        match current.as_mut() {
            Some(block) => match ch {
                'x' | 'y' | 'z' => current = None,
                ',' => block.flush(),
                '}' => {
                    block.flush();
                    let tokens = std::mem::take(&mut block.tokens);
                    closed = Some((block.start, i, tokens));
                    current = None;
                }
                _ => block.token.push(ch),
            },
            None => {
                if ch == '{' && closed.is_none() {
                    current = Some(Block::open(i));
                }
            }
        }

        if closed.is_some() && current.is_none() {
            // Only the first closed block is a subdomain list.
            break;
        }
    }

    match closed {
        Some((start, end, subdomains)) if end > start => ParsedTemplate {
            subdomains,
            mask: template[start..=end].to_string(),
        },
        _ => ParsedTemplate::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_subdomain_block_with_coordinates() {
        let parsed = parse_template("http://{a,b,c}.x.com/{z}/{x}/{y}");
        assert_eq!(parsed.subdomains, vec!["a", "b", "c"]);
        assert_eq!(parsed.mask, "{a,b,c}");
        assert!(parsed.has_substitution());
    }

    #[test]
    fn test_no_subdomain_block() {
        let parsed = parse_template("http://x.com/{z}/{x}/{y}");
        assert!(parsed.subdomains.is_empty());
        assert_eq!(parsed.mask, "");
        assert!(!parsed.has_substitution());
    }

    #[test]
    fn test_whitespace_trimmed_and_blank_tokens_dropped() {
        let parsed = parse_template("http://{ a , b ,}.x.com/{z}");
        assert_eq!(parsed.subdomains, vec!["a", "b"]);
        assert_eq!(parsed.mask, "{ a , b ,}");
    }

    #[test]
    fn test_coordinate_blocks_abort() {
        let parsed = parse_template("http://{z}/{x}/{y}");
        assert!(parsed.subdomains.is_empty());
        assert_eq!(parsed.mask, "");
    }

    #[test]
    fn test_empty_template() {
        assert_eq!(parse_template(""), ParsedTemplate::default());
    }

    #[test]
    fn test_single_coordinate_placeholder() {
        assert_eq!(parse_template("{x}"), ParsedTemplate::default());
        assert_eq!(parse_template("{z}"), ParsedTemplate::default());
    }

    #[test]
    fn test_subdomain_block_after_coordinates() {
        let parsed = parse_template("https://tiles/{z}/{x}/{y}.png?s={one,two}");
        assert_eq!(parsed.subdomains, vec!["one", "two"]);
        assert_eq!(parsed.mask, "{one,two}");
    }

    #[test]
    fn test_only_first_closed_block_counts() {
        let parsed = parse_template("http://{a,b}.host/{c,d}/{z}");
        assert_eq!(parsed.subdomains, vec!["a", "b"]);
        assert_eq!(parsed.mask, "{a,b}");
    }

    #[test]
    fn test_duplicates_preserved() {
        let parsed = parse_template("http://{a,a,b}.host/{z}/{x}/{y}");
        assert_eq!(parsed.subdomains, vec!["a", "a", "b"]);
    }

    #[test]
    fn test_token_containing_coordinate_letter_aborts_block() {
        // "xa" contains a coordinate letter, so the whole block is dropped
        let parsed = parse_template("http://{mt0,xa}.host/{z}");
        assert!(parsed.subdomains.is_empty());
        assert_eq!(parsed.mask, "");
    }

    #[test]
    fn test_aborted_block_does_not_leak_tokens() {
        let parsed = parse_template("http://{ab,x}.{c,d}.host/{z}");
        assert_eq!(parsed.subdomains, vec!["c", "d"]);
        assert_eq!(parsed.mask, "{c,d}");
    }

    #[test]
    fn test_unclosed_block_yields_nothing() {
        let parsed = parse_template("http://{a,b.host/");
        assert!(parsed.subdomains.is_empty());
        assert_eq!(parsed.mask, "");
    }

    #[test]
    fn test_inner_brace_is_part_of_token() {
        let parsed = parse_template("http://{a{b,c}.host/{z}");
        assert_eq!(parsed.subdomains, vec!["a{b", "c"]);
        assert_eq!(parsed.mask, "{a{b,c}");
    }

    #[test]
    fn test_token_with_y_aborts_single_block() {
        assert_eq!(parse_template("http://{only}.host/{z}"), ParsedTemplate::default());
    }

    #[test]
    fn test_blank_block_keeps_mask_without_subdomains() {
        let parsed = parse_template("http://{ , }.host/{z}");
        assert!(parsed.subdomains.is_empty());
        assert_eq!(parsed.mask, "{ , }");
        assert!(!parsed.has_substitution());
    }

    #[test]
    fn test_numeric_subdomains() {
        let parsed = parse_template("https://mt{0,1,2,3}.google.com/vt?x={x}&y={y}&z={z}");
        assert_eq!(parsed.subdomains, vec!["0", "1", "2", "3"]);
        assert_eq!(parsed.mask, "{0,1,2,3}");
    }

    #[test]
    fn test_multibyte_characters_around_block() {
        let parsed = parse_template("http://карта.{a,b}.рф/{z}/{x}/{y}");
        assert_eq!(parsed.subdomains, vec!["a", "b"]);
        assert_eq!(parsed.mask, "{a,b}");
    }

    proptest! {
        #[test]
        fn prop_parse_is_idempotent(template in "[a-c{},xyz ./:]{0,40}") {
            prop_assert_eq!(parse_template(&template), parse_template(&template));
        }

        #[test]
        fn prop_mask_is_substring(template in "[a-d{},xyz ./]{0,40}") {
            let parsed = parse_template(&template);
            prop_assert!(template.contains(&parsed.mask));
            if !parsed.subdomains.is_empty() {
                prop_assert_eq!(parsed.mask.chars().next(), Some('{'));
                prop_assert_eq!(parsed.mask.chars().last(), Some('}'));
            }
        }

        #[test]
        fn prop_tokens_are_trimmed_and_non_empty(template in "[a-d{}, ./]{0,40}") {
            for token in parse_template(&template).subdomains {
                prop_assert!(!token.is_empty());
                prop_assert_eq!(token.trim(), token.as_str());
            }
        }
    }
}
