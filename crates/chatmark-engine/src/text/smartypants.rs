use std::sync::OnceLock;

use regex::Regex;

struct Substitutions {
    opening_single: Regex,
    opening_double: Regex,
}

fn substitutions() -> &'static Substitutions {
    static SUBS: OnceLock<Substitutions> = OnceLock::new();
    SUBS.get_or_init(|| Substitutions {
        opening_single: Regex::new(r#"(^|[-\u{2014}/(\[{"\s])'"#)
            .expect("Invalid opening single quote regex"),
        opening_double: Regex::new(r#"(^|[-\u{2014}/(\[{\u{2018}\s])""#)
            .expect("Invalid opening double quote regex"),
    })
}

/// Replaces straight quotes, double hyphens and triple dots with their
/// typographic forms.
///
/// Substitutions run in a fixed order: dashes, opening then closing single
/// quotes, opening then closing double quotes, ellipses. Each step only
/// matches ASCII input, so nothing introduced earlier is rewritten later.
pub fn smartypants(text: &str) -> String {
    let subs = substitutions();
    let s = text.replace("--", "\u{2014}");
    let s = subs.opening_single.replace_all(&s, "${1}\u{2018}");
    let s = s.replace('\'', "\u{2019}");
    let s = subs.opening_double.replace_all(&s, "${1}\u{201c}");
    let s = s.replace('"', "\u{201d}");
    s.replace("...", "\u{2026}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("a -- b", "a \u{2014} b")]
    #[case("---", "\u{2014}-")]
    #[case("'quoted'", "\u{2018}quoted\u{2019}")]
    #[case("don't", "don\u{2019}t")]
    #[case("\"hi\"", "\u{201c}hi\u{201d}")]
    #[case("say \"hi\" now", "say \u{201c}hi\u{201d} now")]
    #[case("(\"x\")", "(\u{201c}x\u{201d})")]
    #[case("wait...", "wait\u{2026}")]
    #[case("'\"nested\"'", "\u{2018}\u{201c}nested\u{201d}\u{2019}")]
    #[case("no change", "no change")]
    fn substitutes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(smartypants(input), expected);
    }

    #[test]
    fn second_pass_is_noop() {
        let once = smartypants("\"It's\" -- really...");
        assert_eq!(smartypants(&once), once);
    }
}
