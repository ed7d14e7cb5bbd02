//! Textual rewrite of embedded article markup into lightweight markup.
//!
//! The rewrite is a chain of regex substitutions applied in a fixed order.
//! Each rule sees the output of the previous one, so the order is part of
//! the output format: div shells are unwrapped before tables are dropped,
//! spans are unwrapped both before and after headings, and links are
//! rewritten only after emphasis.
//!
//! Matching is non-greedy and, apart from the div and table rules, does not
//! cross line breaks. Malformed or deeply nested input can leave residual
//! tags in the output.

use regex::{Captures, Regex};
use std::sync::LazyLock;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // div shells, across lines
        Rule::new(r"(?m)<div.*?>([^\^]*?)</div>", "${1}"),
        // tables are dropped with their contents
        Rule::new(r"(?m)<table.*?>[^\^]*?</table>", ""),
        // unclosed div residue
        Rule::new(r"(?m)<div.*?>", ""),
        Rule::new(r"(?m)<p.*?>(.*?)</p>", "${1}  \n"),
        Rule::new(r"(?m)<span.*?>(.*?)</span>", "${1}"),
        Rule::new(r"(?m)<h1>(?P<h1>.*?)</h1>", "# ${h1}"),
        Rule::new(r"(?m)<h2>(?P<h2>.*?)</h2>", "## ${h2}"),
        Rule::new(r"(?m)<h3>(?P<h3>.*?)</h3>", "### ${h3}"),
        // spans that were nested in headings
        Rule::new(r"(?m)<span.*?>(.*?)</span>", "${1}"),
        Rule::new(r"(?m)<em>(.*?)</em>", "*${1}*"),
        Rule::new(r"(?m)<b.*?>(.*?)</b>", "**${1}**"),
        Rule::new(r"(?m)<strong>(.*?)</strong>", "**${1}**"),
        Rule::new(
            r#"(?m)<a .*?href="(?P<href>.*?)".*?>(?P<text>.*?)</a>"#,
            "[${text}](${href})",
        ),
        Rule::new(r"(?m)<img .*?>", ""),
    ]
});

// Platform artifacts, leftover closing divs and doubled line breaks,
// replaced in a single left-to-right pass.
static ARTIFACTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("「|」|■|</div>|\n\n").unwrap());

fn replace_artifact(caps: &Captures) -> &'static str {
    match &caps[0] {
        "「" => "“",
        "」" => "”",
        "\n\n" => "\n",
        _ => "",
    }
}

/// Rewrite article markup into lightweight markup.
pub fn rewrite(markup: &str) -> String {
    let text = RULES.iter().fold(markup.to_string(), |text, rule| {
        rule.pattern
            .replace_all(&text, rule.replacement)
            .into_owned()
    });
    ARTIFACTS.replace_all(&text, replace_artifact).into_owned()
}
