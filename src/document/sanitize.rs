use std::sync::LazyLock;

use regex::Regex;

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"));

static PROCESSING_INSTRUCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<\?.*?\?>").expect("processing instruction pattern is valid"));

/// Strips comments and processing instructions from document text.
///
/// The XML declaration is a processing instruction as far as this is
/// concerned, so it is removed too. The result is trimmed; blank input
/// yields an empty string.
#[must_use]
pub fn sanitize(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let text = COMMENT.replace_all(text, "");
    let text = PROCESSING_INSTRUCTION.replace_all(&text, "");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("", ""; "empty")]
    #[test_case("  \n ", ""; "blank")]
    #[test_case("<a/>", "<a/>"; "nothing to strip")]
    #[test_case("<!-- note --><a/>", "<a/>"; "leading comment")]
    #[test_case("<a><!-- multi\nline --></a>", "<a></a>"; "multiline comment")]
    #[test_case("<?xml version=\"1.0\"?>\n<a/>", "<a/>"; "declaration")]
    #[test_case("<a><?php echo 1; ?><b/></a>", "<a><b/></a>"; "processing instruction")]
    #[test_case("<!--x--><a/><!--y-->", "<a/>"; "comments are matched lazily")]
    fn strips(input: &str, expected: &str) {
        assert_eq!(sanitize(input), expected);
    }
}
