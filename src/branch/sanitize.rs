//! Slug sanitization: turn free text (typically an issue title) into a
//! git-ref-legal, label-safe, lowercase token.
//!
//! The pipeline is an ordered table of substitution rules interpreted by
//! [`Rule::apply`]; rules stay data so each one is testable on its own.

use std::sync::LazyLock;

use regex::Regex;

/// One substitution step. `repeat` rules run until the text stops changing,
/// which collapses cascading patterns such as `name.lock.lock` or `a/../b`.
struct Rule {
    pattern: Regex,
    replacement: &'static str,
    repeat: bool,
}

impl Rule {
    fn new(pattern: &str, replacement: &'static str, repeat: bool) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("static sanitize pattern"),
            replacement,
            repeat,
        }
    }

    fn apply(&self, text: &str) -> String {
        let mut current = self.pattern.replace_all(text, self.replacement).into_owned();
        if self.repeat {
            loop {
                let next = self
                    .pattern
                    .replace_all(&current, self.replacement)
                    .into_owned();
                if next == current {
                    break;
                }
                current = next;
            }
        }
        current
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // A single leading slash.
        Rule::new(r"^/", "", false),
        // Characters git check-ref-format rejects outright.
        Rule::new(r"@\{|[~^:?*\[\\]", "", false),
        // Separator runs and ref-illegal sequences become one hyphen.
        Rule::new(r"//+|[\s\x00-\x1f\x7f]+|/\.|\.\.", "-", true),
        // Trailing `.lock`, dots and slashes.
        Rule::new(r"\.lock$|\.$|/$", "", true),
    ]
});

static ILLEGAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("static sanitize pattern"));

/// Fold accented Latin letters to ASCII. The target alphabet is the label
/// syntax subset, which is narrower than plain ASCII punctuation.
fn fold_accents(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'a',
            'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => 'e',
            'ì' | 'í' | 'î' | 'ï' | 'Ì' | 'Í' | 'Î' | 'Ï' => 'i',
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'o',
            'ù' | 'ú' | 'û' | 'ü' | 'Ù' | 'Ú' | 'Û' | 'Ü' => 'u',
            'ç' | 'Ç' => 'z',
            'ñ' | 'Ñ' => 'n',
            _ => c,
        })
        .collect()
}

/// Sanitize free text into a branch-name slug.
///
/// The empty string is a legal result and means "no descriptive context",
/// not an error.
pub fn sanitize(text: &str) -> String {
    let mut slug = text.trim().to_string();
    for rule in RULES.iter() {
        slug = rule.apply(&slug);
    }
    slug = fold_accents(&slug);
    slug = ILLEGAL.replace_all(&slug, "").into_owned();
    slug.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_pipeline_on_hostile_input() {
        let input = "  /hello world//test/.test..test@{test\\\\test.lock  ";
        assert_eq!(sanitize(input), "hello-world-test-test-testtesttest");
    }

    #[test]
    fn plain_title_becomes_hyphenated_lowercase() {
        assert_eq!(sanitize("Add retry logic to uploader"), "add-retry-logic-to-uploader");
    }

    #[test]
    fn output_matches_legal_alphabet() {
        let pattern = Regex::new(r"^[a-z0-9_-]*$").unwrap();
        for input in [
            "Main Feature",
            "Release/2025.09",
            "...Weird__Name///",
            "fix: crash when café is closed",
            "línea número uno",
            "\t tabs\tand\nnewlines ",
            "~^:?*[@{\\",
        ] {
            let slug = sanitize(input);
            assert!(pattern.is_match(&slug), "illegal slug {slug:?} from {input:?}");
        }
    }

    #[test]
    fn sanitize_is_idempotent() {
        for input in [
            "  /hello world//test/.test..test@{test\\\\test.lock  ",
            "Main Feature",
            "a- b",
            "ça va? Très bien!",
            "",
            "....",
            "name.lock.lock",
        ] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn accents_fold_to_label_alphabet() {
        assert_eq!(sanitize("crème brûlée"), "creme-brulee");
        assert_eq!(sanitize("Ça"), "za");
        assert_eq!(sanitize("mañana"), "manana");
    }

    #[test]
    fn cascading_lock_suffixes_are_stripped() {
        assert_eq!(sanitize("state.lock.lock"), "state");
        assert_eq!(sanitize("dir/"), "dir");
        assert_eq!(sanitize("name.lock"), "name");
    }

    #[test]
    fn empty_and_unsalvageable_input_yield_empty_slug() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   "), "");
        assert_eq!(sanitize("@{~^"), "");
    }
}
