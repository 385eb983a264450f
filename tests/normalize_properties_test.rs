use markdown_normalizer::normalize::rules::RULES;
use markdown_normalizer::{normalize, normalize_traced};

/// Outputs that must be fixed points of the normalizer
const FIXTURES: &[&str] = &[
    "",
    "text## Header",
    "*** emphasis ***",
    "** Text **",
    "word**bold**",
    "a  ,  b   .",
    "a\tb    c",
    "Intro## One## Two",
    "***a*** ***b***",
    "***a******b***",
    "Some **bold text without a close",
    "a ** b ** c ** d",
    "# Title\n\nParagraph with **bold** , and *italic* .\n\n## Section\n",
    "   \t  ",
];

#[test]
fn test_absent_input_is_empty() {
    assert_eq!(normalize(None::<&str>), "");
    assert_eq!(normalize(Some("")), "");
    assert_eq!(normalize(""), "");
}

#[test]
fn test_documented_examples() {
    assert!(normalize("text## Header").contains("text\n\n## Header"));
    assert_eq!(normalize("*** emphasis ***"), "*emphasis*");
    assert_eq!(normalize("** Text **"), "**Text**");
    assert_eq!(normalize("word**bold**"), "word **bold**");
    assert_eq!(normalize("a  ,  b   ."), "a, b.");
    assert_eq!(normalize("a\tb    c"), "a b c");
}

#[test]
fn test_clean_text_is_unchanged() {
    let text = "# Society News\n\nWe met on *Tuesday*, and the **quiz**, as always, went well.\n\n## Next steps\n\n- Book a room.\n";
    assert_eq!(normalize(text), text);
}

#[test]
fn test_whitespace_only_input() {
    assert_eq!(normalize("   "), " ");
    assert_eq!(normalize(" \t "), " ");
    assert_eq!(normalize("\n\n"), "\n\n");
    assert_eq!(normalize(" "), " ");
}

#[test]
fn test_heading_at_start_is_untouched() {
    assert_eq!(normalize("## Header"), "## Header");
    assert_eq!(normalize("# Title\nBody"), "# Title\nBody");
    assert_eq!(normalize("###### Six"), "###### Six");
}

#[test]
fn test_heading_after_leading_whitespace() {
    assert_eq!(normalize("  ## H"), " \n\n## H");
    assert_eq!(normalize("text####### no"), "text#\n\n###### no");
}

#[test]
fn test_consecutive_heading_artifacts() {
    assert_eq!(
        normalize("Intro## One## Two"),
        "Intro\n\n## One\n\n## Two"
    );
    assert_eq!(
        normalize("# Title ## Sub ### Subsub"),
        "# Title\n\n## Sub\n\n### Subsub"
    );
}

#[test]
fn test_triple_asterisk_runs() {
    assert_eq!(normalize("***a*** ***b***"), "*a* *b*");
    assert_eq!(normalize("***a******b***"), "*a **b*");
    assert_eq!(normalize("*** spaced out ***."), "*spaced out*.");
}

#[test]
fn test_unbalanced_bold_delimiters() {
    assert_eq!(
        normalize("Some **bold text without a close"),
        "Some **bold text without a close"
    );
    assert_eq!(normalize("a ** b ** c ** d"), "a **b**c **d");
    assert_eq!(normalize("**"), "**");
    assert_eq!(normalize("x ** "), "x **");
}

#[test]
fn test_line_breaks_around_bold_and_punctuation() {
    assert_eq!(normalize("word\n."), "word.");
    assert_eq!(normalize("alpha\n, beta"), "alpha, beta");
    assert_eq!(normalize("Hello\n**Bold**"), "Hello **Bold**");
    // A paragraph that opens with bold is pulled onto the one before it
    assert_eq!(
        normalize("First paragraph .\n\n**Bold** opener"),
        "First paragraph.**Bold**opener"
    );
    assert_eq!(normalize("a\n\n\tb"), "a\n\n b");
}

#[test]
fn test_fixtures_reach_a_fixed_point() {
    for fixture in FIXTURES {
        let once = normalize(*fixture);
        let twice = normalize(once.as_str());
        assert_eq!(twice, once, "not a fixed point for {:?}", fixture);
    }
}

#[test]
fn test_traced_matches_plain() {
    for fixture in FIXTURES {
        let traced = normalize_traced(*fixture);
        assert_eq!(traced.text, normalize(*fixture));

        // Applied rules appear in pipeline order
        let positions: Vec<usize> = traced
            .applied
            .iter()
            .map(|name| {
                RULES
                    .iter()
                    .position(|rule| rule.name == *name)
                    .expect("known rule")
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_arbitrary_input_does_not_panic() {
    let inputs = [
        "#",
        "# ",
        "##\n",
        "*",
        "****",
        "*****",
        "** ** ** **",
        "é## ünïcödé **gras**",
        "\r\n\r\n## Windows\r\n",
        "\u{a0}**nbsp\u{a0}**",
        ". , . ,",
    ];
    for input in inputs {
        let _ = normalize(input);
        let _ = normalize_traced(input);
    }
}
