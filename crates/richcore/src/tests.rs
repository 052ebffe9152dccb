#[cfg(test)]
mod unit_tests {
    use super::super::*;

    fn style(bold: bool, italic: bool, underline: bool) -> Style {
        Style {
            bold,
            italic,
            underline,
        }
    }

    #[test]
    fn test_parse_serialize_round_trip_is_behavior_identical() {
        let samples = [
            "plain text, nothing else",
            "This is a <b>Test</b>, is'n it.",
            "<u>under <i>both <b>all three</b></i></u> plain",
            "escaped: &lt;tag&gt; &amp; C:\\\\path\\\\file",
            "line 1\n<ol_number indent=\"0\"><li>line 2<ol_upper indent=\"1\">\
             <li>line 3</li><li>line 4</li></ol_upper></li></ol_number>",
            "<ul indent=\"0\"><li><b>one</li><li>two</b></li></ul>",
            "mixed\n<ol_lower indent=\"0\"><li>a</li></ol_lower>\ntail",
        ];
        for markup in samples {
            let doc = parse(markup);
            assert_eq!(doc.validate(), Ok(()), "markup: {markup}");
            let rendered = serialize(&doc);
            let reparsed = parse(&rendered);
            assert_eq!(reparsed, doc, "markup: {markup}\nrendered: {rendered}");
        }
    }

    #[test]
    fn test_second_serialization_is_stable() {
        // once canonicalized, serialize becomes byte-identical
        let doc = parse("<b><i>ib</i></b> and <i><b>bi</b></i>");
        let first = serialize(&doc);
        let second = serialize(&parse(&first));
        assert_eq!(first, second);
    }

    #[test]
    fn test_canonical_order_rewrites_input_nesting() {
        let doc = parse("<b><u>x</u></b>");
        assert_eq!(serialize(&doc), "<u><b>x</b></u>");
    }

    #[test]
    fn test_untagged_text_matches_parsed_text_without_lists() {
        let markup = "some &amp; <b>bold</b> <i>italic</i> text";
        assert_eq!(get_untagged_text(markup), parse(markup).text);
    }

    #[test]
    fn test_format_word_then_round_trip_through_markup() {
        let editor = StyleEditor::new();
        let mut surface = BufferSurface::new("make this word bold");
        // caret inside "word"
        surface.place_caret(11);
        editor.format(&mut surface, StyleFlag::Bold, true);

        let doc = snapshot(&surface);
        assert_eq!(doc.style_runs, vec![StyleRun::new(10, 4, style(true, false, false))]);
        assert_eq!(serialize(&doc), "make this <b>word</b> bold");
    }

    #[test]
    fn test_toggle_across_gap_and_styled_run() {
        // bold over a region spanning an unstyled gap and an italic run
        let existing = vec![StyleRun::new(10, 20, style(false, true, false))];
        let result = modify_ranges(StyleFlag::Bold, 5, 25, &existing, true);
        assert_eq!(
            result,
            vec![
                StyleRun::new(5, 5, style(true, false, false)),
                StyleRun::new(10, 20, style(true, true, false)),
            ]
        );
    }

    #[test]
    fn test_modified_runs_survive_markup_round_trip() {
        let mut doc = parse("some plain text here");
        doc.style_runs = modify_ranges(StyleFlag::Underline, 5, 5, &doc.style_runs, true);
        doc.style_runs = modify_ranges(StyleFlag::Bold, 0, 12, &doc.style_runs, true);
        assert_eq!(doc.validate(), Ok(()));
        let reparsed = parse(&serialize(&doc));
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn test_document_json_round_trip() {
        let doc = parse(
            "head\n<ol_number indent=\"0\"><li><b>bold item</b></li>\
             <li>second</li></ol_number>",
        );
        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_malformed_markup_degrades_to_plain_text() {
        let _ = env_logger::builder().is_test(true).try_init();
        let cases = [
            ("</i></b>stray closers", "stray closers"),
            ("<b>open forever", "open forever"),
            ("<nonsense attr=\"1\">kept</nonsense>", "kept"),
            ("trailing <", "trailing <"),
        ];
        for (markup, expected_text) in cases {
            let doc = parse(markup);
            assert_eq!(doc.text, expected_text, "markup: {markup}");
            assert_eq!(doc.validate(), Ok(()), "markup: {markup}");
        }
    }

    #[test]
    fn test_path_like_content_survives_the_full_cycle() {
        let doc = Document::new(r"\\share\dir mixed with <angle> & amp");
        let markup = serialize(&doc);
        assert_eq!(parse(&markup).text, doc.text);
        assert_eq!(get_untagged_text(&markup), doc.text);
    }
}
