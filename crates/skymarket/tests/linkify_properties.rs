use skymarket::linkify::{reconstruct, LinkAnnotator, Segment, TextSegment};

const SAMPLES: &[&str] = &[
    "",
    "no links here",
    "Check http://example.com for info",
    "https://a.example",
    "https://a.example https://b.example",
    "  leading and trailing  https://x.example/path?q=1  ",
    "See https://docs.example/logs.pdf, then call.",
    "line one\nhttp://example.com\n\tline three",
    "unicode ✈ before https://example.com/✈ after",
    "http:// bare scheme is not a link",
    "httpx://nope and ftp://nope",
];

#[test]
fn segments_reconstruct_their_input() {
    let annotator = LinkAnnotator::new();
    for text in SAMPLES {
        let rebuilt = reconstruct(annotator.annotate(text));
        assert_eq!(&rebuilt, text);
    }
}

#[test]
fn owned_segments_reconstruct_their_input() {
    let annotator = LinkAnnotator::new();
    for text in SAMPLES {
        let rebuilt: String = annotator
            .annotate_owned(text)
            .iter()
            .map(TextSegment::display_text)
            .collect();
        assert_eq!(&rebuilt, text);
    }
}

#[test]
fn links_never_contain_whitespace_and_plain_runs_are_never_empty() {
    let annotator = LinkAnnotator::new();
    for text in SAMPLES {
        for segment in annotator.annotate(text) {
            match segment {
                Segment::Link(url) => {
                    assert!(url.starts_with("http://") || url.starts_with("https://"));
                    assert!(!url.chars().any(char::is_whitespace), "{url:?}");
                }
                Segment::Plain(run) => assert!(!run.is_empty(), "empty plain run in {text:?}"),
            }
        }
    }
}

#[test]
fn adjacent_segments_alternate_between_plain_and_link_where_separated() {
    let annotator = LinkAnnotator::new();
    let segments: Vec<_> = annotator
        .annotate("a https://one.example b https://two.example c")
        .collect();
    assert_eq!(
        segments,
        vec![
            Segment::Plain("a "),
            Segment::Link("https://one.example"),
            Segment::Plain(" b "),
            Segment::Link("https://two.example"),
            Segment::Plain(" c"),
        ]
    );
}

#[test]
fn trailing_punctuation_stays_in_the_link() {
    let annotator = LinkAnnotator::new();
    let links: Vec<_> = annotator
        .links("See https://docs.example/logs.pdf, then call.")
        .collect();
    assert_eq!(links, vec!["https://docs.example/logs.pdf,"]);
}

#[test]
fn custom_pattern_changes_what_counts_as_a_link() {
    let annotator = LinkAnnotator::with_pattern(r"https://[a-z.]+").expect("pattern compiles");
    let segments: Vec<_> = annotator.annotate("go https://a.example/path now").collect();
    assert_eq!(
        segments,
        vec![
            Segment::Plain("go "),
            Segment::Link("https://a.example"),
            Segment::Plain("/path now"),
        ]
    );
}

#[test]
fn absent_text_produces_no_segments() {
    let annotator = LinkAnnotator::new();
    assert_eq!(annotator.annotate_optional(None).count(), 0);
    assert_eq!(annotator.annotate("").count(), 0);
}
