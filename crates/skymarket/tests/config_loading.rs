use std::io::Write;

use skymarket::chrome::{BoundaryMode, ChromeElement};
use skymarket::{Config, Error, LinkAnnotator, Taxonomy};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn file_overrides_defaults_section_by_section() {
    let file = write_config(
        r#"
[chrome]
hide_footer = ["/admin"]
boundary = "segment"

[linkify]
pattern = "https://\\S+"
"#,
    );
    let config = Config::load_from(Some(file.path().to_path_buf())).expect("config loads");

    let rules = config.chrome_rules().expect("chrome rules");
    assert_eq!(rules.boundary(), BoundaryMode::Segment);
    assert!(rules.is_visible(ChromeElement::Footer, "/messages"));
    assert!(!rules.is_visible(ChromeElement::Header, "/messages"));

    let annotator = config.link_annotator().expect("annotator");
    assert!(!annotator.has_links("http://plain.example"));
    assert!(annotator.has_links("https://secure.example"));

    assert_eq!(config.seed.labels.len(), 5);
}

#[test]
fn invalid_link_pattern_is_reported() {
    let file = write_config("[linkify]\npattern = \"(unclosed\"\n");
    let err = Config::load_from(Some(file.path().to_path_buf())).unwrap_err();
    assert!(matches!(err, Error::Pattern { .. }));
}

#[test]
fn pattern_matching_empty_string_is_rejected() {
    assert!(LinkAnnotator::with_pattern(r"\S*").is_err());
}

#[test]
fn taxonomy_with_unknown_manufacturer_models_is_rejected() {
    let file = write_config(
        r#"
[taxonomy]
manufacturers = ["Cessna"]

[taxonomy.models]
Cessna = ["172"]
Piper = ["Archer"]
"#,
    );
    let err = Config::load_from(Some(file.path().to_path_buf())).unwrap_err();
    assert!(err.is_config_error());
    assert!(err.to_string().contains("'Piper'"));
}

#[test]
fn malformed_toml_is_a_load_error() {
    let file = write_config("[services\nlisting_base_url = ");
    let err = Config::load_from(Some(file.path().to_path_buf())).unwrap_err();
    assert!(matches!(err, Error::ConfigLoad(_)));
}

#[test]
fn narrowing_manufacturers_without_models_keeps_matching_builtin_models() {
    let file = write_config("[taxonomy]\nmanufacturers = [\"Cessna\"]\n");
    let config = Config::load_from(Some(file.path().to_path_buf())).expect("config loads");

    let taxonomy = Taxonomy::from_config(&config).expect("taxonomy validates");
    assert_eq!(taxonomy.manufacturers.len(), 1);
    assert_eq!(taxonomy.models.len(), 1);
    assert!(!taxonomy.models_for("Cessna").is_empty());
    assert!(taxonomy.models_for("Beechcraft").is_empty());
}
