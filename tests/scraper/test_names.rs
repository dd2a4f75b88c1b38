// Name extraction and result-page parsing for the offline scraper

use ayur_assist::scraper::{candidate_names, sanitize_file_stem};
use ayur_assist::scraper::image_search::first_image_url;

#[test]
fn test_names_are_deduplicated_and_ordered() {
    let text = "Tulsi\nNeem\nTulsi\nAshwagandha\nneem\n";
    let names = candidate_names(text);
    assert_eq!(names, vec!["Tulsi", "Neem", "Ashwagandha"]);
}

#[test]
fn test_page_furniture_is_filtered() {
    let text = "Dictionary of Medicinal Plants\n\n12\nTulsi\n345-346\nNeem\n";
    let names = candidate_names(text);
    assert!(names.contains(&"Tulsi".to_string()));
    assert!(names.contains(&"Neem".to_string()));
    assert!(!names.contains(&"12".to_string()));
    assert!(!names.contains(&"345-346".to_string()));
}

#[test]
fn test_sanitized_stems_are_filesystem_safe() {
    for (name, expected) in [
        ("Tulsi Plant", "Tulsi_Plant"),
        ("St. John's Wort", "St_Johns_Wort"),
        ("Aloe vera (true aloe)", "Aloe_vera_true_aloe"),
    ] {
        assert_eq!(sanitize_file_stem(name), expected);
    }
}

#[test]
fn test_result_page_parsing_is_best_effort() {
    let html = r#"
        <html><body>
            <div class="result">
                <a href="https://example.com/article">Tulsi benefits</a>
                <img src="https://images.example.com/tulsi_thumb.jpg">
            </div>
        </body></html>
    "#;
    assert_eq!(
        first_image_url(html).as_deref(),
        Some("https://images.example.com/tulsi_thumb.jpg")
    );

    // a page with nothing usable yields None, not an error
    assert!(first_image_url("<html><body><p>no results</p></body></html>").is_none());
}
