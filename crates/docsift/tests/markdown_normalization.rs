//! Plain/markdown normalization properties.

use docsift::text::{markdown_to_plain, plain_to_markdown};

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

#[test]
fn test_round_trip_keeps_every_word() {
    let samples = [
        "Invoice 42\n\nTotal due: 1,204.50 EUR",
        "Универзитет Св. Кирил и Методиј\nСкопје",
        "Résumé — première page\n\n\n\nDeuxième section",
        "Item one\n2024 annual report\nsnake_case_value and 2*3*4",
        "   padded text with trailing spaces   \n\n",
        "2024. godina\nVrednost 15.000 dinara",
        "12. 05. 2023 Skopje\n3.5 million shares",
        "- bullet text survives\nRef #\n## Section 4 ##",
    ];

    for sample in samples {
        let round_trip = markdown_to_plain(&plain_to_markdown(sample));
        assert_eq!(words(&round_trip), words(sample), "Failed for {sample:?}");
    }
}

/// Ordered list items are the one exception: the item number is markup and
/// is dropped, every other word stays.
#[test]
fn test_round_trip_drops_only_ordered_list_numbers() {
    let sample = "1. The parties agree\n2) Payment within 30 days\n10. Termination";
    let round_trip = markdown_to_plain(&plain_to_markdown(sample));

    assert_eq!(round_trip, "The parties agree\nPayment within 30 days\nTermination");
    let expected: Vec<String> = words(sample)
        .into_iter()
        .filter(|word| !["1", "2", "10"].contains(&word.as_str()))
        .collect();
    assert_eq!(words(&round_trip), expected);
}

#[test]
fn test_provider_markdown_is_flattened() {
    let markdown = "## Диплома\n\n**Име:** Ана _Петровска_\n\n- Просек: 9.8\n- [Верификација](https://example.com/verify)\n\n---\n\n`ID-77`";
    assert_eq!(
        markdown_to_plain(markdown),
        "Диплома\n\nИме: Ана Петровска\n\nПросек: 9.8\nВерификација\n\nID-77"
    );
}

#[test]
fn test_plain_to_markdown_keeps_paragraphs() {
    let text = "First paragraph.\n\nSecond paragraph.";
    assert_eq!(plain_to_markdown(text), text);
}
