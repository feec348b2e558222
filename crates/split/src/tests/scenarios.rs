//! Reference scenarios for the splitter.

use crate::{add_overlap, RecursiveSplitter, SplitConfig};
use std::collections::BTreeMap;

fn splitter(separators: &[&str], chunk_size: usize, overlap: i64) -> RecursiveSplitter {
    RecursiveSplitter::new(
        SplitConfig::builder()
            .separators(separators.iter().copied())
            .chunk_size(chunk_size)
            .overlap(overlap)
            .build(),
    )
    .unwrap()
}

#[test]
fn test_two_paragraphs_split_at_paragraph_break() {
    let splitter = splitter(&["\n\n", "\n", " "], 50, 0);
    let text = "Paragraph one is short.\n\nParagraph two is also quite short and simple.";

    let output = splitter.split(text);

    assert_eq!(output.len(), 2);
    assert_eq!(
        output.texts(),
        vec![
            "Paragraph one is short.\n\n",
            "Paragraph two is also quite short and simple."
        ]
    );
    assert!(output.chunks().iter().all(|c| c.text.chars().count() <= 50));
    assert!(output.oversize_indices().is_empty());
}

#[test]
fn test_unsplittable_word_is_kept_whole_and_flagged() {
    let splitter = splitter(&["\n\n", "\n", ".", ",", " "], 10, 0);

    let output = splitter.split("abcdefghijk");

    assert_eq!(output.texts(), vec!["abcdefghijk"]);
    assert_eq!(output.oversize_indices(), vec![0]);
    assert!(output.to_documents()[0].oversize);
}

#[test]
fn test_overlap_borrow_rule() {
    let overlapped = add_overlap(&["hello", "world", "again"], 3);
    assert_eq!(overlapped[0], "hellowor");
    assert_eq!(overlapped[1], "lloworldaga");
    assert_eq!(overlapped[2], "rldagain");
}

#[test]
fn test_overlap_through_pipeline() {
    let splitter = splitter(&[" "], 6, 3);

    let output = splitter.split("hello world again");

    assert_eq!(
        output.texts(),
        vec!["hello wor", "lo world aga", "ld again"]
    );
    let cores: Vec<&str> = output.chunks().iter().map(|c| c.core_text()).collect();
    assert_eq!(cores, vec!["hello ", "world ", "again"]);
}

#[test]
fn test_pages_aligned_with_chunks() {
    let splitter = splitter(&["\n\n", "\n", " "], 15, 0);

    let output = splitter.split(["Page one text. ", "Page two text."]);

    assert_eq!(output.texts(), vec!["Page one text. ", "Page two text."]);
    assert_eq!(output.page_numbers(), &[vec![0], vec![1]]);
}

#[test]
fn test_chunk_straddling_page_break_lists_both_pages() {
    // Splitting on "." leaves the page-ending space at the front of chunk 1.
    let splitter = splitter(&["\n\n", "\n", ".", ",", " "], 15, 0);

    let output = splitter.split(["Page one text. ", "Page two text."]);

    assert_eq!(output.texts(), vec!["Page one text.", " Page two text."]);
    assert_eq!(output.page_numbers(), &[vec![0], vec![0, 1]]);
}

#[test]
fn test_overlap_extends_page_ranges() {
    let splitter = splitter(&[" "], 5, 2);

    let output = splitter.split(["aaaa ", "bbbb ", "cccc"]);

    assert_eq!(output.texts(), vec!["aaaa bb", "a bbbb cc", "b cccc"]);
    assert_eq!(
        output.page_numbers(),
        &[vec![0, 1], vec![0, 1, 2], vec![1, 2]]
    );
}

#[test]
fn test_page_provenance_many_chunks() {
    let pages = [
        "Clause 1. The tenant shall pay rent monthly.\n",
        "Clause 2. The landlord shall keep the roof in repair.\n",
        "Clause 3. Either party may end the lease with notice.",
    ];
    let splitter = splitter(&["\n", ".", " "], 30, 0);

    let output = splitter.split(pages);

    let first_page_of: Vec<usize> = output.page_numbers().iter().map(|p| p[0]).collect();
    let mut sorted = first_page_of.clone();
    sorted.sort_unstable();
    assert_eq!(first_page_of, sorted);
    assert_eq!(output.page_numbers().first(), Some(&vec![0]));
    assert_eq!(output.page_numbers().last(), Some(&vec![2]));
}

#[test]
fn test_metadata_mismatch_rejected() {
    let splitter = splitter(&["\n\n", "\n", " "], 50, 0);
    let text = "Paragraph one is short.\n\nParagraph two is also quite short and simple.";

    let mut metadata = BTreeMap::new();
    metadata.insert("case_id".to_string(), vec!["C-1"]);

    assert!(splitter.split_documents(text, &metadata).is_err());

    metadata.insert("case_id".to_string(), vec!["C-1", "C-2"]);
    let records = splitter.split_documents(text, &metadata).unwrap();
    assert_eq!(records[0].metadata["case_id"], "C-1");
    assert_eq!(records[1].metadata["case_id"], "C-2");
}
