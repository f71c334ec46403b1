use docsim::{BatchComparator, Document, PairOutcome};

fn main() {
    let documents = vec![
        Document::new(1, "a.txt", "Welcome to Jimbocho, the town of books and curry!"),
        Document::new(2, "b.txt", "Welcome to Jimbocho, the city of books and curry!"),
        Document::new(3, "c.txt", "We welcome you to Jimbocho, the town of books and curry."),
        Document::new(4, "d.txt", "Welcome to the town of books and curry, Jimbocho!"),
    ];

    // Words glued to punctuation and English stopwords are dropped, so every
    // document boils down to three words.
    let results = BatchComparator::default()
        .parallel(true)
        .compare_all(&documents)
        .unwrap();

    for outcome in &results {
        if let PairOutcome::Similar(r) = outcome {
            println!(
                "{} vs {}: {:.2}% ({})",
                r.doc_a_name,
                r.doc_b_name,
                r.ratio * 100.,
                r.summary()
            );
        }
    }

    let ids: Vec<_> = results.entries().iter().map(PairOutcome::ids).collect();
    assert_eq!(ids, vec![(1, 3), (1, 4), (3, 4), (1, 2), (2, 3), (2, 4)]);
    assert_eq!(results.entries()[0].ratio(), 1.);
}
