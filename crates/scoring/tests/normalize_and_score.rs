//! Normalizer and scorer used together through the trait object, the way
//! the recommender wires them.

use catalog_loader::{CourseCatalog, CourseRecord};
use scoring::{normalize_to_string, rank_by_score, SimilarityScorer, StopWordNormalizer, TextNormalizer};
use std::sync::Arc;

#[test]
fn test_trait_object_pipeline() {
    let catalog = Arc::new(CourseCatalog::from_records(vec![
        CourseRecord::new("Cloud Computing", "Google Digital Garage", "Cloud storage and online collaboration"),
        CourseRecord::new("Time Management", "Skillshare", "Time management and deadlines"),
        CourseRecord::new("File Management in Cloud Platforms", "Coursera", "File management and backup in cloud storage platforms"),
    ]));
    let normalizer: Arc<dyn TextNormalizer> = Arc::new(StopWordNormalizer::new());
    let scorer = SimilarityScorer::new(catalog);

    let normalized = normalize_to_string(normalizer.as_ref(), "Where do I keep backup files in cloud storage?");
    assert_eq!(normalized, "backup files cloud storage");

    let mut scored = scorer.score(&normalized);
    rank_by_score(&mut scored);

    assert_eq!(scored[0].course_id, 2);
    assert_eq!(scored[2].course_id, 1);
    assert_eq!(scored[2].score, 0.0);
}

#[test]
fn test_signature_addresses_do_not_dilute_the_match() {
    let catalog = Arc::new(CourseCatalog::from_records(vec![CourseRecord::new(
        "SQL Database Management",
        "Udemy",
        "Learn SQL and database management",
    )]));
    let normalizer = StopWordNormalizer::new();
    let scorer = SimilarityScorer::new(catalog);

    let normalized = normalize_to_string(
        &normalizer,
        "sql help. Contact john.smith@example.com or https://www.company.com",
    );
    assert_eq!(normalized, "sql help contact");

    // One shared term out of three query terms, roughly 0.151
    let score = scorer.score(&normalized)[0].score;
    assert!(score > 0.1, "score {score} fell below the threshold");
    assert!((score - 0.1506).abs() < 1e-3);
}
