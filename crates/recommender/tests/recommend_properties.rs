//! End-to-end behaviour of `CourseRecommender::recommend`.

use catalog_loader::{CourseCatalog, CourseRecord};
use recommender::{CourseRecommender, RecommendationSource, RecommenderConfig};
use scoring::StopWordNormalizer;
use std::sync::Arc;

fn build_catalog() -> Arc<CourseCatalog> {
    Arc::new(CourseCatalog::from_records(vec![
        CourseRecord::new("Advanced Excel Training", "Coursera", "Excel formulas, pivot tables and financial reports"),
        CourseRecord::new("Tax Accounting Certification", "LinkedIn Learning", "Tax accounting, compliance and regulations"),
        CourseRecord::new("SQL Database Management", "Udemy", "Learn SQL and database management"),
        CourseRecord::new("Data Analysis Training", "edX", "Data analysis with SQL and spreadsheets"),
        CourseRecord::new("HR Management Training", "LinkedIn Learning", "Human resources, hiring and team roles"),
        CourseRecord::new("Cloud Computing", "Google Digital Garage", "Cloud storage, backup and computing basics"),
        CourseRecord::new("Presentation Skills Training", "Skillshare", "Build slides and presentation skills for meetings"),
        CourseRecord::new("Public Speaking Masterclass", "Coursera", "Public speaking and confident communication"),
        CourseRecord::new("Financial Modeling", "edX", "Financial models, forecasting and calculations"),
        CourseRecord::new("Database Optimization", "Coursera", "Tune database indexes and SQL queries"),
    ]))
}

fn recommender() -> CourseRecommender {
    CourseRecommender::with_defaults(build_catalog())
}

fn keyword_count(recs: &[recommender::CourseRecommendation]) -> usize {
    recs.iter()
        .take_while(|r| matches!(r.source, RecommendationSource::Keyword { .. }))
        .count()
}

#[test]
fn test_tax_and_database_rules_come_first_in_table_order() {
    let recs = recommender().recommend("The database totals disagree with the tax report");

    let topics: Vec<_> = recs
        .iter()
        .filter_map(|r| match &r.source {
            RecommendationSource::Keyword { topic } => Some(topic.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        topics,
        vec![
            "taxes/accounting",
            "taxes/accounting",
            "taxes/accounting",
            "databases",
            "databases",
            "databases"
        ]
    );
    assert_eq!(recs[0].name, "Advanced Excel Training");
    assert_eq!(recs[3].name, "SQL Database Management");
    assert!(recs[6..].iter().all(|r| r.source == RecommendationSource::Similarity));
}

#[test]
fn test_length_bound_and_similarity_ordering() {
    let recommender = recommender();
    let messages = [
        "Our SQL database queries are slow",
        "I need to prepare slides for the quarterly meetings",
        "Cloud backup keeps failing for shared files",
        "We want better financial calculations and forecasting models",
        "random unrelated words about gardening",
    ];

    for message in messages {
        let recs = recommender.recommend(message);
        let forced = keyword_count(&recs);
        let similar: Vec<f64> = recs
            .iter()
            .filter(|r| r.source == RecommendationSource::Similarity)
            .map(|r| r.score.unwrap())
            .collect();

        assert!(recs.len() <= forced + 5 || recs.len() == 2, "{message}");
        assert!(similar.len() <= 5);
        assert!(similar.iter().all(|&s| s > 0.1), "{message}: {similar:?}");
        assert!(similar.windows(2).all(|w| w[0] >= w[1]), "{message}: {similar:?}");
    }
}

#[test]
fn test_recommend_is_idempotent() {
    let recommender = recommender();
    let message = "Need help with presentation slides and SQL reports";
    assert_eq!(recommender.recommend(message), recommender.recommend(message));
}

#[test]
fn test_arabic_email_fires_rules_without_crashing() {
    let recs = recommender().recommend(
        "والتنواجه مشاكل متكررة مع تنظيم البيانات داخل نظام قواعد البيانات الحالي.",
    );
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0].name, "SQL Database Management");
}

#[test]
fn test_custom_limits() {
    let config = RecommenderConfig {
        similarity_threshold: 0.0,
        max_similar: 2,
        ..RecommenderConfig::default()
    };
    let recommender = CourseRecommender::new(build_catalog(), Arc::new(StopWordNormalizer::new()), config);

    let recs = recommender.recommend("gardening sql");
    let similar = recs
        .iter()
        .filter(|r| r.source == RecommendationSource::Similarity)
        .count();
    assert_eq!(similar, 2);
}

#[test]
fn test_concurrent_calls_agree() {
    let recommender = recommender();
    let message = "Our SQL database queries are slow";
    let expected = recommender.recommend(message);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let recommender = recommender.clone();
            std::thread::spawn(move || recommender.recommend(message))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
