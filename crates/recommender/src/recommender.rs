//! # Course Recommender
//!
//! This module coordinates one recommendation:
//! 1. Guard against empty input
//! 2. Normalize the message
//! 3. Score every catalog course (TF-IDF + cosine similarity)
//! 4. Rank, threshold and truncate the similarity matches
//! 5. Collect keyword-forced suggestions from the raw message
//! 6. Merge: forced suggestions first, then similarity matches
//! 7. Fall back to default suggestions if nothing was found
//!
//! Nothing is deduplicated: a course suggested by a rule and also matched
//! by similarity appears twice.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use catalog_loader::CourseCatalog;
use pipeline::filters::{MinimumScoreFilter, TopNFilter};
use pipeline::{FilterPipeline, KeywordRuleSet, Suggestion};
use scoring::{
    normalize_to_string, rank_by_score, ScoredCourse, SimilarityScorer, StopWordNormalizer,
    TextNormalizer,
};

use crate::config::RecommenderConfig;

/// Why a course ended up in the result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecommendationSource {
    /// Forced by the keyword rule with this topic
    Keyword { topic: String },
    /// Matched by description similarity
    Similarity,
    /// Default suggestion for messages that matched nothing
    Fallback,
}

/// Final recommendation returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecommendation {
    pub name: String,
    pub provider: String,
    pub source: RecommendationSource,
    /// Similarity score, only for `RecommendationSource::Similarity`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl CourseRecommendation {
    fn from_suggestion(suggestion: &Suggestion, source: RecommendationSource) -> Self {
        Self {
            name: suggestion.name.clone(),
            provider: suggestion.provider.clone(),
            source,
            score: None,
        }
    }

    /// The (course, provider) pair shown to users
    pub fn as_pair(&self) -> (&str, &str) {
        (&self.name, &self.provider)
    }
}

/// Everything computed for one message, for `--explain` style output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecommendationReport {
    pub normalized_text: String,
    /// Every catalog course, ranked by descending similarity
    pub ranked: Vec<ScoredCourse>,
    /// Topics of the keyword rules that fired, in table order
    pub matched_topics: Vec<String>,
    pub used_fallback: bool,
    pub recommendations: Vec<CourseRecommendation>,
}

/// Main recommender. Cheap to clone; all state is shared read-only.
#[derive(Clone)]
pub struct CourseRecommender {
    catalog: Arc<CourseCatalog>,
    normalizer: Arc<dyn TextNormalizer>,
    scorer: SimilarityScorer,
    filter_pipeline: Arc<FilterPipeline>,
    rules: Arc<KeywordRuleSet>,
    fallback: Arc<Vec<Suggestion>>,
    fallback_enabled: bool,
}

impl CourseRecommender {
    /// Create a recommender with all components initialized
    ///
    /// # Arguments
    /// * `catalog` - Shared, already-validated course catalog
    /// * `normalizer` - Text normalizer applied to incoming messages
    /// * `config` - Thresholds, keyword table and fallback list
    pub fn new(
        catalog: Arc<CourseCatalog>,
        normalizer: Arc<dyn TextNormalizer>,
        config: RecommenderConfig,
    ) -> Self {
        let scorer = SimilarityScorer::new(catalog.clone());
        let filter_pipeline = Arc::new(
            FilterPipeline::new()
                .add_filter(MinimumScoreFilter::new(config.similarity_threshold))
                .add_filter(TopNFilter::new(config.max_similar)),
        );

        info!(
            "Recommender ready: {} courses, {} keyword rules, normalizer {}",
            catalog.len(),
            config.rules.len(),
            normalizer.name()
        );

        Self {
            catalog,
            normalizer,
            scorer,
            filter_pipeline,
            rules: Arc::new(config.rules),
            fallback: Arc::new(config.fallback),
            fallback_enabled: config.fallback_enabled,
        }
    }

    /// Recommender with the default normalizer and configuration
    pub fn with_defaults(catalog: Arc<CourseCatalog>) -> Self {
        Self::new(
            catalog,
            Arc::new(StopWordNormalizer::new()),
            RecommenderConfig::default(),
        )
    }

    pub fn catalog(&self) -> &Arc<CourseCatalog> {
        &self.catalog
    }

    /// Main entry point: recommend courses for one message.
    ///
    /// Never fails; the worst case is an empty or fallback-only list.
    pub fn recommend(&self, text: &str) -> Vec<CourseRecommendation> {
        self.explain(text).recommendations
    }

    /// Recommend for many messages in parallel; output order matches input.
    pub fn recommend_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<Vec<CourseRecommendation>> {
        texts
            .par_iter()
            .map(|text| self.recommend(text.as_ref()))
            .collect()
    }

    /// Run the full pipeline and keep the intermediate results.
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub fn explain(&self, text: &str) -> RecommendationReport {
        let start_time = Instant::now();

        if text.trim().is_empty() {
            debug!("Empty message, nothing to recommend");
            return RecommendationReport::default();
        }

        // Normalize
        let normalized_text = normalize_to_string(self.normalizer.as_ref(), text);
        debug!("Normalized message: {:?}", normalized_text);

        // Score and rank
        let mut ranked = self.scorer.score(&normalized_text);
        rank_by_score(&mut ranked);

        // Threshold and truncate
        let similar = self.apply_filters(ranked.clone());

        // Keyword layer
        let matched_topics: Vec<String> = self
            .rules
            .matching_topics(text)
            .into_iter()
            .map(str::to_string)
            .collect();

        // Merge
        let mut recommendations: Vec<CourseRecommendation> = self
            .rules
            .forced_suggestions(text)
            .into_iter()
            .map(|forced| {
                CourseRecommendation::from_suggestion(
                    forced.suggestion,
                    RecommendationSource::Keyword {
                        topic: forced.topic.to_string(),
                    },
                )
            })
            .collect();
        recommendations.extend(self.to_recommendations(&similar));

        // Fallback
        let used_fallback = self.fallback_enabled && recommendations.is_empty();
        if used_fallback {
            recommendations.extend(self.fallback.iter().map(|s| {
                CourseRecommendation::from_suggestion(s, RecommendationSource::Fallback)
            }));
        }

        info!(
            "Recommended {} courses ({} keyword rules fired, {} similarity matches{}) in {:.2?}",
            recommendations.len(),
            matched_topics.len(),
            similar.len(),
            if used_fallback { ", fallback" } else { "" },
            start_time.elapsed()
        );

        RecommendationReport {
            normalized_text,
            ranked,
            matched_topics,
            used_fallback,
            recommendations,
        }
    }

    /// Apply the filter pipeline; a failing filter drops the similarity part
    fn apply_filters(&self, ranked: Vec<ScoredCourse>) -> Vec<ScoredCourse> {
        match self.filter_pipeline.apply(ranked) {
            Ok(kept) => kept,
            Err(e) => {
                warn!("Similarity filtering failed, ignoring similarity matches: {e:#}");
                Vec::new()
            }
        }
    }

    fn to_recommendations(&self, similar: &[ScoredCourse]) -> Vec<CourseRecommendation> {
        similar
            .iter()
            .filter_map(|scored| {
                let course = self.catalog.get_course(scored.course_id)?;
                Some(CourseRecommendation {
                    name: course.name.clone(),
                    provider: course.provider.clone(),
                    source: RecommendationSource::Similarity,
                    score: Some(scored.score),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_loader::CourseRecord;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn build_test_catalog() -> Arc<CourseCatalog> {
        Arc::new(CourseCatalog::from_records(vec![
            CourseRecord::new(
                "SQL Database Management",
                "Udemy",
                "Learn SQL and database management",
            ),
        ]))
    }

    /// Normalizer that never produces tokens
    struct NoTokens;

    impl TextNormalizer for NoTokens {
        fn name(&self) -> &str {
            "NoTokens"
        }

        fn normalize(&self, _text: &str) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn test_sql_example() {
        let recommender = CourseRecommender::with_defaults(build_test_catalog());
        let recs = recommender.recommend("I need help with SQL databases");

        assert_eq!(recs.len(), 4);
        assert_eq!(recs[0].as_pair(), ("SQL Database Management", "Udemy"));
        assert_eq!(recs[1].as_pair(), ("Data Analysis Training", "edX"));
        assert_eq!(recs[2].as_pair(), ("Database Optimization", "Coursera"));
        assert!(recs[..3]
            .iter()
            .all(|r| r.source == RecommendationSource::Keyword { topic: "databases".to_string() }));

        // Same course again from similarity: no dedup
        assert_eq!(recs[3].as_pair(), ("SQL Database Management", "Udemy"));
        assert_eq!(recs[3].source, RecommendationSource::Similarity);
        assert!(recs[3].score.unwrap() > 0.1);
    }

    #[test]
    fn test_empty_input_returns_nothing() {
        let recommender = CourseRecommender::with_defaults(build_test_catalog());
        assert!(recommender.recommend("").is_empty());
        assert!(recommender.recommend("  \n\t ").is_empty());
    }

    #[test]
    fn test_fallback_for_unmatched_message() {
        let recommender = CourseRecommender::with_defaults(build_test_catalog());
        let report = recommender.explain("lunch on friday?");

        assert!(report.used_fallback);
        let pairs: Vec<_> = report.recommendations.iter().map(|r| r.as_pair()).collect();
        assert_eq!(
            pairs,
            vec![
                ("General Skills Training", "Udemy"),
                ("Professional Development", "Coursera")
            ]
        );
    }

    #[test]
    fn test_fallback_can_be_disabled() {
        let config = RecommenderConfig {
            fallback_enabled: false,
            ..RecommenderConfig::default()
        };
        let recommender = CourseRecommender::new(
            build_test_catalog(),
            Arc::new(StopWordNormalizer::new()),
            config,
        );
        assert!(recommender.recommend("lunch on friday?").is_empty());
    }

    #[test]
    fn test_degenerate_normalization_still_uses_keywords() {
        let recommender = CourseRecommender::new(
            build_test_catalog(),
            Arc::new(NoTokens),
            RecommenderConfig::default(),
        );
        let report = recommender.explain("SQL database");

        assert_eq!(report.normalized_text, "");
        assert!(report.ranked.iter().all(|s| s.score == 0.0));
        assert_eq!(report.recommendations.len(), 3);
        assert!(!report.used_fallback);
    }

    #[test]
    fn test_batch_matches_single_calls() {
        let recommender = CourseRecommender::with_defaults(build_test_catalog());
        let texts = ["sql help", "", "lunch"];
        let batch = recommender.recommend_batch(&texts);

        assert_eq!(batch.len(), 3);
        assert!(batch[1].is_empty());
        assert_eq!(batch[2].len(), 2);

        assert_eq!(batch[0], recommender.recommend("sql help"));
    }

    #[test]
    fn test_explain_reports_topics_and_keyword_sources_together() {
        let recommender = CourseRecommender::with_defaults(build_test_catalog());
        let report = recommender.explain("Excel reports for the HR team");

        assert_eq!(report.matched_topics, vec!["taxes/accounting", "human resources"]);
        let topics: Vec<&str> = report
            .recommendations
            .iter()
            .filter_map(|r| match &r.source {
                RecommendationSource::Keyword { topic } => Some(topic.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(topics.len(), 6);
        assert!(topics[..3].iter().all(|t| *t == "taxes/accounting"));
        assert!(topics[3..].iter().all(|t| *t == "human resources"));
    }

    #[test]
    fn test_signature_noise_keeps_similarity_match() {
        let recommender = CourseRecommender::new(
            build_test_catalog(),
            Arc::new(StopWordNormalizer::new()),
            RecommenderConfig {
                rules: KeywordRuleSet::empty(),
                ..RecommenderConfig::default()
            },
        );
        let report = recommender.explain("help please. Contact john.smith@example.com or https://www.company.com/sql");

        // The URL mentions sql but is not message text
        assert_eq!(report.normalized_text, "help contact");
        assert!(report.used_fallback);

        let recs = recommender.recommend("sql help. Contact john.smith@example.com or https://www.company.com");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].source, RecommendationSource::Similarity);
        assert!(recs[0].score.unwrap() > 0.1);
    }

    #[test]
    fn test_json_shape() {
        let rec = CourseRecommendation {
            name: "Cloud Computing".to_string(),
            provider: "Google Digital Garage".to_string(),
            source: RecommendationSource::Keyword {
                topic: "cloud storage".to_string(),
            },
            score: None,
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["source"]["kind"], "keyword");
        assert_eq!(json["source"]["topic"], "cloud storage");
        assert!(json.get("score").is_none());
    }
}
