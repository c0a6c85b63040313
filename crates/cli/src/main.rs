mod demo;

use anyhow::{bail, ensure, Context, Result};
use catalog_loader::{CourseCatalog, CourseId, CourseRecord};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::seq::IndexedRandom;
use recommender::{
    ConfigLoader, CourseRecommendation, CourseRecommender, RecommendationReport,
    RecommendationSource,
};
use scoring::StopWordNormalizer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// course-recs - Training course recommender for chat and e-mail messages
#[derive(Parser)]
#[command(name = "course-recs")]
#[command(about = "Recommend training courses for a chat or e-mail message", long_about = None)]
struct Cli {
    /// Path to the training-program catalog (CSV)
    #[arg(short, long, default_value = "data/training_programs.csv")]
    catalog: PathBuf,

    /// Recommender config file (TOML); ./course-recs.toml is read if present
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get course recommendations for a message
    Recommend {
        /// Message text
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// Read the message from a file instead
        #[arg(long)]
        file: Option<PathBuf>,

        /// Show normalization, scores and fired keyword rules
        #[arg(long)]
        explain: bool,

        /// Print recommendations as JSON
        #[arg(long, conflicts_with = "explain")]
        json: bool,
    },

    /// Run the recommender over the built-in sample inbox and chat
    Demo {
        /// Show normalization, scores and fired keyword rules
        #[arg(long)]
        explain: bool,
    },

    /// List every course in the catalog
    Catalog,

    /// Search for courses by name
    Search {
        /// Course name to search for (case-insensitive substring match)
        #[arg(long)]
        name: String,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Load the catalog; any problem here is fatal
    let start = Instant::now();
    let catalog = Arc::new(
        CourseCatalog::load_from_file(&cli.catalog)
            .with_context(|| format!("Failed to load course catalog {}", cli.catalog.display()))?,
    );
    tracing::info!("Loaded {} courses in {:?}", catalog.len(), start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            text,
            file,
            explain,
            json,
        } => {
            let recommender = build_recommender(catalog, cli.config.as_deref())?;
            handle_recommend(&recommender, text, file, explain, json)?
        }
        Commands::Demo { explain } => {
            let recommender = build_recommender(catalog, cli.config.as_deref())?;
            handle_demo(&recommender, explain)
        }
        Commands::Catalog => handle_catalog(&catalog)?,
        Commands::Search { name } => handle_search(&catalog, &name)?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => {
            let recommender = build_recommender(catalog, cli.config.as_deref())?;
            handle_benchmark(recommender, requests, concurrent).await?
        }
    }

    Ok(())
}

/// Load configuration and build the recommender around the shared catalog
fn build_recommender(catalog: Arc<CourseCatalog>, config_path: Option<&Path>) -> Result<CourseRecommender> {
    let config = ConfigLoader::load(config_path).context("Failed to load configuration")?;
    Ok(CourseRecommender::new(
        catalog,
        Arc::new(StopWordNormalizer::new()),
        config,
    ))
}

/// Handle the 'recommend' command
fn handle_recommend(
    recommender: &CourseRecommender,
    text: Option<String>,
    file: Option<PathBuf>,
    explain: bool,
    json: bool,
) -> Result<()> {
    let message = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read message from {}", path.display()))?,
        (None, None) => bail!("Provide a message with --text or --file"),
    };

    let report = recommender.explain(&message);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report.recommendations)
                .context("Failed to serialize recommendations")?
        );
        return Ok(());
    }

    if explain {
        print_explanation(recommender.catalog(), &report);
    }
    print_recommendations(&report.recommendations);
    Ok(())
}

/// Handle the 'demo' command
fn handle_demo(recommender: &CourseRecommender, explain: bool) {
    for sample in demo::all_samples() {
        println!("{}", format!("✉ {}", sample.subject).bold().blue());
        println!("{}", sample.body);

        let report = recommender.explain(sample.body);
        if explain {
            print_explanation(recommender.catalog(), &report);
        }
        print_recommendations(&report.recommendations);
        println!();
    }
}

/// Handle the 'catalog' command
fn handle_catalog(catalog: &CourseCatalog) -> Result<()> {
    println!(
        "{}",
        format!(
            "{} courses from {} providers:",
            catalog.len(),
            catalog.provider_count()
        )
        .bold()
        .blue()
    );
    for course in catalog.courses() {
        println!(
            "{}. {} by {}",
            (course.id + 1).to_string().green(),
            course.name,
            course.provider
        );
        println!("   {}", course.description.dimmed());
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(catalog: &CourseCatalog, name: &str) -> Result<()> {
    let matches = search_results(catalog, name);

    println!("{}", format!("Search results for '{}':", name).bold().blue());
    if matches.is_empty() {
        println!("No courses found");
    }
    for (course, exact) in matches.iter().take(20) {
        let line = format!("{}: {} by {}", course.id + 1, course.name, course.provider);
        if *exact {
            println!("{}", line.bold());
        } else {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Every course whose name contains `name`, in catalog order, flagged when
/// the whole name matches.
fn search_results<'a>(catalog: &'a CourseCatalog, name: &str) -> Vec<(&'a CourseRecord, bool)> {
    let exact: Vec<CourseId> = catalog.find_by_name(name).iter().map(|c| c.id).collect();
    catalog
        .search_by_name(name)
        .into_iter()
        .map(|course| (course, exact.contains(&course.id)))
        .collect()
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    recommender: CourseRecommender,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    ensure!(requests > 0, "--requests must be at least 1");
    ensure!(concurrent > 0, "--concurrent must be at least 1");

    let samples: Vec<&'static str> = demo::all_samples().map(|s| s.body).collect();
    let mut rng = rand::rng();
    let messages: Vec<&'static str> = (0..requests)
        .filter_map(|_| samples.choose(&mut rng).copied())
        .collect();

    // Limit in-flight requests with a semaphore, run each on the blocking pool
    let semaphore = Arc::new(Semaphore::new(concurrent));
    let wall_clock = Instant::now();
    let mut handles = vec![];
    for message in messages {
        let recommender = recommender.clone();
        let permit = semaphore.clone().acquire_owned().await?;
        let handle = tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            let recs = recommender.recommend(message);
            drop(permit);
            (start.elapsed(), recs.len())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings: Vec<Duration> = vec![];
    for handle in handles {
        let (elapsed, _count) = handle.await.context("Benchmark task panicked")?;
        timings.push(elapsed);
    }
    let wall_time = wall_clock.elapsed();

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f32 / wall_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Wall time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Print normalization, similarity scores and fired rules
fn print_explanation(catalog: &CourseCatalog, report: &RecommendationReport) {
    println!("{} {:?}", "Normalized:".cyan(), report.normalized_text);
    if report.matched_topics.is_empty() {
        println!("{} none", "Keyword rules:".cyan());
    } else {
        println!("{} {}", "Keyword rules:".cyan(), report.matched_topics.join(", "));
    }
    println!("{}", "Top similarity scores:".cyan());
    for scored in report.ranked.iter().take(10) {
        if let Some(course) = catalog.get_course(scored.course_id) {
            println!("  {:.3}  {} by {}", scored.score, course.name, course.provider);
        }
    }
    if report.used_fallback {
        println!("{}", "Nothing matched, using fallback suggestions".yellow());
    }
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[CourseRecommendation]) {
    println!("{}", "Course Recommendations:".bold().blue());
    if recommendations.is_empty() {
        println!("No recommendations");
        return;
    }
    for (idx, rec) in recommendations.iter().enumerate() {
        let source = match &rec.source {
            RecommendationSource::Keyword { topic } => format!("keyword: {}", topic),
            RecommendationSource::Similarity => {
                format!("similarity {:.2}", rec.score.unwrap_or_default())
            }
            RecommendationSource::Fallback => "fallback".to_string(),
        };
        println!(
            "{}. {} by {} {}",
            (idx + 1).to_string().green(),
            rec.name,
            rec.provider,
            format!("[{}]", source).dimmed()
        );
    }
}
