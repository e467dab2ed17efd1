use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use supplement_advisor::config::{self, LogFormat};
use supplement_advisor::store::{SessionSnapshot, Store};
use supplement_advisor::{
    enrich, feedback, util, Advisor, AdvisorConfig, BehavioralMetrics, Catalog,
    DietaryRestrictions, QuizAnswers, RecommendationReport, SessionContext,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "supplement-advisor")]
#[command(about = "Score nutrition-quiz answers against a supplement catalog and explain the matches")]
struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Data directory for history and overrides
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Recommend supplements for a quiz submission
    Recommend {
        /// Quiz answers JSON
        #[arg(short, long)]
        answers: PathBuf,
        /// Behavioral metrics JSON
        #[arg(short, long)]
        metrics: Option<PathBuf>,
        /// Maximum recommendations to show
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Rewrite explanations with the AI backend
        #[arg(long)]
        enrich: bool,
        /// Neither read nor append learning history
        #[arg(long)]
        no_history: bool,
        /// Ignore the cached report from the previous run
        #[arg(long)]
        fresh: bool,
    },

    /// Rate a recommended supplement from 1 (no help) to 5 (great)
    Feedback {
        /// Supplement id
        id: String,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
        /// Symptom the supplement was taken for (repeatable)
        #[arg(short, long = "symptom")]
        symptoms: Vec<String>,
    },

    /// List the supplement catalog
    Catalog {
        #[arg(long)]
        vegan: bool,
        #[arg(long)]
        vegetarian: bool,
        #[arg(long)]
        gluten_free: bool,
        #[arg(long)]
        dairy_free: bool,
    },

    /// Show or clear the learning history
    History {
        /// Delete history, overrides, and cached session
        #[arg(long)]
        clear: bool,
    },

    /// Print the effective configuration
    Config,
}

fn init_logging(config: &AdvisorConfig, verbose: bool) {
    use tracing_subscriber::EnvFilter;

    // --verbose wins, then RUST_LOG, then the config file level
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.logging.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let mut config = AdvisorConfig::load(&config_path)?;
    if let Some(dir) = cli.data_dir.clone() {
        config.storage.data_dir = dir;
    }
    init_logging(&config, cli.verbose);

    let store = Store::new(config.storage.data_dir.clone());

    match cli.command {
        Command::Recommend {
            answers,
            metrics,
            limit,
            json,
            enrich,
            no_history,
            fresh,
        } => cmd_recommend(
            config,
            &store,
            RecommendArgs {
                answers,
                metrics,
                limit,
                json,
                enrich,
                no_history,
                fresh,
            },
        ),
        Command::Feedback {
            id,
            rating,
            symptoms,
        } => cmd_feedback(config, &store, &id, rating, &symptoms),
        Command::Catalog {
            vegan,
            vegetarian,
            gluten_free,
            dairy_free,
        } => cmd_catalog(
            &store,
            DietaryRestrictions {
                vegan,
                vegetarian,
                gluten_free,
                dairy_free,
            },
        ),
        Command::History { clear } => cmd_history(&store, clear),
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// Builtin catalog with persisted effectiveness overrides applied.
fn load_catalog(store: &Store) -> Catalog {
    let mut catalog = Catalog::builtin();
    catalog.apply_overrides(&store.load_overrides());
    catalog
}

fn read_json_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

struct RecommendArgs {
    answers: PathBuf,
    metrics: Option<PathBuf>,
    limit: Option<usize>,
    json: bool,
    enrich: bool,
    no_history: bool,
    fresh: bool,
}

fn cmd_recommend(mut config: AdvisorConfig, store: &Store, args: RecommendArgs) -> Result<()> {
    let answers = QuizAnswers::from_json(&read_json_file(&args.answers)?)?;
    let metrics = match &args.metrics {
        Some(path) => BehavioralMetrics::from_json(&read_json_file(path)?)?,
        None => BehavioralMetrics::default(),
    };

    if let Some(limit) = args.limit {
        config.scoring.max_results = limit;
        config.scoring.min_results = config.scoring.min_results.min(limit);
    }
    config.validate()?;

    let fingerprint = SessionContext::fingerprint(&answers, &metrics);
    let cached = if args.fresh || args.limit.is_some() || args.enrich {
        None
    } else {
        store
            .load_session()
            .filter(|s| s.reusable_for(&fingerprint, !args.no_history))
    };

    let report = match cached {
        Some(snapshot) => {
            tracing::debug!(session = %snapshot.session_id, "reusing previous report");
            snapshot.report
        }
        None => {
            let history_cap = config.similarity.history_cap;
            let advisor = Advisor::with_catalog(config, load_catalog(store));
            let history = if args.no_history {
                Vec::new()
            } else {
                store.load_history()
            };

            let mut session =
                SessionContext::new(Utc::now(), &args.answers.display().to_string());
            let mut report = session.recommend(&advisor, &answers, &metrics, &history);
            if args.enrich {
                report.recommendations = enrich::enrich(
                    &report.recommendations,
                    &answers,
                    &cli_ai_analyzer::AnalyzeOptions::default(),
                );
            }

            if !args.no_history && !report.recommendations.is_empty() {
                let entry = advisor.learning_entry(&answers, &report.recommendations, Utc::now());
                if let Err(e) = store.append_history(entry, history_cap) {
                    tracing::warn!(error = %e, "failed to append learning history");
                }
            }

            let snapshot = SessionSnapshot {
                session_id: session.session_id.clone(),
                model_version: session.model_version.clone(),
                fingerprint,
                saved_at: Utc::now(),
                used_history: !args.no_history,
                report: report.clone(),
            };
            if let Err(e) = store.save_session(&snapshot) {
                tracing::warn!(error = %e, "failed to cache session");
            }
            report
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &RecommendationReport) {
    println!("=== Recommendations ===");
    println!("{}", report.summary);
    println!();

    if report.recommendations.is_empty() {
        println!("No supplements matched your answers.");
        return;
    }

    for (i, rec) in report.recommendations.iter().enumerate() {
        println!(
            "{}. {}  {}% match ({} confidence)",
            i + 1,
            rec.title,
            rec.match_percentage,
            rec.confidence
        );
        println!("   {}", rec.description);
        println!("   Dosage: {}", rec.dosage);
        println!("   Benefits: {}", rec.benefits.join(", "));
        println!("   Why: {}", rec.explanation);
        println!();
    }

    if report.history_adjusted {
        println!("(Scores include feedback from similar past sessions.)");
    }
}

fn cmd_feedback(
    config: AdvisorConfig,
    store: &Store,
    id: &str,
    rating: u8,
    symptoms: &[String],
) -> Result<()> {
    let mut advisor = Advisor::with_catalog(config, load_catalog(store));
    let outcome = feedback::record_feedback(store, &mut advisor, id, rating, symptoms);

    match outcome.effectiveness {
        Some(value) => {
            println!("{}: effectiveness now {:.1}", id, value);
            if outcome.attached_to_history {
                println!("Rating linked to your most recent session that showed {}.", id);
            }
            if !outcome.persisted {
                eprintln!("Warning: feedback could not be saved to {}", store.root().display());
            }
            if let Err(e) = store.clear_session() {
                tracing::warn!(error = %e, "failed to clear cached session");
            }
        }
        None => println!("Unknown supplement: {}", id),
    }
    Ok(())
}

fn cmd_catalog(store: &Store, restrictions: DietaryRestrictions) -> Result<()> {
    let catalog = load_catalog(store);
    let records: Vec<_> = catalog
        .records()
        .iter()
        .filter(|r| !restrictions.conflicts_with(&r.dietary))
        .collect();

    println!("=== Catalog ({} supplements) ===", records.len());
    for r in records {
        println!(
            "{:<22} {:<22} eff={:5.1}  targets=[{}]",
            r.id,
            util::truncate(&r.name, 20),
            r.effectiveness,
            r.target_symptoms.join(", ")
        );
    }
    Ok(())
}

fn cmd_history(store: &Store, clear: bool) -> Result<()> {
    if clear {
        store.clear()?;
        println!("Cleared learning data in {}", store.root().display());
        return Ok(());
    }

    let history = store.load_history();
    println!("=== Learning History ({} sessions) ===", history.len());
    for entry in history.iter().rev().take(10) {
        let feedback: Vec<String> = entry
            .feedback
            .iter()
            .map(|(id, r)| format!("{}={}", id, r))
            .collect();
        println!(
            "{}  shown=[{}]  feedback=[{}]",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.recommendations.join(", "),
            feedback.join(", ")
        );
    }
    if history.len() > 10 {
        println!("... and {} older sessions", history.len() - 10);
    }

    let tally = store.load_symptom_feedback();
    if !tally.is_empty() {
        println!();
        println!("=== Symptom Feedback ===");
        for (symptom, t) in &tally {
            println!(
                "{:<18} ratings={:3}  mean={:.2}",
                symptom,
                t.count,
                t.mean().unwrap_or(0.0)
            );
        }
    }
    Ok(())
}
