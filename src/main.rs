use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;

use talent_match::config::{self, ConfigSource};
use talent_match::ingest::{self, CustomApplicationForm, MatchRequest};
use talent_match::output;
use talent_match::scoring::{self, Component, ScoringEngine};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_OUTPUT: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Args, Debug, Default)]
struct InputArgs {
    /// JSON file with a list of job applications
    input: Option<PathBuf>,

    /// Use the bundled sample applications instead of a file
    #[arg(long, conflicts_with = "input")]
    sample: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score every application in a file (default if no subcommand)
    Score {
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Only show results at or above the minimum match score
        #[arg(long)]
        above_threshold: bool,

        /// Also write results as CSV
        #[arg(long, value_name = "PATH")]
        export_csv: Option<PathBuf>,

        /// Also write simplified results as JSON
        #[arg(long, value_name = "PATH")]
        export_json: Option<PathBuf>,
    },
    /// Show the component breakdown for one application
    Show {
        /// Application id (job_app_id)
        id: String,

        #[command(flatten)]
        input: InputArgs,
    },
    /// Score a single ad-hoc application from the command line
    Quick {
        /// Required core skills, comma-separated
        #[arg(long, default_value = "")]
        skills: String,
        /// Minimum years of experience
        #[arg(long, default_value_t = 0.0)]
        experience: f64,
        /// Required education level
        #[arg(long, default_value = "")]
        education: String,
        /// Required certifications, comma-separated
        #[arg(long, default_value = "")]
        certifications: String,
        /// Candidate skills, comma-separated
        #[arg(long, default_value = "")]
        talent_skills: String,
        /// Candidate years of experience
        #[arg(long, default_value_t = 0.0)]
        talent_experience: f64,
        /// Candidate education level
        #[arg(long, default_value = "")]
        talent_education: String,
        /// Candidate certifications, comma-separated
        #[arg(long, default_value = "")]
        talent_certifications: String,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "talent-match")]
#[command(about = "Score how well candidates match job requirements", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging and per-result detail
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/talent-match/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Override a weight for this run, e.g. core_skills=0.6 (repeatable)
    #[arg(short, long = "weight", value_name = "KEY=VALUE", global = true, value_parser = scoring::parse_weight_override)]
    weights: Vec<(Component, f64)>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn load_requests(input: &InputArgs) -> Vec<MatchRequest> {
    let loaded = match (&input.input, input.sample) {
        (Some(path), _) => ingest::load_applications(path),
        (None, true) => ingest::sample_applications(),
        (None, false) => {
            eprintln!("No input given. Pass a JSON file or --sample.");
            std::process::exit(EXIT_INPUT);
        }
    };
    match loaded {
        Ok(requests) => requests,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    }
}

/// Everything a scoring command needs, built once from config + overrides
struct Session {
    engine: ScoringEngine,
    threshold: f64,
    show_detail: bool,
    use_colors: bool,
}

fn start_session(config_path: Option<PathBuf>, overrides: &[(Component, f64)], verbose: bool) -> Session {
    // Never fatal: each bad setting falls back to its default
    let loaded = config::load_config(config_path);
    if !loaded.problems.is_empty() {
        eprintln!("Config problems:");
        for problem in &loaded.problems {
            eprintln!("  - {}", problem);
        }
    }
    let config = loaded.config;

    if verbose {
        match &loaded.source {
            ConfigSource::File(path) => eprintln!("Loaded config from {}", path.display()),
            ConfigSource::Defaults => eprintln!("Using default config"),
        }
    }

    let mut weights = config.weights;
    for (component, weight) in overrides {
        debug!(%component, weight, "weight override");
        weights.set(*component, *weight);
    }
    if let Some(warning) = weights.sum_warning() {
        eprintln!("Warning: {}", warning);
    }

    Session {
        engine: ScoringEngine::from_config(&config).with_weights(weights),
        threshold: config.thresholds.minimum_match_score,
        show_detail: verbose || config.debug_mode,
        use_colors: output::should_use_colors(),
    }
}

fn main() {
    let cli = Cli::parse();
    talent_match::logging::configure_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Score {
        input: InputArgs::default(),
        format: OutputFormat::Table,
        above_threshold: false,
        export_csv: None,
        export_json: None,
    });
    let config_path = cli.config.map(PathBuf::from);
    let start_time = Instant::now();

    match command {
        Commands::Init { force } => match config::write_default_config(config_path, force) {
            Ok(path) => println!("Wrote default config to {}", path.display()),
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        },
        Commands::Score {
            input,
            format,
            above_threshold,
            export_csv,
            export_json,
        } => {
            let session = start_session(config_path, &cli.weights, cli.verbose);
            let requests = load_requests(&input);
            let results = session.engine.score_all(&requests);
            let threshold = session.threshold;

            let mut ranked = output::rank_results(&results);
            if above_threshold {
                ranked.retain(|r| r.total_score >= threshold);
            }

            match format {
                OutputFormat::Table => {
                    println!(
                        "{}",
                        output::format_results_table(&ranked, threshold, session.use_colors)
                    );
                    if session.show_detail {
                        for result in &ranked {
                            let request = ingest::find_by_id(&requests, &result.job_app_id);
                            println!();
                            println!(
                                "{}",
                                output::format_result_detail(
                                    result,
                                    request,
                                    threshold,
                                    session.use_colors
                                )
                            );
                        }
                    }
                    println!();
                    println!(
                        "{}",
                        output::format_summary(&output::summarize(&results, threshold), threshold)
                    );
                }
                OutputFormat::Tsv => println!("{}", output::format_tsv(&ranked)),
                OutputFormat::Json => {
                    // Machine output keeps input order
                    let ordered = if above_threshold {
                        output::filter_above_threshold(&results, threshold)
                    } else {
                        results.iter().collect()
                    };
                    match output::format_json(&ordered) {
                        Ok(json) => println!("{}", json),
                        Err(e) => {
                            eprintln!("Output error: {:#}", e);
                            std::process::exit(EXIT_OUTPUT);
                        }
                    }
                }
            }

            if let Some(path) = export_csv {
                if let Err(e) = output::export_csv(&path, &results) {
                    eprintln!("Export failed: {:#}", e);
                    std::process::exit(EXIT_OUTPUT);
                }
            }
            if let Some(path) = export_json {
                if let Err(e) = output::export_json(&path, &results) {
                    eprintln!("Export failed: {:#}", e);
                    std::process::exit(EXIT_OUTPUT);
                }
            }

            if cli.verbose {
                eprintln!();
                eprintln!(
                    "Scored {} applications in {:?}",
                    results.len(),
                    start_time.elapsed()
                );
            }
        }
        Commands::Show { id, input } => {
            let session = start_session(config_path, &cli.weights, cli.verbose);
            let requests = load_requests(&input);
            let Some(request) = requests.iter().find(|r| r.job_app_id.matches_str(&id)) else {
                eprintln!("No job application with id {}.", id);
                std::process::exit(EXIT_INPUT);
            };
            let result = session.engine.score_application(request);
            println!(
                "{}",
                output::format_result_detail(&result, Some(request), session.threshold, session.use_colors)
            );
        }
        Commands::Quick {
            skills,
            experience,
            education,
            certifications,
            talent_skills,
            talent_experience,
            talent_education,
            talent_certifications,
        } => {
            if !(experience >= 0.0 && talent_experience >= 0.0) {
                eprintln!("Experience must be a non-negative number.");
                std::process::exit(EXIT_INPUT);
            }
            let session = start_session(config_path, &cli.weights, cli.verbose);
            let request = ingest::build_custom_application(&CustomApplicationForm {
                core_skills: skills,
                min_experience: experience,
                education,
                certifications,
                talent_skills,
                talent_experience,
                talent_education,
                talent_certifications,
            });
            let result = session.engine.score_application(&request);
            println!(
                "{}",
                output::format_result_detail(&result, Some(&request), session.threshold, session.use_colors)
            );
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
