use std::path::PathBuf;

use clap::{Parser, Subcommand};
use triage_core::constants::{DEFAULT_MAX_SYMPTOMS, DEFAULT_MAX_SYMPTOM_CHARS};
use triage_core::{AnalysisResult, CoreConfig, DeclaredSeverity, SymptomRequest, TriageService};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Symptom triage engine CLI")]
struct Cli {
    /// YAML knowledge pack to use instead of the built-in tables
    #[arg(long, global = true)]
    knowledge_pack: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse one or more symptoms
    Analyze {
        /// Symptoms as reported, e.g. "chest pain"
        #[arg(required = true)]
        symptoms: Vec<String>,
        /// How long the symptoms have lasted, e.g. "2 days"
        #[arg(long)]
        duration: Option<String>,
        /// Declared severity: mild, moderate or severe
        #[arg(long)]
        severity: Option<DeclaredSeverity>,
        /// Prior conditions (comma-separated)
        #[arg(long, value_delimiter = ',')]
        history: Vec<String>,
        /// Current medications (comma-separated)
        #[arg(long, value_delimiter = ',')]
        medications: Vec<String>,
        /// Known allergies (comma-separated)
        #[arg(long, value_delimiter = ',')]
        allergies: Vec<String>,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all recognised symptoms
    Symptoms,
    /// Search recognised symptoms by partial text
    Search {
        /// Partial symptom text
        query: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let cfg = CoreConfig::new(
        cli.knowledge_pack,
        DEFAULT_MAX_SYMPTOMS,
        DEFAULT_MAX_SYMPTOM_CHARS,
    )?;
    let service = TriageService::new(&cfg)?;

    match cli.command {
        Some(Commands::Analyze {
            symptoms,
            duration,
            severity,
            history,
            medications,
            allergies,
            json,
        }) => {
            let request = SymptomRequest {
                symptoms,
                duration,
                severity,
                history: non_empty(history),
                medications: non_empty(medications),
                allergies: non_empty(allergies),
            };
            match service.analyze(&request) {
                Ok(result) if json => println!("{}", serde_json::to_string_pretty(&result)?),
                Ok(result) => print_report(&result),
                Err(e) => eprintln!("Error analysing symptoms: {}", e),
            }
        }
        Some(Commands::Symptoms) => {
            for symptom in service.list_symptoms() {
                println!("{}", symptom);
            }
        }
        Some(Commands::Search { query }) => {
            let hits = service.search_symptoms(&query);
            if hits.is_empty() {
                println!("No symptoms match '{}'.", query);
            } else {
                for symptom in hits {
                    println!("{}", symptom);
                }
            }
        }
        None => {
            println!("Use 'triage --help' for commands");
        }
    }

    Ok(())
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

fn print_report(result: &AnalysisResult) {
    println!("Urgency: {}", result.urgency);
    println!("Confidence: {:.2}", result.confidence);

    println!("\nSymptoms:");
    for symptom in &result.normalized_symptoms {
        let marker = if symptom.is_recognised() { "" } else { " (unrecognised)" };
        println!(
            "  {} -> {} [{}]{}",
            symptom.original,
            symptom.standardized,
            symptom.severity.as_str(),
            marker
        );
    }

    if !result.conditions.is_empty() {
        println!("\nPossible conditions:");
        for condition in &result.conditions {
            println!(
                "  {} ({}) p={:.2} matches={} matched: {}",
                condition.name,
                condition.code,
                condition.probability,
                condition.match_count,
                condition.matched_symptoms.join(", ")
            );
        }
    }

    for rec in &result.recommendations {
        println!("\nRecommendation [{}]: {}", rec.kind.as_str(), rec.action);
        println!("  {}", rec.description);
        println!("  {}", rec.escalation);
    }

    if !result.red_flags.is_empty() {
        println!("\nRed flags:");
        for flag in &result.red_flags {
            println!("  {}: {}", flag.symptom, flag.warning);
            println!("    -> {}", flag.recommendation);
        }
    }
}
