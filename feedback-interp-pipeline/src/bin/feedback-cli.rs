use clap::{Arg, ArgAction, ArgMatches, Command};
use feedback_interp::{FeedbackOptions, SimplifyMetrics, SoftenMetrics};
use feedback_interp_pipeline::{
    FeedbackForm, Interpreter, LocalInterpreter, Pipeline, RecordsClient, RemoteInterpreter,
};
use std::io::Read;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("feedback-cli")
        .version("0.1.0")
        .about("Rewrite written feedback with local rules or a remote interpretation service")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show detailed progress")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("interpret")
                .about("Transform a piece of feedback")
                .arg(
                    Arg::new("text")
                        .help("Feedback text to transform, or - to read it from stdin")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("simplify")
                        .long("simplify")
                        .help("Simplify language")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("soften")
                        .long("soften")
                        .help("Soften tone")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("case-support")
                        .long("case-support")
                        .help("Add case support")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("remote")
                        .long("remote")
                        .short('r')
                        .help("Use the remote interpretation service instead of local rules")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("url")
                        .long("url")
                        .short('u')
                        .help("Interpret endpoint URL (default: $FEEDBACK_INTERPRET_URL)")
                        .requires("remote"),
                )
                .arg(
                    Arg::new("score")
                        .long("score")
                        .help("Score the rewrite against the input for the selected options")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("score")
                .about("Score a rewrite against its original feedback")
                .arg(
                    Arg::new("input")
                        .help("Original feedback text")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("output")
                        .help("Rewritten feedback text")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("task")
                        .long("task")
                        .short('t')
                        .help("Which scores to report")
                        .value_parser(["simplify", "soften", "all"])
                        .default_value("all"),
                ),
        )
        .subcommand(
            Command::new("records")
                .about("List past feedback records")
                .arg(
                    Arg::new("url")
                        .long("url")
                        .short('u')
                        .help("Records endpoint URL (default: $FEEDBACK_RECORDS_URL)"),
                ),
        )
        .get_matches();

    init_tracing(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("interpret", sub)) => interpret(sub).await,
        Some(("records", sub)) => records(sub).await,
        Some(("score", sub)) => {
            score(sub);
            Ok(())
        }
        _ => unreachable!("subcommand is required"),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn interpret(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let verbose = matches.get_flag("verbose");
    let text = match matches.get_one::<String>("text").map(String::as_str) {
        Some("-") => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        Some(text) => text.to_string(),
        None => String::new(),
    };

    let interpreter: Arc<dyn Interpreter> = if matches.get_flag("remote") {
        let remote = match matches.get_one::<String>("url") {
            Some(url) => RemoteInterpreter::new(url),
            None => RemoteInterpreter::from_env(),
        };
        match remote {
            Ok(remote) => Arc::new(remote),
            Err(e) => {
                eprintln!("❌ {}", e);
                eprintln!(
                    "   Pass --url or set {}",
                    RemoteInterpreter::ENDPOINT_ENV
                );
                return Err(e.into());
            }
        }
    } else {
        Arc::new(LocalInterpreter)
    };

    let mut form = FeedbackForm::new();
    form.input_text = text;
    form.options = FeedbackOptions::new()
        .with_simplify(matches.get_flag("simplify"))
        .with_soften(matches.get_flag("soften"))
        .with_case_support(matches.get_flag("case-support"));

    if !form.can_generate() {
        eprintln!("❌ Nothing to interpret: paste some feedback text");
        return Err("empty input".into());
    }

    let pipeline = Pipeline::new(interpreter);
    if verbose {
        eprintln!("📝 Provider: {}", pipeline.provider_name());
        eprintln!("⚙️  Options: {}", form.options.describe());
    }

    let result = pipeline.transform(&form.request()).await;
    form.show(&result);
    match result {
        Ok(_) => {
            println!("{}", form.output_text);
            if matches.get_flag("score") {
                let input = form.input_text.as_str();
                let output = form.output_text.as_str();
                if form.options.simplify || form.options.is_empty() {
                    print_simplify_scores(&SimplifyMetrics::compare(input, output));
                }
                if form.options.soften {
                    print_soften_scores(&SoftenMetrics::compare(input, output));
                }
            }
            Ok(())
        }
        Err(failure) => {
            eprintln!("❌ {}", form.output_text);
            Err(failure.into())
        }
    }
}

async fn records(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let client = match matches.get_one::<String>("url") {
        Some(url) => RecordsClient::new(url)?,
        None => RecordsClient::from_env()?,
    };

    let records = client.fetch().await?;
    if records.is_empty() {
        println!("No feedback records found");
        return Ok(());
    }

    println!("Recent Feedback Records ({})", records.len());
    for (index, record) in records.iter().enumerate() {
        println!();
        println!("#{}  📅 {}", index + 1, record.created_at_display());
        println!("  Original Feedback: {}", record.input_display());
        println!("  Options Used:      {}", record.options_display());
        println!("  Generated Output:  {}", record.output_display());
    }

    Ok(())
}

fn score(matches: &ArgMatches) {
    let input = matches.get_one::<String>("input").map(String::as_str).unwrap_or_default();
    let output = matches.get_one::<String>("output").map(String::as_str).unwrap_or_default();
    let task = matches.get_one::<String>("task").map(String::as_str).unwrap_or("all");

    if task != "soften" {
        print_simplify_scores(&SimplifyMetrics::compare(input, output));
    }
    if task != "simplify" {
        print_soften_scores(&SoftenMetrics::compare(input, output));
    }
}

fn format_score(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:+.2}", v))
}

fn print_simplify_scores(metrics: &SimplifyMetrics) {
    eprintln!("📊 Simplify");
    eprintln!(
        "   Words:            {} -> {}",
        metrics.input_words.num_words, metrics.output_words.num_words
    );
    eprintln!(
        "   Word length drop: {}",
        format_score(metrics.avg_word_len_drop())
    );
    eprintln!("   Ease gain:        {}", format_score(metrics.ease_gain()));
    eprintln!("   Grade drop:       {}", format_score(metrics.grade_drop()));
    eprintln!("   Length ratio:     {:.2}", metrics.length_ratio);
    eprintln!("   Composite:        {:+.2}", metrics.composite());
}

fn print_soften_scores(metrics: &SoftenMetrics) {
    eprintln!("📊 Soften");
    eprintln!(
        "   Polite markers:   {} -> {}",
        metrics.polite_markers_in, metrics.polite_markers_out
    );
    eprintln!(
        "   Harsh words:      {} -> {}",
        metrics.harsh_words_in, metrics.harsh_words_out
    );
    eprintln!("   Length ratio:     {:.2}", metrics.length_ratio);
    eprintln!("   Composite:        {:+.2}", metrics.composite());
}
