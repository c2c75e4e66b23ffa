use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use config::{Backend, FimEvalConfig};
use fim_dataset::{load_dataset, save_dataset, SourceFile};
use fim_generate::{
    run_generation, Completer, HttpCompleter, HttpCompleterConfig, InputBudget, StubCompleter,
    TokenCounter,
};
use fim_metrics::{evaluate_dataset, TreeSitterFactory};
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod annotate;
pub mod config;
mod report;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "fim-eval")]
#[command(about = "Fill-in-the-middle completion evaluation harness", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file (TOML or JSON); defaults to ./fim-eval.toml when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample masked spans from source files into a dataset
    Sample(SampleArgs),

    /// Generate a completion for every span and score it
    Run(RunArgs),

    /// Recompute metrics for spans that already have a completion
    Evaluate(EvaluateArgs),

    /// Label completions interactively
    Annotate(AnnotateArgs),

    /// Correlate automatic metrics with human labels
    Correlate(CorrelateArgs),
}

#[derive(Args)]
struct SampleArgs {
    /// Source files to sample from
    #[arg(long, num_args = 1.., required = true)]
    files: Vec<PathBuf>,

    /// Dataset to write (default: sampling.output)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Sampling seed (default: sampling.seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Spans per file (default: sampling.num_samples)
    #[arg(long)]
    num_samples: Option<usize>,
}

#[derive(Args)]
struct RunArgs {
    /// Sampled dataset (default: files.dataset)
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Where to write completions and metrics (default: files.output)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Completion backend
    #[arg(long, value_enum)]
    backend: Option<Backend>,

    /// Generate endpoint URL for the http backend
    #[arg(long)]
    endpoint: Option<String>,

    /// Tokens to generate per span
    #[arg(long)]
    max_new_tokens: Option<usize>,

    /// tokenizer.json used to measure prompts
    #[arg(long)]
    tokenizer: Option<PathBuf>,
}

#[derive(Args)]
struct EvaluateArgs {
    /// Dataset with completions (default: files.output)
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Where to write the rescored dataset (default: the input dataset)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct AnnotateArgs {
    /// Dataset with completions (default: files.output)
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Where to write the labelled dataset (default: files.annotated)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct CorrelateArgs {
    /// Labelled dataset (default: files.annotated)
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Write a Markdown report
    #[arg(long)]
    out_md: Option<PathBuf>,
}

impl SampleArgs {
    fn apply(&self, config: &mut FimEvalConfig) {
        if let Some(seed) = self.seed {
            config.sampling.seed = seed;
        }
        if let Some(num_samples) = self.num_samples {
            config.sampling.num_samples = num_samples;
        }
        if let Some(output) = &self.output {
            config.sampling.output = output.clone();
        }
    }
}

impl RunArgs {
    fn apply(&self, config: &mut FimEvalConfig) {
        let generation = &mut config.generation;
        if let Some(backend) = self.backend {
            generation.backend = backend;
        }
        if let Some(endpoint) = &self.endpoint {
            generation.endpoint = endpoint.clone();
        }
        if let Some(max_new_tokens) = self.max_new_tokens {
            generation.max_new_tokens = max_new_tokens;
        }
        if let Some(tokenizer) = &self.tokenizer {
            generation.tokenizer = Some(tokenizer.clone());
        }
    }
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // keep stdout clean for JSON parsing
    if matches!(&cli.command, Commands::Correlate(args) if args.json) {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let mut config = config::load_config(cli.config.as_deref())?;
    match &cli.command {
        Commands::Sample(args) => args.apply(&mut config),
        Commands::Run(args) => args.apply(&mut config),
        _ => {}
    }
    config.validate().context("Invalid configuration")?;

    match cli.command {
        Commands::Sample(args) => run_sample(args, &config)?,
        Commands::Run(args) => run_generate(args, &config)?,
        Commands::Evaluate(args) => run_evaluate(args, &config)?,
        Commands::Annotate(args) => run_annotate(args, &config)?,
        Commands::Correlate(args) => run_correlate(args, &config)?,
    }

    Ok(())
}

fn load(path: &Path) -> Result<Vec<SourceFile>> {
    load_dataset(path).with_context(|| format!("Failed to load dataset {}", path.display()))
}

fn save(path: &Path, files: &[SourceFile]) -> Result<()> {
    save_dataset(path, files).with_context(|| format!("Failed to write dataset {}", path.display()))
}

fn run_sample(args: SampleArgs, config: &FimEvalConfig) -> Result<()> {
    let sampling = &config.sampling;
    let files = fim_sampler::sample_paths(&args.files, &sampling.sampler_config())
        .context("Sampling failed")?;
    save(&sampling.output, &files)?;

    let spans: usize = files.iter().map(|f| f.samples.len()).sum();
    eprintln!(
        "sampled {spans} spans from {} files (seed={}) -> {}",
        files.len(),
        sampling.seed,
        sampling.output.display()
    );
    Ok(())
}

fn build_completer(config: &FimEvalConfig) -> Result<Box<dyn Completer>> {
    let generation = &config.generation;
    Ok(match generation.backend {
        Backend::Stub => Box::new(StubCompleter),
        Backend::Http => Box::new(
            HttpCompleter::new(HttpCompleterConfig {
                endpoint: generation.endpoint.clone(),
                max_new_tokens: generation.max_new_tokens,
                eos_token: generation.eos_token.clone(),
                timeout: Duration::from_secs(generation.timeout_secs),
            })
            .context("Failed to create HTTP completer")?,
        ),
    })
}

fn run_generate(args: RunArgs, config: &FimEvalConfig) -> Result<()> {
    let dataset = args.dataset.unwrap_or_else(|| config.files.dataset.clone());
    let output = args.output.unwrap_or_else(|| config.files.output.clone());
    let generation = &config.generation;

    let counter = match &generation.tokenizer {
        Some(path) => TokenCounter::from_file(path)?,
        None => TokenCounter::Estimate,
    };
    let budget = InputBudget::new(
        counter,
        generation.max_position_embeddings,
        generation.max_new_tokens,
    )?;
    let mut completer = build_completer(config)?;

    let mut files = load(&dataset)?;
    let summary = run_generation(&mut files, completer.as_mut(), &budget, &TreeSitterFactory)
        .context("Generation failed")?;
    save(&output, &files)?;

    eprintln!(
        "generated={} files={} oversized={} -> {}",
        summary.generated,
        summary.files,
        summary.oversized,
        output.display()
    );
    Ok(())
}

fn run_evaluate(args: EvaluateArgs, config: &FimEvalConfig) -> Result<()> {
    let dataset = args.dataset.unwrap_or_else(|| config.files.output.clone());
    let output = args.output.unwrap_or_else(|| dataset.clone());

    let mut files = load(&dataset)?;
    let scored = evaluate_dataset(&mut files, &TreeSitterFactory).context("Evaluation failed")?;
    save(&output, &files)?;

    eprintln!("scored={scored} -> {}", output.display());
    Ok(())
}

fn run_annotate(args: AnnotateArgs, config: &FimEvalConfig) -> Result<()> {
    let dataset = args.dataset.unwrap_or_else(|| config.files.output.clone());
    let output = args.output.unwrap_or_else(|| config.files.annotated.clone());

    let mut files = load(&dataset)?;
    let labelled = if io::stdin().is_terminal() {
        let mut source = annotate::TerminalSource::new(console::Term::stdout());
        annotate::annotate_dataset(&mut files, &mut source)?
    } else {
        let mut source = annotate::StreamSource::new(io::stdin().lock(), io::stdout());
        annotate::annotate_dataset(&mut files, &mut source)?
    };
    save(&output, &files)?;

    eprintln!("labelled={labelled} -> {}", output.display());
    Ok(())
}

fn run_correlate(args: CorrelateArgs, config: &FimEvalConfig) -> Result<()> {
    let dataset = args.dataset.unwrap_or_else(|| config.files.annotated.clone());

    let files = load(&dataset)?;
    let report = fim_stats::correlate(&files).context("Correlation failed")?;

    if let Some(path) = &args.out_md {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, report::render_correlation_report(&dataset, &report))
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if args.json {
        print_stdout(&serde_json::to_string_pretty(&report)?)?;
    } else {
        print_stdout(report.render_text().trim_end())?;
    }
    Ok(())
}
