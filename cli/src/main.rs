//! wordsift CLI - vocabulary extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use wordsift::{
    export, Engine, ExtractionResult, Library, OrderMode, PipelineOptions, PresetLibrary,
    ResourceConfig, Resources, SourceDocument, Stage, Vocabulary, Wordsift,
};

#[derive(Parser)]
#[command(name = "wordsift")]
#[command(version)]
#[command(about = "Extract vocabulary lists from subtitles, documents, and text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a vocabulary list from source files
    Extract {
        /// Input files (.srt, .vtt, .ass, .ssa, .docx, .txt, ...)
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        resources: ResourceArgs,

        /// JSON options file; flags below override it
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Lemmatizer backend
        #[arg(short, long, value_enum)]
        engine: Option<EngineArg>,

        /// Minimum lemma length
        #[arg(short = 'm', long)]
        min_length: Option<usize>,

        /// Preset block list to apply (repeatable)
        #[arg(short, long = "preset", value_name = "NAME")]
        presets: Vec<String>,

        /// Custom block list file (whitespace or comma separated)
        #[arg(short = 'f', long, value_name = "FILE")]
        custom_filter: Option<PathBuf>,

        /// Output ordering
        #[arg(long, value_enum)]
        order: Option<OrderArg>,

        /// Tokens per accurate-backend batch
        #[arg(long)]
        batch_size: Option<usize>,

        /// Skip Unicode NFC normalization
        #[arg(long)]
        no_normalize: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Split output into files of N words each (written next to --output)
        #[arg(long, value_name = "N")]
        chunk: Option<usize>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List available preset block lists
    Presets {
        /// Directory of preset *.txt files
        #[arg(long, env = "WORDSIFT_PRESET_DIR", value_name = "DIR")]
        preset_dir: PathBuf,
    },

    /// Manage the local library of saved lists
    Library {
        /// Library directory
        #[arg(long, env = "WORDSIFT_LIBRARY_DIR", value_name = "DIR", default_value = "library")]
        library_dir: PathBuf,

        #[command(subcommand)]
        action: LibraryAction,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum LibraryAction {
    /// List saved vocabulary lists
    List,

    /// Save a vocabulary list file into the library
    Save {
        /// Word list file (one word per line)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// File name inside the library (defaults to the input's name)
        #[arg(long)]
        name: Option<String>,

        /// Display title
        #[arg(long)]
        title: String,

        /// Description
        #[arg(long, default_value = "")]
        desc: String,
    },
}

#[derive(Args)]
struct ResourceArgs {
    /// WordNet dict/ directory
    #[arg(long, env = "WORDSIFT_WORDNET_DIR", value_name = "DIR")]
    wordnet_dir: PathBuf,

    /// Perceptron tagger model (JSON)
    #[arg(long, env = "WORDSIFT_TAGGER_MODEL", value_name = "FILE")]
    tagger_model: Option<PathBuf>,

    /// Contextual lemma table for the accurate backend
    #[arg(long, env = "WORDSIFT_LEMMA_MODEL", value_name = "FILE")]
    lemma_model: Option<PathBuf>,

    /// Directory of preset *.txt block lists
    #[arg(long, env = "WORDSIFT_PRESET_DIR", value_name = "DIR")]
    preset_dir: Option<PathBuf>,
}

impl From<ResourceArgs> for ResourceConfig {
    fn from(args: ResourceArgs) -> Self {
        ResourceConfig {
            wordnet_dir: args.wordnet_dir,
            tagger_model: args.tagger_model,
            lemma_model: args.lemma_model,
            preset_dir: args.preset_dir,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum EngineArg {
    /// Tagger + rule-based lemmatizer
    Fast,
    /// Contextual model (falls back to fast when unavailable)
    Accurate,
}

impl From<EngineArg> for Engine {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Fast => Engine::Fast,
            EngineArg::Accurate => Engine::Accurate,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OrderArg {
    /// First-occurrence order
    Original,
    /// A to Z
    Alphabetical,
    /// Random (differs between runs)
    Shuffled,
}

impl From<OrderArg> for OrderMode {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Original => OrderMode::Original,
            OrderArg::Alphabetical => OrderMode::Alphabetical,
            OrderArg::Shuffled => OrderMode::Shuffled,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            inputs,
            resources,
            config,
            engine,
            min_length,
            presets,
            custom_filter,
            order,
            batch_size,
            no_normalize,
            output,
            chunk,
            json,
        } => build_options(
            config.as_deref(),
            engine,
            min_length,
            presets,
            custom_filter.as_deref(),
            order,
            batch_size,
            no_normalize,
        )
        .and_then(|options| {
            cmd_extract(
                &inputs,
                resources.into(),
                options,
                output.as_deref(),
                chunk,
                json,
            )
        }),
        Commands::Presets { preset_dir } => cmd_presets(&preset_dir),
        Commands::Library {
            library_dir,
            action,
        } => match action {
            LibraryAction::List => cmd_library_list(&library_dir),
            LibraryAction::Save {
                input,
                name,
                title,
                desc,
            } => cmd_library_save(&library_dir, &input, name.as_deref(), &title, &desc),
        },
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn build_options(
    config: Option<&Path>,
    engine: Option<EngineArg>,
    min_length: Option<usize>,
    presets: Vec<String>,
    custom_filter: Option<&Path>,
    order: Option<OrderArg>,
    batch_size: Option<usize>,
    no_normalize: bool,
) -> Result<PipelineOptions, Box<dyn std::error::Error>> {
    let mut options = match config {
        Some(path) => PipelineOptions::from_json_file(path)?,
        None => PipelineOptions::new(),
    };

    if let Some(engine) = engine {
        options = options.with_engine(engine.into());
    }
    if let Some(min_length) = min_length {
        options = options.with_min_length(min_length);
    }
    if !presets.is_empty() {
        options = options.with_presets(presets);
    }
    if let Some(path) = custom_filter {
        options = options.with_custom_filter_text(&fs::read_to_string(path)?);
    }
    if let Some(order) = order {
        options = options.with_order(order.into());
    }
    if let Some(batch_size) = batch_size {
        options = options.with_batch_size(batch_size);
    }
    if no_normalize {
        options = options.with_normalize_unicode(false);
    }

    options.validate()?;
    Ok(options)
}

/// Read every input, skipping (with a warning) the ones that cannot be read.
fn read_sources(inputs: &[PathBuf]) -> Vec<SourceDocument> {
    inputs
        .iter()
        .filter_map(|path| match SourceDocument::read(path) {
            Ok(source) => Some(source),
            Err(e) => {
                eprintln!("{} {}: {}", "Skipping".yellow(), path.display(), e);
                None
            }
        })
        .collect()
}

fn cmd_extract(
    inputs: &[PathBuf],
    config: ResourceConfig,
    options: PipelineOptions,
    output: Option<&Path>,
    chunk: Option<usize>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let resources = Resources::load(&config)?;
    let sources = read_sources(inputs);

    let pb = ProgressBar::new(sources.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    let observer = |stage: Stage, done: usize, total: usize| {
        let message = match stage {
            Stage::Clean => "Cleaning sources...",
            Stage::Lemmatize => "Lemmatizing...",
        };
        pb.set_message(message);
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    };

    let result = Wordsift::with_options(options).run_with_observer(&resources, &sources, &observer);
    pb.finish_and_clear();

    print_warnings(&result);

    if json {
        let text = serde_json::to_string_pretty(&result)?;
        match output {
            Some(path) => {
                fs::write(path, text)?;
                println!("{} {}", "Saved to".green(), path.display());
            }
            None => println!("{}", text),
        }
        return Ok(());
    }

    match (output, chunk) {
        (Some(path), Some(size)) => {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let stem = output_stem(path);
            let paths = export::write_chunks(&result.words, dir, &stem, size)?;
            for path in &paths {
                println!("{} {}", "Saved to".green(), path.display());
            }
        }
        (Some(path), None) => {
            export::write_text(&result.words, path)?;
            println!("{} {}", "Saved to".green(), path.display());
        }
        (None, Some(_)) => return Err("--chunk requires --output".into()),
        (None, None) => println!("{}", export::to_text(&result.words)),
    }

    print_summary(&result);
    Ok(())
}

fn output_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "vocabulary".to_string())
}

fn print_warnings(result: &ExtractionResult) {
    for report in result.issues() {
        if let Some(ref issue) = report.issue {
            eprintln!("{} {}: {}", "Warning".yellow(), report.name, issue);
        }
    }
    for notice in &result.notices {
        eprintln!("{} {}", "Note".yellow(), notice);
    }
}

fn print_summary(result: &ExtractionResult) {
    let stats = &result.stats;
    eprintln!();
    eprintln!("{}", "Summary".cyan().bold());
    eprintln!("{}", "─".repeat(40).dimmed());
    eprintln!("{}: {}", "Files".bold(), stats.files_processed);
    eprintln!("{}: {}", "With text".bold(), stats.files_with_text);
    eprintln!("{}: {}", "Tokens".bold(), stats.token_count);
    eprintln!("{}: {}", "Lemmas".bold(), stats.lemma_count);
    eprintln!("{}: {}", "Words".bold(), stats.word_count);
    eprintln!("{}: {}", "Engine".bold(), result.engine);
}

fn cmd_presets(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let presets = PresetLibrary::load_dir(dir)?;
    if presets.is_empty() {
        println!("{}", "No presets found".yellow());
        return Ok(());
    }
    for name in presets.names() {
        let count = presets.get(name)?.len();
        println!("{} {}", name.bold(), format!("({} words)", count).dimmed());
    }
    Ok(())
}

fn cmd_library_list(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let library = Library::open(dir)?;
    if library.is_empty() {
        println!("{}", "Library is empty".yellow());
        return Ok(());
    }
    for (name, entry) in library.entries() {
        println!("{} {} {}", entry.date.dimmed(), entry.title.bold(), name.dimmed());
        if !entry.desc.is_empty() {
            println!("           {}", entry.desc);
        }
    }
    Ok(())
}

fn cmd_library_save(
    dir: &Path,
    input: &Path,
    name: Option<&str>,
    title: &str,
    desc: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let words: Vocabulary = fs::read_to_string(input)?
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let filename = match name {
        Some(name) => name.to_string(),
        None => input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or("input has no file name")?,
    };

    let mut library = Library::open(dir)?;
    let path = library.save(&filename, &words, title, desc)?;
    println!(
        "{} {} ({} words)",
        "Saved to".green(),
        path.display(),
        words.len()
    );
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "wordsift".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Vocabulary extraction tool");
    println!();
    println!("License: MIT");
}
