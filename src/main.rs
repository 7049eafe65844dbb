//! paper-lanes CLI entry point.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use paper_lanes::solver::MicroLpSolver;
use paper_lanes::source::{CorpusSource, FetchRequest, gather_papers};
use paper_lanes::{
    KeywordSort, LayoutParams, LayoutRequest, Paper, ViewFilters, compute_layout,
};

/// Storyline layout for a citation graph, as JSON.
#[derive(Parser, Debug)]
#[command(
    name = "paper-lanes",
    version = env!("PAPER_LANES_VERSION"),
    about = "Storyline layout for a citation graph of papers"
)]
struct Cli {
    /// JSON corpus of paper records (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Lay out the neighbourhood of this paper id instead of the whole corpus
    #[arg(short = 'f', long = "focus")]
    focus: Option<String>,

    /// Also pull in the neighbourhood of these paper ids (with --focus)
    #[arg(short = 'e', long = "expand", value_delimiter = ',')]
    expand: Vec<String>,

    /// Only solve lines for these keywords (comma-separated; defaults to the focus paper's)
    #[arg(short = 'k', long = "keywords", value_delimiter = ',')]
    keywords: Option<Vec<String>>,

    /// Solve every keyword line
    #[arg(short = 'a', long = "all-keywords", conflicts_with = "keywords")]
    all_keywords: bool,

    /// Keyword list order: count, az or lines
    #[arg(long = "keyword-sort", default_value = "count")]
    keyword_sort: KeywordSort,

    /// Hide papers cited fewer times than this
    #[arg(long = "min-citations", default_value = "0")]
    min_citations: u32,

    /// Keep papers the solver could not place
    #[arg(long = "show-unmapped")]
    show_unmapped: bool,

    /// Attach citation-context excerpts for the focus paper
    #[arg(long = "show-excerpts")]
    show_excerpts: bool,

    /// Layout parameters as JSON
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Pixel width of one title character
    #[arg(long = "char-width")]
    char_width: Option<f64>,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long = "pretty")]
    pretty: bool,

    /// Log solver progress to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", message);
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    // Read corpus from file or stdin
    let text = if let Some(ref path) = cli.input {
        match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => fail(format!("cannot read '{}': {}", path.display(), e)),
        }
    } else {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            fail(format!("cannot read stdin: {}", e));
        }
        buf
    };

    let mut params = match cli.config {
        Some(ref path) => LayoutParams::from_json_file(path).unwrap_or_else(|e| fail(e)),
        None => LayoutParams::default(),
    };
    if let Some(w) = cli.char_width {
        params = params.with_char_width(w);
        if let Err(e) = params.validate() {
            fail(e);
        }
    }

    let papers: Vec<Paper> = match cli.focus {
        Some(ref focus) => {
            let source = CorpusSource::from_json(&text).unwrap_or_else(|e| fail(e));
            let template = FetchRequest::new(Vec::new(), params.max_get_count);
            gather_papers(&source, focus, &cli.expand, &template)
        }
        None => serde_json::from_str(&text).unwrap_or_else(|e| fail(e)),
    };
    if papers.is_empty() {
        fail("no papers to lay out");
    }

    let request = LayoutRequest {
        keywords: cli.keywords.clone(),
        all_keywords: cli.all_keywords,
        keyword_sort: cli.keyword_sort,
        filters: ViewFilters {
            min_citations: cli.min_citations,
            hide_unmapped: !cli.show_unmapped,
            show_excerpts: cli.show_excerpts,
        },
    };
    let output = compute_layout(papers, params, &request, &MicroLpSolver);
    if !output.status.is_optimal() {
        eprintln!("warning: {} ({})", output.message, output.status);
    }

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .unwrap_or_else(|e| fail(e));

    // Write output to file or stdout
    if let Some(ref path) = cli.output {
        if let Err(e) = fs::write(path, rendered) {
            fail(format!("cannot write '{}': {}", path.display(), e));
        }
    } else {
        println!("{}", rendered);
        if let Err(e) = io::stdout().flush() {
            fail(format!("cannot flush stdout: {}", e));
        }
    }
}
