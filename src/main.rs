use clap::Parser;
use petrel::cli::{self, Session};

#[derive(Parser)]
#[command(name = "petrel")]
#[command(about = "Petrel - a typed flat-file table store with a row-filtering query language")]
#[command(version)]
struct Cli {
    /// Execute one command line and exit
    #[arg(short = 'e', long = "execute", value_name = "LINE")]
    execute: Option<String>,

    /// Emit command output as JSON documents
    #[arg(short, long)]
    json: bool,

    /// Suppress banners and query echo
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let session = Session::new(cli.json, cli.quiet);

    let result = match cli.execute {
        Some(line) => cli::run_line(&session, &line).map(|_| ()),
        None if !atty::is(atty::Stream::Stdin) => cli::run_piped(&session),
        None => cli::run_repl(&session),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so piped and `--json` output stay clean.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
