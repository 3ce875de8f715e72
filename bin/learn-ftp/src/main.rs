mod dot;
mod error;
mod report;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

use error::CliError;
use ftp_oracle::{FtpSim, TcpOracle, TcpOracleConfig};
use learner_core::{EqParams, MembershipOracle, Symbol, learn};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SimVariant {
    /// Single-USER login gate (spec §8 scenario 2).
    SingleUser,
    /// Two-USER login gate (spec §8 scenario 3, matches `ftp_server2.py`).
    TwoUser,
}

/// Actively learns a Mealy machine model of an FTP-like System Under
/// Learning and exports it as a dot file and a console report.
#[derive(Parser, Debug)]
#[command(name = "learn-ftp", version, about)]
struct Args {
    /// Learn against the bundled in-process SUL simulator instead of a
    /// real server.
    #[arg(long, value_enum, conflicts_with = "addr")]
    sim: Option<SimVariant>,

    /// Address of a real FTP-like SUL to connect to, e.g. 127.0.0.1:2121.
    #[arg(long)]
    addr: Option<String>,

    /// Comma-separated alphabet override; defaults to USER,PASS,LIST,QUIT.
    #[arg(long, value_delimiter = ',')]
    alphabet: Option<Vec<String>>,

    /// Number of random words sampled per equivalence query.
    #[arg(long, default_value_t = 150)]
    samples: usize,

    /// Maximum length of a sampled word during equivalence checking.
    #[arg(long, default_value_t = 8)]
    max_len: usize,

    /// RNG seed; identical seed + SUL yields an identical learned machine.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Where to write the learned machine as a Graphviz dot file.
    #[arg(long, default_value = "model.dot")]
    dot_output: PathBuf,
}

fn default_alphabet() -> Vec<Symbol> {
    vec![
        Symbol::new("USER"),
        Symbol::new("PASS"),
        Symbol::new("LIST"),
        Symbol::new("QUIT"),
    ]
}

fn build_oracle(args: &Args) -> Result<Box<dyn MembershipOracle>, CliError> {
    if let Some(variant) = args.sim {
        return Ok(match variant {
            SimVariant::SingleUser => Box::new(FtpSim::single_user_gate()),
            SimVariant::TwoUser => Box::new(FtpSim::two_user_gate()),
        });
    }
    let addr_str = args.addr.clone().unwrap_or_else(|| "127.0.0.1:2121".to_string());
    let addr: SocketAddr = addr_str
        .parse()
        .map_err(|e| CliError::Addr(addr_str.clone(), e))?;
    Ok(Box::new(TcpOracle::new(TcpOracleConfig::new(addr))))
}

fn run(args: Args) -> Result<(), CliError> {
    let alphabet: Vec<Symbol> = match &args.alphabet {
        Some(names) => names.iter().map(|s| Symbol::new(s.trim().to_string())).collect(),
        None => default_alphabet(),
    };
    let oracle = build_oracle(&args)?;
    let eq_params = EqParams {
        samples: args.samples,
        max_len: args.max_len,
    };

    info!(alphabet = ?alphabet, seed = args.seed, "starting learning run");
    let mm = learn(&alphabet, &*oracle, &eq_params, args.seed)?;

    println!("{}", report::render(&mm, &alphabet));
    dot::write_dot(&mm, &args.dot_output)?;
    info!(path = %args.dot_output.display(), "wrote dot file");

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::filter::LevelFilter::INFO),
        )
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
