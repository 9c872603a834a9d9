mod os_signal_termination;
mod result;

use std::fs::File;
use std::io::stdout;
use std::io::BufWriter;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use craig::core::asserts::CRAIG_ASSERT_LEVEL_DEFINITION;
use craig::core::asserts::CRAIG_ASSERT_MODERATE;
use craig::core::convert_case::Case;
use craig::core::proof::ProofLog;
use craig::core::run_proof;
use craig::core::statistics::configure_statistic_logging;
use craig::core::statistics::log_statistic_postfix;
use craig::core::statistics::Statistic;
use craig::core::statistics::StatisticLogger;
use craig::core::termination::Combinator;
use craig::core::termination::ConflictBudget;
use craig::core::trace::load_trace_file;
use craig::core::BackendKind;
use craig::core::ProofError;
use craig::core::ProofOptions;
use craig::core::ProofProduct;
use craig::core::ResourceBudget;
use log::error;
use log::info;
use log::warn;
use log::LevelFilter;
use os_signal_termination::OsSignal;
use result::CraigResult;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// The clause trace to replay.
    ///
    /// The trace starts with the header `p <num variables> <num clauses> <num roots> <num A
    /// clauses>`, followed by one clause per line in DIMACS notation. The first clauses are
    /// the A-part, the remaining roots the B-part, and every clause after the roots must follow
    /// from the clauses before it by unit propagation.
    #[clap(verbatim_doc_comment)]
    trace_path: PathBuf,

    /// What to extract from the refutation.
    #[arg(long, value_enum, default_value_t)]
    backend: BackendKind,

    /// Do not report learned clauses whose reconstructed resolution chain derives a different
    /// clause; they are strengthened silently.
    #[arg(long)]
    no_verify: bool,

    /// Write the reconstructed resolution proof to this file.
    ///
    /// Paths ending in `.gz` are gzip-compressed.
    #[arg(long, verbatim_doc_comment)]
    proof_log: Option<PathBuf>,

    /// Give up after this many milliseconds; `s UNKNOWN` is reported in that case.
    #[arg(long)]
    time_limit: Option<u64>,

    /// Give up after this many learned clauses have been checked by propagation.
    #[arg(long)]
    conflict_limit: Option<u64>,

    /// Write the interpolant or core to this file instead of standard out.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enables debug logging.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Log the statistics of the replay once it is done.
    #[arg(short = 's', long = "log-statistics")]
    log_statistics: bool,
}

fn configure_logging(verbose: bool, log_statistics: bool) {
    if log_statistics {
        configure_statistic_logging("c stat:", None, Some(Case::Camel), None);
    }
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "c ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> CraigResult<()> {
    let args = Args::parse();

    configure_logging(args.verbose, args.log_statistics);

    if CRAIG_ASSERT_LEVEL_DEFINITION >= CRAIG_ASSERT_MODERATE {
        warn!("Potential performance degradation: the Craig assert level is set to {CRAIG_ASSERT_LEVEL_DEFINITION}, meaning many debug asserts are active which may result in performance degradation.");
    }

    let store = load_trace_file(&args.trace_path)?;
    info!(
        "Loaded {} clauses ({} roots) over {} variables",
        store.len(),
        store.num_roots(),
        store.num_variables()
    );

    let proof_log = match &args.proof_log {
        Some(path) => ProofLog::file(path)?,
        None => ProofLog::default(),
    };

    let options = ProofOptions {
        verify_proof: !args.no_verify,
        proof_log,
        resource_budget: args
            .time_limit
            .map(|milliseconds| ResourceBudget::Time(Duration::from_millis(milliseconds))),
        backend: args.backend,
    };

    let mut termination = Combinator::new(
        OsSignal::install(),
        args.conflict_limit.map(ConflictBudget::new),
    );

    let refutation = match run_proof(store, options, &mut termination) {
        Ok(refutation) => refutation,
        Err(ProofError::ResourceExhausted { processed_clauses }) => {
            info!("Gave up after {processed_clauses} learned clauses");
            println!("s UNKNOWN");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("s REFUTED");
    match &args.output {
        Some(path) => write_product(&refutation.output, BufWriter::new(File::create(path)?))?,
        None => write_product(&refutation.output, stdout().lock())?,
    }

    if args.log_statistics {
        refutation.statistics.log(StatisticLogger::default());
        log_statistic_postfix();
    }

    Ok(())
}

fn write_product(product: &ProofProduct, mut sink: impl Write) -> std::io::Result<()> {
    match product {
        ProofProduct::TruthTable(table) => writeln!(sink, "v {table}")?,
        ProofProduct::Circuit(aig) => aig.write_aag(&mut sink)?,
        ProofProduct::UnsatCore(core) => {
            write!(sink, "v")?;
            for clause in core.iter() {
                write!(sink, " {}", clause.position() + 1)?;
            }
            writeln!(sink, " 0")?;
        }
    }

    sink.flush()
}
