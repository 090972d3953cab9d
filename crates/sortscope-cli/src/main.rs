// crates/sortscope-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

mod config;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use config::Config;
use sortscope_core::{
    check_trace, first_divergence,
    io::{ext_lower, read_values_json, stream_steps_auto, write_trace_auto, write_values_json},
    io_jsonl::write_jsonl,
    Step, Value,
};
use sortscope_trace::{
    format::{AnyTrace, TraceFile},
    generator::RandomSpec,
    io::{read_any_trace_auto, write_trace_file_auto},
    quicksort::generate_trace,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "sortscope",
    about = "Quicksort trace generator",
    long_about = "Quicksort trace generator.\n\nUse this tool to create input arrays, record step-by-step quicksort traces for a renderer, and check recorded traces.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    /// TOML profile (defaults: $SORTSCOPE_CONFIG, then ./sortscope.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Write a seeded random input array as JSON.
    Random {
        #[command(flatten)]
        random: RandomArgs,

        /// Output path for the input array (JSON)
        #[arg(long, default_value = "input.json")]
        out: PathBuf,
    },

    /// Record the quicksort trace of an input array.
    /// If --out ends with `.jsonl`/`.ndjson`, writes one step per line.
    Trace {
        /// Input array (JSON); a random array is drawn when omitted
        #[arg(long, conflicts_with_all = ["len", "min", "max", "seed"])]
        input: Option<PathBuf>,

        #[command(flatten)]
        random: RandomArgs,

        /// Output path for the trace (JSON/CBOR/JSONL)
        #[arg(long, default_value = "trace.json")]
        out: PathBuf,

        /// Wrap the steps in a versioned envelope (input + stats)
        #[arg(long, conflicts_with = "bare")]
        envelope: bool,

        /// Write the bare step array only
        #[arg(long)]
        bare: bool,
    },

    /// Check a recorded trace against its input.
    Verify {
        /// Trace path (JSON/CBOR/JSONL, bare or envelope)
        #[arg(long)]
        trace: PathBuf,

        /// Input array (JSON); defaults to the envelope input or step 0
        #[arg(long)]
        input: Option<PathBuf>,

        /// Also re-record the input and require an identical trace
        #[arg(long, default_value_t = false)]
        strict: bool,
    },

    /// Print the steps of a trace, marking the pivot `<v>` and compared values `(v)`.
    Inspect {
        /// Trace path (JSON/CBOR/JSONL, bare or envelope)
        #[arg(long)]
        trace: PathBuf,

        /// Print at most this many steps
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Convert any trace file to JSON Lines (one step per line)
    ExportJsonl {
        /// Input trace path (JSON/CBOR/JSONL, bare or envelope)
        #[arg(long)]
        input: PathBuf,
        /// Output JSONL path
        #[arg(long)]
        output: PathBuf,
    },
}

/// Random-array flags; each overrides the corresponding profile value.
#[derive(Args, Debug, Default, Clone, Copy)]
struct RandomArgs {
    /// Number of values
    #[arg(long)]
    len: Option<usize>,
    /// Smallest value (inclusive)
    #[arg(long)]
    min: Option<u32>,
    /// Largest value (inclusive)
    #[arg(long)]
    max: Option<u32>,
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
}

impl RandomArgs {
    fn resolve(self, base: RandomSpec) -> RandomSpec {
        RandomSpec {
            len: self.len.unwrap_or(base.len),
            min: self.min.unwrap_or(base.min),
            max: self.max.unwrap_or(base.max),
            seed: self.seed.unwrap_or(base.seed),
        }
    }
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let cfg = Config::load(cli.config.as_deref())?;
    match cli.cmd {
        Cmd::Random { random, out } => random_input(random.resolve(cfg.random), out),

        Cmd::Trace {
            input,
            random,
            out,
            envelope,
            bare,
        } => {
            let wrap = if bare {
                false
            } else {
                envelope || cfg.output.envelope
            };
            record(input, random.resolve(cfg.random), out, wrap)
        }

        Cmd::Verify {
            trace,
            input,
            strict,
        } => verify(trace, input, strict),

        Cmd::Inspect { trace, limit } => inspect(trace, limit),

        Cmd::ExportJsonl { input, output } => export_jsonl(input, output),
    }
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false).with_level(true).compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn random_input(spec: RandomSpec, out: PathBuf) -> Result<()> {
    info!(len = spec.len, min = spec.min, max = spec.max, seed = spec.seed, "drawing random input");
    let values = spec.generate()?;
    write_values_json(&out, &values)
        .with_context(|| format!("writing input array to {}", out.display()))?;

    println!("Random input: {} values → {}", values.len(), out.display());
    Ok(())
}

fn record(input: Option<PathBuf>, spec: RandomSpec, out: PathBuf, wrap: bool) -> Result<()> {
    let (values, meta) = match &input {
        Some(path) => {
            info!(input = %path.display(), "reading input array");
            let values = read_values_json(path)
                .with_context(|| format!("reading input array {}", path.display()))?;
            (values, serde_json::json!({ "source": path.display().to_string() }))
        }
        None => {
            info!(len = spec.len, min = spec.min, max = spec.max, seed = spec.seed, "drawing random input");
            (spec.generate()?, serde_json::json!({ "source": "random", "random": spec }))
        }
    };

    let tf = TraceFile::try_record(&values)?.with_meta(meta);
    info!(n = values.len(), steps = tf.len(), out = %out.display(), "recorded trace");

    let line_delimited = is_line_delimited(&out);
    if line_delimited && wrap {
        warn!("line-delimited output holds bare steps; envelope skipped");
    }
    let written = if wrap && !line_delimited {
        write_trace_file_auto(&out, &tf)
    } else {
        write_trace_auto(&out, &tf.steps)
    };
    written.with_context(|| format!("writing trace to {}", out.display()))?;

    let stats = tf.stats.unwrap_or_default();
    println!(
        "Recorded trace: n={} → {} steps ({stats}) → {}",
        values.len(),
        tf.len(),
        out.display()
    );
    Ok(())
}

fn verify(trace: PathBuf, input: Option<PathBuf>, strict: bool) -> Result<()> {
    info!(trace = %trace.display(), strict, "verifying trace");
    let any = load(&trace)?;

    let input: Vec<Value> = match &input {
        Some(path) => read_values_json(path)
            .with_context(|| format!("reading input array {}", path.display()))?,
        None => any
            .input()
            .map(<[Value]>::to_vec)
            .ok_or_else(|| anyhow!("{} holds no steps", trace.display()))?,
    };

    if let AnyTrace::Envelope(tf) = &any {
        tf.check()
            .with_context(|| format!("envelope check failed for {}", trace.display()))?;
    }
    check_trace(&input, any.steps())
        .with_context(|| format!("trace check failed for {}", trace.display()))?;

    if strict {
        let expected = generate_trace(&input);
        if let Some(k) = first_divergence(any.steps(), &expected) {
            bail!(
                "{} diverges from a fresh recording at step {k} ({} vs {} steps)",
                trace.display(),
                any.steps().len(),
                expected.len()
            );
        }
    }

    println!("OK: {} ({} steps)", trace.display(), any.steps().len());
    Ok(())
}

type StepIter = Box<dyn Iterator<Item = Result<Step>> + Send>;

fn inspect(trace: PathBuf, limit: Option<usize>) -> Result<()> {
    // Line-delimited traces are streamed; other forms may carry stats.
    let mut stats = None;
    let steps: StepIter = if is_line_delimited(&trace) {
        stream_steps_auto(&trace)
            .with_context(|| format!("opening trace {}", trace.display()))?
    } else {
        let any = load(&trace)?;
        stats = any.stats();
        Box::new(any.into_steps().into_iter().map(Ok))
    };

    let limit = limit.unwrap_or(usize::MAX);
    let (mut total, mut comparing) = (0usize, 0usize);
    for (k, step) in steps.enumerate() {
        let step = step.with_context(|| format!("reading trace {}", trace.display()))?;
        if k < limit {
            println!("{k:>5}  {step}");
        }
        total += 1;
        comparing += usize::from(step.comparing_indices.is_some());
    }
    if total > limit {
        println!("  ... {} more steps", total - limit);
    }

    println!("steps={total} comparing_steps={comparing}");
    if let Some(stats) = stats {
        println!("{stats}");
    }
    Ok(())
}

fn is_line_delimited(path: &Path) -> bool {
    matches!(ext_lower(path).as_deref(), Some("jsonl" | "ndjson"))
}

/// Convert any trace file into JSON Lines for streaming consumers.
fn export_jsonl(input: PathBuf, output: PathBuf) -> Result<()> {
    info!(infile = %input.display(), outfile = %output.display(), "export to jsonl");
    let steps = load(&input)?.into_steps();
    write_jsonl(&output, &steps)
        .with_context(|| format!("writing {}", output.display()))?;

    println!("Exported {} steps → {}", steps.len(), output.display());
    Ok(())
}

fn load(path: &Path) -> Result<AnyTrace> {
    read_any_trace_auto(path).with_context(|| format!("reading trace {}", path.display()))
}
