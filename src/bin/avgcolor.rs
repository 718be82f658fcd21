use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "avgcolor", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate every configuration and write the project JSON.
    Generate(GenerateArgs),
    /// Print the iteration plan of every configuration without building a scene.
    Plan(Source),
}

#[derive(Args, Debug)]
#[group(required = false, multiple = false)]
struct Source {
    /// Built-in preset: serial, sad, avx2, avx512 or all.
    #[arg(long)]
    preset: Option<String>,

    /// Configuration JSON (one object or an array).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    source: Source,

    /// Output project JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Also write the per-configuration generation reports as JSON.
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Plan(source) => cmd_plan(source),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_configs(source: &Source) -> anyhow::Result<Vec<avgcolor::Configuration>> {
    if let Some(path) = &source.config {
        return avgcolor::Configuration::load_all(path)
            .with_context(|| format!("load configurations from '{}'", path.display()));
    }
    match source.preset.as_deref().unwrap_or("all") {
        p if p.eq_ignore_ascii_case("all") => Ok(avgcolor::presets::all()?),
        p => Ok(vec![avgcolor::presets::preset(p)?]),
    }
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("write '{}'", path.display()))
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let configs = load_configs(&args.source)?;

    let mut session = avgcolor::Session::new();
    let results = session.generate_all(&configs);

    let mut reports = Vec::new();
    let mut failed = Vec::new();
    for (name, result) in results {
        match result {
            Ok(report) => {
                let average = report
                    .average
                    .map_or_else(|| format!("{:?}", report.accumulators), |w| format!("{w:#010x}"));
                eprintln!(
                    "{name}: {} iterations, {:.2}s ({} frames), {} keys, avg {average}, fingerprint {}",
                    report.iterations,
                    report.duration,
                    report.frames,
                    report.keyframes,
                    report.fingerprint
                );
                reports.push(report);
            }
            Err(e) => {
                eprintln!("{name}: FAILED: {e}");
                failed.push(name);
            }
        }
    }

    let project = session.into_project();
    write_file(&args.out, &project.to_json_pretty()?)?;
    eprintln!("wrote {}", args.out.display());

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&reports).context("serialize reports")?;
        write_file(path, &json)?;
        eprintln!("wrote {}", path.display());
    }

    if !failed.is_empty() {
        anyhow::bail!("{} configuration(s) failed: {}", failed.len(), failed.join(", "));
    }
    Ok(())
}

fn cmd_plan(source: Source) -> anyhow::Result<()> {
    let configs = load_configs(&source)?;
    for config in &configs {
        config.validate()?;
        let plan = avgcolor::IterationPlan::build(config)
            .with_context(|| format!("plan configuration '{}'", config.name))?;
        println!(
            "{}: {} iterations, {:.2}s",
            config.name,
            plan.len(),
            plan.duration()
        );
        for it in &plan.iterations {
            println!(
                "  #{:<3} {:<10} items {:>3}..{:<3} [{:.3}s, {:.3}s)",
                it.index,
                it.strategy_name,
                it.first_item,
                it.first_item + it.claimed,
                it.window.start,
                it.window.end()
            );
        }
    }
    Ok(())
}
