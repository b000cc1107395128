use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, Cursor};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, anyhow, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use inferno::collapse::Collapse;
use inferno::collapse::perf::Folder as PerfFolder;
use inferno::flamegraph::{Options, from_reader};
use xshell::{Shell, cmd};

#[derive(Args)]
pub struct FlamegraphArgs {
    /// Sampling frequency passed to `perf record`.
    #[arg(long, default_value_t = 999)]
    frequency: u32,
    /// Call graph strategy to use when collecting samples.
    #[arg(long, value_enum, default_value_t = CallGraph::Dwarf)]
    call_graph: CallGraph,
    /// Output location for the generated SVG flamegraph.
    #[arg(long)]
    output: Option<Utf8PathBuf>,
    /// Persist the raw `perf.data` capture to this path.
    #[arg(long)]
    perf_data: Option<Utf8PathBuf>,
    /// Override the title rendered at the top of the flamegraph.
    #[arg(long)]
    title: Option<String>,
    /// Benchmark target to execute (defaults to Criterion's `perf` harness).
    #[arg(long, default_value = "perf")]
    bench: String,
    /// Restrict the benchmark to one case from `benches/data/cases.yaml`.
    #[arg(long, value_name = "NAME")]
    case: Option<String>,
    /// Use an alternate Cargo profile (defaults to `profiling`).
    #[arg(long, default_value = "profiling")]
    profile: String,
    /// Skip the warm-up build step (`cargo bench --no-run`).
    #[arg(long)]
    skip_build: bool,
    /// Extra arguments passed verbatim to Criterion after the `--` separator.
    #[arg(last = true)]
    extra: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CallGraph {
    Dwarf,
    FramePointer,
    Lbr,
}

impl CallGraph {
    fn as_flag(self) -> &'static str {
        match self {
            CallGraph::Dwarf => "dwarf",
            CallGraph::FramePointer => "fp",
            CallGraph::Lbr => "lbr",
        }
    }
}

pub fn run(args: FlamegraphArgs) -> Result<()> {
    ensure_command_available("perf")?;

    let root = workspace_root()?;
    let dataset = root.join("benches/data/cases.yaml");
    if !dataset.exists() {
        bail!("benchmark cases not found at {dataset}");
    }

    if !args.skip_build {
        let sh = Shell::new()?;
        sh.change_dir(&root);
        let bench = &args.bench;
        let profile = &args.profile;
        cmd!(sh, "cargo bench --bench {bench} --profile {profile} --no-run")
            .run()
            .context("failed to pre-build Criterion benchmarks")?;
    }

    let mut command: Vec<OsString> = [
        "cargo",
        "bench",
        "--bench",
        args.bench.as_str(),
        "--profile",
        args.profile.as_str(),
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    if args.case.is_some() || !args.extra.is_empty() {
        command.push(OsString::from("--"));
    }
    if let Some(case) = &args.case {
        command.push(OsString::from("--bench"));
        command.push(OsString::from(format!("verbalize/{case}")));
    }
    command.extend(args.extra.iter().map(OsString::from));

    let output = args
        .output
        .unwrap_or_else(|| flamegraph_dir(&root).join("native.svg"));
    let perf_data = args
        .perf_data
        .unwrap_or_else(|| flamegraph_dir(&root).join("native.perf.data"));
    let title = args
        .title
        .unwrap_or_else(|| format!("mathwords :: {}", args.bench));

    record(&root, &command, args.frequency, args.call_graph, &perf_data)?;
    render(&root, &perf_data, &output, title)
}

fn flamegraph_dir(root: &Utf8Path) -> Utf8PathBuf {
    root.join("target/flamegraphs")
}

fn workspace_root() -> Result<Utf8PathBuf> {
    let manifest_dir = Utf8PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    manifest_dir
        .parent()
        .map(|path| path.to_owned())
        .ok_or_else(|| anyhow!("failed to determine workspace root"))
}

fn ensure_command_available(program: &str) -> Result<()> {
    let status = Command::new(program)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => bail!("command `{program}` exited with status {status}"),
        Err(err) => bail!("failed to execute `{program}`: {err}"),
    }
}

fn record(
    root: &Utf8Path,
    command: &[OsString],
    frequency: u32,
    call_graph: CallGraph,
    perf_data: &Utf8Path,
) -> Result<()> {
    if let Some(parent) = perf_data.parent() {
        fs::create_dir_all(parent)?;
    }
    let perf_path: PathBuf = perf_data.to_owned().into();
    if perf_path.exists() {
        fs::remove_file(&perf_path)?;
    }

    let mut perf = Command::new("perf");
    perf.current_dir(root.as_std_path())
        .arg("record")
        .arg("-F")
        .arg(frequency.to_string())
        .arg("-g")
        .arg("--call-graph")
        .arg(call_graph.as_flag())
        .arg("-o")
        .arg(&perf_path)
        .arg("--")
        .args(command);

    println!("[perf] recording {}", format_command(command));
    run_command(perf).context("perf record failed")
}

fn render(root: &Utf8Path, perf_data: &Utf8Path, output: &Utf8Path, title: String) -> Result<()> {
    let mut perf_script = Command::new("perf");
    perf_script
        .current_dir(root.as_std_path())
        .args(["script", "-i"])
        .arg(perf_data.as_std_path())
        .stdout(Stdio::piped());

    let mut child = perf_script
        .spawn()
        .context("failed to spawn `perf script`")?;
    let stdout = child
        .stdout
        .take()
        .context("failed to capture perf script output")?;

    let mut folder = PerfFolder::default();
    let mut collapsed = Vec::new();
    folder
        .collapse(BufReader::new(stdout), &mut collapsed)
        .context("failed to collapse perf samples")?;

    let status = child.wait()?;
    if !status.success() {
        bail!("`perf script` exited with status {status}");
    }

    let mut options = Options::default();
    options.count_name = "samples".to_owned();
    options.hash = true;
    options.title = title;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(output.as_std_path())?;
    from_reader(&mut options, Cursor::new(collapsed), &mut file)
        .context("failed to render flamegraph")?;

    println!("Flamegraph written to {output}");
    Ok(())
}

fn run_command(mut command: Command) -> Result<()> {
    let program = command.get_program().to_string_lossy().into_owned();
    let status = command
        .status()
        .with_context(|| format!("failed to spawn `{program}`"))?;
    if !status.success() {
        bail!("`{program}` exited with status {status}");
    }
    Ok(())
}

fn format_command(args: &[OsString]) -> String {
    args.iter()
        .map(|arg| {
            let value = arg.to_string_lossy();
            if value.contains(' ') {
                format!("\"{value}\"")
            } else {
                value.into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
