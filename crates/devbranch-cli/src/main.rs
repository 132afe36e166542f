//! CLI entry point for devbranch.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `devbranch-app` crate.

mod logging;

use anyhow::Context as _;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use devbranch_app::{
    CheckInput, CheckOutcome, ExplainOutput, format_explanation, format_not_found,
    parse_report_json, render_markdown, run_check, run_explain, runtime_error_report,
    serialize_report, verdict_exit_code,
};
use devbranch_composer::{ComposerCli, DEFAULT_COMPOSER};
use devbranch_settings::Overrides;
use devbranch_types::{Context, DevbranchReport, RepoPath, Verdict};
use std::process::Command;

#[derive(Parser, Debug)]
#[command(
    name = "devbranch",
    version,
    about = "Reject unreleased dev-* Composer dependencies before they are committed"
)]
struct Cli {
    /// Project directory (passed to `composer show --working-dir`).
    #[arg(long, default_value = ".")]
    working_dir: Utf8PathBuf,

    /// Path to the devbranch config TOML, relative to the working directory.
    #[arg(long, default_value = "devbranch.toml")]
    config: Utf8PathBuf,

    /// Log debug diagnostics to stderr.
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ContextArg {
    /// Running from the git pre-commit hook.
    PreCommit,
    /// Any other invocation (manual run, CI).
    #[value(alias = "general")]
    Run,
}

impl From<ContextArg> for Context {
    fn from(value: ContextArg) -> Self {
        match value {
            ContextArg::PreCommit => Context::PreCommit,
            ContextArg::Run => Context::General,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check installed dependencies for disallowed dev-* versions.
    Check {
        /// Invocation context; only `pre-commit` honours `fail_on_commit`.
        #[arg(long, value_enum, default_value = "run")]
        context: ContextArg,

        /// Composer executable.
        #[arg(long, default_value = DEFAULT_COMPOSER)]
        composer: Utf8PathBuf,

        /// Additional package allowed on a dev-* version (repeatable).
        #[arg(long = "allow", value_name = "PACKAGE")]
        allow: Vec<String>,

        /// Override `fail_on_commit` from the config file.
        #[arg(long)]
        fail_on_commit: Option<bool>,

        /// Changed file, relative to the working directory (repeatable). The check only runs
        /// when one matches `triggered_by`.
        #[arg(long = "changed-file", value_name = "PATH")]
        changed_files: Vec<String>,

        /// Use the staged files (`git diff --cached --name-only --relative`) as the changed files.
        /// Paths are relative to the working directory; staged files outside it are ignored.
        #[arg(long)]
        staged: bool,

        /// Where to write the JSON report. Relative paths resolve against the current directory.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,

        /// Write a Markdown report.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled). Relative paths resolve against the
        /// current directory.
        #[arg(long, default_value = "artifacts/devbranch/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/devbranch/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "composer.dev_branch") or code (e.g., "process_failed").
        identifier: String,
    },

    /// Print the JSON schema of devbranch.toml.
    Schema,
}

struct CheckArgs {
    context: Context,
    composer: Utf8PathBuf,
    allow: Vec<String>,
    fail_on_commit: Option<bool>,
    changed_files: Vec<String>,
    staged: bool,
    report_out: Option<Utf8PathBuf>,
    write_markdown: bool,
    markdown_out: Utf8PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.cmd {
        Commands::Check {
            context,
            ref composer,
            ref allow,
            fail_on_commit,
            ref changed_files,
            staged,
            ref report_out,
            write_markdown,
            ref markdown_out,
        } => {
            let args = CheckArgs {
                context: context.into(),
                composer: composer.clone(),
                allow: allow.clone(),
                fail_on_commit,
                changed_files: changed_files.clone(),
                staged,
                report_out: report_out.clone(),
                write_markdown,
                markdown_out: markdown_out.clone(),
            };
            cmd_check(&cli, args)
        }
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Explain { identifier } => cmd_explain(&identifier),
        Commands::Schema => cmd_schema(),
    }
}

fn cmd_check(cli: &Cli, args: CheckArgs) -> anyhow::Result<()> {
    let working_dir = cli
        .working_dir
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.working_dir.clone());

    let result = (|| -> anyhow::Result<i32> {
        if !working_dir.is_dir() {
            anyhow::bail!("working directory does not exist: {}", working_dir);
        }

        // Missing config file is allowed (defaults apply).
        let cfg_path = working_dir.join(&cli.config);
        let cfg_text = read_optional(&cfg_path)?;

        let changed_files = collect_changed_files(&working_dir, &args)?;

        let input = CheckInput {
            working_dir: &working_dir,
            config_text: &cfg_text,
            overrides: Overrides {
                allowed_packages: args.allow.clone(),
                fail_on_commit: args.fail_on_commit,
            },
            context: args.context,
            changed_files,
        };

        let lister = ComposerCli::new(args.composer.clone());
        let output = match run_check(input, &lister)? {
            CheckOutcome::NotTriggered { .. } => {
                eprintln!("devbranch: no changed file matches triggered_by; skipping");
                return Ok(0);
            }
            CheckOutcome::Evaluated(output) => output,
        };

        if let Some(report_out) = &args.report_out {
            write_report_file(report_out, &output.report).context("write report json")?;
        }
        if args.write_markdown {
            let md = render_markdown(&output.report);
            write_text_file(&args.markdown_out, &md).context("write markdown")?;
        }

        match output.verdict() {
            Verdict::Passed => println!("devbranch: no disallowed dev-* dependencies"),
            Verdict::NonBlockingFailed(message) => eprintln!("devbranch warning: {message}"),
            Verdict::Failed(message) => eprintln!("devbranch: {message}"),
        }

        Ok(verdict_exit_code(output.verdict()))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            if let Some(report_out) = &args.report_out {
                let report =
                    runtime_error_report(args.context, working_dir.as_str(), &format!("{err:#}"));
                let _ = write_report_file(report_out, &report);
            }
            eprintln!("devbranch error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn read_optional(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(%path, "config file not found; using defaults");
            Ok(String::new())
        }
        Err(err) => Err(err).with_context(|| format!("read config: {}", path)),
    }
}

/// `None` when neither `--changed-file` nor `--staged` was given: the check always runs.
fn collect_changed_files(
    working_dir: &Utf8Path,
    args: &CheckArgs,
) -> anyhow::Result<Option<Vec<RepoPath>>> {
    if args.changed_files.is_empty() && !args.staged {
        return Ok(None);
    }

    let mut files: Vec<RepoPath> = args.changed_files.iter().map(RepoPath::new).collect();
    if args.staged {
        files.extend(git_staged_files(working_dir).context("git diff --cached failed")?);
    }
    Ok(Some(files))
}

fn git_staged_files(working_dir: &Utf8Path) -> anyhow::Result<Vec<RepoPath>> {
    let output = Command::new("git")
        .current_dir(working_dir)
        .args(["diff", "--cached", "--name-only", "--relative"])
        .output()
        .context("spawn git")?;

    if !output.status.success() {
        anyhow::bail!("git diff returned non-zero exit status");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let paths = stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(RepoPath::new)
        .collect::<Vec<_>>();

    Ok(paths)
}

fn write_report_file(path: &Utf8Path, report: &DevbranchReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&report);

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found {
            identifier,
            explanation,
        } => {
            print!("{}", format_explanation(&identifier, &explanation));
            Ok(())
        }
        ExplainOutput::NotFound { identifier } => {
            eprint!("{}", format_not_found(&identifier));
            std::process::exit(1);
        }
    }
}

fn cmd_schema() -> anyhow::Result<()> {
    let schema = devbranch_settings::config_schema();
    let text = serde_json::to_string_pretty(&schema).context("serialize config schema")?;
    println!("{text}");
    Ok(())
}
