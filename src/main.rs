use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;

use demandlens::config::log_filter;
use demandlens::report::{self, OutputFormat, ReportContext};
use demandlens::{
    parse_repo_url, AnalysisPipeline, Config, GitHubClient, IssueState, OpenAIProvider,
    PipelineConfig,
};

#[derive(Parser, Debug)]
#[command(name = "demandlens")]
#[command(version)]
#[command(about = "Extract real user demands from GitHub Issues using LLMs")]
struct Args {
    /// GitHub repository URL, e.g. https://github.com/owner/repo
    repo_url: String,

    /// Maximum number of recent issues to fetch
    #[arg(long, default_value_t = 100)]
    max_issues: u32,

    /// Issue state to fetch from GitHub
    #[arg(long, value_enum, default_value_t = IssueState::Open)]
    state: IssueState,

    /// Output file path
    #[arg(short, long, default_value = "requirements.md")]
    output: PathBuf,

    /// LLM model name (defaults to DEMANDLENS_MODEL or gpt-4.1-mini)
    #[arg(long)]
    model: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,

    /// Keep pull requests returned by the issues endpoint
    #[arg(long)]
    include_prs: bool,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let args = Args::parse();

    let repo = match parse_repo_url(&args.repo_url) {
        Ok(repo) => repo,
        Err(e) => {
            eprintln!("[demandlens] {}", e);
            return Ok(ExitCode::from(1));
        }
    };

    let config = Config::from_env();

    // Initialize clients
    let github = GitHubClient::with_base_url(config.github_token.as_deref(), &config.github_api_url)?;
    let llm = OpenAIProvider::new(
        config.openai_api_key.clone(),
        Some(args.model.clone().unwrap_or_else(|| config.model.clone())),
        &config.openai_base_url,
    )?;

    let pipeline_config = PipelineConfig {
        state: args.state,
        max_issues: args.max_issues,
        include_pull_requests: args.include_prs,
        show_progress: !args.no_progress,
    };
    let pipeline = AnalysisPipeline::new(github, llm, pipeline_config);

    let result = pipeline.analyze_repo(&repo).await?;

    let ctx = ReportContext {
        repo_url: args.repo_url.trim(),
        issue_count: result.issues_analyzed,
        generated_at: Utc::now(),
    };
    let output = report::render(args.format, &ctx, &result.analysis)?;

    std::fs::write(&args.output, output)
        .with_context(|| format!("failed to write report to {}", args.output.display()))?;
    tracing::info!("Requirements report written to {}", args.output.display());

    Ok(ExitCode::SUCCESS)
}
