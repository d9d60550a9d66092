//! CLI entrypoint for huddle
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use huddle_application::{
    CollectResponsesInput, CollectResponsesUseCase, CollectionError, CollectionProgress,
    CompositeProgress, Contactable, ContactableGateway, ConversationLogger, FlowComponent,
    FlowRunner, NoConversationLogger, NoProgress, NoResultObserver, PairwiseComparisonInput,
    PairwiseComparisonUseCase, ResponseForEachInput, ResponseForEachUseCase,
};
use huddle_domain::{CollectionOutcome, CollectionTexts, OutputFormat, ResponseCap, Statement};
use huddle_infrastructure::channel::CONSOLE_CHANNEL;
use huddle_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, LocalContactableGateway,
};
use huddle_presentation::{
    Cli, CollectArgs, Command, ConsoleFormatter, FlowArgs, ForEachArgs, JsonLinesFlowOutput,
    OutputConfig, PairwiseArgs, ProgressReporter, ResultDisplay, RunArgs, RunTally,
    SimpleProgress,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_tracing(cli.verbose, cli.log_dir.as_deref());

    info!("Starting huddle");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        let config = load_config(&cli)?;
        println!();
        println!("{}", config.to_toml()?);
        return Ok(());
    }

    let file_config = load_config(&cli)?;

    let output = OutputConfig::resolve(
        cli.output.map(Into::into),
        file_config.output.format,
        file_config.output.color,
        cli.quiet,
    );
    output.apply_color();

    let Some(command) = cli.command else {
        bail!("No command given. Run `huddle --help` for usage.");
    };

    let transcript = cli
        .transcript
        .or_else(|| file_config.logging.transcript.clone());

    // === Dependency Injection ===
    let ctx = RunContext {
        gateway: Arc::new(LocalContactableGateway::new()),
        logger: open_transcript(transcript, &run_name(&command)),
        file_config,
        output,
    };

    match command {
        Command::Collect(args) => run_collect(&ctx, args).await,
        Command::ForEach(args) => run_for_each(&ctx, args).await,
        Command::Pairwise(args) => run_pairwise(&ctx, args).await,
        Command::Flow(args) => run_flow(&ctx, args).await,
    }
}

/// Console logs go to stderr; stdout belongs to the terminal channel and results.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "huddle.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            tracing_subscriber::registry()
                .with(EnvFilter::new(level))
                .with(console)
                .with(file)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(EnvFilter::new(level))
                .with(console)
                .init();
            None
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    let (config, warnings) = ConfigLoader::load_validated(cli.config.as_ref())
        .context("failed to load configuration")?;
    for issue in &warnings {
        warn!("Config: {}", issue);
    }
    Ok(config)
}

fn run_name(command: &Command) -> String {
    match command {
        Command::Collect(_) => "collect".to_string(),
        Command::ForEach(_) => "for_each".to_string(),
        Command::Pairwise(_) => "pairwise".to_string(),
        Command::Flow(args) => format!("flow:{}", args.component),
    }
}

fn open_transcript(path: Option<PathBuf>, run: &str) -> Arc<dyn ConversationLogger> {
    let Some(path) = path else {
        return Arc::new(NoConversationLogger);
    };
    match JsonlConversationLogger::new(&path) {
        Some(logger) => {
            info!("Writing transcript to {}", path.display());
            Arc::new(logger.with_run(run))
        }
        None => Arc::new(NoConversationLogger),
    }
}

/// Everything a subcommand needs from `main`
struct RunContext {
    gateway: Arc<LocalContactableGateway>,
    logger: Arc<dyn ConversationLogger>,
    file_config: FileConfig,
    output: OutputConfig,
}

impl RunContext {
    fn max_time(&self, run: &RunArgs) -> Duration {
        run.max_time
            .map(Duration::from_secs)
            .unwrap_or_else(|| self.file_config.collection.max_time())
    }

    fn texts(&self) -> CollectionTexts {
        self.file_config.texts.to_collection_texts()
    }

    async fn open(&self, run: &RunArgs) -> Result<Vec<Arc<dyn Contactable>>> {
        self.gateway
            .init(&run.participants, &serde_json::Value::Null)
            .await
            .context("failed to open participant channels")
    }

    /// A bar would be torn up by prompts on the same terminal, so a run with
    /// a `cli` participant gets line output instead.
    fn progress_display(&self, run: &RunArgs) -> Box<dyn CollectionProgress> {
        if !self.output.show_progress {
            Box::new(NoProgress)
        } else if run.participants.iter().any(|p| p.kind == CONSOLE_CHANNEL) {
            Box::new(SimpleProgress)
        } else {
            Box::new(ProgressReporter::new())
        }
    }

    async fn finish<R>(
        &self,
        result: Result<CollectionOutcome<R>, CollectionError>,
        title: &str,
        tally: &RunTally,
    ) -> Result<()>
    where
        R: ResultDisplay + Serialize,
    {
        if let Err(e) = self.gateway.shutdown().await {
            warn!("Channel shutdown failed: {}", e);
        }

        let outcome = result.context("collection run failed")?;
        let rendered = ConsoleFormatter::render(self.output.format, title, &outcome);
        println!("{}", rendered.trim_end());

        if self.output.show_progress && self.output.format != OutputFormat::Json {
            eprintln!("{}", tally.snapshot().summary());
        }
        Ok(())
    }
}

async fn run_collect(ctx: &RunContext, args: CollectArgs) -> Result<()> {
    let cap = args
        .max_responses
        .map(|n| ResponseCap::Limited(n as usize))
        .unwrap_or_else(|| ctx.file_config.collection.response_cap());
    let input = CollectResponsesInput::new(args.prompt, cap, ctx.max_time(&args.run))
        .with_texts(ctx.texts());

    let use_case = CollectResponsesUseCase::new(ctx.open(&args.run).await?)
        .with_conversation_logger(Arc::clone(&ctx.logger));

    let tally = RunTally::new();
    let display = ctx.progress_display(&args.run);
    let progress =
        CompositeProgress::new(vec![display.as_ref(), &tally as &dyn CollectionProgress]);

    let result = use_case
        .execute_with_progress(input, &NoResultObserver, &progress)
        .await;
    ctx.finish(result, "Responses", &tally).await
}

async fn run_for_each(ctx: &RunContext, args: ForEachArgs) -> Result<()> {
    let statements = args.statements.into_iter().map(Statement::new).collect();
    let input = ResponseForEachInput::new(statements, args.options, ctx.max_time(&args.run))
        .with_texts(ctx.texts());

    let use_case = ResponseForEachUseCase::new(ctx.open(&args.run).await?)
        .with_conversation_logger(Arc::clone(&ctx.logger));

    let tally = RunTally::new();
    let display = ctx.progress_display(&args.run);
    let progress =
        CompositeProgress::new(vec![display.as_ref(), &tally as &dyn CollectionProgress]);

    let result = use_case
        .execute_with_progress(input, &NoResultObserver, &progress)
        .await;
    ctx.finish(result, "Reactions", &tally).await
}

async fn run_pairwise(ctx: &RunContext, args: PairwiseArgs) -> Result<()> {
    let statements = args.statements.into_iter().map(Statement::new).collect();
    let input = PairwiseComparisonInput::new(statements, args.choice, ctx.max_time(&args.run))
        .with_texts(ctx.texts());

    let use_case = PairwiseComparisonUseCase::new(ctx.open(&args.run).await?)
        .with_conversation_logger(Arc::clone(&ctx.logger));

    let tally = RunTally::new();
    let display = ctx.progress_display(&args.run);
    let progress =
        CompositeProgress::new(vec![display.as_ref(), &tally as &dyn CollectionProgress]);

    let result = use_case
        .execute_with_progress(input, &NoResultObserver, &progress)
        .await;
    ctx.finish(result, "Pairwise votes", &tally).await
}

async fn run_flow(ctx: &RunContext, args: FlowArgs) -> Result<()> {
    let component: FlowComponent = args.component.parse()?;

    let raw = if args.inputs.as_os_str() == "-" {
        let mut raw = String::new();
        tokio::io::stdin()
            .read_to_string(&mut raw)
            .await
            .context("failed to read inputs from stdin")?;
        raw
    } else {
        tokio::fs::read_to_string(&args.inputs)
            .await
            .with_context(|| format!("failed to read {}", args.inputs.display()))?
    };
    let inputs: serde_json::Value =
        serde_json::from_str(&raw).context("inputs are not valid JSON")?;

    // progress lines go to stderr
    let display: Box<dyn CollectionProgress> = if ctx.output.show_progress {
        Box::new(SimpleProgress)
    } else {
        Box::new(NoProgress)
    };

    // stdout carries the events and stdin may have carried the inputs, so
    // no participant can sit at this terminal
    FlowRunner::new(Arc::new(LocalContactableGateway::without_console()))
        .with_conversation_logger(Arc::clone(&ctx.logger))
        .run_with_progress(
            component,
            inputs,
            &JsonLinesFlowOutput::stdout(),
            display.as_ref(),
        )
        .await?;
    Ok(())
}
