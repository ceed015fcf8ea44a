// Command-line front end: enumerate subdomains of one or more domains and
// print them as they are discovered.

use anyhow::{Result, bail};
use clap::Parser;
use futures::StreamExt;
use futures::stream::BoxStream;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

use kodegen_tools_subdomains::utils::{DEFAULT_MAX_PAGES, DEFAULT_RUN_TIMEOUT_SECS};
use kodegen_tools_subdomains::{
    EnumContext, EnumerationOptions, ResultStreamExt, SOURCE_NAMES, SharedSource, SourceConfig,
    SubdomainResult, all_sources, enumerate_subdomains, normalize_domain, source_by_name,
};

#[derive(Debug, Parser)]
#[command(
    name = "kodegen-subdomains",
    version,
    about = "Passive subdomain enumeration across search engines, passive DNS and CT logs"
)]
struct Args {
    /// Base domain to enumerate (repeatable)
    #[arg(short, long = "domain", required_unless_present = "list_sources")]
    domains: Vec<String>,

    /// Comma-separated sources to query (default: all)
    #[arg(short, long, value_delimiter = ',')]
    sources: Vec<String>,

    /// Enumerate every discovered name as well
    #[arg(short, long)]
    recursive: bool,

    /// Print each name once and never recurse into a name twice
    #[arg(short, long)]
    uniq: bool,

    /// Run time per domain in seconds; the only bound on recursive runs
    #[arg(short, long, default_value_t = DEFAULT_RUN_TIMEOUT_SECS)]
    timeout: u64,

    /// Result pages requested from each search engine per domain
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    max_pages: usize,

    /// Emit JSON lines instead of plain names
    #[arg(long)]
    json: bool,

    /// Log provider failures at warn level
    #[arg(long)]
    show_errors: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,

    /// Print the available sources and exit
    #[arg(long)]
    list_sources: bool,
}

#[derive(Debug, Default)]
struct Summary {
    found: usize,
    failures: usize,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn select_sources(names: &[String], config: &SourceConfig) -> Result<Vec<SharedSource>> {
    if names.is_empty() {
        return Ok(all_sources(config));
    }
    names
        .iter()
        .map(|name| match source_by_name(name, config) {
            Some(source) => Ok(source),
            None => bail!(
                "Unknown source '{name}' (available: {})",
                SOURCE_NAMES.join(", ")
            ),
        })
        .collect()
}

fn report(args: &Args, base: &str, result: SubdomainResult, summary: &mut Summary) {
    let label = result.label();
    match result.into_outcome() {
        Ok(name) => {
            summary.found += 1;
            if args.json {
                let line = serde_json::json!({
                    "domain": base,
                    "source": label,
                    "subdomain": name,
                });
                println!("{line}");
            } else {
                println!("{name}");
            }
        }
        Err(e) => {
            summary.failures += 1;
            if args.show_errors && !e.is_cancellation() {
                warn!("{label} failed for {base}: {e}");
            } else {
                debug!("{label} failed for {base}: {e}");
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.list_sources {
        for name in SOURCE_NAMES {
            println!("{name}");
        }
        return Ok(());
    }

    let config = SourceConfig {
        max_pages: args.max_pages,
        ..SourceConfig::default()
    };
    config.validate()?;

    let options = Arc::new(
        EnumerationOptions::builder()
            .sources(select_sources(&args.sources, &config)?)
            .recursive(args.recursive)
            .uniq(args.uniq)
            .build(),
    );

    // Ctrl-C cancels the root; every domain runs under its own child context.
    let root = EnumContext::new();
    tokio::spawn({
        let root = root.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling enumeration");
                root.cancel();
            }
        }
    });

    let timeout = Duration::from_secs(args.timeout);
    let started = Instant::now();
    let mut summary = Summary::default();

    for (index, input) in args.domains.iter().enumerate() {
        if root.is_done() {
            warn!(
                "Skipping {} remaining domain(s) after interrupt",
                args.domains.len() - index
            );
            break;
        }
        let Some(domain) = normalize_domain(input) else {
            warn!("Skipping invalid domain {input:?}");
            continue;
        };

        info!(
            "Enumerating {domain} with {}",
            options.source_labels().join(", ")
        );
        let ctx = root.child_with_timeout(timeout);
        let stream = enumerate_subdomains(ctx.clone(), domain.clone(), Arc::clone(&options));
        let mut results: BoxStream<'static, SubdomainResult> = if args.uniq {
            stream.uniq().boxed()
        } else {
            stream.boxed()
        };

        while let Some(result) = results.next().await {
            report(&args, &domain, result, &mut summary);
        }

        if let Some(reason) = ctx.err() {
            info!("Stopped {domain}: {reason}");
        }
    }

    info!(
        "Found {} subdomains ({} provider failures) in {:.2}s",
        summary.found,
        summary.failures,
        started.elapsed().as_secs_f64()
    );

    Ok(())
}
