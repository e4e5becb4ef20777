use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use research_hub::api::ApiClient;
use research_hub::config::{find_config_file, get_config, load_config, Config};
use research_hub::models::SearchParams;
use research_hub::pager::{Pager, PagerOptions};
use research_hub::ui;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Research Hub - search academic works and browse research program data
#[derive(Parser, Debug)]
#[command(name = "research-hub")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Client for the Research Network Hub backend", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (repeat for more: -v, -vv, -vvv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search academic works, with interactive paging on a terminal
    Search {
        /// Search term
        term: String,

        /// Only include works published after this year
        #[arg(long)]
        from_year: Option<i32>,

        /// Country code for institution filtering
        #[arg(long)]
        country: Option<String>,

        /// Topic field IDs to filter by (repeatable)
        #[arg(long = "topic")]
        topics: Vec<String>,

        /// Results per page
        #[arg(long)]
        per_page: Option<usize>,

        /// Jump straight to this page and exit
        #[arg(long)]
        page: Option<u32>,
    },

    /// List the topic field catalog
    Fields,

    /// List PCSAS accredited programs
    Programs,

    /// Show an author's institutions and works
    Author {
        /// OpenAlex author ID
        author_id: String,
    },

    /// Find universities common to the top works for a term
    CrossSearch {
        /// Search term
        term: String,

        /// How many top works to cross-reference
        #[arg(long, default_value_t = 10)]
        top_works: usize,
    },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("research_hub={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match cli.config.clone().or_else(find_config_file) {
        Some(path) => load_config(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => get_config(),
    };
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;
    let client = ApiClient::with_timeout(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_seconds),
    )?;

    match &cli.command {
        Commands::Search {
            term,
            from_year,
            country,
            topics,
            per_page,
            page,
        } => {
            if term.trim().is_empty() {
                bail!("search term must not be empty");
            }

            let params = SearchParams::new(term.trim())
                .from_year(from_year.unwrap_or(config.search.from_year))
                .country_code(
                    country
                        .clone()
                        .unwrap_or_else(|| config.search.country_code.clone()),
                )
                .topic_ids(topics.clone());

            let mut options = PagerOptions::from_config(&config);
            if let Some(per_page) = per_page {
                options.per_page = *per_page;
            }

            run_search(client, params, options, *page).await?;
        }
        Commands::Fields => {
            let fields = client.fields().await?;
            ui::render_fields(&fields);
        }
        Commands::Programs => {
            let programs = client.pcsas_programs().await?;
            ui::render_programs(&programs);
        }
        Commands::Author { author_id } => {
            let details = client.author_details(author_id).await?;
            if let Some(institution) = details.current_institution() {
                ui::print_info(&format!("Last known institution: {}", institution));
            }
            let works = client.author_works(author_id).await?;
            ui::render_cards("Works", &works, ui::work_card);
        }
        Commands::CrossSearch { term, top_works } => {
            if term.trim().is_empty() {
                bail!("search term must not be empty");
            }
            let universities = client
                .cross_search_universities(term.trim(), *top_works)
                .await?;
            ui::render_universities(&universities);
        }
    }

    Ok(())
}

async fn run_search(
    client: ApiClient,
    params: SearchParams,
    options: PagerOptions,
    jump_to: Option<u32>,
) -> Result<()> {
    let pager = Pager::new(Arc::new(client), options);

    let view = match pager.new_search(params).await {
        Ok(view) => view,
        Err(err) => {
            ui::print_error(&err.to_string());
            return Ok(());
        }
    };

    if let Some(page) = jump_to {
        let view = if page == view.page {
            view
        } else {
            pager.go_to_page(page).await?
        };
        ui::render_page(&view);
        return Ok(());
    }

    ui::render_page(&view);

    if !ui::is_terminal() {
        return Ok(());
    }

    // Interactive paging: n/p to navigate, q to quit. Errors stay
    // inline and the session keeps going.
    let mut current = view;
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if std::io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let target = match line.trim() {
            "n" | "next" => {
                if !current.has_next {
                    ui::print_info("Already on the last page.");
                    continue;
                }
                current.page + 1
            }
            "p" | "prev" => {
                if !current.has_previous {
                    ui::print_info("Already on the first page.");
                    continue;
                }
                current.page - 1
            }
            "q" | "quit" | "" => break,
            other => {
                ui::print_info(&format!("Unknown command: {other} (n/p/q)"));
                continue;
            }
        };

        match pager.go_to_page(target).await {
            Ok(view) => {
                ui::render_page(&view);
                current = view;
            }
            // Fetch failures (and the advisory Busy rejection) stay
            // inline; the session is still navigable afterwards.
            Err(err) => ui::print_error(&err.to_string()),
        }
    }

    pager.settle_prefetch().await;
    Ok(())
}
