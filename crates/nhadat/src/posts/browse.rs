use crate::prelude::{println, *};
use colored::Colorize;

use nhadat_core::view::{FetchTicket, ListingViewState, Phase};

use super::list::{build_criteria, execute_request, format_listing_table, format_page_strip};
use super::{create_client, ApiConfig};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # Browse all listings interactively:
  nhadat posts browse

  # Start from a filtered view:
  nhadat posts browse --post-type sale --city hanoi --price 5-10

COMMANDS (at the prompt):
  n          next page
  p          previous page
  g <page>   go to a page
  clear      drop all filters and return to page 1
  retry      re-issue the last fetch after a failure
  q          quit")]
pub struct BrowseOptions {
    /// Page number to start from (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: u32,

    #[clap(flatten)]
    pub filters: super::list::FilterArgs,
}

pub async fn run(options: BrowseOptions, global: crate::Global) -> Result<()> {
    let config = ApiConfig::from_env()?;
    let client = create_client(&config)?;

    let mut state = ListingViewState::new();
    let ticket = match build_criteria(&options.filters)? {
        Some(criteria) => state.apply_filters(criteria),
        None => state.change_page(options.page),
    };

    resolve(&client, &config.base_url, &mut state, ticket, global.verbose).await;
    render(&state);

    let stdin = std::io::stdin();
    loop {
        print!("{} ", "listing>".bright_cyan().bold());
        use std::io::Write;
        std::io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }

        let ticket = match parse_command(&line, &state) {
            Ok(Some(BrowseCommand::Quit)) => break,
            Ok(Some(BrowseCommand::Page(page))) => state.change_page(page),
            Ok(Some(BrowseCommand::Clear)) => state.clear_filters(),
            Ok(Some(BrowseCommand::Retry)) => state.retry(),
            Ok(None) => continue,
            Err(message) => {
                println!("{}", message.yellow());
                continue;
            }
        };

        resolve(&client, &config.base_url, &mut state, ticket, global.verbose).await;
        render(&state);
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BrowseCommand {
    Page(u32),
    Clear,
    Retry,
    Quit,
}

/// Parse one prompt line into a navigation command. Empty input is a no-op;
/// unknown input is an error message for the user.
fn parse_command(
    line: &str,
    state: &ListingViewState,
) -> std::result::Result<Option<BrowseCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };

    match word {
        "q" | "quit" => Ok(Some(BrowseCommand::Quit)),
        "n" | "next" => Ok(Some(BrowseCommand::Page(state.ui_page() + 1))),
        "p" | "prev" => {
            if state.ui_page() <= 1 {
                Err("Already on the first page.".to_string())
            } else {
                Ok(Some(BrowseCommand::Page(state.ui_page() - 1)))
            }
        }
        "g" | "go" => {
            let page = words
                .next()
                .ok_or_else(|| "Usage: g <page>".to_string())?
                .parse::<u32>()
                .map_err(|_| "Usage: g <page>".to_string())?;
            if page < 1 {
                return Err("Pages are numbered from 1.".to_string());
            }
            Ok(Some(BrowseCommand::Page(page)))
        }
        "clear" => Ok(Some(BrowseCommand::Clear)),
        "retry" => Ok(Some(BrowseCommand::Retry)),
        other => Err(format!(
            "Unknown command: {other}. Commands: n, p, g <page>, clear, retry, q"
        )),
    }
}

/// Execute one fetch ticket and feed the outcome back into the view state.
/// The sequence guard in the state discards anything stale.
async fn resolve(
    client: &reqwest::Client,
    base_url: &str,
    state: &mut ListingViewState,
    ticket: FetchTicket,
    verbose: bool,
) {
    if verbose {
        println!(
            "Fetching {} with {:?}",
            ticket.request.path, ticket.request.params
        );
    }

    match execute_request(client, base_url, &ticket.request).await {
        Ok(page) => {
            state.resolve_ok(ticket.seq, page);
        }
        Err(err) => {
            state.resolve_err(ticket.seq, err.to_string());
        }
    }
}

/// Render the current view state: table, pagination strip and any failure
/// note. A failed fetch keeps the last loaded page on screen.
fn render(state: &ListingViewState) {
    if state.phase() == Phase::Failed {
        if let Some(message) = state.last_error() {
            println!("\n{} {}", "Fetch failed:".red().bold(), message.red());
            println!("{}", "Showing the last loaded results. Type retry to reattempt the same query.".yellow());
        }
    }

    let Some(listing) = state.listing() else {
        println!("{}", "Nothing loaded yet.".yellow());
        return;
    };

    print!("{}", format_listing_table(listing));

    let filter_note = if state.criteria().is_some() {
        " (filtered)"
    } else {
        ""
    };
    println!(
        "{} {}{}",
        "Pages:".bright_white().bold(),
        format_page_strip(&state.window(), state.ui_page(), listing.total_pages),
        filter_note
    );
}
