use crate::prelude::{println, *};
use colored::Colorize;

use nhadat_core::filter::FilterCriteria;
use nhadat_core::listing::{
    format_created_at, plan_request, ApiEnvelope, ListingPage, ListingRequest, PostListData,
};
use nhadat_core::price::{normalize, PriceRange, PriceSelection, SliderRange, SLIDER_MAX_UNIT};
use nhadat_core::window::{self, PageWindow};

use super::{create_client, server_error, ApiConfig};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # First page of all listings:
  nhadat posts list

  # Third page of houses for sale in Hanoi:
  nhadat posts list --page 3 --post-type sale --property-type house --city hanoi

  # Apartments in the 5-10 billion preset bucket:
  nhadat posts list --property-type apartment --price 5-10

  # Freeform price range, in billions (omit --price-max for no cap):
  nhadat posts list --price-min 1.5 --price-max 8

NOTES:
  - Page numbers are 1-based; the backend conversion is handled internally
  - A price preset always uses its exact boundary values
  - --price and --price-min/--price-max are mutually exclusive
  - Results are fetched 20 per page")]
pub struct ListOptions {
    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: u32,

    #[clap(flatten)]
    pub filters: FilterArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Filter flags shared by the list and browse commands.
#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone, Default)]
pub struct FilterArgs {
    /// Post type filter: sale, rent
    #[arg(long)]
    pub post_type: Option<String>,

    /// Property type filter: house, apartment, land
    #[arg(long)]
    pub property_type: Option<String>,

    /// City filter: hanoi, hcm, danang, cantho
    #[arg(long)]
    pub city: Option<String>,

    /// Price preset: under-1, 1-3, 3-5, 5-10, 10-20, over-20
    #[arg(long, conflicts_with_all = ["price_min", "price_max"])]
    pub price: Option<String>,

    /// Minimum price in billions
    #[arg(long)]
    pub price_min: Option<f64>,

    /// Maximum price in billions (200 means no cap)
    #[arg(long)]
    pub price_max: Option<f64>,
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    let criteria = build_criteria(&options.filters)?;

    if global.verbose {
        let request = plan_request(options.page, criteria.as_ref());
        println!("Fetching {} with {:?}", request.path, request.params);
    }

    let listing = list_posts_data(options.page, criteria).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        print!("{}", format_listing_text(&listing, options.page));
    }

    Ok(())
}

/// Turn the CLI flags into filter criteria. Returns `None` when no filter
/// flag was given, routing the fetch to the plain listing endpoint.
pub fn build_criteria(options: &FilterArgs) -> Result<Option<FilterCriteria>> {
    let post_type = options
        .post_type
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(|e: String| eyre!(e))?;
    let property_type = options
        .property_type
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(|e: String| eyre!(e))?;
    let city = options
        .city
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(|e: String| eyre!(e))?;

    let price = price_selection(options)?
        .map(normalize)
        .unwrap_or(PriceRange::default());

    let criteria = FilterCriteria::new(post_type, property_type, city, price);
    Ok(criteria.is_active().then_some(criteria))
}

/// A preset beats the slider flags; mixing both is rejected rather than
/// silently merged.
fn price_selection(options: &FilterArgs) -> Result<Option<PriceSelection>> {
    if let Some(slug) = &options.price {
        if options.price_min.is_some() || options.price_max.is_some() {
            return Err(eyre!(
                "--price cannot be combined with --price-min/--price-max"
            ));
        }
        let preset = slug.parse().map_err(|e: String| eyre!(e))?;
        return Ok(Some(PriceSelection::Preset(preset)));
    }

    if options.price_min.is_none() && options.price_max.is_none() {
        return Ok(None);
    }

    Ok(Some(PriceSelection::Freeform(SliderRange::new(
        options.price_min.unwrap_or(0.0),
        options.price_max.unwrap_or(SLIDER_MAX_UNIT),
    ))))
}

/// Public data function - used by the CLI handler
///
/// Plans the request in the core, executes it, and normalizes the response
/// into a [`ListingPage`].
pub async fn list_posts_data(
    ui_page: u32,
    criteria: Option<FilterCriteria>,
) -> Result<ListingPage> {
    let config = ApiConfig::from_env()?;
    let client = create_client(&config)?;
    let listing = fetch_listing(&client, &config.base_url, ui_page, criteria.as_ref()).await?;
    Ok(listing)
}

/// The listing query engine: one fetch, no automatic retry. Failures come
/// back as a single typed [`Error`] and never as a partial listing.
pub async fn fetch_listing(
    client: &reqwest::Client,
    base_url: &str,
    ui_page: u32,
    criteria: Option<&FilterCriteria>,
) -> std::result::Result<ListingPage, Error> {
    execute_request(client, base_url, &plan_request(ui_page, criteria)).await
}

/// Issue a planned listing request and decode the paged envelope.
pub async fn execute_request(
    client: &reqwest::Client,
    base_url: &str,
    request: &ListingRequest,
) -> std::result::Result<ListingPage, Error> {
    // Handle base_url that may or may not have trailing slash
    let base_url = base_url.trim_end_matches('/');
    let url = format!("{base_url}{}", request.path);

    let response = client
        .get(&url)
        .query(&request.params)
        .send()
        .await
        .map_err(Error::from_transport)?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    if !status.is_success() {
        return Err(server_error(status.as_u16(), &body));
    }

    let envelope: ApiEnvelope<PostListData> =
        serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))?;

    Ok(ListingPage::from_data(envelope.data))
}

/// Convert listing output to formatted text with colors
fn format_listing_text(listing: &ListingPage, current_page: u32) -> String {
    let mut result = String::new();
    let total_pages = listing.total_pages;

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!("LISTINGS (Page {current_page} of {total_pages})")
            .bright_cyan()
            .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    result.push_str(&format_listing_table(listing));

    // Pagination strip
    let window = window::build_default(current_page, total_pages);
    result.push_str(&format!(
        "\n{} {}\n",
        "Pages:".bright_white().bold(),
        format_page_strip(&window, current_page, total_pages)
    ));

    if current_page < total_pages {
        result.push_str(&format!(
            "{}: {}\n",
            "Next page".green(),
            format!("nhadat posts list --page {}", current_page + 1).cyan()
        ));
    }
    if current_page > 1 {
        result.push_str(&format!(
            "{}: {}\n",
            "Previous page".green(),
            format!("nhadat posts list --page {}", current_page - 1).cyan()
        ));
    }

    result
}

/// Render the result rows as a table, or a placeholder for an empty page.
pub(crate) fn format_listing_table(listing: &ListingPage) -> String {
    if listing.items.is_empty() {
        return format!("\n{}\n", "No posts on this page.".yellow());
    }

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row![
        "Id", "Title", "Price", "Sqm", "Type", "Rank", "Posted"
    ]);
    for item in &listing.items {
        table.add_row(prettytable::row![
            item.id,
            item.title,
            format_price(item.price),
            item.square,
            format!("{}/{}", item.post_type, item.real_estate_type),
            item.post_rank,
            format_created_at(&item.created_at),
        ]);
    }
    format!("\n{table}")
}

/// Render the pagination window as a one-line strip, e.g. `1 … 4 [5] 6 … 12`.
pub(crate) fn format_page_strip(window: &PageWindow, current_page: u32, total_pages: u32) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(&first) = window.pages.first() {
        if first > 1 {
            parts.push("1".to_string());
            if window.leading_gap {
                parts.push("…".to_string());
            }
        }
    }

    for &page in &window.pages {
        if page == current_page {
            parts.push(format!("[{page}]"));
        } else {
            parts.push(page.to_string());
        }
    }

    if let Some(&last) = window.pages.last() {
        if last < total_pages {
            if window.trailing_gap {
                parts.push("…".to_string());
            }
            parts.push(total_pages.to_string());
        }
    }

    parts.join(" ")
}

/// Format a base-unit price the way listings display it: billions ("tỷ") or
/// millions ("triệu").
fn format_price(price: i64) -> String {
    if price >= 1_000_000_000 {
        let billions = price as f64 / 1e9;
        format!("{billions:.2} tỷ")
    } else if price >= 1_000_000 {
        format!("{} triệu", price / 1_000_000)
    } else {
        price.to_string()
    }
}
