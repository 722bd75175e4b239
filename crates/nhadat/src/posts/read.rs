use crate::prelude::{println, *};
use colored::Colorize;

use nhadat_core::listing::{format_created_at, ApiEnvelope, Post};

use super::{create_client, server_error, ApiConfig};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ReadOptions {
    /// Post id
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ReadOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Fetching post {}...", options.id);
    }

    let post = read_post_data(&options.id).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else {
        print!("{}", format_post_text(&post));
    }

    Ok(())
}

/// Public data function - used by the CLI handler
pub async fn read_post_data(id: &str) -> Result<Post> {
    let config = ApiConfig::from_env()?;
    let client = create_client(&config)?;

    let base_url = config.base_url.trim_end_matches('/');
    let url = format!("{base_url}/posts/{id}");

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(Error::from_transport)?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    if !status.is_success() {
        return Err(server_error(status.as_u16(), &body).into());
    }

    let envelope: ApiEnvelope<Post> =
        serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))?;

    Ok(envelope.data)
}

/// Convert a post to formatted detail text
fn format_post_text(post: &Post) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!("{}\n", post.title.bright_white().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    result.push_str(&format!(
        "{}: {} | {}: {} | {}: {}\n",
        "Type".green(),
        format!("{}/{}", post.post_type, post.real_estate_type),
        "Rank".green(),
        post.post_rank,
        "Status".green(),
        post.status
    ));
    result.push_str(&format!(
        "{}: {} | {}: {} m² | {}: {}\n",
        "Price".green(),
        post.price,
        "Area".green(),
        post.square,
        "Posted".green(),
        format_created_at(&post.created_at)
    ));

    if let Some(bedrooms) = post.bedrooms {
        result.push_str(&format!("{}: {}\n", "Bedrooms".green(), bedrooms));
    }
    if let Some(bathrooms) = post.bathrooms {
        result.push_str(&format!("{}: {}\n", "Bathrooms".green(), bathrooms));
    }
    if let Some(floors) = post.floors {
        result.push_str(&format!("{}: {}\n", "Floors".green(), floors));
    }
    if let Some(legal) = &post.legal {
        result.push_str(&format!("{}: {}\n", "Legal".green(), legal));
    }

    let amenities: Vec<&str> = [
        ("dining room", post.dining_room),
        ("kitchen", post.kitchen),
        ("rooftop", post.rooftop),
        ("car park", post.car_park),
    ]
    .iter()
    .filter(|(_, present)| *present)
    .map(|(name, _)| *name)
    .collect();
    if !amenities.is_empty() {
        result.push_str(&format!("{}: {}\n", "Amenities".green(), amenities.join(", ")));
    }

    if let Some(content) = &post.content {
        result.push_str(&format!("\n{content}\n"));
    }

    result
}
