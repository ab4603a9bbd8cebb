//! `skymarket` - CLI for the marketplace core
//!
//! This binary exposes the link annotator, chrome rules and taxonomy tables
//! for inspection, and drives the remote listing, video and price-extension
//! services.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use clap::Parser;

use skymarket::cli::{
    ChromeCommand, Cli, Command, ConfigCommand, LinkifyCommand, LinkifyFormat, ListingCommand,
    SeedCommand, TaxonomyCommand, TaxonomyTable, VideoCommand,
};
use skymarket::service::{
    extract_video_id, HttpListingService, HttpPriceExtensionRegistry, VideoMetadataService,
    YouTubeOEmbed,
};
use skymarket::taxonomy::TaxonomyEntry;
use skymarket::{
    init_logging, load_listing_page, seed_price_extension_labels, Config, ListingRoute,
    PageOutcome, Segment, Taxonomy,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Config commands manage their own loading so a broken file can be inspected
    if let Command::Config(config_cmd) = cli.command {
        return handle_config(cli.config, config_cmd);
    }

    let config = Config::load_from(cli.config).context("failed to load configuration")?;

    match cli.command {
        Command::Linkify(cmd) => handle_linkify(&config, &cmd),
        Command::Chrome(cmd) => handle_chrome(&config, &cmd),
        Command::Taxonomy(cmd) => handle_taxonomy(&config, &cmd),
        Command::Listing(cmd) => handle_listing(&config, &cmd).await,
        Command::Video(cmd) => handle_video(&config, &cmd).await,
        Command::Seed(cmd) => handle_seed(&config, &cmd).await,
        Command::Config(_) => unreachable!("config commands are handled before loading"),
    }
}

fn handle_linkify(config: &Config, cmd: &LinkifyCommand) -> anyhow::Result<()> {
    let annotator = config.link_annotator()?;

    match cmd.format {
        LinkifyFormat::Plain => {
            for segment in annotator.annotate(&cmd.text) {
                match segment {
                    Segment::Plain(text) => println!("plain  {text:?}"),
                    Segment::Link(url) => println!("link   {url}"),
                }
            }
        }
        LinkifyFormat::Json => {
            let segments = annotator.annotate_owned(&cmd.text);
            println!("{}", serde_json::to_string_pretty(&segments)?);
        }
        LinkifyFormat::Html => println!("{}", annotator.to_html(&cmd.text)),
    }
    Ok(())
}

fn handle_chrome(config: &Config, cmd: &ChromeCommand) -> anyhow::Result<()> {
    let visibility = config.chrome_rules()?.visibility(&cmd.path);

    if cmd.json {
        let output = serde_json::json!({
            "path": cmd.path,
            "header": visibility.header,
            "footer": visibility.footer,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let shown = |visible: bool| if visible { "shown" } else { "hidden" };
        println!("Path:    {}", cmd.path);
        println!("Header:  {}", shown(visibility.header));
        println!("Footer:  {}", shown(visibility.footer));
    }
    Ok(())
}

fn handle_taxonomy(config: &Config, cmd: &TaxonomyCommand) -> anyhow::Result<()> {
    let taxonomy = Taxonomy::from_config(config)?;

    match &cmd.table {
        TaxonomyTable::Categories => print_entries(&taxonomy.categories, cmd.json)?,
        TaxonomyTable::Types => print_entries(&taxonomy.aircraft_types, cmd.json)?,
        TaxonomyTable::Manufacturers => print_entries(&taxonomy.manufacturers, cmd.json)?,
        TaxonomyTable::Models {
            manufacturer: Some(manufacturer),
        } => {
            if !taxonomy.is_known_manufacturer(manufacturer) {
                bail!("unknown manufacturer '{manufacturer}'");
            }
            let models = taxonomy.models_for(manufacturer);
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(models)?);
            } else {
                for model in models {
                    println!("{model}");
                }
            }
        }
        TaxonomyTable::Models { manufacturer: None } => {
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&taxonomy.models)?);
            } else {
                for (manufacturer, models) in &taxonomy.models {
                    println!("{manufacturer}: {}", models.join(", "));
                }
            }
        }
    }
    Ok(())
}

fn print_entries(entries: &[TaxonomyEntry], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }
    for entry in entries {
        match entry.target_route() {
            Some(route) => println!("{:<20} {route}", entry.name()),
            None => println!("{}", entry.name()),
        }
    }
    Ok(())
}

async fn handle_listing(config: &Config, cmd: &ListingCommand) -> anyhow::Result<()> {
    let route = ListingRoute::parse(&cmd.path)?;
    let annotator = config.link_annotator()?;
    let service =
        HttpListingService::new(&config.services.listing_base_url, config.request_timeout())?;

    let page = match load_listing_page(&service, &route).await {
        PageOutcome::Found(page) => page,
        PageOutcome::NotFound if cmd.json => {
            println!("{}", serde_json::to_string_pretty(&PageOutcome::NotFound)?);
            return Ok(());
        }
        PageOutcome::NotFound => bail!("listing '{}' not found", route.listing_id),
    };

    let video = if cmd.no_video {
        None
    } else {
        let videos = YouTubeOEmbed::new(&config.services.oembed_url, config.request_timeout())?;
        page.video_metadata(&annotator, &videos).await
    };

    if cmd.json {
        let output = serde_json::json!({
            "outcome": "found",
            "listing": page.listing,
            "conversation_id": page.conversation_id,
            "description": page.description_segments(&annotator),
            "video_id": page.video_id(&annotator),
            "video": video,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let listing = &page.listing;
    println!("Listing:       {}", listing.id);
    println!("Title:         {}", listing.title);
    println!("Category:      {}", listing.category);
    if let Some(created_at) = listing.created_at {
        println!("Created:       {}", created_at.format("%Y-%m-%d %H:%M UTC"));
    }
    if let Some(image_url) = &listing.image_url {
        println!("Image:         {image_url}");
    }
    if let Some(conversation_id) = &page.conversation_id {
        println!("Conversation:  {conversation_id}");
    }
    if let Some(video) = &video {
        println!("Video:         {} ({})", video.title, video.author);
    }
    if !listing.description.is_empty() {
        println!();
        println!("{}", listing.description);
        let links: Vec<&str> = annotator.links(&listing.description).collect();
        if !links.is_empty() {
            println!();
            println!("Links:");
            for link in links {
                println!("  {link}");
            }
        }
    }
    Ok(())
}

async fn handle_video(config: &Config, cmd: &VideoCommand) -> anyhow::Result<()> {
    let video_id = extract_video_id(&cmd.input)
        .ok_or_else(|| anyhow!("'{}' is not a YouTube video id or URL", cmd.input))?;
    let client = YouTubeOEmbed::new(&config.services.oembed_url, config.request_timeout())?;
    let metadata = client.fetch_video_metadata(&video_id).await?;

    if cmd.json {
        let output = serde_json::json!({
            "video_id": video_id,
            "metadata": metadata,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match metadata {
        Some(meta) => {
            println!("Video:      {video_id}");
            println!("Title:      {}", meta.title);
            println!("Author:     {}", meta.author);
            println!("Thumbnail:  {}", meta.thumbnail_url);
        }
        None => println!("No metadata available for video {video_id}"),
    }
    Ok(())
}

async fn handle_seed(config: &Config, cmd: &SeedCommand) -> anyhow::Result<()> {
    let registry = HttpPriceExtensionRegistry::new(
        &config.services.price_extension_base_url,
        config.request_timeout(),
    )?;
    let created_by = cmd.created_by.as_deref().unwrap_or(&config.seed.created_by);

    let report = seed_price_extension_labels(&registry, &config.seed.labels, created_by).await;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for label in report.succeeded() {
            println!("registered  {label}");
        }
        for (label, reason) in report.failed() {
            println!("failed      {label}: {reason}");
        }
    }

    let failed = report.failed().count();
    if failed > 0 {
        bail!("{failed} of {} labels failed to register", report.attempted());
    }
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Configuration:");
                println!("  Listing service:     {}", config.services.listing_base_url);
                println!(
                    "  Price extensions:    {}",
                    config.services.price_extension_base_url
                );
                println!("  oEmbed endpoint:     {}", config.services.oembed_url);
                println!(
                    "  Request timeout:     {}s",
                    config.services.request_timeout_secs
                );
                println!("  Hide header under:   {:?}", config.chrome.hide_header);
                println!("  Hide footer under:   {:?}", config.chrome.hide_footer);
                println!("  Prefix boundary:     {:?}", config.chrome.boundary);
                println!(
                    "  Link pattern:        {}",
                    config.link_annotator()?.pattern()
                );
                println!("  Seed labels:         {}", config.seed.labels.join(", "));
                println!("  Seed created by:     {}", config.seed.created_by);
                let taxonomy = Taxonomy::from_config(&config)?;
                println!(
                    "  Taxonomy:            {} categories, {} types, {} manufacturers{}",
                    taxonomy.categories.len(),
                    taxonomy.aircraft_types.len(),
                    taxonomy.manufacturers.len(),
                    if config.taxonomy.is_some() { "" } else { " (built-in)" }
                );
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.or(config_path);
            let shown = path
                .clone()
                .unwrap_or_else(Config::default_config_path);
            match Config::load_from(path) {
                Ok(_) => println!("Configuration is valid: {}", shown.display()),
                Err(e) => bail!("configuration is invalid ({}): {e}", shown.display()),
            }
        }
    }
    Ok(())
}
