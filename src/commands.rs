//! Subcommand handlers.

use std::path::Path;

use color_eyre::eyre::{bail, Result};

use crate::app::App;
use crate::carousel::{build_nodes, mount_testimonials, MarkupNavigator, MountOutcome, Notice};
use crate::cli::Command;
use crate::components::{CarouselNavigator, CarouselView, TickerView};
use crate::config::{AppConfig, ConfigManager};
use crate::page::Document;
use crate::review::{FeedSource, ReviewLoader, ReviewRecord};
use crate::scroll::AutoScroller;

pub async fn run(command: Command, config_manager: &ConfigManager) -> Result<()> {
    let config = config_manager.app_config();
    match command {
        Command::Render { out, title, fragment } => render_page(config, &title, out.as_deref(), fragment).await,
        Command::Check => check_feed(config).await,
        Command::Preview => preview(config).await,
        Command::Ticker => ticker(config).await,
        Command::InitConfig => {
            if config_manager.write_default_config()? {
                println!("Wrote {}", config_manager.config_path().display());
            } else {
                println!("{} already exists", config_manager.config_path().display());
            }
            Ok(())
        }
    }
}

fn loader(config: &AppConfig) -> Result<ReviewLoader> {
    let source = FeedSource::parse(&config.feed.base)?;
    Ok(ReviewLoader::from_source(&source))
}

async fn render_page(config: &AppConfig, title: &str, out: Option<&Path>, fragment: bool) -> Result<()> {
    let ids = config.carousel.ids();
    let mut doc = Document::carousel_page(title, &ids);
    let mut navigator = MarkupNavigator::new(config.carousel.interval());

    let outcome = mount_testimonials(
        &loader(config)?,
        &config.feed.path,
        &mut doc,
        &ids,
        &mut navigator,
        config.startup.grace_period(),
    )
    .await;

    let html = if fragment { doc.body_html() } else { doc.to_html() };
    match out {
        Some(path) => {
            std::fs::write(path, &html)?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{}", html),
    }

    match outcome {
        MountOutcome::Rendered { slides } => {
            tracing::info!("Page contains {} testimonials", slides);
            Ok(())
        }
        MountOutcome::Failed(e) => bail!("page written with a failure notice: {}", e),
    }
}

async fn check_feed(config: &AppConfig) -> Result<()> {
    let loader = loader(config)?;
    let records = loader.load(&config.feed.path).await?;
    println!("{}", summarize(&records, &loader.describe(&config.feed.path)));
    Ok(())
}

/// One-paragraph summary of a loaded feed.
fn summarize(records: &[ReviewRecord], location: &str) -> String {
    let rated: Vec<f64> = records.iter().filter_map(|r| r.stars).collect();
    let replies = records.iter().filter(|r| r.reply().is_some()).count();
    let average = if rated.is_empty() {
        "n/a".to_string()
    } else {
        format!("{:.2}", rated.iter().sum::<f64>() / rated.len() as f64)
    };
    format!(
        "{}\n  reviews: {}\n  rated: {}\n  average rating: {}\n  with reply: {}",
        location,
        records.len(),
        rated.len(),
        average,
        replies
    )
}

async fn preview(config: &AppConfig) -> Result<()> {
    let ids = config.carousel.ids();
    let mut doc = Document::carousel_page("Customer Reviews", &ids);
    let mut navigator = CarouselNavigator::new(ids.clone());

    mount_testimonials(
        &loader(config)?,
        &config.feed.path,
        &mut doc,
        &ids,
        &mut navigator,
        config.startup.grace_period(),
    )
    .await;

    let view = CarouselView::from_mount(&doc, &ids, navigator, config.carousel.interval());
    let mut app = App::new(Box::new(view))?;
    app.run().await?;
    Ok(())
}

async fn ticker(config: &AppConfig) -> Result<()> {
    tokio::time::sleep(config.startup.grace_period()).await;

    let records = match loader(config)?.load(&config.feed.path).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Error loading testimonials: {}", e);
            let view = CarouselView::failed(Notice::load_failure(Some(config.feed.path.clone())));
            let mut app = App::new(Box::new(view))?;
            app.run().await?;
            return Ok(());
        }
    };

    let (_, slides) = build_nodes(&records, &config.carousel.root_id);
    let view = TickerView::start(slides, &AutoScroller::from_config(&config.scroll));
    let mut app = App::new(Box::new(view))?;
    app.run().await?;
    Ok(())
}
