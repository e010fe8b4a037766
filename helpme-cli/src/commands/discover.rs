use anyhow::Context;
use clap::{Args, ValueEnum};
use helpme_core::catalog::CatalogSource;
use helpme_core::discovery::{
    AppMode, Discovery, DiscoveryResults, DiscoverySession, SearchContext, rank,
};
use helpme_core::entities::ServiceCategory;
use helpme_core::geo::Coordinate;
use helpme_sdk::config::DiscoveryConfig;

#[derive(Args, Debug)]
pub struct DiscoverArgs {
    /// Only show listings in this category (queue or pet)
    #[arg(short = 'k', long)]
    pub category: Option<ServiceCategory>,

    /// List open tasks for providers instead of providers for clients
    #[arg(long)]
    pub executor: bool,

    #[arg(long, value_enum, default_value_t = SortOrder::Distance)]
    pub sort: SortOrder,

    /// Print the map view as JSON instead of a list
    #[arg(long)]
    pub map: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Distance,
    /// Highest rated first; tasks fall back to distance
    Rating,
    /// Keep catalog order
    Catalog,
}

pub fn run<C: CatalogSource>(
    discovery: &Discovery<C>,
    config: &DiscoveryConfig,
    args: &DiscoverArgs,
) -> anyhow::Result<()> {
    let session = open_session(config)?;
    session.set_category(args.category);
    session.set_mode(if args.executor {
        AppMode::Executor
    } else {
        AppMode::Client
    });
    let ctx = session.context();

    if args.map {
        let view = discovery.map_view(&ctx)?;
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!(
        "Within {:.1} km of {}{}:",
        ctx.radius_km(),
        ctx.reference(),
        ctx.category()
            .map(|c| format!(" ({c})"))
            .unwrap_or_default()
    );

    match discovery.search(&ctx)? {
        DiscoveryResults::Providers(found) => {
            let found = match args.sort {
                SortOrder::Distance => rank::by_distance(found),
                SortOrder::Rating => rank::by_rating(found),
                SortOrder::Catalog => found,
            };
            if found.is_empty() {
                println!("  No providers nearby. Try a larger radius.");
            }
            for hit in found {
                let p = hit.entity;
                let rate = p
                    .hourly_rate
                    .map(|r| format!("R$ {r}/h"))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "  [{}] {:<16} {:>5.2} km  ★ {:.1} ({} reviews)  {}  lvl {} ({:.0}%)",
                    p.id,
                    p.name,
                    hit.distance_km,
                    p.rating,
                    p.reviews,
                    rate,
                    p.level,
                    p.level_progress().percent()
                );
            }
        }
        DiscoveryResults::Tasks(found) => {
            let found = match args.sort {
                SortOrder::Catalog => found,
                SortOrder::Distance | SortOrder::Rating => rank::by_distance(found),
            };
            if found.is_empty() {
                println!("  No open tasks nearby.");
            }
            for hit in found {
                let t = hit.entity;
                println!(
                    "  [{}] {:<20} {:>5.2} km  R$ {}  {}",
                    t.id,
                    t.service_type.label(),
                    hit.distance_km,
                    t.price,
                    t.description
                );
            }
        }
    }
    Ok(())
}

fn open_session(config: &DiscoveryConfig) -> anyhow::Result<DiscoverySession> {
    let reference = Coordinate::new(config.center_latitude, config.center_longitude)
        .context("invalid reference location")?;
    let initial = SearchContext::new(reference, config.default_radius_km)?;
    let session = DiscoverySession::new(initial, config.min_radius_km, config.max_radius_km)?;
    Ok(session)
}
