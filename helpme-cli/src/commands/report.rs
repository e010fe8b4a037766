use anyhow::anyhow;
use clap::Args;
use helpme_core::catalog::CatalogSource;
use helpme_core::discovery::Discovery;
use helpme_core::entities::ServiceCategory;
use helpme_core::report::{Reporter, TextSource};

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Service package id the report is about
    pub service: String,

    /// The provider's raw notes
    #[arg(long)]
    pub notes: String,

    /// Actual duration in minutes; defaults to the package duration
    #[arg(long)]
    pub duration: Option<u32>,
}

#[derive(Args, Debug)]
pub struct AdviceArgs {
    /// Which specialist to ask (queue or pet)
    #[arg(short = 'k', long)]
    pub category: ServiceCategory,

    pub query: String,
}

pub async fn report<C: CatalogSource>(
    reporter: &Reporter,
    discovery: &Discovery<C>,
    args: &ReportArgs,
) -> anyhow::Result<()> {
    let service = discovery
        .catalog()
        .service(&args.service)
        .ok_or_else(|| anyhow!("unknown service package: {}", args.service))?;
    let duration = args.duration.unwrap_or(service.duration_minutes);

    let report = reporter
        .service_report(service.service_type, &args.notes, duration)
        .await;
    if report.source != TextSource::Generated {
        tracing::info!(source = ?report.source, "Showing fallback report");
    }
    println!("{}", report.text);
    Ok(())
}

pub async fn advice(reporter: &Reporter, args: &AdviceArgs) -> anyhow::Result<()> {
    let advice = reporter.assistant_advice(&args.query, args.category).await;
    println!("{}", advice.text);
    Ok(())
}
