use salechart::SaleChart;
use salechart_demos::common::{get_auction, get_connector};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,salechart=trace,salechart_core=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let chart = SaleChart::builder()
        .with_connector(get_connector())
        .auction(get_auction()?)
        .build()?;

    // First refresh builds, the second sees the same total and stops early.
    let first = chart.refresh().await?;
    let second = chart.refresh().await?;
    tracing::info!(?first, ?second, "refresh outcomes");
    println!("{first:?} then {second:?}");

    Ok(())
}
