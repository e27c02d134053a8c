use salechart::{DisplayUnits, SaleChart};
use salechart_demos::common::{get_auction, get_connector, summarize};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let chart = SaleChart::builder()
        .with_connector(get_connector())
        .auction(get_auction()?)
        .num_ticks(20)
        .display(DisplayUnits {
            decimals: 18,
            round_target: true,
        })
        .build()?;

    chart.refresh().await?;
    let view = chart.current();
    println!("{}", summarize(&view.data));

    // Plotters usually want JSON; print the first few samples.
    let head: Vec<_> = view.data.iter().take(5).collect();
    println!("{}", serde_json::to_string_pretty(&head)?);

    Ok(())
}
