use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use salechart::{SaleChart, Trigger};
use salechart_demos::common::{get_auction, get_connector, summarize};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let chart = Arc::new(
        SaleChart::builder()
            .with_connector(get_connector())
            .auction(get_auction()?)
            .build()?,
    );
    let mut rx = chart.subscribe();

    // Pretend a block arrives every 50ms.
    let blocks = futures::stream::iter(19_350_001u64..19_350_004).then(|n| async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        println!("block {n}");
        Trigger::Block(n)
    });
    let handle = chart.spawn_refresher(blocks);

    tokio::time::timeout(Duration::from_secs(5), rx.changed()).await??;
    println!("published: {}", summarize(&rx.borrow_and_update().data));

    // Later blocks carry the same total, so nothing new is published.
    tokio::time::sleep(Duration::from_millis(300)).await;
    println!("republished: {}", rx.has_changed()?);

    handle.stop().await;
    Ok(())
}
