use cyberbot::{collector::Collector, config::Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    cyberbot::init_logger();
    let config = Config::load()?;
    let mut collector = Collector::new(&config.collector)?;
    collector.run().await
}
