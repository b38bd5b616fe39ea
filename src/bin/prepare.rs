use cyberbot::{config::Config, corpus::DelimiterVocabulary};
use log::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    cyberbot::init_logger();
    let config = Config::load()?;
    let vocab = DelimiterVocabulary::default();
    if let Err(err) = cyberbot::prepare(&config, &vocab).await {
        error!(target: "packager", "{err:#}");
        return Err(err);
    }
    Ok(())
}
