use std::io::Read;

use cyberbot::{
    collector::Collector,
    config::Config,
    corpus::DelimiterVocabulary,
    prompt::{extract_answer, format_prompt},
};
use log::{error, info};

const USAGE: &str = concat!(
    "usage: cyberbot [all|scrape|prepare]\n",
    "       cyberbot prompt <question>     print the prompt for a question\n",
    "       cyberbot answer <prompt>       read generated text on stdin, print its answer"
);

async fn scrape(config: &Config) -> anyhow::Result<()> {
    let mut collector = Collector::new(&config.collector)?;
    collector.run().await
}

async fn prepare(config: &Config, vocab: &DelimiterVocabulary) -> anyhow::Result<()> {
    info!(target: "main", "Preparing training data...");
    cyberbot::prepare(config, vocab).await?;
    info!(
        target: "main",
        "Dataset ready in {:?}; point the trainer's data directory there.",
        config.packager.output_dir
    );
    Ok(())
}

async fn run(cmd: &str, rest: &[String]) -> anyhow::Result<()> {
    let config = Config::load()?;
    let vocab = DelimiterVocabulary::default();
    match cmd {
        "all" => {
            info!(target: "main", "Starting cybersecurity chatbot data preparation pipeline...");
            scrape(&config).await?;
            prepare(&config, &vocab).await?;
            info!(target: "main", "Pipeline completed!");
        }
        "scrape" => scrape(&config).await?,
        "prepare" => prepare(&config, &vocab).await?,
        "prompt" => println!("{}", format_prompt(&rest.join(" "), &vocab)),
        "answer" => {
            let prompt = format_prompt(&rest.join(" "), &vocab);
            let mut generated = String::new();
            std::io::stdin().read_to_string(&mut generated)?;
            println!("{}", extract_answer(&generated, &prompt, &vocab));
        }
        _ => anyhow::bail!("unknown command '{cmd}'\n{USAGE}"),
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    cyberbot::init_logger();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (cmd, rest) = match args.split_first() {
        Some((cmd, rest)) => (cmd.as_str(), rest),
        None => ("all", &[][..]),
    };
    if let Err(err) = run(cmd, rest).await {
        error!(target: "main", "{err:#}");
        std::process::exit(1);
    }
}
