use std::{io, process::ExitCode};

use clap::Parser;
use claude::{
    anthropic::{
        AnthropicAdapterBuilder, Dispatcher,
        api_v1::CompletionRequest,
        credentials::{EnvCredentials, NetrcCredentials},
    },
    cli::Cli,
    credentials::ChainedCredentials,
    error::Result,
    observability::init_logging,
    session::StreamingSession,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("claude: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let options = cli.options();
    options.validate()?;

    let prompt = cli.read_prompt(io::stdin().lock())?;
    let request = CompletionRequest::build(&prompt, &options)?;

    let credentials = ChainedCredentials::new()
        .with(EnvCredentials::anthropic())
        .with(NetrcCredentials::in_home());
    let adapter = AnthropicAdapterBuilder::new()
        .with_base_url(cli.base_url)
        .with_credentials(credentials)
        .build()?;

    let dispatcher = Dispatcher::new(io::stdout(), io::stderr());
    StreamingSession::new(adapter, dispatcher)
        .run(&request)
        .await?;
    Ok(())
}
