use anyhow::Result;
use clap::Parser;

use texlate::cli::commands::{ask, chat, configure, providers, translate};
use texlate::cli::{Args, Command};
use texlate::output::{self, Output};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    output::init(Output::from_env(args.quiet));

    match args.command {
        Some(Command::Providers { provider }) => {
            providers::print_providers(provider.as_deref())?;
        }
        Some(Command::Configure) => {
            configure::run_configure()?;
        }
        Some(Command::Ask { prompt, completion }) => {
            let options = ask::AskOptions {
                prompt,
                completion,
                provider: args.provider,
                model: args.model,
            };
            ask::run_ask(options).await?;
        }
        Some(Command::Chat {
            session,
            role,
            limit,
        }) => {
            let options = chat::ChatOptions {
                session,
                role,
                limit,
                provider: args.provider,
                model: args.model,
            };
            chat::run_chat(options).await?;
        }
        None => {
            let options = translate::TranslateOptions {
                file: args.file,
                provider: args.provider,
                model: args.model,
                batch_size: args.batch_size,
                max_concurrency: args.max_concurrency,
            };
            translate::run_translate(options).await?;
        }
    }

    Ok(())
}
