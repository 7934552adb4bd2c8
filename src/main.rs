// Terminal front end for the recipe search client.
//
// Every stdin line replaces the query (as if typed into the search box);
// `:`-prefixed lines drive the presenter. The rendered list goes to stdout,
// logs go to stderr. Requires RECIPE_API_KEY; RECIPE_API_BASE_URL is optional.

use anyhow::{Context, Result};
use kodegen_tools_recipe_search::{
    ClientConfig, Command, QueryController, RecipeClient, ResultPresenter,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env()?;
    let client = RecipeClient::new(&config).context("Failed to build HTTP client")?;
    let controller = QueryController::new(client, config);
    let mut presenter = ResultPresenter::new(controller.handle());
    let mut updates = controller.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", Command::usage());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };

                match Command::parse(&line) {
                    Command::Query(text) => controller.set_query(text),
                    Command::Clear => presenter.clear(),
                    Command::ToggleTheme => {
                        presenter.toggle_theme();
                        print!("{}", presenter.render());
                    }
                    Command::HighlightNext => {
                        presenter.highlight_next();
                    }
                    Command::HighlightPrevious => {
                        presenter.highlight_previous();
                    }
                    Command::Open(row) => {
                        let opened = match row {
                            Some(row) => presenter.activate(row - 1),
                            None => presenter.activate_highlighted(),
                        };
                        match opened {
                            Ok(Some(link)) => println!("opened {link}"),
                            Ok(None) => println!("nothing to open"),
                            Err(e) => tracing::warn!(error = %e, "failed to open link"),
                        }
                    }
                    Command::Help => println!("{}", Command::usage()),
                    Command::Quit => break,
                    Command::Unknown(input) => println!("unknown command: {input}"),
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                print!("{}", presenter.render());
            }
        }
    }

    controller.shutdown();
    Ok(())
}
