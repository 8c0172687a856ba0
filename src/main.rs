use cds_browser::core::browse::BrowseCommand;
use cds_browser::core::listing::ListViewModel;
use cds_browser::domain::ports::{ConfigProvider, SchoolSource};
use cds_browser::render;
use cds_browser::utils::{logger, validation::Validate};
use cds_browser::{
    load_detail, ApiClient, CdsError, CliConfig, ClientConfig, Command, ListController,
    OutputFormat,
};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

const BROWSE_HELP: &str = "Type text to search, or one of:
  :letter X   names starting with X
  :all        clear filters
  :next :prev :page N
  :show ID    institution details
  :quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.client_config().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => fail(e),
    };
    tracing::info!("Using CDS API at {}", config.api_url);

    let client = match ApiClient::new(&config) {
        Ok(client) => client,
        Err(e) => fail(e),
    };

    match cli.command {
        Command::List {
            search,
            letter,
            page,
            format,
        } => run_list(&client, &config, search, letter, page, format).await?,
        Command::Show { id } => {
            let state = load_detail(&client, &id).await;
            println!("{}", render::render_detail(&state));
        }
        Command::Browse => run_browse(client, &config).await?,
    }

    Ok(())
}

fn fail(e: CdsError) -> ! {
    tracing::error!("Cannot continue: {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}

async fn run_list(
    client: &ApiClient,
    config: &ClientConfig,
    search: Option<String>,
    letter: Option<char>,
    page: usize,
    format: OutputFormat,
) -> Result<(), CdsError> {
    let mut vm = ListViewModel::new();
    if let Some(term) = search {
        vm.set_search(&term);
    }
    if let Some(letter) = letter {
        if let Err(e) = vm.set_letter(letter) {
            fail(e);
        }
    }

    let query = vm.query(config.request_limit());
    match client.list_schools(&query).await {
        Ok(schools) => vm.apply_results(schools),
        Err(e) if e.is_fetch_failure() => {
            tracing::warn!("Failed to load schools: {}", e);
            vm.clear_results();
        }
        Err(e) => {
            tracing::error!("Cannot build school list request: {}", e);
            vm.clear_results();
        }
    }

    let landed = vm.go_to_page(page);
    if landed != page {
        tracing::warn!("Page {} out of range, showing page {}", page, landed);
    }

    match format {
        OutputFormat::Table => println!("{}", render::render_list(&vm)),
        OutputFormat::Csv => render::write_page_delimited(&vm.page(), b',', std::io::stdout())?,
        OutputFormat::Tsv => render::write_page_delimited(&vm.page(), b'\t', std::io::stdout())?,
    }
    Ok(())
}

async fn run_browse(client: ApiClient, config: &ClientConfig) -> Result<(), CdsError> {
    let controller = ListController::from_config(client, config);
    controller.refresh().await;
    controller.settle().await;
    println!("{}", controller.with_state(render::render_list).await);
    println!("\n{}", BROWSE_HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match BrowseCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => {
                println!("{}", BROWSE_HELP);
                continue;
            }
            BrowseCommand::All => {
                controller.clear_filter().await;
            }
            BrowseCommand::Letter(c) => {
                if let Err(e) = controller.set_letter(c).await {
                    println!("{}", e);
                    continue;
                }
            }
            BrowseCommand::Next => {
                controller.next_page().await;
            }
            BrowseCommand::Previous => {
                controller.previous_page().await;
            }
            BrowseCommand::Page(n) => {
                controller.go_to_page(n).await;
            }
            BrowseCommand::Show(id) => {
                let state = load_detail(controller.source(), &id).await;
                println!("{}", render::render_detail(&state));
                continue;
            }
            BrowseCommand::Search(term) => {
                controller.set_search(&term).await;
            }
        }

        controller.settle().await;
        println!("{}", controller.with_state(render::render_list).await);
    }

    Ok(())
}
