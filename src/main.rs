use std::fs::File;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing::{error, instrument};
use tracing_error::{ErrorLayer, SpanTrace};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use custview::controller::Controller;
use custview::domain::{CVError, DEFAULT_PAGE_SIZE, ViewConfig};
use custview::fetch::fetch_customers;
use custview::model::{Model, Status};
use custview::ui::TableUI;

#[derive(Parser, Debug)]
#[command(version, about = "Browse customers in the terminal")]
struct Args {
    /// Customer list endpoint of the data service
    #[arg(long, env = "CUSTVIEW_URL", default_value = "http://localhost:3001/api/customers")]
    url: String,

    /// Rows per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    #[arg(long, default_value = "~/.custview.log")]
    log_file: String,

    /// Event poll interval in milliseconds
    #[arg(long, default_value_t = 100)]
    poll_ms: u64,
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logging(&args.log_file) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let result = run(&args);
    ratatui::restore();
    match result {
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

// The terminal is taken by the UI, so logs go to a file.
fn init_logging(path: &str) -> Result<(), CVError> {
    let file = File::create(shellexpand::tilde(path).into_owned())?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("custview=debug")))
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(ErrorLayer::default())
        .init();
    Ok(())
}

// A failed fetch leaves the table empty. The error only goes to the log.
#[instrument(skip(model))]
fn load(model: &mut Model, url: &str) {
    match fetch_customers(url) {
        Ok(customers) => model.load_customers(customers, url),
        Err(e) => {
            error!("Fetching customers failed: {}\n{}", e, SpanTrace::capture());
            model.load_rows(Vec::new());
        }
    }
}

fn run(args: &Args) -> Result<(), CVError> {
    let cfg = ViewConfig::default()
        .with_event_poll_time(args.poll_ms)
        .with_page_size(args.page_size);

    let mut model = Model::init(&cfg);
    let mut ui = TableUI::new(&cfg);
    let controller = Controller::new(&cfg);

    let mut terminal = ratatui::init();
    terminal.draw(|f| ui.draw(&model, f))?;
    load(&mut model, &args.url);

    while model.status != Status::QUITTING {
        // Render the current view
        terminal.draw(|f| ui.draw(&model, f))?;

        // Handle events and map to a Message
        let message = controller.handle_event(&model)?;
        model.update(message)?;
    }

    Ok(())
}
