use std::process::ExitCode;

use anyhow::{Context, Result};
#[cfg(feature = "colors")]
use owo_colors::OwoColorize;

use whm_disk_monitor::cli::Args;
use whm_disk_monitor::config::{Config, NotifierConfig};
use whm_disk_monitor::logging;
use whm_disk_monitor::monitor::{Monitor, send_test_message};
use whm_disk_monitor::telegram::TelegramClient;
use whm_disk_monitor::whm::WhmClient;

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {e:#}", error_label());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<bool> {
    if args.test_telegram {
        let notifier = NotifierConfig::from_args(args).context("invalid configuration")?;
        logging::init_with(&notifier.log_file, notifier.timezone, notifier.debug)?;

        println!("Testing Telegram connection...");
        let sink = TelegramClient::new(&notifier.telegram);
        let ok = send_test_message(&sink, notifier.timezone);
        report_outcome("Telegram test", ok);
        return Ok(ok);
    }

    let config = Config::from_args(args).context("invalid configuration")?;
    logging::init(&config)?;

    let api = WhmClient::new(&config.whm);
    let sink = TelegramClient::new(&config.telegram);
    let monitor = Monitor::new(&config, api, sink);

    if args.test_connection {
        let ok = monitor.test_connection();
        report_outcome("WHM connection test", ok);
        return Ok(ok);
    }

    match monitor.run() {
        Ok(_) => Ok(true),
        Err(e) => {
            report_outcome(&format!("Monitoring run ({e})"), false);
            Ok(false)
        }
    }
}

#[cfg(feature = "colors")]
fn error_label() -> String {
    "Error:".red().bold().to_string()
}

#[cfg(not(feature = "colors"))]
fn error_label() -> String {
    "Error:".to_string()
}

fn report_outcome(what: &str, ok: bool) {
    #[cfg(feature = "colors")]
    let status = if ok {
        "OK".green().bold().to_string()
    } else {
        "FAILED".red().bold().to_string()
    };
    #[cfg(not(feature = "colors"))]
    let status = if ok { "OK" } else { "FAILED" }.to_string();

    eprintln!("{what}: {status}");
}
