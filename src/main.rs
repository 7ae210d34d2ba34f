// SPDX-License-Identifier: MPL-2.0
//! Headless driver: renders toasts into an in-memory document and prints
//! the markup as the clock advances.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use toast_notify::config::{self, Options};
use toast_notify::dispatch::{Call, Notifier, StaticLocation};
use toast_notify::dom::{MemorySurface, Surface};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "\
Usage: toast-notify [OPTIONS] [MESSAGE...]

Options:
  --type TYPE      success, error, warning or info (default: info)
  --title TITLE    Title shown above each message
  --config PATH    Load option overrides from a TOML file
  --hash FRAGMENT  Simulate a page load with this URL fragment
  --run-ms MS      Advance the clock by MS after creating toasts (default: 10)
  -h, --help       Print this help
";

struct Flags {
    kind: Option<String>,
    title: Option<String>,
    config: Option<PathBuf>,
    hash: Option<String>,
    run_ms: u64,
    messages: Vec<String>,
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    Ok(Some(Flags {
        kind: args.opt_value_from_str("--type")?,
        title: args.opt_value_from_str("--title")?,
        config: args.opt_value_from_str("--config")?,
        hash: args.opt_value_from_str("--hash")?,
        run_ms: args.opt_value_from_str("--run-ms")?.unwrap_or(10),
        messages: args
            .finish()
            .into_iter()
            .filter_map(|s| s.into_string().ok())
            .collect(),
    }))
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toast_notify=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };

    let site = match &flags.config {
        Some(path) => match config::load_from_path(path) {
            Ok(layer) => layer,
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => config::load(),
    };

    let mut notifier = Notifier::with_options(MemorySurface::new(), Options::default().merged(&site));

    if let Some(hash) = &flags.hash {
        let mut location = StaticLocation::new(&format!("/{hash}"));
        notifier.on_page_ready(&mut location);
        println!("address after page-ready: {}", location.href());
    }

    let kind = flags.kind.as_deref().unwrap_or("info");
    for message in &flags.messages {
        let call = Call::Typed {
            kind: kind.to_string(),
            message: message.clone(),
            title: flags.title.clone(),
            options: Default::default(),
        };
        if notifier.notify(call).is_none() {
            println!("suppressed: {message}");
        }
    }

    print_body("created", &notifier);
    notifier.advance(Duration::from_millis(flags.run_ms));
    print_body(&format!("after {}ms", flags.run_ms), &notifier);

    notifier.manager_mut().run_until_idle();
    print_body("settled", &notifier);

    ExitCode::SUCCESS
}

fn print_body(label: &str, notifier: &Notifier<MemorySurface>) {
    let surface = notifier.manager().surface();
    println!("[{label}] {}", surface.outer_html(surface.body()));
}
