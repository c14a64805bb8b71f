//! Lists one page of a backend collection through the page controller.
//!
//! Usage: `snackdist-list <collection> [page] [key=value ...]`

use std::env;

use config::Config;
use dotenvy::dotenv;
use serde_json::Value;

use snackdist::collections;
use snackdist::models::config::ClientConfig;
use snackdist::pagination::{Filters, PageController};
use snackdist::source::http::HttpSource;

const KNOWN_COLLECTIONS: [&str; 6] = [
    collections::PRODUCTS,
    collections::CATEGORIES,
    collections::USERS,
    collections::ORDERS,
    collections::RECOVERIES,
    collections::SHOPKEEPER_ORDERS,
];

struct Args {
    collection: String,
    page: usize,
    filters: Filters,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Option<Args> {
    let mut args = args.into_iter().peekable();
    let collection = args.next()?;

    let page = match args.peek().and_then(|arg| arg.parse::<usize>().ok()) {
        Some(page) => {
            args.next();
            page
        }
        None => 1,
    };

    let mut filters = Filters::new();
    for arg in args {
        match arg.split_once('=') {
            Some((key, value)) => {
                filters.insert(key.to_string(), value.to_string());
            }
            None => log::warn!("ignoring argument `{arg}`; filters are given as key=value"),
        }
    }

    Some(Args {
        collection,
        page,
        filters,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let Some(args) = parse_args(env::args().skip(1)) else {
        eprintln!("usage: snackdist-list <collection> [page] [key=value ...]");
        std::process::exit(2);
    };

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default").required(false))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            std::process::exit(1);
        }
    };

    let client_config = match settings.try_deserialize::<ClientConfig>() {
        Ok(client_config) => client_config,
        Err(err) => {
            log::error!("Error loading client config: {err}");
            std::process::exit(1);
        }
    };

    if !KNOWN_COLLECTIONS.contains(&args.collection.as_str()) {
        log::warn!("`{}` is not a known collection; trying anyway", args.collection);
    }

    let source = match HttpSource::new(&client_config, &args.collection) {
        Ok(source) => source,
        Err(err) => {
            log::error!("Failed to set up the page source: {err}");
            std::process::exit(1);
        }
    };

    let mut controller: PageController<HttpSource, Value> =
        PageController::new(source, args.filters, client_config.page_size());

    if args.page > 1 {
        controller.set_page(args.page).await;
    } else {
        controller.load().await;
    }

    let state = controller.state();
    if let Some(err) = &state.error {
        log::error!("Failed to list {}: {err}", args.collection);
        std::process::exit(1);
    }

    match serde_json::to_string_pretty(&state.items) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            log::error!("Failed to render items: {err}");
            std::process::exit(1);
        }
    }

    match state.item_range() {
        Some((first, last)) => println!(
            "showing {first}-{last} of {} (page {}/{})",
            state.total_items, state.current_page, state.total_pages
        ),
        None => println!("no {} found", args.collection),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Option<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn page_is_optional() {
        let parsed = args(&["recoveries", "status=pending"]).unwrap();
        assert_eq!(parsed.collection, "recoveries");
        assert_eq!(parsed.page, 1);
        assert_eq!(parsed.filters.get("status").map(String::as_str), Some("pending"));
    }

    #[test]
    fn page_and_filters() {
        let parsed = args(&["products", "3", "category=chips", "bogus"]).unwrap();
        assert_eq!(parsed.page, 3);
        assert_eq!(parsed.filters.len(), 1);
    }

    #[test]
    fn collection_is_required() {
        assert!(args(&[]).is_none());
    }
}
