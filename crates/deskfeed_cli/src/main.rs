//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `deskfeed_core` linkage.
//! - Print one demo feed through the same filter path the UI uses.
//!
//! Usage: `deskfeed_cli [notifications|messages] [tab] [search...]`

use chrono::Utc;
use deskfeed_core::fixtures::{demo_message_source, demo_notification_source};
use deskfeed_core::{relative_time, FeedSource, FeedStore, FeedTab};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("deskfeed_core ping={}", deskfeed_core::ping());
    println!("deskfeed_core version={}", deskfeed_core::core_version());

    let mut args = std::env::args().skip(1);
    let feed = args.next().unwrap_or_else(|| "notifications".to_string());
    let tab = args.next().unwrap_or_else(|| "all".to_string());
    let search = args.collect::<Vec<_>>().join(" ");

    match run(&feed, &tab, &search) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(feed: &str, tab: &str, search: &str) -> Result<(), String> {
    let tab = tab.parse::<FeedTab>().map_err(|err| err.to_string())?;
    let now = Utc::now();

    let mut store = FeedStore::new();
    let tabs: &[FeedTab] = match feed {
        "notifications" => {
            load(&mut store, &demo_notification_source(now))?;
            &FeedTab::NOTIFICATION_TABS
        }
        "messages" => {
            load(&mut store, &demo_message_source(now))?;
            &FeedTab::MESSAGE_TABS
        }
        other => {
            return Err(format!(
                "unknown feed `{other}`; expected notifications|messages"
            ))
        }
    };

    let counts = store
        .tab_counts(tabs)
        .into_iter()
        .map(|(tab, count)| format!("{tab}={count}"))
        .collect::<Vec<_>>();
    println!("tabs {}", counts.join(" "));

    let items = store.filter(tab, search);
    println!(
        "feed={feed} tab={tab} matches={} unread={}",
        items.len(),
        store.unread_count()
    );
    for item in items {
        let marker = if item.read { " " } else { "*" };
        println!(
            "{marker} [{:<17}] {:<15} {}",
            item.kind.as_str(),
            relative_time(item.created_at, now),
            item.text
        );
    }
    Ok(())
}

fn load(store: &mut FeedStore, source: &impl FeedSource) -> Result<(), String> {
    store.load(source).map(|_| ()).map_err(|err| err.to_string())
}
