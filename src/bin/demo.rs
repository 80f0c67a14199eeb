//! memdb Demo Binary
//!
//! Exercises the Store with a fixed sequence of calls and prints each result.

use std::path::PathBuf;

use clap::Parser;
use memdb::{Config, Key, Store, SyncStrategy, Value};
use tracing_subscriber::{fmt, EnvFilter};

/// memdb demo
#[derive(Parser, Debug)]
#[command(name = "memdb-demo")]
#[command(about = "Run a fixed sequence of memdb operations")]
#[command(version)]
struct Args {
    /// Directory for the snapshot and stream files
    #[arg(short, long, default_value = "./memdb_data")]
    data_dir: PathBuf,

    /// fsync persistence files before returning
    #[arg(long)]
    sync: bool,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,memdb=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("memdb demo v{}", memdb::VERSION);
    tracing::info!("Data directory: {}", args.data_dir.display());

    let config = Config::builder()
        .sync_strategy(if args.sync { SyncStrategy::OnSave } else { SyncStrategy::Never })
        .build();
    let store = Store::with_config(config);

    let snapshot_path = args.data_dir.join("snapshot.json");
    let stream_path = args.data_dir.join("streaming.jsonl");

    println!("start: {}", render(&store.get_all()));
    println!("get(\"test\"): {:?}", store.get(&Key::from("test")));

    store.insert("a1", 1);
    store.insert("a2", 2);
    store.insert(1, "a3");
    println!("after inserts: {}", render(&store.get_all()));

    let big = store.filter(|_, v| matches!(v, Value::Int(n) if *n > 1));
    println!("filter(int > 1): {}", render(&big));

    println!("save_snapshot: {}", store.save_snapshot(&snapshot_path));
    store.clear();
    println!("after clear: {}", render(&store.get_all()));
    println!("restore_snapshot: {}", store.restore_snapshot(&snapshot_path));
    println!("after restore: {}", render(&store.get_all()));

    store.clear();
    store.put("a2", 2);
    store.put(1, "a3");
    println!("save_stream: {}", store.save_stream(&stream_path));

    store.put("a4", Value::List(vec![Value::Bool(true), Value::Null]));
    println!("before stream restore: {}", render(&store.get_all()));
    println!("restore_stream: {}", store.restore_stream(&stream_path));
    println!("after stream restore: {}", render(&store.get_all()));

    println!(
        "restore_snapshot(missing): {}",
        store.restore_snapshot(args.data_dir.join("missing.json"))
    );
}

fn render(map: &std::collections::BTreeMap<Key, Value>) -> String {
    let fields: Vec<String> = map.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
    format!("{{{}}}", fields.join(", "))
}
