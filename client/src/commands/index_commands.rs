use super::render::*;
use alloy_primitives::Address;
use anyhow::{format_err, Result};
use colorful::{Color, Colorful};
use labi_indexer::{query::SubgraphClient, schema::RecordKind, Indexer, JsonFileStore, Store};
use labi_stake::{config::ClientConfig, rpc::HttpProvider};

pub fn index(config: &ClientConfig, from_block: Option<u64>, to_block: Option<u64>) -> Result<()> {
    let store = JsonFileStore::open(&config.index_store_path)?;
    let mut indexer = Indexer::new(
        HttpProvider::new(config.http_url.clone()),
        config.staking_contract,
        store,
        config.index_start_block,
        config.index_batch_size,
    );
    if let Some(block) = from_block {
        indexer.rewind(block);
    }
    let stats = indexer.sync(to_block)?;
    println!(
        "{} {} new, {} replayed, {} user updates, {} skipped; next block {}",
        "Indexed".color(Color::Green),
        stats.recorded,
        stats.replayed,
        stats.users,
        stats.skipped,
        stats.next_block
    );
    Ok(())
}

pub fn summary(config: &ClientConfig, user: Address) -> Result<()> {
    let store = JsonFileStore::open(&config.index_store_path)?;
    match store.user(&user) {
        Some(summary) => print_summary(summary),
        None => println!("{} has not been indexed", user),
    }
    for kind in RecordKind::ALL {
        for record in store.records(kind).into_iter().filter(|r| r.user == user) {
            print_record(record);
        }
    }
    Ok(())
}

pub fn transfers(config: &ClientConfig) -> Result<()> {
    let endpoint = config
        .subgraph_url
        .clone()
        .ok_or_else(|| format_err!("subgraph_url is not configured"))?;
    let client = SubgraphClient::new(endpoint, config.subgraph_api_key.clone());
    match client.fetch_transfers() {
        Some(json) => println!("{}", json),
        None => println!("{}", "Transfers are unavailable".color(Color::Red)),
    }
    Ok(())
}
