use std::collections::HashMap;

use ordinal_map::{enum_key, immutable_enum_map, Map};
use tracing_subscriber::EnvFilter;

enum_key! {
    #[derive(serde::Serialize)]
    enum AnEnum { A, B, C, D, E }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut source = HashMap::new();
    source.insert(AnEnum::C, "c");
    source.insert(AnEnum::A, "a");
    source.insert(AnEnum::E, "e");

    let mut map = immutable_enum_map(&source);
    source.insert(AnEnum::B, "b");

    println!("source: {source:?}");
    println!("map:    {map}");
    for (key, value) in &map {
        println!("  {key} => {value}");
    }

    let Err(error) = Map::insert(&mut map, AnEnum::D, "d") else {
        anyhow::bail!("immutable map accepted an insertion");
    };
    println!("insert: {error}");

    println!("json:   {}", serde_json::to_string(&map)?);
    Ok(())
}
