//! Command-line client for the sheet proxy.
//!
//! Builds the `query` parameter from flags, fetches the sheet through a
//! running proxy and pretty-prints the JSON reply.
//!
//! ```text
//! sheet-cli /org/site/main/query-index.json --sort path --keep '{"category":"cat1"}'
//! ```

use clap::Parser;
use serde_json::{json, Map, Value};

#[derive(Parser)]
#[command(name = "sheet-cli")]
#[command(about = "Query a sheet through the sheet proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Sheet path, e.g. /org/site/main/query-index.json
    path: String,

    /// Field to sort by
    #[arg(long)]
    sort: Option<String>,

    /// Compare sort values as numbers
    #[arg(long)]
    num_sort: bool,

    /// Keep rows matching this JSON object (repeatable, OR-ed)
    #[arg(long, value_parser = parse_clause)]
    keep: Vec<Map<String, Value>>,

    /// Drop rows matching this JSON object (repeatable, OR-ed)
    #[arg(long, value_parser = parse_clause)]
    drop: Vec<Map<String, Value>>,
}

fn parse_clause(raw: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("clause must be a JSON object".to_string()),
        Err(e) => Err(format!("invalid JSON: {}", e)),
    }
}

impl Cli {
    /// Build the `query` parameter; `None` when no transform was requested.
    fn query(&self) -> Option<Value> {
        let mut query = Map::new();
        if let Some(sort) = &self.sort {
            query.insert("sort".into(), json!(sort));
            if self.num_sort {
                query.insert("num-sort".into(), json!("true"));
            }
        }
        if !self.keep.is_empty() {
            query.insert("keep".into(), json!(self.keep));
        }
        if !self.drop.is_empty() {
            query.insert("drop".into(), json!(self.drop));
        }
        (!query.is_empty()).then_some(Value::Object(query))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut url = reqwest::Url::parse(&cli.url)?.join(&cli.path)?;
    if let Some(query) = cli.query() {
        url.query_pairs_mut().append_pair("query", &query.to_string());
    }

    let res = client.get(url).send().await?;
    print_response(res).await?;

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
