use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pockex::{
    cache::{CachingTransport, dump_response},
    pocket_api::{
        client::PocketClient,
        credentials::Credentials,
        query::{ContentType, DetailType, Favorite, RetrieveFilters, Sort, State, TagFilter},
        transport::{PocketTransport, ReqwestTransport},
        types::Item,
    },
};

/// Retrieve saved items from a Pocket account.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Consumer key of the registered Pocket application
    #[arg(long, env = "POCKET_CONSUMER_KEY", hide_env_values = true)]
    consumer_key: String,

    /// Access token of the user
    #[arg(long, env = "POCKET_ACCESS_TOKEN", hide_env_values = true)]
    access_token: String,

    /// Only items in this read state
    #[arg(long, value_enum)]
    state: Option<State>,

    /// Only favorited or only unfavorited items
    #[arg(long, value_enum)]
    favorite: Option<Favorite>,

    /// Only items with this tag ("_untagged_" for items without tags)
    #[arg(long)]
    tag: Option<String>,

    #[arg(long, value_enum)]
    content_type: Option<ContentType>,

    #[arg(long, value_enum)]
    sort: Option<Sort>,

    #[arg(long, value_enum)]
    detail_type: Option<DetailType>,

    /// Only items whose title or url contain this text
    #[arg(long)]
    search: Option<String>,

    /// Only items from this domain
    #[arg(long)]
    domain: Option<String>,

    /// Only items modified since this unix timestamp
    #[arg(long)]
    since: Option<i64>,

    /// Maximum number of items
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    count: Option<u32>,

    /// Start position, used together with --count
    #[arg(long, requires = "count")]
    offset: Option<u32>,

    /// All articles, archived or not, newest first with complete details; other filters still apply
    #[arg(long, conflicts_with_all = ["state", "content_type", "sort", "detail_type"])]
    all_articles: bool,

    /// Serve the response from this file if it exists, otherwise store it there
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Write the decoded response to this file as indented JSON
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Print items as JSON instead of one line per item
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Flags set on the command line, on top of the all-articles preset if requested.
    fn filters(&self) -> RetrieveFilters {
        let preset = if self.all_articles {
            RetrieveFilters::all_articles()
        } else {
            RetrieveFilters::new()
        };
        RetrieveFilters {
            state: self.state.or(preset.state),
            favorite: self.favorite,
            tag: self.tag.as_deref().map(TagFilter::from),
            content_type: self.content_type.or(preset.content_type),
            sort: self.sort.or(preset.sort),
            detail_type: self.detail_type.or(preset.detail_type),
            search: self.search.clone(),
            domain: self.domain.clone(),
            since: self.since,
            count: self.count,
            offset: self.offset,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let credentials = Credentials::new(&args.consumer_key, &args.access_token);
    let transport = ReqwestTransport::new()?;

    let items = match &args.cache {
        Some(cache_file) => run(
            &args,
            credentials,
            CachingTransport::new(transport, cache_file),
        )?,
        None => run(&args, credentials, transport)?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for item in &items {
            println!("{}", format_item(item));
        }
    }
    log::info!("Successfully retrieved {} items.", items.len());
    Ok(())
}

fn run<T: PocketTransport>(
    args: &Args,
    credentials: Credentials,
    transport: T,
) -> anyhow::Result<Vec<Item>> {
    let filters = args.filters();
    let client = PocketClient::with_transport(credentials, transport);
    let response = client
        .retrieve_response(filters)
        .context("Failed to retrieve items")?;
    if let Some(dump_file) = &args.dump {
        dump_response(&response, dump_file)?;
    }
    Ok(response.into_items())
}

fn format_item(item: &Item) -> String {
    let mut tags = item.tag_names();
    tags.sort_unstable();
    format!(
        "{}\t{}\t{}\t[{}]",
        item.id,
        item.display_title(),
        item.url,
        tags.join(",")
    )
}
