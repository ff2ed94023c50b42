//! Lists the groups of an IAM service.
//!
//! ```sh
//! IAM_TOKEN=... cargo run --example list_groups -- --base-url https://iam.example.com/api/v1 --filter "name eq 'Finance'"
//! ```

use iam_client::api::ListOptions;
use iam_client::{Authentication, IamClient};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
list_groups

USAGE:
  list_groups --base-url URL [--filter EXPR] [--top N]

OPTIONS:
  --base-url URL   IAM service base URL
  --filter EXPR    $filter expression
  --top N          page size [default: 50]

ENV:
  IAM_TOKEN        bearer token
";

#[derive(Debug)]
struct Args {
    base_url: String,
    filter: Option<String>,
    top: u32,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    Ok(Args {
        base_url: pargs.value_from_str("--base-url")?,
        filter: pargs.opt_value_from_str("--filter")?,
        top: pargs.opt_value_from_str("--top")?.unwrap_or(50),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = parse_args()?;
    let token = std::env::var("IAM_TOKEN")?;

    let client = IamClient::builder()
        .with_base_url(&args.base_url)?
        .with_application("list_groups", env!("CARGO_PKG_VERSION"))
        .with_authentication(Authentication::Bearer(token.into()))
        .with_generated_correlation_ids()
        .build()?;

    let mut options = ListOptions::new().with_top(args.top).with_count(true);
    if let Some(filter) = args.filter {
        options = options.with_filter(filter);
    }

    let page = client
        .groups()
        .list_groups(&options)
        .await?
        .into_body()
        .unwrap_or_default();

    if let Some(count) = page.recordset_count {
        println!("{count} group(s)");
    }
    for group in page {
        println!("{}\t{}", group.id, group.name);
    }

    Ok(())
}
