//! CLI for offline SID to Unix ID conversion.
//!
//! Works without a running directory client: the domain binding is given
//! on the command line and the mapping is computed locally.

use std::process::ExitCode;

use clap::Parser;
use sid_idmap::{DomainConfig, IdRange, IdmapContext};

#[derive(Parser, Debug)]
#[command(
    name = "sid-idmap",
    version,
    about = "Convert a Windows SID to a Unix UID/GID offline",
    after_help = "Example:\n  \
        sid-idmap --domain-name EXAMPLE --domain-sid S-1-5-21-3623811015-3361044348-30300820 \\\n    \
        --range-min 10000 --range-max 20000 \\\n    \
        S-1-5-21-3623811015-3361044348-30300820-1013"
)]
struct Cli {
    /// Domain name.
    #[arg(long)]
    domain_name: String,

    /// Domain SID (the domain's own SID, without a trailing RID).
    #[arg(long)]
    domain_sid: String,

    /// Minimum Unix ID in the range.
    #[arg(long)]
    range_min: u32,

    /// Maximum Unix ID in the range.
    #[arg(long)]
    range_max: u32,

    /// Verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// SID to convert.
    sid: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    tracing::debug!(
        domain = %cli.domain_name,
        domain_sid = %cli.domain_sid,
        range_min = cli.range_min,
        range_max = cli.range_max,
        sid = %cli.sid,
        "converting SID"
    );

    let config = DomainConfig::new(
        cli.domain_name,
        cli.domain_sid,
        IdRange::new(cli.range_min, cli.range_max),
    );

    let ctx = match IdmapContext::with_domain(config) {
        Ok(ctx) => ctx,
        Err(error) => {
            tracing::error!(%error, "failed to create idmap context");
            return ExitCode::FAILURE;
        }
    };

    match ctx.sid_to_unix_id(&cli.sid) {
        Ok(unix_id) => {
            #[expect(clippy::print_stdout, reason = "the mapped ID is the tool's output")]
            {
                println!("{unix_id}");
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(sid = %cli.sid, %error, "failed to convert SID");
            ExitCode::FAILURE
        }
    }
}
