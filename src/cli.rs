use std::time::Duration;

use clap::{Arg, ArgMatches, Command, value_parser};

use crate::config::ConnectionConfig;
use crate::db::global;

pub fn cli() -> Command {
    Command::new("cinema-db").subcommand(
        Command::new("probe")
            .about("Attempt the database connection once and report the result")
            .arg(
                Arg::new("wait-ms")
                    .long("wait-ms")
                    .help("How long to wait for the attempt to finish")
                    .value_name("MS")
                    .value_parser(value_parser!(u64))
                    .default_value("5000"),
            ),
    )
}

pub async fn handle_cli() -> Result<(), Box<dyn std::error::Error>> {
    run(cli().get_matches()).await
}

pub async fn run(matches: ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("probe", sub_matches)) => {
            let wait = sub_matches
                .get_one::<u64>("wait-ms")
                .copied()
                .map(Duration::from_millis)
                .unwrap_or(Duration::from_secs(5));

            let handle = global::init(ConnectionConfig::from_env()?);

            let state = match tokio::time::timeout(wait, handle.wait_settled()).await {
                Ok(state) => state,
                Err(_) => handle.state(),
            };

            // A failed connection is reported, not turned into an exit status.
            println!("Endpoint: {}", handle.redacted_endpoint());
            println!("State: {}", state);
        }
        _ => {
            cli().print_help()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_default_wait() {
        let matches = cli().try_get_matches_from(["cinema-db", "probe"]).unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "probe");
        assert_eq!(sub.get_one::<u64>("wait-ms"), Some(&5000));
    }

    #[test]
    fn test_probe_custom_wait() {
        let matches = cli()
            .try_get_matches_from(["cinema-db", "probe", "--wait-ms", "250"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_one::<u64>("wait-ms"), Some(&250));
    }

    #[test]
    fn test_probe_rejects_non_numeric_wait() {
        assert!(
            cli()
                .try_get_matches_from(["cinema-db", "probe", "--wait-ms", "later"])
                .is_err()
        );
    }
}
