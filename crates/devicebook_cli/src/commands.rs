//! Command-line grammar.

use clap::{Arg, ArgMatches, Command};

/// One parsed invocation against the record storage.
///
/// `version` touches no storage and is handled before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Save { id: String, label: String },
    Delete { id: String, label: String },
    Exists { id: String, label: String },
    Find { id: String },
    List,
}

pub fn build_cli() -> Command {
    let id = || Arg::new("id").required(true).help("Serial identifier (IMEI)");
    let label = || Arg::new("label").required(true).help("Device model label");

    Command::new("devicebook")
        .about("Register devices by serial identifier")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("TOML config file (defaults to $DEVICEBOOK_CONFIG)"),
        )
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("SQLite file holding the records"),
        )
        .arg(
            Arg::new("key")
                .long("key")
                .global(true)
                .help("Storage key of the record blob"),
        )
        .subcommand(
            Command::new("save")
                .about("Save a new record")
                .arg(id())
                .arg(label()),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete the record with this id")
                .arg(id())
                .arg(label()),
        )
        .subcommand(
            Command::new("exists")
                .about("Check whether this exact record is stored")
                .arg(id())
                .arg(label()),
        )
        .subcommand(Command::new("find").about("Find a record by id").arg(id()))
        .subcommand(Command::new("list").about("List all records"))
        .subcommand(Command::new("version").about("Print the core version"))
}

pub fn matches_to_action(matches: &ArgMatches) -> Option<CliAction> {
    let (name, sub) = matches.subcommand()?;
    let arg = |key: &str| sub.get_one::<String>(key).cloned().unwrap_or_default();

    let action = match name {
        "save" => CliAction::Save {
            id: arg("id"),
            label: arg("label"),
        },
        "delete" => CliAction::Delete {
            id: arg("id"),
            label: arg("label"),
        },
        "exists" => CliAction::Exists {
            id: arg("id"),
            label: arg("label"),
        },
        "find" => CliAction::Find { id: arg("id") },
        "list" => CliAction::List,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::{build_cli, matches_to_action, CliAction};

    fn parse(args: &[&str]) -> CliAction {
        let matches = build_cli()
            .try_get_matches_from(args.iter().copied())
            .unwrap();
        matches_to_action(&matches).unwrap()
    }

    #[test]
    fn parses_record_commands() {
        assert_eq!(
            parse(&["devicebook", "save", "IMEI1", "Model X"]),
            CliAction::Save {
                id: "IMEI1".to_string(),
                label: "Model X".to_string()
            }
        );
        assert_eq!(
            parse(&["devicebook", "--db", "/tmp/x.sqlite3", "find", "IMEI1"]),
            CliAction::Find {
                id: "IMEI1".to_string()
            }
        );
        assert_eq!(parse(&["devicebook", "list"]), CliAction::List);
    }

    #[test]
    fn version_is_not_a_storage_action() {
        let matches = build_cli()
            .try_get_matches_from(["devicebook", "version"])
            .unwrap();
        assert_eq!(matches.subcommand_name(), Some("version"));
        assert_eq!(matches_to_action(&matches), None);
    }

    #[test]
    fn save_requires_label() {
        assert!(build_cli()
            .try_get_matches_from(["devicebook", "save", "IMEI1"])
            .is_err());
    }
}
