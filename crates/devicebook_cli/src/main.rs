//! devicebook command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, open the byte-store and run one facade call.
//! - Render results as the short status lines users expect.

mod commands;

use commands::{build_cli, matches_to_action, CliAction};
use devicebook_core::db::open_db;
use devicebook_core::{
    config, flush_logging, init_logging, AppConfig, BlobRecordRepository, Record, RecordStorage,
    RepoError, SqliteByteStore, StorageFacade,
};
use log::warn;
use std::path::PathBuf;
use std::process;

const DEFAULT_DB_FILE_NAME: &str = "devicebook.sqlite3";

fn main() {
    let matches = build_cli().get_matches();
    if matches.subcommand_name() == Some("version") {
        println!("{}", version_line());
        return;
    }
    let Some(action) = matches_to_action(&matches) else {
        eprintln!("unknown command");
        exit(2);
    };

    let config = match resolve_config(&matches) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            exit(1);
        }
    };

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let db_path = config
        .db_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME));
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open `{}`: {err}", db_path.display());
            exit(1);
        }
    };
    let byte_store = match SqliteByteStore::try_new(&conn) {
        Ok(byte_store) => byte_store,
        Err(err) => {
            eprintln!("failed to open `{}`: {err}", db_path.display());
            exit(1);
        }
    };
    let facade = StorageFacade::new(BlobRecordRepository::with_key(
        byte_store,
        config.storage_key.as_str(),
    ));

    let (lines, code) = run(&facade, &action);
    for line in lines {
        println!("{line}");
    }
    exit(code);
}

/// Flushes buffered log lines, then exits; `process::exit` skips destructors.
fn exit(code: i32) -> ! {
    flush_logging();
    process::exit(code);
}

fn version_line() -> String {
    format!("devicebook_core version={}", devicebook_core::core_version())
}

fn resolve_config(matches: &clap::ArgMatches) -> Result<AppConfig, String> {
    let path = matches
        .get_one::<String>("config")
        .cloned()
        .or_else(|| std::env::var(config::CONFIG_PATH_ENV).ok());

    let mut config = match path {
        Some(path) => config::load_from_file(&path).map_err(|err| err.to_string())?,
        None => AppConfig::default(),
    };
    if let Some(db) = matches.get_one::<String>("db") {
        config.db_path = Some(PathBuf::from(db));
    }
    if let Some(key) = matches.get_one::<String>("key") {
        config.storage_key = key.clone();
    }
    config.validate().map_err(|err| err.to_string())?;
    Ok(config)
}

/// Executes one action, returning output lines and the process exit code.
fn run(storage: &impl RecordStorage, action: &CliAction) -> (Vec<String>, i32) {
    match action {
        CliAction::Save { id, label } => {
            match storage.save(&Record::new(id.as_str(), label.as_str())) {
                Ok(saved) => (vec![format!("saved {} {}", saved.id, saved.label)], 0),
                Err(err) => (vec![failure_message(&err)], 1),
            }
        }
        CliAction::Delete { id, label } => {
            match storage.delete(&Record::new(id.as_str(), label.as_str())) {
                Ok(()) => (vec!["removed".to_string()], 0),
                Err(err) => (vec![failure_message(&err)], 1),
            }
        }
        CliAction::Exists { id, label } => {
            if storage.exists(&Record::new(id.as_str(), label.as_str())) {
                (vec!["such a record exists".to_string()], 0)
            } else {
                (vec!["this record does not exist".to_string()], 0)
            }
        }
        CliAction::Find { id } => (
            storage
                .find_by_id(id)
                .map(|record| record.to_string())
                .into_iter()
                .collect(),
            0,
        ),
        CliAction::List => {
            let mut records: Vec<Record> = storage.get_all().into_iter().collect();
            records.sort();
            (records.iter().map(Record::to_string).collect(), 0)
        }
    }
}

fn failure_message(err: &RepoError) -> String {
    match err {
        RepoError::AlreadyExists(_) => "record with this id exists".to_string(),
        RepoError::NotFound(_) => "record id does not exist".to_string(),
        RepoError::PersistenceFailure(_) => {
            warn!("event=cli_command module=cli status=error error={err}");
            err.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{run, version_line, CliAction};
    use devicebook_core::{BlobRecordRepository, MemoryByteStore, StorageFacade};

    #[test]
    fn version_line_names_core_crate() {
        assert!(version_line().starts_with("devicebook_core version="));
    }

    #[test]
    fn run_renders_status_lines() {
        let facade = StorageFacade::new(BlobRecordRepository::new(MemoryByteStore::new()));
        let save = |id: &str, label: &str| CliAction::Save {
            id: id.to_string(),
            label: label.to_string(),
        };

        assert_eq!(run(&facade, &save("IMEI2", "Model Y")).0, ["saved IMEI2 Model Y"]);
        assert_eq!(run(&facade, &save("IMEI1", "Model X")).1, 0);
        assert_eq!(
            run(&facade, &save("IMEI1", "Model Z")),
            (vec!["record with this id exists".to_string()], 1)
        );
        assert_eq!(
            run(&facade, &CliAction::List).0,
            ["IMEI1-Model X", "IMEI2-Model Y"]
        );
        assert_eq!(
            run(
                &facade,
                &CliAction::Find {
                    id: "IMEI3".to_string()
                }
            )
            .0,
            Vec::<String>::new()
        );
        assert_eq!(
            run(
                &facade,
                &CliAction::Delete {
                    id: "IMEI3".to_string(),
                    label: String::new()
                }
            ),
            (vec!["record id does not exist".to_string()], 1)
        );
    }
}
