use std::path::Path;

use crate::cli::CliError;
use crate::cli::commands::InitArgs;
use crate::io::config_io::{self, InitOptions};
use crate::model::Backend;

/// Infer a board name from a directory name: hyphens and underscores
/// become spaces, each word title-cased.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + chars.as_str()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn cmd_init(dir: &Path, args: InitArgs) -> Result<(), CliError> {
    let name = args.name.or_else(|| {
        dir.file_name()
            .and_then(|n| n.to_str())
            .map(infer_name)
            .filter(|n| !n.is_empty())
    });
    let opts = InitOptions {
        name,
        backend: args.backend,
        project_id: args.project_id,
        force: args.force,
    };

    let path = config_io::init_config(dir, &opts)?;
    log::info!("event=config_init path={}", path.display());

    println!("Wrote {}", path.display());
    match opts.backend.unwrap_or_default() {
        Backend::Memory => {
            println!("Backend: memory (todos last as long as the board is open)");
            println!("Run `tb` to open the board.");
        }
        Backend::Collection => {
            println!("Backend: shared collection");
            println!("Run `tb` to open the board, or `tb add \"First todo\"`.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn infers_names_from_directories() {
        assert_eq!(infer_name("home-reno"), "Home Reno");
        assert_eq!(infer_name("q3_launch"), "Q3 Launch");
        assert_eq!(infer_name("--"), "");
    }

    #[test]
    fn writes_config_with_inferred_name() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("garden-plans");
        fs::create_dir(&dir).unwrap();

        let args = InitArgs {
            name: None,
            backend: Some(Backend::Collection),
            project_id: Some("garden".into()),
            force: false,
        };
        cmd_init(&dir, args).unwrap();

        let workspace = config_io::load_workspace_with(&dir, |_| None).unwrap();
        assert_eq!(workspace.config.board.name, "Garden Plans");
        assert_eq!(workspace.config.store.backend, Backend::Collection);
        assert_eq!(workspace.config.store.collection.project_id, "garden");
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let args = || InitArgs {
            name: Some("Board".into()),
            backend: None,
            project_id: None,
            force: false,
        };
        cmd_init(tmp.path(), args()).unwrap();
        assert!(matches!(
            cmd_init(tmp.path(), args()),
            Err(CliError::Config(config_io::ConfigError::AlreadyExists(_)))
        ));
        cmd_init(
            tmp.path(),
            InitArgs {
                force: true,
                ..args()
            },
        )
        .unwrap();
    }
}
