//! `accesspanel-roles`: inspect and edit the persisted role table from a shell.
//!
//! ```text
//! accesspanel-roles [list]
//! accesspanel-roles add <name...>
//! accesspanel-roles rename <id> <name...>
//! accesspanel-roles remove <id>
//! ```
//!
//! Uses the same editor as the role page, backed by files under
//! `ACCESSPANEL_DATA_DIR` (or the platform data directory).

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::{Context, bail};

    use accesspanel_core::{FileKeyValueStore, RoleId};
    use accesspanel_infra::ClientConfig;
    use accesspanel_web::{Mutation, RoleEditor};

    accesspanel_observability::init();

    let config = ClientConfig::from_env().context("invalid configuration")?;
    let store = match config.data_dir {
        Some(dir) => FileKeyValueStore::new(dir),
        None => FileKeyValueStore::in_default_location()
            .context("failed to resolve OS app data directory")?,
    };
    tracing::info!(dir = %store.dir().display(), "using role store");

    let mut editor = RoleEditor::load(store);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        [] | ["list"] => {}
        ["add", name @ ..] => {
            if editor.add(&name.join(" "))? == Mutation::Ignored {
                bail!("role name must not be blank");
            }
        }
        ["rename", id, name @ ..] => {
            let id: RoleId = id.parse()?;
            if editor.begin_edit(id) == Mutation::Ignored {
                bail!("no role with id {id}");
            }
            editor.set_edit_buffer(name.join(" "));
            if editor.commit_edit()? == Mutation::Ignored {
                bail!("role name must not be blank");
            }
        }
        ["remove", id] => {
            let id: RoleId = id.parse()?;
            if editor.remove(id)? == Mutation::Ignored {
                tracing::warn!(role_id = %id, "no such role; table rewritten unchanged");
            }
        }
        _ => {
            eprintln!("usage: accesspanel-roles [list | add <name> | rename <id> <name> | remove <id>]");
            std::process::exit(2);
        }
    }

    for role in editor.roles() {
        println!("{}\t{}", role.id, role.name);
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser build starts from `frontend::main` instead.
}
