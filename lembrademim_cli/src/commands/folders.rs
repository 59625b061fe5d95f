use anyhow::Result;
use clap::{Args, Subcommand};
use lembrademim_lib::validation;
use lembrademim_lib::{Client, Folders};

use crate::output::{print_entries, print_folders, OutputFormat};

#[derive(Args)]
pub struct FoldersArgs {
    #[command(subcommand)]
    pub command: FoldersCommand,
}

#[derive(Subcommand)]
pub enum FoldersCommand {
    /// List all folders
    List,
    /// Show one folder
    Show { id: String },
    /// Create a folder
    Create { name: String },
    /// Rename a folder
    Rename { id: String, name: String },
    /// Delete an empty folder
    Delete { id: String },
    /// Put a biography in a folder
    Add {
        #[arg(long)]
        biography: String,
        #[arg(long)]
        folder: String,
    },
    /// Take a biography out of a folder
    Remove {
        #[arg(long)]
        biography: String,
        #[arg(long)]
        folder: String,
    },
    /// Folders a biography is in
    Of { biography: String },
    /// Biographies in a folder
    Contents { id: String },
    /// Take a biography out of every folder
    DetachAll { biography: String },
}

pub async fn run(args: &FoldersArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let folders = Folders::new(client.clone());

    match &args.command {
        FoldersCommand::List => {
            let list = folders.list().await?;
            eprintln!("{} folders", list.len());
            print_folders(&list, format)?;
        }
        FoldersCommand::Show { id } => {
            let folder = folders.get(&validation::validate_id(id)?).await?;
            print_folders(std::slice::from_ref(&folder), format)?;
        }
        FoldersCommand::Create { name } => {
            let folder = folders.create_folder(&validation::validate_name(name)?).await?;
            print_folders(std::slice::from_ref(&folder), format)?;
        }
        FoldersCommand::Rename { id, name } => {
            let folder = folders
                .rename_folder(&validation::validate_id(id)?, &validation::validate_name(name)?)
                .await?;
            print_folders(std::slice::from_ref(&folder), format)?;
        }
        FoldersCommand::Delete { id } => {
            let id = validation::validate_id(id)?;
            folders.delete(&id).await?;
            eprintln!("Deleted folder {}", id);
        }
        FoldersCommand::Add { biography, folder } => {
            let biography = validation::validate_id(biography)?;
            let folder = validation::validate_id(folder)?;
            folders.add_biography_to_folder(&biography, &folder).await?;
            eprintln!("Added biography {} to folder {}", biography, folder);
        }
        FoldersCommand::Remove { biography, folder } => {
            let biography = validation::validate_id(biography)?;
            let folder = validation::validate_id(folder)?;
            folders.remove_biography_from_folder(&biography, &folder).await?;
            eprintln!("Removed biography {} from folder {}", biography, folder);
        }
        FoldersCommand::Of { biography } => {
            let list = folders
                .folders_of_biography(&validation::validate_id(biography)?)
                .await;
            print_folders(&list, format)?;
        }
        FoldersCommand::Contents { id } => {
            let entries = folders
                .biographies_in_folder(&validation::validate_id(id)?)
                .await;
            eprintln!("{} biographies", entries.len());
            print_entries(&entries, format)?;
        }
        FoldersCommand::DetachAll { biography } => {
            let biography = validation::validate_id(biography)?;
            let count = folders.remove_biography_from_all_folders(&biography).await?;
            eprintln!("Removed biography {} from {} folder(s)", biography, count);
        }
    }
    Ok(())
}
