use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use lembrademim_lib::types::{BiographyPatch, NewBiography};
use lembrademim_lib::validation;
use lembrademim_lib::{BiographySearch, Client, Folders};

use crate::output::{print_biographies, print_folders, OutputFormat};

#[derive(Args)]
pub struct BiosArgs {
    #[command(subcommand)]
    pub command: BiosCommand,
}

#[derive(Subcommand)]
pub enum BiosCommand {
    /// List all biographies
    List,
    /// Search by name and/or tag
    Search {
        /// Text to match against names
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        tag: Option<String>,
    },
    /// Show one biography and the folders it is in
    Show { id: String },
    /// Create a biography
    Create(BiographyFields),
    /// Change fields of a biography; omitted fields are left as they are
    Update {
        id: String,
        #[command(flatten)]
        fields: BiographyFields,
    },
    /// Detach a biography from its folders and delete it
    Delete { id: String },
}

#[derive(Args)]
pub struct BiographyFields {
    #[arg(long)]
    pub name: Option<String>,

    /// Phone number, e.g. "+55 (11) 98765-4321"
    #[arg(long)]
    pub phone: Option<String>,

    /// YYYY-MM-DD or DD/MM/YYYY
    #[arg(long)]
    pub birth_date: Option<String>,

    /// Tag; repeat for several
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Profile image URL
    #[arg(long)]
    pub image: Option<String>,
}

impl BiographyFields {
    fn to_patch(&self) -> Result<BiographyPatch> {
        Ok(BiographyPatch {
            name: self
                .name
                .as_deref()
                .map(validation::validate_name)
                .transpose()?,
            cellphone_number: self
                .phone
                .as_deref()
                .map(validation::validate_phone)
                .transpose()?,
            birth_date: self
                .birth_date
                .as_deref()
                .map(validation::validate_birth_date)
                .transpose()?,
            tags: if self.tags.is_empty() {
                None
            } else {
                Some(validation::validate_tags(&self.tags)?)
            },
            notes: self
                .notes
                .as_deref()
                .map(validation::validate_notes)
                .transpose()?,
            profile_image: self.image.clone(),
        })
    }

    fn to_new(&self) -> Result<NewBiography> {
        let patch = self.to_patch()?;
        let Some(name) = patch.name else {
            bail!("--name is required to create a biography");
        };
        Ok(NewBiography {
            name,
            cellphone_number: patch.cellphone_number.unwrap_or_default(),
            birth_date: patch.birth_date.unwrap_or_default(),
            tags: patch.tags.unwrap_or_default(),
            notes: patch.notes.unwrap_or_default(),
            profile_image: patch.profile_image,
        })
    }
}

pub async fn run(args: &BiosArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    match &args.command {
        BiosCommand::List => {
            let biographies = client.list_biographies().await?;
            eprintln!("{} biographies", biographies.len());
            print_biographies(&biographies, format)?;
        }
        BiosCommand::Search { search, tag } => {
            if search.is_none() && tag.is_none() {
                bail!("give --search, --tag, or both");
            }
            let mut query = BiographySearch::default();
            if let Some(search) = search {
                query = query.with_search(&validation::validate_search(search)?);
            }
            if let Some(tag) = tag {
                query = query.with_tag(&validation::sanitize_text(tag, validation::MAX_TAG_LENGTH)?);
            }
            let biographies = client.search_biographies(&query).await?;
            eprintln!("{} matching biographies", biographies.len());
            print_biographies(&biographies, format)?;
        }
        BiosCommand::Show { id } => {
            let id = validation::validate_id(id)?;
            let biography = client.get_biography(&id).await?;
            print_biographies(std::slice::from_ref(&biography), format)?;

            let folders = Folders::new(client.clone()).folders_of_biography(&id).await;
            if !folders.is_empty() {
                eprintln!("In {} folder(s):", folders.len());
                print_folders(&folders, format)?;
            }
        }
        BiosCommand::Create(fields) => {
            let created = client.create_biography(&fields.to_new()?).await?;
            eprintln!("Created biography {}", created.id);
            print_biographies(std::slice::from_ref(&created), format)?;
        }
        BiosCommand::Update { id, fields } => {
            let id = validation::validate_id(id)?;
            let patch = fields.to_patch()?;
            if patch.is_empty() {
                bail!("nothing to update; pass at least one field");
            }
            let updated = client.update_biography(&id, &patch).await?;
            eprintln!("Updated biography {}", updated.id);
            print_biographies(std::slice::from_ref(&updated), format)?;
        }
        BiosCommand::Delete { id } => {
            let id = validation::validate_id(id)?;
            let detached = Folders::new(client.clone())
                .remove_biography_from_all_folders(&id)
                .await?;
            if detached > 0 {
                eprintln!("Removed from {} folder(s)", detached);
            }
            client.delete_biography(&id).await?;
            eprintln!("Deleted biography {}", id);
        }
    }
    Ok(())
}
