// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, set up logging, build a client
//   and dispatch to the subcommand.
// - Returns `anyhow::Result` so any failure exits with status 1; clap
//   exits with status 2 on bad arguments by itself.

use anyhow::{Context, Result};
use clap::Parser;

use sxcu::cli::{Cli, CollectionCommands, Commands};
use sxcu::{
    logging, ui, ClientConfig, CollectionEdit, NewCollection, SxcuClient, UploadOptions,
    UploadSource,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = ClientConfig::discover(cli.config.as_deref())
        .context("Failed to load the endpoint description")?;
    let client = SxcuClient::new(config).context("Failed to build HTTP client")?;
    let service = client.service();

    match cli.command {
        Commands::Upload(args) => {
            ui::validate_upload_path(&args.path)?;
            let mut options = UploadOptions::new()
                .noembed(args.no_embed)
                .self_destruct(args.self_destruct);
            if let Some(collection) = args.collection {
                options = options.collection(collection, args.collection_token);
            }
            let result = ui::with_spinner("Uploading...", || {
                client.upload_file(UploadSource::path(&args.path), &options)
            })
            .context("Upload failed")?;
            ui::print_upload_details(&result);
        }
        Commands::Paste(args) => {
            let text = ui::read_paste_text(args.text)?;
            let result = ui::with_spinner("Uploading text...", || service.upload_text(&text))
                .context("Paste failed")?;
            ui::print_upload_details(&result);
        }
        Commands::CreateLink { url } => {
            let result = ui::with_spinner("Creating link...", || client.create_link(&url))
                .context("Link creation failed")?;
            ui::print_upload_details(&result);
        }
        Commands::Meta { file } => {
            let result = if file.contains('/') {
                service.file_meta(None, Some(&file))
            } else {
                service.file_meta(Some(&file), None)
            }
            .context("Fetching file metadata failed")?;
            ui::print_json(&result);
        }
        Commands::Delete { delete_url } => {
            if service.delete_file(&delete_url)? {
                ui::print_success("File deleted");
            } else {
                anyhow::bail!("sxcu.net refused to delete {delete_url}");
            }
        }
        Commands::Subdomains { count } => {
            let records = service
                .list_subdomains(count)
                .context("Listing subdomains failed")?;
            ui::print_subdomains(&records);
        }
        Commands::Collection(command) => run_collection(&service, command)?,
    }
    Ok(())
}

fn run_collection(service: &sxcu::SxcuService, command: CollectionCommands) -> Result<()> {
    let result = match command {
        CollectionCommands::Create {
            title,
            description,
            private,
            unlisted,
        } => {
            let collection = NewCollection {
                title,
                private,
                unlisted,
                description,
            };
            service.create_collection(&collection)?
        }
        CollectionCommands::Show { id } => service.collection_meta(&id)?,
        CollectionCommands::Edit {
            id,
            token,
            title,
            description,
            unlisted,
            regen_token,
            empty,
            delete,
        } => {
            let edit = CollectionEdit {
                title,
                description,
                unlisted,
                regen_token,
                empty_collection: empty,
                delete_collection: delete,
            };
            service.edit_collection(&id, &token, &edit)?
        }
    };
    ui::print_json(&result);
    Ok(())
}
