use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use paperless_client::config::{API_URL_ENV, DEFAULT_API_URL};
use paperless_client::{load_document_page, ClientConfig, Document, DocumentClient, UploadFile};
use prettytable::{Cell, Row, Table};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "paperless")]
#[command(about = "A CLI tool for managing documents in a paperless service", long_about = None)]
struct Cli {
    #[arg(long, global = true, env = API_URL_ENV, default_value = DEFAULT_API_URL, help = "Base URL of the paperless backend")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "List all documents")]
    List,

    #[command(about = "Upload a file as a new document")]
    Upload {
        #[arg(short, long, help = "Document title")]
        title: String,

        #[arg(short, long, help = "Path to the file")]
        file: PathBuf,
    },

    #[command(about = "Show a single document")]
    Show {
        #[arg(help = "Document ID")]
        id: i64,
    },

    #[command(about = "Change a document's title and content")]
    Update {
        #[arg(help = "Document ID")]
        id: i64,

        #[arg(short, long, help = "New title")]
        title: String,

        #[arg(short, long, help = "New content")]
        content: String,
    },

    #[command(about = "Delete a document")]
    Delete {
        #[arg(help = "Document ID")]
        id: i64,
    },

    #[command(about = "Print the download URL of a document")]
    DownloadUrl {
        #[arg(help = "Document ID")]
        id: i64,
    },

    #[command(about = "Search documents")]
    Search {
        #[arg(help = "Search query")]
        query: String,
    },

    #[command(about = "Add a tag to a document")]
    Tag {
        #[arg(help = "Document ID")]
        id: i64,

        #[arg(short, long, help = "Tag name")]
        name: String,
    },

    #[command(about = "Remove a tag from a document")]
    Untag {
        #[arg(help = "Document ID")]
        id: i64,

        #[arg(short, long, help = "Tag ID")]
        tag_id: i64,
    },

    #[command(about = "List all known tags")]
    Tags,

    #[command(about = "Create a tag, or return the existing one with that name")]
    CreateTag {
        #[arg(help = "Tag name")]
        name: String,
    },

    #[command(about = "Load a document together with its download URL")]
    Open {
        #[arg(help = "Document ID")]
        id: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("paperless_client=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = DocumentClient::new(&ClientConfig::new(cli.api_url));

    if let Err(e) = run_command(&client, cli.command).await {
        eprintln!("❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_command(client: &DocumentClient, command: Commands) -> Result<()> {
    match command {
        Commands::List => {
            let documents = client.list_documents().await?;
            print_documents("📋 Documents", &documents);
        }
        Commands::Upload { title, file } => {
            upload(client, title, file).await?;
        }
        Commands::Show { id } => {
            let document = client.get_document(id).await?;
            print_document(&document);
        }
        Commands::Update { id, title, content } => {
            let document = client.update_document(id, &title, &content).await?;
            println!("✅ Document updated successfully!");
            print_document(&document);
        }
        Commands::Delete { id } => {
            client.delete_document(id).await?;
            println!("🗑️  Document {} deleted", id);
        }
        Commands::DownloadUrl { id } => {
            let url = client.get_download_url(id).await?;
            println!("{}", url);
        }
        Commands::Search { query } => {
            let documents = client.search_documents(&query).await?;
            print_documents(&format!("🔍 Results for '{}'", query), &documents);
        }
        Commands::Tag { id, name } => {
            let document = client.add_tag(id, &name).await?;
            println!("✅ Tag '{}' added to '{}'", name, document.title);
            println!("🏷️  Tags: {}", tag_list(&document));
        }
        Commands::Untag { id, tag_id } => {
            let document = client.remove_tag(id, tag_id).await?;
            println!("✅ Tag {} removed from '{}'", tag_id, document.title);
            println!("🏷️  Tags: {}", tag_list(&document));
        }
        Commands::Tags => {
            let tags = client.list_tags().await?;
            if tags.is_empty() {
                println!("📭 No tags found.");
                return Ok(());
            }

            let mut table = Table::new();
            table.add_row(Row::new(vec![Cell::new("ID"), Cell::new("Name")]));
            for tag in tags {
                table.add_row(Row::new(vec![
                    Cell::new(&tag.id.to_string()),
                    Cell::new(&tag.name),
                ]));
            }
            table.printstd();
        }
        Commands::CreateTag { name } => {
            let tag = client.create_tag(&name).await?;
            println!("🏷️  {} (ID: {})", tag.name, tag.id);
        }
        Commands::Open { id } => {
            let page = load_document_page(client, &id).await?;
            print_document(&page.document);
            println!("   Download: {}", page.download_url);
        }
    }

    Ok(())
}

async fn upload(client: &DocumentClient, title: String, path: PathBuf) -> Result<()> {
    let file = UploadFile::from_path(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let document = client.upload_document(&title, file).await?;

    println!("✅ Document uploaded successfully!");
    print_document(&document);

    Ok(())
}

fn print_documents(heading: &str, documents: &[Document]) {
    if documents.is_empty() {
        println!("📭 No documents found.");
        return;
    }

    println!("\n{} ({})\n", heading, documents.len());

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("ID"),
        Cell::new("Title"),
        Cell::new("Status"),
        Cell::new("Created"),
        Cell::new("Size"),
    ]));

    for document in documents {
        table.add_row(Row::new(vec![
            Cell::new(&document.id.to_string()),
            Cell::new(&document.title),
            Cell::new(&document.status),
            Cell::new(&local_time(&document.created_date)),
            Cell::new(&format!("{} B", document.file_size)),
        ]));
    }

    table.printstd();
    println!();
}

fn print_document(document: &Document) {
    println!("📄 {}", document.title);
    println!("   ID: {}", document.id);
    println!("   Status: {}", document.status);
    println!("   Created: {}", local_time(&document.created_date));
    println!("   Size: {} bytes", document.file_size);
    if document.tags.is_some() {
        println!("   Tags: {}", tag_list(document));
    }
    match document.summary.as_deref() {
        Some(summary) if !summary.is_empty() => println!("   Summary: {}", summary),
        Some(_) => {}
        None => println!("   Summary: (pending)"),
    }
}

fn tag_list(document: &Document) -> String {
    match &document.tags {
        Some(tags) if !tags.is_empty() => tags
            .iter()
            .map(|t| format!("{} (#{})", t.name, t.id))
            .collect::<Vec<_>>()
            .join(", "),
        _ => "-".to_string(),
    }
}

/// Server timestamps are shown in local time; anything unparseable is shown as sent.
fn local_time(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|_| timestamp.to_string())
}
