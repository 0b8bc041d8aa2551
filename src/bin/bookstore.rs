//! Book Store CLI
//!
//! Terminal front end for the catalog: list and search the books, edit one
//! through the same form rules the catalog page applies.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use bookstore::{
    client::{BooksApi, BooksClient},
    config::AppConfig,
    error::describe_fields,
    logging,
    models::book::{Book, BookField, BookInput},
    view::{render_form, CatalogView, SubmitOutcome},
};

/// Book Store command-line interface
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// API root, e.g. http://127.0.0.1:8000/api
    #[arg(long, env = "BOOKSTORE_API_URL", global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the catalog, optionally filtered by title or writer
    List {
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Show one book
    Show { id: i64 },
    /// Edit a book; omitted fields keep their current value
    Edit {
        id: i64,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Add a book
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a book
    Delete { id: i64 },
}

#[derive(clap::Args, Debug, Default)]
struct FieldArgs {
    /// Title
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    writer: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    main_contents: Option<String>,
}

impl FieldArgs {
    fn given(&self) -> Vec<(BookField, &str)> {
        [
            (BookField::Name, &self.name),
            (BookField::Writer, &self.writer),
            (BookField::Year, &self.year),
            (BookField::MainContents, &self.main_contents),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

fn print_book(book: &Book) {
    println!("Book #{}", book.id);
    let input = BookInput::from(book);
    for field in BookField::ALL {
        println!("  {}: {}", field.label(), input.get(field));
    }
}

async fn load(client: &BooksClient) -> Result<CatalogView> {
    let mut view = CatalogView::new();
    if !view.refresh(client).await {
        bail!("Could not load books from {}", client.base_url());
    }
    Ok(view)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(base_url) = args.base_url {
        config.client.base_url = base_url;
    }
    logging::init(&config.logging);

    let client = BooksClient::from_config(&config.client)?;

    match args.command {
        Command::List { search } => {
            let mut view = load(&client).await?;
            view.set_search(search);
            println!("{}", view.render());
        }
        Command::Show { id } => {
            let book = client.get_book(id).await?;
            print_book(&book);
        }
        Command::Edit { id, fields } => {
            let mut view = load(&client).await?;
            if !view.open_edit(id) {
                bail!("No book with id {}", id);
            }
            if let Some(form) = view.editor_mut() {
                for (field, value) in fields.given() {
                    form.set(field, value);
                }
            }

            match view.submit(&client).await {
                SubmitOutcome::Updated(book) => {
                    println!("Updated book #{}", book.id);
                    println!("{}", view.render());
                }
                SubmitOutcome::Invalid | SubmitOutcome::Failed => {
                    if let Some(form) = view.editor() {
                        eprint!("{}", render_form(form));
                    }
                    bail!("Book #{} was not updated", id);
                }
                SubmitOutcome::NoSelection => bail!("No book selected"),
            }
        }
        Command::Add { fields } => {
            let mut input = BookInput::default();
            for (field, value) in fields.given() {
                input.set(field, value);
            }
            if let Err(errors) = input.check() {
                bail!("Invalid book: {}", describe_fields(&errors));
            }
            let book = client.create_book(&input.normalized()).await?;
            print_book(&book);
        }
        Command::Delete { id } => {
            client.delete_book(id).await?;
            println!("Deleted book #{}", id);
        }
    }

    Ok(())
}
