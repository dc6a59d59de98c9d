use clap::Subcommand;
use digidiary_core::{Database, Tip, TipRepository};

#[derive(Subcommand)]
pub enum TipAction {
    /// Show a random quote
    Random,
    /// List all quotes
    List,
    /// Add a quote
    Add {
        /// Quote text
        quote: String,
        /// Who said it
        #[arg(long)]
        author: Option<String>,
    },
}

fn print_tip(tip: &Tip) {
    println!("\"{}\"", tip.quote);
    println!("  -- {}", tip.author);
}

pub async fn run(action: TipAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    db.seed_tips_if_empty()?;

    match action {
        TipAction::Random => match db.fetch_random_tip().await? {
            Some(tip) => print_tip(&tip),
            None => println!("No tips available."),
        },
        TipAction::List => {
            let tips = db.fetch_tips().await?;
            println!("{}", serde_json::to_string_pretty(&tips)?);
        }
        TipAction::Add { quote, author } => {
            if quote.trim().is_empty() {
                return Err("quote must not be empty".into());
            }
            let tip = db.add_tip(&quote, author.as_deref()).await?;
            println!("Tip added: {}", tip.id);
        }
    }
    Ok(())
}
