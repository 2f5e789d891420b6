use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Allergen detection and allergy-aware dietary guidance", long_about = None)]
pub struct Cli {
    /// JSON knowledge base replacing the built-in allergen dictionary
    #[arg(long, global = true)]
    pub knowledge_base: Option<PathBuf>,

    /// Skip the optional text-generation enrichment
    #[arg(long, global = true)]
    pub no_enrich: bool,

    /// Upper bound on the enrichment call, in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    /// Comma-separated allergies, e.g. "milk, nuts"
    #[arg(short, long)]
    pub allergies: Option<String>,

    /// Patient id to look up in --profiles
    #[arg(long, requires = "profiles")]
    pub user_id: Option<String>,

    /// JSON file of patient records
    #[arg(long)]
    pub profiles: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check an ingredient list for allergens
    Analyze {
        /// Free-text ingredient list
        #[arg(short, long, conflicts_with = "request", required_unless_present = "request")]
        ingredients: Option<String>,

        /// JSON request body with an "ingredients" array
        #[arg(short, long)]
        request: Option<PathBuf>,

        #[arg(short, long)]
        food_name: Option<String>,

        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Build an allergy-aware dietary plan
    Plan {
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Look up a product by barcode and analyze its ingredients
    Barcode {
        barcode: String,

        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Ask the allergy assistant a question
    Ask {
        message: String,

        /// Name used in the greeting
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        profile: ProfileArgs,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "allergy-guard",
            "--no-enrich",
            "analyze",
            "--ingredients",
            "wheat flour, sugar",
            "--allergies",
            "nuts",
        ])
        .unwrap();
        assert!(cli.no_enrich);
        match cli.command {
            Command::Analyze {
                ingredients, profile, ..
            } => {
                assert_eq!(ingredients.as_deref(), Some("wheat flour, sugar"));
                assert_eq!(profile.allergies.as_deref(), Some("nuts"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_analyze_needs_input() {
        assert!(Cli::try_parse_from(["allergy-guard", "analyze"]).is_err());
    }

    #[test]
    fn test_user_id_requires_profiles() {
        assert!(Cli::try_parse_from(["allergy-guard", "plan", "--user-id", "p-1"]).is_err());
    }
}
