use anyhow::{Context, Result};
use allergy_guard::analysis::AnalysisRequest;
use allergy_guard::barcode::BarcodeResolver;
use allergy_guard::cli::{parse_args, Command, ProfileArgs};
use allergy_guard::config::EngineConfig;
use allergy_guard::profile::{JsonProfileStore, ProfileStore};
use allergy_guard::{AllergyEngine, UserAllergyProfile};
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tokio::fs;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "allergy_guard=info";

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // Logs go to stderr so stdout stays pure JSON.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `--allergies` wins; otherwise the patient record named by `--user-id`.
async fn resolve_profile(args: &ProfileArgs) -> Result<UserAllergyProfile> {
    if let Some(allergies) = &args.allergies {
        return Ok(UserAllergyProfile::from_symptoms(allergies));
    }
    match (&args.user_id, &args.profiles) {
        (Some(user_id), Some(path)) => {
            let store = JsonProfileStore::load(path)
                .with_context(|| format!("Failed to load patient profiles from '{}'", path.display()))?;
            let profile = store
                .allergy_profile(user_id)
                .await
                .with_context(|| format!("Failed to resolve allergy profile for user '{}'", user_id))?;
            Ok(profile)
        }
        _ => Ok(UserAllergyProfile::default()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", rendered);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let cli_args = parse_args();

    let mut config = EngineConfig::from_env();
    if let Some(path) = cli_args.knowledge_base {
        config.knowledge_base_path = Some(path);
    }
    if let Some(secs) = cli_args.timeout_secs {
        config.enrichment.timeout = Duration::from_secs(secs);
    }
    if cli_args.no_enrich {
        config.enrichment.providers.clear();
    }

    let engine = AllergyEngine::from_config(&config).context("Failed to initialize allergy engine")?;
    tracing::debug!(allergens = engine.knowledge_base().len(), "Knowledge base ready");

    match cli_args.command {
        Command::Analyze {
            ingredients,
            request,
            food_name,
            profile,
        } => {
            let profile = resolve_profile(&profile).await?;
            let mut analysis_request = match (ingredients, request) {
                (Some(text), _) => AnalysisRequest::new(vec![text]),
                (None, Some(path)) => {
                    let raw = fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("Failed to read request file '{}'", path.display()))?;
                    let body: serde_json::Value = serde_json::from_str(&raw)
                        .with_context(|| format!("Request file '{}' is not valid JSON", path.display()))?;
                    AnalysisRequest::from_json(&body)?
                }
                (None, None) => anyhow::bail!("Either --ingredients or --request is required"),
            };
            if let Some(name) = food_name {
                analysis_request = analysis_request.with_food_name(name);
            }
            let result = engine.analyze(&analysis_request, &profile).await;
            print_json(&result)?;
        }
        Command::Plan { profile } => {
            let profile = resolve_profile(&profile).await?;
            let plan = engine.generate_plan(&profile).await;
            print_json(&plan)?;
        }
        Command::Barcode { barcode, profile } => {
            let profile = resolve_profile(&profile).await?;
            let resolver =
                BarcodeResolver::with_default_sources().context("Failed to build product lookup client")?;
            let product = resolver.resolve(&barcode).await?;
            let request = AnalysisRequest::new(product.ingredients_list.clone())
                .with_food_name(product.name.clone())
                .with_barcode(barcode.trim());
            let analysis = engine.analyze(&request, &profile).await;
            print_json(&json!({ "product": product, "analysis": analysis }))?;
        }
        Command::Ask {
            message,
            name,
            profile,
        } => {
            let profile = resolve_profile(&profile).await?;
            let reply = engine.reply(&message, &profile, name.as_deref()).await?;
            print_json(&reply)?;
        }
    }

    Ok(())
}
