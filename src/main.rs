use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use nutrichat::chat;
use nutrichat::config::GeminiConfig;
use nutrichat::export;
use nutrichat::form::{Field, FormState};
use nutrichat::gemini::GeminiClient;
use nutrichat::session::ChatSession;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Start an interactive chat session (type /plan for a guided meal plan).
    Chat,
    /// Generate a meal plan from command-line fields and print it.
    Plan {
        #[arg(long, default_value = "Male")]
        gender: String,
        #[arg(long)]
        age: String,
        #[arg(long, help = "Free text, e.g. 5'10\" or 170cm.")]
        height: String,
        #[arg(long, help = "Weight in pounds.")]
        weight: String,
        #[arg(long, default_value = "Moderately Active")]
        activity: String,
        #[arg(long, default_value = "500", help = "Daily calorie deficit in kcal.")]
        deficit: String,
        #[arg(long)]
        preferences: Option<String>,
        #[arg(long, help = "Directory to write prompt_output.json into.")]
        save: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present (for GEMINI_API_KEY and friends).
    dotenvy::dotenv().ok();

    // Log level comes from RUST_LOG (e.g. RUST_LOG=info,nutrichat=debug).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // The credential is read exactly once, at startup; a missing key is
    // fatal here rather than surfacing mid-conversation.
    let config = GeminiConfig::from_env().context("Gemini configuration failed")?;
    let client = GeminiClient::new(config);
    let mut session = ChatSession::new(Box::new(client));

    match cli.command {
        Commands::Chat => {
            info!("starting interactive chat session");
            chat::run_chat_session(&mut session).await?;
        }
        Commands::Plan {
            gender,
            age,
            height,
            weight,
            activity,
            deficit,
            preferences,
            save,
        } => {
            let mut form = FormState::new();
            form.field_changed(Field::Gender, gender);
            form.field_changed(Field::Age, age);
            form.field_changed(Field::Height, height);
            form.field_changed(Field::Weight, weight);
            form.field_changed(Field::ActivityLevel, activity);
            form.field_changed(Field::CalorieDeficit, deficit);
            if let Some(preferences) = preferences {
                form.field_changed(Field::DietaryPreferences, preferences);
            }

            match form.submit() {
                Err(errors) => {
                    for (field, error) in &errors {
                        eprintln!("{}: {}", field.label(), error.message);
                    }
                    anyhow::bail!(
                        "meal plan request blocked by {} validation error(s)",
                        errors.len()
                    );
                }
                Ok(profile) => {
                    session.request_meal_plan(&profile).await?;
                    chat::render_new_turns(&session, 0);

                    if let Some(dir) = save {
                        match session.latest_plan() {
                            Some(plan) => {
                                let path = export::save_meal_plan(plan, &dir)?;
                                println!("Saved {}", path.display());
                            }
                            None => eprintln!("Nothing to save: no structured plan was produced."),
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
