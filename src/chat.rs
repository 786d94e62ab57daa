//! Terminal presentation layer: the interactive chat loop, the guided
//! meal-plan form, and transcript rendering. Thin glue over the session;
//! all the interesting decisions live in the core modules.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::export;
use crate::form::{Field, FormState};
use crate::meal_plan::MealPlanData;
use crate::profile::UserProfile;
use crate::session::ChatSession;
use crate::transcript::{Author, ConversationTurn, OfferedAction, TurnPayload};

pub async fn run_chat_session(session: &mut ChatSession) -> Result<()> {
    println!("nutrichat — chat with the assistant.");
    println!("Commands: /plan (guided meal plan), /save (export last plan), /quit");

    let stdin = io::stdin();
    let mut rendered = 0usize;
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // stdin closed
        }
        let input = line.trim();
        match input {
            "" => continue,
            "/quit" | "/exit" => break,
            "/plan" => {
                if let Some(profile) = run_guided_form()? {
                    if let Err(err) = session.request_meal_plan(&profile).await {
                        println!("  ! {err}");
                    }
                }
            }
            "/save" => match session.latest_plan() {
                Some(plan) => {
                    let path = export::save_meal_plan(plan, Path::new("."))?;
                    println!("Saved {}", path.display());
                }
                None => println!("No meal plan to save yet — try /plan first."),
            },
            text => {
                if let Err(err) = session.send_message(text).await {
                    println!("  ! {err}");
                }
            }
        }
        rendered = render_new_turns(session, rendered);
    }

    info!("chat session finished");
    Ok(())
}

/// Walk the user through the meal-plan form one field at a time, re-asking
/// on validation errors. Returns None if the final submit is still blocked.
pub fn run_guided_form() -> Result<Option<UserProfile>> {
    println!("Let's build your meal plan. Press Enter to keep a default.");
    let mut form = FormState::new();

    prompt_field(&mut form, Field::Gender, "Gender [Male/Female]")?;
    prompt_field(&mut form, Field::Age, "Age (18-100)")?;
    prompt_field(&mut form, Field::Height, "Height (e.g. 5'10\" or 170cm)")?;
    prompt_field(&mut form, Field::Weight, "Weight in lbs (50-500)")?;
    prompt_field(
        &mut form,
        Field::ActivityLevel,
        "Activity level [Sedentary/Lightly Active/Moderately Active/Heavily Active]",
    )?;
    prompt_field(&mut form, Field::CalorieDeficit, "Daily calorie deficit kcal (300-800)")?;
    prompt_field(&mut form, Field::DietaryPreferences, "Dietary preferences (optional)")?;

    match form.submit() {
        Ok(profile) => Ok(Some(profile)),
        Err(errors) => {
            for (field, error) in &errors {
                println!("  ! {}: {}", field.label(), error.message);
            }
            Ok(None)
        }
    }
}

fn prompt_field(form: &mut FormState, field: Field, label: &str) -> Result<()> {
    let stdin = io::stdin();
    loop {
        let current = form.value(field);
        if current.is_empty() {
            print!("{label}: ");
        } else {
            print!("{label} ({current}): ");
        }
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            anyhow::bail!("input closed before the form was complete");
        }
        let value = line.trim();
        if value.is_empty() {
            // Keep the current value (a default, or nothing for optional fields).
            form.field_blurred(field);
        } else {
            form.field_changed(field, value);
        }

        match form.error_for(field) {
            None => return Ok(()),
            Some(error) => println!("  ! {}", error.message),
        }
    }
}

/// Print every turn appended since the last render; returns the new
/// high-water mark.
pub fn render_new_turns(session: &ChatSession, from: usize) -> usize {
    let turns = session.turns();
    for turn in &turns[from..] {
        render_turn(turn);
    }
    turns.len()
}

fn render_turn(turn: &ConversationTurn) {
    match &turn.payload {
        TurnPayload::PlainText(text) => {
            let who = match turn.author {
                Author::User => "you",
                Author::Assistant => "assistant",
            };
            println!("[{}] {}: {}", turn.created_at.format("%H:%M:%S"), who, text);
        }
        TurnPayload::StructuredResult(plan) => render_plan(plan),
        TurnPayload::ActionPrompt(actions) => {
            let hints: Vec<&str> = actions.iter().map(action_hint).collect();
            println!("  actions: {}", hints.join(" | "));
        }
    }
}

fn action_hint(action: &OfferedAction) -> &'static str {
    match action {
        OfferedAction::SaveJson => "/save — write prompt_output.json",
        OfferedAction::NewPlan => "/plan — build another plan",
        OfferedAction::Retry => "/plan — try again",
    }
}

fn render_plan(plan: &MealPlanData) {
    println!("=== Your Personalized Meal Plan ===");
    let tdee = &plan.tdee_calculation;
    println!(
        "TDEE: {} kcal/day | deficit: {} kcal | target intake: {} kcal/day",
        fmt_num(tdee.estimated_tdee_kcal),
        fmt_num(tdee.target_deficit_kcal),
        fmt_num(tdee.target_calorie_intake_kcal),
    );
    let macros = &plan.daily_macro_targets_grams;
    println!(
        "Macros: protein {}g | fat {}g | carbs {}g",
        fmt_num(macros.protein),
        fmt_num(macros.fat),
        fmt_num(macros.carbohydrates),
    );
    for meal in &plan.meal_plan {
        println!(
            "- {} ({} kcal): {}",
            meal.meal_name,
            fmt_num(meal.estimated_calories_kcal),
            meal.description
        );
        for item in &meal.items {
            println!("    {} — {}", item.food, item.portion);
        }
    }
    println!(
        "Daily total: {} kcal",
        fmt_num(plan.total_estimated_calories())
    );
}

fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
