// ABOUTME: Daily coaching analysis service over the trainer persona
// ABOUTME: Builds a body-data and meal snapshot prompt and returns free-form advice
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Display;

use chrono::{DateTime, Local};

use crate::errors::AppResult;
use crate::intelligence::daily_totals;
use crate::llm::prompts::TRAINER_SYSTEM_PROMPT;
use crate::llm::{GenerateRequest, TextGenerator};
use crate::models::{DailyLog, FoodLogEntry};
use crate::services::{food, journal};
use crate::store::{DocumentStore, UserScope};

fn metric<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "not logged".to_owned(), |v| v.to_string())
}

/// Grounding context the trainer persona reasons over
fn build_context(log: &DailyLog, meals: &[FoodLogEntry]) -> String {
    let names = if meals.is_empty() {
        "none".to_owned()
    } else {
        meals
            .iter()
            .map(|meal| meal.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let (calories, _) = daily_totals(meals);

    format!(
        "Body data: weight {} kg, sleep {} h, energy {}/5, stress {}/5.\nFood today: {names} ({calories:.0} kcal).",
        metric(log.weight),
        metric(log.sleep_hours),
        metric(log.energy_level),
        metric(log.stress_level),
    )
}

/// Ask the trainer persona to analyze one day's biometrics and meals.
///
/// Business rules:
/// - The prompt carries only what the user logged; absent measurements are
///   named as such instead of being invented
/// - Remote failure yields `None`; the caller owns the user-facing message
pub async fn daily_analysis(
    generator: &dyn TextGenerator,
    log: &DailyLog,
    meals: &[FoodLogEntry],
) -> Option<String> {
    let request = GenerateRequest::new(build_context(log, meals)).with_system(TRAINER_SYSTEM_PROMPT);
    generator.generate(&request).await
}

/// Load today's journal and meals, then run the trainer analysis.
///
/// # Errors
///
/// Returns store errors on read failure. A failed generation is `Ok(None)`,
/// not an error.
pub async fn analyze_today(
    store: &dyn DocumentStore,
    generator: &dyn TextGenerator,
    scope: &UserScope,
    now: DateTime<Local>,
) -> AppResult<Option<String>> {
    let log = journal::load_daily_log(store, scope, now.date_naive()).await?;
    let meals = food::entries_for_day(store, scope, now).await?;
    Ok(daily_analysis(generator, &log, &meals).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailyLogField;
    use crate::store::InMemoryStore;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::Mutex;

    struct ScriptedGenerator {
        reply: Option<String>,
        seen: Mutex<Vec<GenerateRequest>>,
    }

    impl ScriptedGenerator {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_owned()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn last_request(&self) -> GenerateRequest {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn generate(&self, request: &GenerateRequest) -> Option<String> {
            self.seen.lock().unwrap().push(request.clone());
            self.reply.clone()
        }
    }

    fn meal(name: &str, kcal: f64, timestamp: i64) -> FoodLogEntry {
        FoodLogEntry {
            id: None,
            name: name.to_owned(),
            kcal: Some(kcal),
            protein: None,
            carbs: None,
            fat: None,
            date: "2/10/2026".to_owned(),
            timestamp,
            time: "12:00".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_prompt_carries_body_data_and_meals() {
        let generator = ScriptedGenerator::replying("Solid day. Get to bed earlier.");
        let mut log = DailyLog::for_date("2026-02-10".parse().unwrap());
        log.weight = Some(74.5);
        log.sleep_hours = Some(6.5);
        log.energy_level = Some(4);
        let meals = [meal("Oatmeal", 150.0, 1), meal("Pad thai", 550.0, 2)];

        let advice = daily_analysis(&generator, &log, &meals).await;
        assert_eq!(advice.as_deref(), Some("Solid day. Get to bed earlier."));

        let request = generator.last_request();
        assert!(request.prompt.contains("weight 74.5 kg"));
        assert!(request.prompt.contains("energy 4/5"));
        assert!(request.prompt.contains("stress not logged"));
        assert!(request.prompt.contains("Oatmeal, Pad thai"));
        assert!(request.prompt.contains("(700 kcal)"));
        assert_eq!(
            request.system_instruction.as_deref(),
            Some(TRAINER_SYSTEM_PROMPT)
        );
        assert_eq!(request.format, crate::llm::ResponseFormat::Text);
    }

    #[tokio::test]
    async fn test_empty_day_still_asks_for_advice() {
        let generator = ScriptedGenerator::replying("Log something first!");
        let log = DailyLog::for_date("2026-02-10".parse().unwrap());

        let advice = daily_analysis(&generator, &log, &[]).await;
        assert!(advice.is_some());

        let request = generator.last_request();
        assert!(request.prompt.contains("weight not logged"));
        assert!(request.prompt.contains("Food today: none (0 kcal)"));
    }

    #[tokio::test]
    async fn test_analyze_today_reads_journal_and_meals() {
        let store = InMemoryStore::new();
        let scope = UserScope::new("pierre-fitness", "u1");
        let generator = ScriptedGenerator::replying("Nice balance today.");
        let now = Local.with_ymd_and_hms(2026, 2, 10, 18, 0, 0).unwrap();

        journal::update_daily_field(&store, &scope, now.date_naive(), DailyLogField::Weight(75.0))
            .await
            .unwrap();

        let advice = analyze_today(&store, &generator, &scope, now).await.unwrap();
        assert_eq!(advice.as_deref(), Some("Nice balance today."));
        assert!(generator.last_request().prompt.contains("weight 75 kg"));
    }
}
