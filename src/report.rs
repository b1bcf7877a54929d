// 📝 Report - The three statistics, as text or JSON

use crate::aggregate::AggregateResult;
use crate::top_foods::top_food_counts;
use anyhow::Result;
use chrono::Month;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodCount {
    pub food: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub month: String,
    pub count: u64,
}

/// Everything the presentation layer prints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulationReport {
    pub average_siblings: u64,

    /// How many foods were asked for; `top_foods` may hold fewer
    pub top_requested: usize,
    pub top_foods: Vec<FoodCount>,

    /// All twelve months, January first
    pub birth_months: Vec<MonthCount>,
}

impl PopulationReport {
    pub fn from_result(result: &AggregateResult, top: usize) -> Self {
        let top_foods = top_food_counts(result, top)
            .into_iter()
            .map(|(food, count)| FoodCount { food, count })
            .collect();

        let birth_months = result
            .months_in_order()
            .into_iter()
            .map(|(month, count)| MonthCount {
                month: month_name(month).to_string(),
                count,
            })
            .collect();

        PopulationReport {
            average_siblings: result.average_siblings(),
            top_requested: top,
            top_foods,
            birth_months,
        }
    }

    /// Three lines: average siblings, favourite foods, births per month
    ///
    /// The food line is labelled after the requested count, not the number found.
    pub fn render_text(&self) -> String {
        let foods: Vec<String> = self
            .top_foods
            .iter()
            .map(|f| format!(" {} ({})", f.food, f.count))
            .collect();

        let months: Vec<String> = self
            .birth_months
            .iter()
            .map(|m| format!(" {} ({})", m.month, m.count))
            .collect();

        format!(
            "Average siblings: {}\n{}:{}\nBirth Months:{}\n",
            self.average_siblings,
            favourite_foods_label(self.top_requested),
            foods.join(","),
            months.join(",")
        )
    }

    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => self.render_json(),
        }
    }
}

/// "Three favourite foods" for k = 3; digits past ten
pub fn favourite_foods_label(k: usize) -> String {
    const WORDS: [&str; 11] = [
        "Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
    ];

    let count = match WORDS.get(k) {
        Some(word) => word.to_string(),
        None => k.to_string(),
    };
    let noun = if k == 1 { "favourite food" } else { "favourite foods" };

    format!("{} {}", count, noun)
}

/// English month name ("January")
pub fn month_name(month: Month) -> &'static str {
    month.name()
}
