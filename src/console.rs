//! Interactive terminal front end.
//!
//! Reads one line at a time from any async reader and writes plain text
//! to any writer, so the whole flow can be driven from a script. A failed
//! network call prints a warning and leaves the user on the same screen.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::advisor::TrailAdvisor;
use crate::constants::{MAX_ELEVATION_FEET, MAX_LENGTH_MILES};
use crate::error::TrailError;
use crate::filters::{validate_elevation, validate_length, Difficulty, RecommendationRequest, Season, TrailFilters};
use crate::formatters::{format_completion, format_recommendations, format_weather_report};
use crate::models::Completion;
use crate::session::{Screen, SearchAction, Session};

const RULE: &str = "─────────────────────────────────";

pub struct Console<'a, R, W> {
    advisor: &'a TrailAdvisor,
    lines: Lines<R>,
    out: W,
    session: Session,
    /// Popular trails for the current city, fetched once per visit and
    /// kept while the listing is dismissed.
    popular: Option<Completion>,
}

impl<'a, R, W> Console<'a, R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(advisor: &'a TrailAdvisor, input: R, out: W) -> Self {
        Self {
            advisor,
            lines: input.lines(),
            out,
            session: Session::new(),
            popular: None,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs until the user quits or input is closed.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let keep_going = match self.session.screen().clone() {
                Screen::Home => self.home().await?,
                Screen::Search(state) => self.search(&state.city).await?,
            };
            if !keep_going {
                break;
            }
        }
        writeln!(self.out, "\nGoodbye!")?;
        self.out.flush()?;
        Ok(())
    }

    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        let line = self.lines.next_line().await?;
        if line.is_none() {
            tracing::debug!("Console input closed");
        }
        Ok(line.map(|l| l.trim().to_string()))
    }

    fn warn(&mut self, context: &str, error: &TrailError) -> Result<()> {
        tracing::warn!("{}: {}", context, error);
        writeln!(self.out, "Warning: {}", error.user_message())?;
        Ok(())
    }

    async fn home(&mut self) -> Result<bool> {
        writeln!(self.out, "{RULE}\n Hiking Trail Recommendations\n{RULE}")?;
        writeln!(self.out, "Enter a city to get personalized hiking trail recommendations.")?;
        loop {
            let Some(input) = self.read_line("Enter the city: ").await? else {
                return Ok(false);
            };
            if self.session.enter_city(&input) {
                self.popular = None;
                return Ok(true);
            }
        }
    }

    async fn search(&mut self, city: &str) -> Result<bool> {
        writeln!(self.out, "\n{RULE}\n Search Hiking Trails in {city}\n{RULE}")?;
        self.show_weather(city).await?;
        self.show_popular(city).await?;

        loop {
            writeln!(self.out, "\n{}", SearchAction::MENU)?;
            let Some(input) = self.read_line("> ").await? else {
                return Ok(false);
            };
            let action = match input.parse::<SearchAction>() {
                Ok(action) => action,
                Err(message) => {
                    writeln!(self.out, "{message}")?;
                    continue;
                }
            };

            match action {
                SearchAction::Recommend => {
                    if !self.recommend(city).await? {
                        return Ok(false);
                    }
                }
                SearchAction::Weather => self.show_weather(city).await?,
                SearchAction::Popular => {
                    self.session.show_popular();
                    self.show_popular(city).await?;
                }
                SearchAction::Dismiss => {
                    self.session.dismiss_popular();
                    writeln!(self.out, "Popular trails dismissed.")?;
                }
                SearchAction::Back => {
                    self.session.back_to_city_selection();
                    self.popular = None;
                    writeln!(self.out)?;
                    return Ok(true);
                }
                SearchAction::Quit => return Ok(false),
            }
        }
    }

    async fn show_weather(&mut self, city: &str) -> Result<()> {
        match self.advisor.weather(city).await {
            Ok(report) => write!(self.out, "\n{}", format_weather_report(&report))?,
            Err(e) => self.warn("Weather lookup failed", &e)?,
        }
        Ok(())
    }

    async fn show_popular(&mut self, city: &str) -> Result<()> {
        if matches!(self.session.screen(), Screen::Search(s) if s.popular_dismissed) {
            return Ok(());
        }
        if self.popular.is_none() {
            match self.advisor.popular_trails(city).await {
                Ok(completion) => self.popular = Some(completion),
                Err(e) => return self.warn("Popular trails failed", &e),
            }
        }
        if let Some(completion) = &self.popular {
            let text = format_completion(completion);
            write!(self.out, "\nTop 5 Popular Trails in {city}\n\n{text}")?;
        }
        Ok(())
    }

    /// Collects filters, then prints the summary and recommendations.
    /// Returns false when input closes mid-way.
    async fn recommend(&mut self, city: &str) -> Result<bool> {
        let defaults = TrailFilters::default();

        let difficulty_prompt = format!(
            "Difficulty Level {} (default {}): ",
            menu(&Difficulty::ALL.map(|d| d.as_str())),
            defaults.difficulty
        );
        let Some(difficulty) = self
            .ask(&difficulty_prompt, defaults.difficulty, |s| s.parse::<Difficulty>().map_err(|e| e.to_string()))
            .await?
        else {
            return Ok(false);
        };

        let length_prompt = format!(
            "Trail Length in miles, 0-{MAX_LENGTH_MILES} in steps of 0.5 (default {:.1}): ",
            defaults.length_miles
        );
        let Some(length_miles) = self
            .ask(&length_prompt, defaults.length_miles, |s| {
                let miles: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
                validate_length(miles).map_err(|e| e.to_string())?;
                Ok(miles)
            })
            .await?
        else {
            return Ok(false);
        };

        let elevation_prompt = format!(
            "Elevation Gain in feet, 0-{MAX_ELEVATION_FEET} in steps of 100 (default {}): ",
            defaults.elevation_feet
        );
        let Some(elevation_feet) = self
            .ask(&elevation_prompt, defaults.elevation_feet, |s| {
                let feet: u32 = s.parse().map_err(|_| format!("'{s}' is not a whole number"))?;
                validate_elevation(feet).map_err(|e| e.to_string())?;
                Ok(feet)
            })
            .await?
        else {
            return Ok(false);
        };

        let season_prompt = format!(
            "Season {} (default {}): ",
            menu(&Season::ALL.map(|s| s.as_str())),
            defaults.season
        );
        let Some(season) = self
            .ask(&season_prompt, defaults.season, |s| s.parse::<Season>().map_err(|e| e.to_string()))
            .await?
        else {
            return Ok(false);
        };

        let Some(pet_friendly) = self
            .ask("Pet-Friendly? [y/N]: ", defaults.pet_friendly, parse_yes_no)
            .await?
        else {
            return Ok(false);
        };

        let Some(preferences) = self.read_line("Specific Needs (optional): ").await? else {
            return Ok(false);
        };

        let filters = TrailFilters::new(difficulty, length_miles, elevation_feet, season, pet_friendly)?;
        let request = RecommendationRequest::new(city, filters, Some(preferences));

        let summary = match self.advisor.summary(&request).await {
            Ok(summary) => summary,
            Err(e) => {
                self.warn("Summary failed", &e)?;
                return Ok(true);
            }
        };
        match self.advisor.recommendations(&request).await {
            Ok(completion) => {
                let text = format_recommendations(city, &summary, &completion);
                write!(self.out, "\n{text}")?;
            }
            Err(e) => self.warn("Recommendations failed", &e)?,
        }
        Ok(true)
    }

    /// Prompts until `parse` accepts the input; blank input takes `default`.
    async fn ask<T>(
        &mut self,
        prompt: &str,
        default: T,
        parse: impl Fn(&str) -> std::result::Result<T, String>,
    ) -> Result<Option<T>> {
        loop {
            let Some(input) = self.read_line(prompt).await? else {
                return Ok(None);
            };
            if input.is_empty() {
                return Ok(Some(default));
            }
            match parse(&input) {
                Ok(value) => return Ok(Some(value)),
                Err(message) => writeln!(self.out, "  {message}")?,
            }
        }
    }
}

fn menu(options: &[&str]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, name)| format!("[{}] {}", i + 1, name))
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_yes_no(input: &str) -> std::result::Result<bool, String> {
    match input.to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(format!("please answer y or n, not '{input}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_numbers_from_one() {
        assert_eq!(menu(&["Easy", "Moderate"]), "[1] Easy [2] Moderate");
    }

    #[test]
    fn yes_no_accepts_words_and_letters() {
        assert_eq!(parse_yes_no("Y"), Ok(true));
        assert_eq!(parse_yes_no("no"), Ok(false));
        assert!(parse_yes_no("maybe").is_err());
    }
}
