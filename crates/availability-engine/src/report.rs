//! Report output: one row per compressed interval.
//!
//! Each row starts with one "from to to" cell per configured timezone column,
//! followed by one cell per team (team report) or per team and player
//! (detail report). Team cells are prefixed with `'` so spreadsheet tools
//! keep ranges such as `4-6` as text; `Maybe` counts are wrapped in
//! parentheses.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Utc, Weekday};
use chrono_tz::Tz;
use csv::{QuoteStyle, WriterBuilder};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AvailabilityError, Result};
use crate::instant::TimeInstant;
use crate::league::LeagueAvailability;
use crate::simulator::{PlayerInterval, TeamInterval};
use crate::tier::Tier;

/// A named display column: the timezone plus strftime patterns for its cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimezoneColumn {
    pub name: String,
    pub timezone: Tz,
    pub date_format: String,
    pub time_format: String,
}

impl TimezoneColumn {
    /// Validate the timezone identifier and both strftime patterns.
    pub fn new(name: &str, timezone: &str, date_format: &str, time_format: &str) -> Result<Self> {
        let timezone: Tz = timezone.parse().map_err(|_| {
            AvailabilityError::InvalidConfig(format!(
                "unknown timezone {:?} for column {:?}",
                timezone, name
            ))
        })?;
        for pattern in [date_format, time_format] {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(AvailabilityError::InvalidConfig(format!(
                    "invalid format {:?} for column {:?}",
                    pattern, name
                )));
            }
        }
        Ok(TimezoneColumn {
            name: name.to_string(),
            timezone,
            date_format: date_format.to_string(),
            time_format: time_format.to_string(),
        })
    }

    fn fixed(name: &str, timezone: Tz, date_format: &str, time_format: &str) -> Self {
        TimezoneColumn {
            name: name.to_string(),
            timezone,
            date_format: date_format.to_string(),
            time_format: time_format.to_string(),
        }
    }

    /// `"<Dd> <date> <time> to <time>"`, repeating the day and date on the
    /// end only when the interval crosses a local date boundary.
    pub fn time_range(&self, start: &TimeInstant, end: &TimeInstant) -> String {
        let from = start.in_timezone(self.timezone);
        let to = end.in_timezone(self.timezone);

        let from_text = format!(
            "{} {} {}",
            day_abbreviation(from.weekday()),
            from.format(&self.date_format),
            from.format(&self.time_format)
        );
        let to_text = if from.date_naive() == to.date_naive() {
            to.format(&self.time_format).to_string()
        } else {
            format!(
                "{} {} {}",
                day_abbreviation(to.weekday()),
                to.format(&self.date_format),
                to.format(&self.time_format)
            )
        };
        format!("{} to {}", from_text, to_text)
    }
}

/// The timezone columns of a report, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub columns: Vec<TimezoneColumn>,
}

#[derive(Debug, Deserialize)]
struct ColumnEntry {
    name: String,
    timezone: String,
    date_format: String,
    time_format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        use chrono_tz::{Europe, US};

        const EU: (&str, &str) = ("%d/%m", "%H:%M");
        const NA: (&str, &str) = ("%m/%d", "%I:%M %p");

        let columns = [
            ("WET/WEST (Western Europe)", Europe::London, EU),
            ("CET/CEST (Central Europe)", Europe::Paris, EU),
            ("Pacific (US)", US::Pacific, NA),
            ("Mountain (US)", US::Mountain, NA),
            ("Central (US)", US::Central, NA),
            ("Eastern (US)", US::Eastern, NA),
        ];
        ReportConfig {
            columns: columns
                .into_iter()
                .map(|(name, tz, (date, time))| TimezoneColumn::fixed(name, tz, date, time))
                .collect(),
        }
    }
}

impl ReportConfig {
    /// Parse a JSON array of `{ "name", "timezone", "date_format", "time_format" }`.
    pub fn from_json(text: &str) -> Result<Self> {
        let entries: Vec<ColumnEntry> = serde_json::from_str(text)?;
        if entries.is_empty() {
            return Err(AvailabilityError::InvalidConfig(
                "at least one timezone column is required".to_string(),
            ));
        }
        let columns = entries
            .iter()
            .map(|e| TimezoneColumn::new(&e.name, &e.timezone, &e.date_format, &e.time_format))
            .collect::<Result<Vec<_>>>()?;
        Ok(ReportConfig { columns })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        ReportConfig::from_json(&fs::read_to_string(path)?)
    }

    fn time_ranges(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<(&str, String)> {
        let (start, end) = (TimeInstant::new(start), TimeInstant::new(end));
        self.columns
            .iter()
            .map(|column| (column.name.as_str(), column.time_range(&start, &end)))
            .collect()
    }
}

/// Output encoding of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

/// Writes compressed intervals in the configured format.
#[derive(Debug, Clone, Copy)]
pub struct ReportWriter<'a> {
    config: &'a ReportConfig,
    format: ReportFormat,
}

impl<'a> ReportWriter<'a> {
    pub fn new(config: &'a ReportConfig, format: ReportFormat) -> Self {
        ReportWriter { config, format }
    }

    /// Team report: timezone columns, then one column per team.
    pub fn write_teams<W: Write>(
        &self,
        out: W,
        league: &LeagueAvailability,
        intervals: &[TeamInterval],
    ) -> Result<()> {
        match self.format {
            ReportFormat::Json => {
                self.write_json(out, intervals, |i: &TeamInterval| (i.start, i.end))
            }
            ReportFormat::Csv => {
                let titles = league.team_names().collect::<Vec<_>>();
                let rows = intervals.iter().map(|interval| {
                    let mut cells = BTreeMap::new();
                    for (team, span) in &interval.teams {
                        let count = span.players.to_string();
                        cells.insert(team.as_str(), count_cell(span.tier, &count));
                    }
                    (interval.start, interval.end, cells)
                });
                self.write_csv(out, &titles, rows)
            }
        }
    }

    /// Detail report: timezone columns, then teams and players sorted together.
    pub fn write_players<W: Write>(
        &self,
        out: W,
        league: &LeagueAvailability,
        intervals: &[PlayerInterval],
    ) -> Result<()> {
        match self.format {
            ReportFormat::Json => {
                self.write_json(out, intervals, |i: &PlayerInterval| (i.start, i.end))
            }
            ReportFormat::Csv => {
                let titles = league
                    .team_names()
                    .chain(league.player_names())
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect::<Vec<_>>();
                let rows = intervals.iter().map(|interval| {
                    let mut cells = BTreeMap::new();
                    for (player, tier) in &interval.players {
                        let mark = if *tier == Tier::Yes { "X" } else { "?" };
                        cells.insert(player.as_str(), mark.to_string());
                    }
                    for (team, status) in &interval.teams {
                        let count = status.players.to_string();
                        cells.insert(team.as_str(), count_cell(status.tier, &count));
                    }
                    (interval.start, interval.end, cells)
                });
                self.write_csv(out, &titles, rows)
            }
        }
    }

    fn write_csv<'r, W, I>(&self, out: W, titles: &[&str], rows: I) -> Result<()>
    where
        W: Write,
        I: Iterator<Item = (DateTime<Utc>, DateTime<Utc>, BTreeMap<&'r str, String>)>,
    {
        let mut csv = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .from_writer(out);

        let header = self
            .config
            .columns
            .iter()
            .map(|column| column.name.as_str())
            .chain(titles.iter().copied());
        csv.write_record(header)?;

        for (start, end, mut cells) in rows {
            let record = self
                .config
                .time_ranges(start, end)
                .into_iter()
                .map(|(_, range)| range)
                .chain(titles.iter().map(|title| cells.remove(*title).unwrap_or_default()));
            csv.write_record(record)?;
        }

        csv.flush()?;
        Ok(())
    }

    fn write_json<W, T, F>(&self, mut out: W, intervals: &[T], bounds: F) -> Result<()>
    where
        W: Write,
        T: Serialize,
        F: Fn(&T) -> (DateTime<Utc>, DateTime<Utc>),
    {
        let mut rows = Vec::with_capacity(intervals.len());
        for interval in intervals {
            let (start, end) = bounds(interval);
            let local: Map<String, Value> = self
                .config
                .time_ranges(start, end)
                .into_iter()
                .map(|(name, range)| (name.to_string(), Value::String(range)))
                .collect();

            let mut row = serde_json::to_value(interval)?;
            if let Value::Object(fields) = &mut row {
                fields.insert("local".to_string(), Value::Object(local));
            }
            rows.push(row);
        }

        serde_json::to_writer_pretty(&mut out, &rows)?;
        writeln!(out)?;
        Ok(())
    }
}

/// `'N` for Yes, `'(N)` for Maybe.
fn count_cell(tier: Tier, count: &str) -> String {
    if tier == Tier::Yes {
        format!("'{}", count)
    } else {
        format!("'({})", count)
    }
}

fn day_abbreviation(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_cells_mark_maybe_with_parentheses() {
        assert_eq!(count_cell(Tier::Yes, "4-6"), "'4-6");
        assert_eq!(count_cell(Tier::Maybe, "3"), "'(3)");
    }
}
