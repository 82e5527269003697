//! CSV input: one availability window per row.
//!
//! The file may carry any preamble; data starts after the header row
//! `Team, Player, Time Zone, Day, From, To, Available, Date From, Date To`.
//! Empty `Team`, `Player`, `Time Zone`, `Day` and `Available` cells repeat the
//! value from the previous data row. The first invalid row aborts the load.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use chrono::{NaiveDate, Weekday};
use chrono_tz::Tz;
use csv::{ReaderBuilder, StringRecord};
use regex::Regex;

use crate::error::{AvailabilityError, Field, Result};
use crate::league::{LeagueAvailability, RuleRecord, DISPLAY_SEPARATOR};
use crate::rule::{DateBounds, WallTime};
use crate::tier::Tier;

/// Column titles of the header row, in order.
pub const HEADER: [&str; 9] = [
    "Team",
    "Player",
    "Time Zone",
    "Day",
    "From",
    "To",
    "Available",
    "Date From",
    "Date To",
];

static TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-1][0-9]|2[0-3]):([0-5][0-9])$").expect("valid time regex"));
static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("valid date regex"));

/// Load a league from a CSV file on disk.
pub fn load_league_from_path(path: impl AsRef<Path>) -> Result<LeagueAvailability> {
    let file = File::open(path.as_ref())?;
    load_league(file)
}

/// Load a league from CSV text.
pub fn load_league<R: Read>(reader: R) -> Result<LeagueAvailability> {
    let mut csv = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut league = LeagueAvailability::new();
    let mut previous = FillDown::default();
    let mut header = false;
    let mut records = 0usize;

    for row in csv.records() {
        let row = row?;
        let line = row.position().map_or(0, |pos| pos.line());

        if row.iter().eq(HEADER.iter().copied()) {
            header = true;
            continue;
        }
        if !header || row.iter().all(str::is_empty) {
            continue;
        }

        let record = parse_row(line, &row, &mut previous)?;
        log::debug!(
            "line {}: {} / {} {:?} {}-{} {}",
            line,
            record.team,
            record.player,
            record.weekdays,
            record.from,
            record.to,
            record.tier
        );
        league.insert(&record);
        records += 1;
    }

    if !header {
        return Err(AvailabilityError::MissingHeader);
    }

    log::info!(
        "loaded {} records: {} teams, {} players, {} rules",
        records,
        league.team_names().count(),
        league.player_names().count(),
        league.rule_count()
    );
    Ok(league)
}

/// Values carried forward into empty cells of the next row.
#[derive(Debug, Default)]
struct FillDown {
    team: String,
    player: String,
    time_zone: String,
    day: String,
    available: String,
}

fn fill(cell: &str, previous: &str) -> String {
    if cell.is_empty() {
        previous.to_string()
    } else {
        cell.to_string()
    }
}

fn parse_row(line: u64, row: &StringRecord, previous: &mut FillDown) -> Result<RuleRecord> {
    let fields: Vec<&str> = row.iter().collect();
    let &[team, player, time_zone, day, from, to, available, date_from, date_to] =
        fields.as_slice()
    else {
        return Err(AvailabilityError::invalid(
            line,
            Field::Columns,
            row.len().to_string(),
        ));
    };

    let team = fill(team, &previous.team);
    if team.is_empty() || team.contains(DISPLAY_SEPARATOR) {
        return Err(AvailabilityError::invalid(line, Field::Team, team));
    }
    let player = fill(player, &previous.player);
    if player.is_empty() {
        return Err(AvailabilityError::invalid(line, Field::Player, player));
    }

    let time_zone = fill(time_zone, &previous.time_zone).replace(' ', "_");
    let timezone: Tz = time_zone
        .parse()
        .map_err(|_| AvailabilityError::invalid(line, Field::TimeZone, time_zone.as_str()))?;

    let day = fill(day, &previous.day);
    let weekdays =
        parse_days(&day).ok_or_else(|| AvailabilityError::invalid(line, Field::Day, day.as_str()))?;

    let from = parse_time(from).ok_or_else(|| AvailabilityError::invalid(line, Field::From, from))?;
    let to = parse_time(to).ok_or_else(|| AvailabilityError::invalid(line, Field::To, to))?;

    let available = fill(available, &previous.available);
    let tier = Tier::from_token(&available)
        .ok_or_else(|| AvailabilityError::invalid(line, Field::Available, available.as_str()))?;

    let date_from = parse_optional_date(date_from)
        .ok_or_else(|| AvailabilityError::invalid(line, Field::DateFrom, date_from))?;
    let date_to = parse_optional_date(date_to)
        .ok_or_else(|| AvailabilityError::invalid(line, Field::DateTo, date_to))?;

    *previous = FillDown {
        team: team.clone(),
        player: player.clone(),
        time_zone,
        day,
        available,
    };

    Ok(RuleRecord {
        team,
        player,
        timezone,
        weekdays,
        from,
        to,
        tier,
        dates: DateBounds::new(date_from, date_to),
    })
}

fn weekday(token: &str) -> Option<Weekday> {
    match token {
        "Mon" => Some(Weekday::Mon),
        "Tue" => Some(Weekday::Tue),
        "Wed" => Some(Weekday::Wed),
        "Thu" => Some(Weekday::Thu),
        "Fri" => Some(Weekday::Fri),
        "Sat" => Some(Weekday::Sat),
        "Sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Expand `Mon`, `Mon,Wed,Fri` and `Fri-Mon` (ranges wrap past Sunday).
pub fn parse_days(text: &str) -> Option<Vec<Weekday>> {
    let mut days = Vec::new();
    let mut push = |day: Weekday| {
        if !days.contains(&day) {
            days.push(day);
        }
    };

    for token in text.split(',') {
        match token.split_once('-') {
            Some((first, last)) => {
                let last = weekday(last)?;
                let mut day = weekday(first)?;
                push(day);
                while day != last {
                    day = day.succ();
                    push(day);
                }
            }
            None => push(weekday(token)?),
        }
    }
    Some(days)
}

/// `HH:MM`, 00:00 to 23:59.
pub fn parse_time(text: &str) -> Option<WallTime> {
    let caps = TIME.captures(text)?;
    WallTime::new(caps[1].parse().ok()?, caps[2].parse().ok()?)
}

/// Empty means unbounded (`Some(None)`); otherwise a real `YYYY-MM-DD` date.
fn parse_optional_date(text: &str) -> Option<Option<NaiveDate>> {
    if text.is_empty() {
        return Some(None);
    }
    let caps = DATE.captures(text)?;
    NaiveDate::from_ymd_opt(caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?)
        .map(Some)
}
