//! Tests for report rendering: timezone columns, CSV cells and JSON output.

use availability_engine::{
    AvailabilityError, DateBounds, Horizon, LeagueAvailability, ReportConfig, ReportFormat,
    ReportWriter, RuleRecord, Simulator, Tier, TimeInstant, TimezoneColumn, WallTime,
};
use chrono::{NaiveDate, TimeZone, Utc, Weekday};

// ── Helpers ─────────────────────────────────────────────────────────────────

const UTC_COLUMN: &str =
    r#"[{"name": "UTC", "timezone": "UTC", "date_format": "%d/%m", "time_format": "%H:%M"}]"#;

fn add(league: &mut LeagueAvailability, team: &str, player: &str, from: u8, to: u8, tier: Tier) {
    league.insert(&RuleRecord {
        team: team.to_string(),
        player: player.to_string(),
        timezone: chrono_tz::UTC,
        weekdays: vec![Weekday::Mon],
        from: WallTime::new(from, 0).unwrap(),
        to: WallTime::new(to, 0).unwrap(),
        tier,
        dates: DateBounds::unbounded(),
    });
}

/// Alpha: A Mon 18:00-20:00 Yes, B Mon 18:00-21:00 Maybe.
fn alpha() -> LeagueAvailability {
    let mut league = LeagueAvailability::new();
    add(&mut league, "Alpha", "A", 18, 20, Tier::Yes);
    add(&mut league, "Alpha", "B", 18, 21, Tier::Maybe);
    league
}

fn week() -> Horizon {
    Horizon::weeks_from(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), 1).unwrap()
}

fn team_report(
    league: &LeagueAvailability,
    config: &ReportConfig,
    format: ReportFormat,
    quorum: u32,
) -> String {
    let intervals = Simulator::new(league, quorum).team_intervals(&week());
    let mut out = Vec::new();
    ReportWriter::new(config, format)
        .write_teams(&mut out, league, &intervals)
        .unwrap();
    String::from_utf8(out).unwrap()
}

fn player_report(league: &LeagueAvailability, config: &ReportConfig, quorum: u32) -> String {
    let intervals = Simulator::new(league, quorum).player_intervals(&week());
    let mut out = Vec::new();
    ReportWriter::new(config, ReportFormat::Csv)
        .write_players(&mut out, league, &intervals)
        .unwrap();
    String::from_utf8(out).unwrap()
}

// ── CSV ─────────────────────────────────────────────────────────────────────

#[test]
fn team_report_csv() {
    let config = ReportConfig::from_json(UTC_COLUMN).unwrap();
    let report = team_report(&alpha(), &config, ReportFormat::Csv, 1);
    assert_eq!(
        report,
        "\"UTC\",\"Alpha\"\n\
         \"Mo 02/03 18:00 to 20:00\",\"'1\"\n\
         \"Mo 02/03 20:00 to 21:00\",\"'(1)\"\n"
    );
}

#[test]
fn team_report_renders_count_ranges_and_blank_teams() {
    let mut league = alpha();
    add(&mut league, "Beta", "C", 10, 12, Tier::Yes);
    add(&mut league, "Beta", "D", 11, 12, Tier::Yes);

    let config = ReportConfig::from_json(UTC_COLUMN).unwrap();
    let report = team_report(&league, &config, ReportFormat::Csv, 1);
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(lines[0], "\"UTC\",\"Alpha\",\"Beta\"");
    assert_eq!(lines[1], "\"Mo 02/03 10:00 to 12:00\",\"\",\"'1-2\"");
    assert_eq!(lines.len(), 4);
}

#[test]
fn player_report_csv() {
    let config = ReportConfig::from_json(UTC_COLUMN).unwrap();
    let report = player_report(&alpha(), &config, 1);
    assert_eq!(
        report,
        "\"UTC\",\"Alpha\",\"Alpha / A\",\"Alpha / B\"\n\
         \"Mo 02/03 18:00 to 20:00\",\"'2\",\"X\",\"?\"\n\
         \"Mo 02/03 20:00 to 21:00\",\"'(1)\",\"\",\"?\"\n"
    );
}

#[test]
fn default_columns_cover_europe_and_us() {
    let report = team_report(&alpha(), &ReportConfig::default(), ReportFormat::Csv, 1);
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(
        lines[0],
        "\"WET/WEST (Western Europe)\",\"CET/CEST (Central Europe)\",\"Pacific (US)\",\
         \"Mountain (US)\",\"Central (US)\",\"Eastern (US)\",\"Alpha\""
    );
    assert_eq!(
        lines[1],
        "\"Mo 02/03 18:00 to 20:00\",\"Mo 02/03 19:00 to 21:00\",\
         \"Mo 03/02 10:00 AM to 12:00 PM\",\"Mo 03/02 11:00 AM to 01:00 PM\",\
         \"Mo 03/02 12:00 PM to 02:00 PM\",\"Mo 03/02 01:00 PM to 03:00 PM\",\"'1\""
    );
}

#[test]
fn empty_report_has_header_only() {
    let league = LeagueAvailability::new();
    let config = ReportConfig::from_json(UTC_COLUMN).unwrap();
    assert_eq!(team_report(&league, &config, ReportFormat::Csv, 4), "\"UTC\"\n");
}

// ── JSON ────────────────────────────────────────────────────────────────────

#[test]
fn team_report_json() {
    let config = ReportConfig::from_json(UTC_COLUMN).unwrap();
    let report = team_report(&alpha(), &config, ReportFormat::Json, 1);
    let rows: serde_json::Value = serde_json::from_str(&report).unwrap();

    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert!(rows[0]["start"].as_str().unwrap().starts_with("2026-03-02T18:00:00"));
    assert_eq!(rows[0]["teams"]["Alpha"]["tier"], "Yes");
    assert_eq!(rows[0]["teams"]["Alpha"]["players"]["min"], 1);
    assert_eq!(rows[1]["teams"]["Alpha"]["tier"], "Maybe");
    assert_eq!(rows[0]["local"]["UTC"], "Mo 02/03 18:00 to 20:00");
}

// ── Configuration ───────────────────────────────────────────────────────────

#[test]
fn config_rejects_unknown_timezone() {
    let json =
        r#"[{"name": "X", "timezone": "Mars/Base", "date_format": "%d", "time_format": "%H"}]"#;
    assert!(matches!(
        ReportConfig::from_json(json),
        Err(AvailabilityError::InvalidConfig(_))
    ));
}

#[test]
fn config_rejects_empty_list() {
    assert!(matches!(
        ReportConfig::from_json("[]"),
        Err(AvailabilityError::InvalidConfig(_))
    ));
}

#[test]
fn config_rejects_malformed_json() {
    assert!(matches!(
        ReportConfig::from_json(r#"[{"name": "X"}]"#),
        Err(AvailabilityError::Json(_))
    ));
}

#[test]
fn config_keeps_column_order() {
    let json = r#"[
        {"name": "Tokyo", "timezone": "Asia/Tokyo", "date_format": "%m/%d", "time_format": "%H:%M"},
        {"name": "London", "timezone": "Europe/London", "date_format": "%d/%m", "time_format": "%H:%M"}
    ]"#;
    let config = ReportConfig::from_json(json).unwrap();
    let names: Vec<&str> = config.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Tokyo", "London"]);
    assert_eq!(config.columns[0].timezone, chrono_tz::Asia::Tokyo);
}

// ── Column formatting ───────────────────────────────────────────────────────

fn instant(day: u32, hour: u32) -> TimeInstant {
    TimeInstant::new(Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap())
}

#[test]
fn range_on_one_day_omits_end_date() {
    let column = TimezoneColumn::new("UTC", "UTC", "%d/%m", "%H:%M").unwrap();
    let range = column.time_range(&instant(2, 18), &instant(2, 20));
    assert_eq!(range, "Mo 02/03 18:00 to 20:00");
}

#[test]
fn range_across_midnight_repeats_day_and_date() {
    let column = TimezoneColumn::new("UTC", "UTC", "%d/%m", "%H:%M").unwrap();
    let range = column.time_range(&instant(6, 22), &instant(7, 2));
    assert_eq!(range, "Fr 06/03 22:00 to Sa 07/03 02:00");
}

#[test]
fn invalid_column_rejected() {
    assert!(TimezoneColumn::new("X", "Mars/Olympus", "%d", "%H").is_err());
    assert!(TimezoneColumn::new("X", "UTC", "%Q", "%H").is_err());
}
