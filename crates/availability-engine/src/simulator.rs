//! Minute-by-minute timeline simulation and interval compression.
//!
//! The simulator evaluates the league once per minute over a [`Horizon`] and
//! collapses consecutive minutes with the same *signature* (the set of names
//! above `No` and their tiers) into one interval. Minutes where nothing is
//! available still split runs but never produce an interval.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::error::{AvailabilityError, Result};
use crate::instant::TimeInstant;
use crate::league::LeagueAvailability;
use crate::team::TeamStatus;
use crate::tier::Tier;

/// Half-open range of instants `[start, end)` walked at one-minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Horizon {
    /// An empty horizon is returned when `end` is not after `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Horizon {
            start,
            end: end.max(start),
        }
    }

    /// `weeks` weeks starting at midnight UTC of `day`.
    ///
    /// Fails with [`AvailabilityError::HorizonOutOfRange`] when the end
    /// cannot be represented.
    pub fn weeks_from(day: NaiveDate, weeks: u32) -> Result<Self> {
        let start = day.and_time(NaiveTime::MIN).and_utc();
        let end = Duration::try_weeks(i64::from(weeks))
            .and_then(|span| start.checked_add_signed(span))
            .ok_or(AvailabilityError::HorizonOutOfRange { start: day, weeks })?;
        Ok(Horizon::new(start, end))
    }

    /// `weeks` weeks starting at midnight UTC today.
    pub fn weeks_from_today(weeks: u32) -> Result<Self> {
        Horizon::weeks_from(Utc::now().date_naive(), weeks)
    }

    pub fn minutes(&self) -> impl Iterator<Item = DateTime<Utc>> {
        let end = self.end;
        std::iter::successors(Some(self.start), |t| Some(*t + Duration::minutes(1)))
            .take_while(move |t| *t < end)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Smallest and largest player count seen for a team during an interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub fn single(count: u32) -> Self {
        CountRange {
            min: count,
            max: count,
        }
    }

    pub fn include(&mut self, count: u32) {
        self.min = self.min.min(count);
        self.max = self.max.max(count);
    }
}

impl fmt::Display for CountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

/// A team's tier for a whole interval and the range of counts behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamSpan {
    pub tier: Tier,
    pub players: CountRange,
}

/// One compressed interval of the team report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub teams: BTreeMap<String, TeamSpan>,
}

/// One compressed interval of the player-detail report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub players: BTreeMap<String, Tier>,
    /// Lenient team summary evaluated at `start`.
    pub teams: BTreeMap<String, TeamStatus>,
}

type Signature = BTreeMap<String, Tier>;

/// A per-minute sample that can be reduced to its signature.
trait Sample {
    fn signature(&self) -> Signature;
}

impl Sample for BTreeMap<String, TeamStatus> {
    fn signature(&self) -> Signature {
        self.iter()
            .map(|(name, status)| (name.clone(), status.tier))
            .collect()
    }
}

impl Sample for BTreeSet<(String, Tier)> {
    fn signature(&self) -> Signature {
        self.iter().cloned().collect()
    }
}

struct Run<A> {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    signature: Signature,
    acc: A,
}

/// Run-length compress `sample` over `horizon`.
///
/// A new run starts on the first minute and whenever the signature differs
/// from the previous minute's; `record` folds each minute's sample into the
/// open run's accumulator. Runs with an empty signature are dropped.
fn compress<T, A, S, R>(horizon: &Horizon, mut sample: S, mut record: R) -> Vec<Run<A>>
where
    T: Sample,
    A: Default,
    S: FnMut(&TimeInstant) -> T,
    R: FnMut(&mut A, &T),
{
    fn close<A>(runs: &mut Vec<Run<A>>, mut run: Run<A>, end: DateTime<Utc>) {
        if !run.signature.is_empty() {
            run.end = end;
            runs.push(run);
        }
    }

    let mut runs = Vec::new();
    let mut open: Option<Run<A>> = None;

    for minute in horizon.minutes() {
        let value = sample(&TimeInstant::new(minute));
        let signature = value.signature();

        if open.as_ref().is_none_or(|run| run.signature != signature) {
            if let Some(run) = open.take() {
                close(&mut runs, run, minute);
            }
            open = Some(Run {
                start: minute,
                end: minute,
                signature,
                acc: A::default(),
            });
        }

        if let Some(run) = open.as_mut() {
            record(&mut run.acc, &value);
        }
    }

    if let Some(run) = open.take() {
        close(&mut runs, run, horizon.end);
    }
    runs
}

/// Drives a league through a horizon and produces compressed intervals.
#[derive(Debug, Clone, Copy)]
pub struct Simulator<'a> {
    league: &'a LeagueAvailability,
    players_required: u32,
}

impl<'a> Simulator<'a> {
    pub fn new(league: &'a LeagueAvailability, players_required: u32) -> Self {
        Simulator {
            league,
            players_required,
        }
    }

    pub fn league(&self) -> &'a LeagueAvailability {
        self.league
    }

    pub fn players_required(&self) -> u32 {
        self.players_required
    }

    /// Team report: strict quorum per team, with per-team count ranges.
    pub fn team_intervals(&self, horizon: &Horizon) -> Vec<TeamInterval> {
        let runs = compress(
            horizon,
            |ts| self.league.teams_available_at(ts, self.players_required),
            |ranges: &mut BTreeMap<String, CountRange>, teams: &BTreeMap<String, TeamStatus>| {
                for (name, status) in teams {
                    ranges
                        .entry(name.clone())
                        .and_modify(|range| range.include(status.players))
                        .or_insert_with(|| CountRange::single(status.players));
                }
            },
        );

        let intervals: Vec<TeamInterval> = runs
            .into_iter()
            .map(|run| {
                let teams = run
                    .signature
                    .into_iter()
                    .map(|(name, tier)| {
                        let players = run.acc.get(&name).copied().unwrap_or_default();
                        (name, TeamSpan { tier, players })
                    })
                    .collect();
                TeamInterval {
                    start: run.start,
                    end: run.end,
                    teams,
                }
            })
            .collect();

        log::debug!(
            "team simulation from {} to {}: {} intervals",
            horizon.start,
            horizon.end,
            intervals.len()
        );
        intervals
    }

    /// Player-detail report: individual tiers, plus the lenient team summary
    /// at the start of each interval.
    pub fn player_intervals(&self, horizon: &Horizon) -> Vec<PlayerInterval> {
        let runs = compress(
            horizon,
            |ts| self.league.players_available_at(ts),
            |_: &mut (), _: &BTreeSet<(String, Tier)>| {},
        );

        let intervals: Vec<PlayerInterval> = runs
            .into_iter()
            .map(|run| PlayerInterval {
                start: run.start,
                end: run.end,
                teams: self
                    .league
                    .teams_any_available_at(&TimeInstant::new(run.start), self.players_required),
                players: run.signature,
            })
            .collect();

        log::debug!(
            "player simulation from {} to {}: {} intervals",
            horizon.start,
            horizon.end,
            intervals.len()
        );
        intervals
    }
}
