use std::hint::black_box;

use availability_engine::{
    AvailabilityRule, DateBounds, Horizon, LeagueAvailability, Simulator, Tier, WallTime,
};
use chrono::{NaiveDate, Weekday};
use chrono_tz::Tz;
use criterion::{criterion_group, criterion_main, Criterion};

const ZONES: [Tz; 4] = [
    chrono_tz::Europe::London,
    chrono_tz::Europe::Paris,
    chrono_tz::US::Eastern,
    chrono_tz::US::Pacific,
];

/// Four teams of six players, each with evening windows on four days.
fn league() -> LeagueAvailability {
    let mut league = LeagueAvailability::new();
    for team in 0..4 {
        for player in 0..6 {
            let tz = ZONES[(team + player) % ZONES.len()];
            for (i, day) in [Weekday::Mon, Weekday::Wed, Weekday::Fri, Weekday::Sat]
                .into_iter()
                .enumerate()
            {
                let from = WallTime::new(17 + ((player + i) % 4) as u8, 0).unwrap();
                let to = WallTime::new(((22 + player) % 24) as u8, 30).unwrap();
                let tier = if (player + i) % 3 == 0 { Tier::Maybe } else { Tier::Yes };
                league.add_rules(
                    &format!("Team {}", team),
                    &format!("Player {}", player),
                    AvailabilityRule::weekly(tz, day, from, to, tier, DateBounds::unbounded()),
                );
            }
        }
    }
    league
}

fn bench_simulation(c: &mut Criterion) {
    let league = league();
    let horizon = Horizon::weeks_from(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), 1).unwrap();
    let simulator = Simulator::new(&league, 4);

    c.bench_function("team_intervals_one_week", |b| {
        b.iter(|| simulator.team_intervals(black_box(&horizon)))
    });
    c.bench_function("player_intervals_one_week", |b| {
        b.iter(|| simulator.player_intervals(black_box(&horizon)))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_simulation
}
criterion_main!(benches);
