use bikeshare_stats::analyzers::types::Availability;
use bikeshare_stats::analyzers::{station_stats, time_stats, trip_duration_stats, user_stats};
use bikeshare_stats::city::City;
use bikeshare_stats::filter::{Filter, Selector, WEEKDAYS};
use bikeshare_stats::loader::{load, load_city, read_trips};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

fn fixtures() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}

#[test]
fn test_full_pipeline() {
    let table = load(fixtures(), City::Chicago, &Filter::default()).expect("Failed to load trips");
    assert_eq!(table.len(), 12);

    let time = time_stats(&table).unwrap();
    assert_eq!(time.popular_month_name, "June");
    assert_eq!(time.popular_month.count, 4);
    assert_eq!(time.popular_day.value, "Monday");
    assert_eq!(time.popular_day.count, 6);
    assert_eq!(time.popular_hour.value, 17);
    assert_eq!(time.popular_hour.count, 6);

    let stations = station_stats(&table).unwrap();
    assert_eq!(stations.popular_start.value, "Canal St & Adams St");
    assert_eq!(stations.popular_end.value, "Clinton St & Washington Blvd");
    assert_eq!(stations.popular_trip.value.start, "Canal St & Adams St");
    assert_eq!(stations.popular_trip.value.end, "Clinton St & Washington Blvd");
    assert_eq!(stations.popular_trip.count, 5);

    let durations = trip_duration_stats(&table);
    assert_eq!(durations.total.total_seconds, 13260.0);
    assert_eq!(
        (durations.total.days, durations.total.hours, durations.total.minutes),
        (0, 3, 41)
    );
    let mean = durations.mean.unwrap();
    assert_eq!(mean.total_seconds, 1105.0);
    assert_eq!((mean.hours, mean.minutes, mean.seconds), (0, 18, 25.0));

    let users = user_stats(&table).unwrap();
    assert_eq!(users.user_types[0].value, "Subscriber");
    assert_eq!(users.user_types[0].count, 7);
    assert_eq!(users.user_types[1].value, "Customer");
    assert_eq!(users.user_types[1].count, 5);
    let Availability::Available(years) = users.birth_years else {
        panic!("chicago has birth years");
    };
    assert_eq!(years.earliest, 1972);
    assert_eq!(years.most_recent, 1999);
    assert_eq!(years.most_common.value, 1985);
}

#[test]
fn test_filtered_rows_match_selectors() {
    for city in City::ALL {
        for month in ["all", "january", "march", "june"] {
            for day in ["all", "monday", "saturday", "wednesday"] {
                let filter = Filter::parse(month, day).unwrap();
                let table = load(fixtures(), city, &filter).unwrap();
                assert!(
                    table.trips().iter().all(|t| filter.matches(t)),
                    "{city} {month} {day}"
                );
            }
        }
    }
}

#[test]
fn test_day_selectors_partition_the_table() {
    for city in City::ALL {
        let full = load_city(fixtures(), city).unwrap();

        let mut seen = Vec::new();
        for day in WEEKDAYS {
            let filter = Filter {
                month: Selector::All,
                day: Selector::Only(day),
            };
            seen.extend(full.filter(&filter).trips().iter().map(|t| t.row));
        }
        seen.sort_unstable();

        let all: Vec<usize> = full.trips().iter().map(|t| t.row).collect();
        assert_eq!(seen, all, "{city}");
    }
}

#[test]
fn test_filtered_rows_are_a_subset() {
    let full = load_city(fixtures(), City::Chicago).unwrap();
    let filter = Filter::parse("march", "all").unwrap();
    let filtered = full.filter(&filter);

    let rows: BTreeSet<usize> = full.trips().iter().map(|t| t.row).collect();
    assert_eq!(filtered.len(), 3);
    for trip in filtered.trips() {
        assert!(rows.contains(&trip.row));
        assert_eq!(&full.trips()[trip.row], trip);
    }
}

#[test]
fn test_filter_is_idempotent() {
    let full = load_city(fixtures(), City::Chicago).unwrap();
    for (month, day) in [("june", "all"), ("all", "monday"), ("march", "monday")] {
        let filter = Filter::parse(month, day).unwrap();
        let once = full.filter(&filter);
        assert_eq!(once.filter(&filter), once);
    }
}

#[test]
fn test_month_and_day_combined() {
    let table = load(
        fixtures(),
        City::Chicago,
        &Filter::parse("March", "Monday").unwrap(),
    )
    .unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.trips()[0].start_station, "Canal St & Adams St");
}

#[test]
fn test_washington_has_no_demographics() {
    let table = load(fixtures(), City::Washington, &Filter::default()).unwrap();
    let users = user_stats(&table).unwrap();

    assert_eq!(users.genders, Availability::NotAvailable);
    assert_eq!(users.birth_years, Availability::NotAvailable);
    assert_eq!(users.user_types[0].value, "Subscriber");
    assert_eq!(users.user_types[0].count, 4);
}

#[test]
fn test_empty_selection() {
    // no washington trips in february
    let table = load(
        fixtures(),
        City::Washington,
        &Filter::parse("february", "all").unwrap(),
    )
    .unwrap();

    assert!(table.is_empty());
    assert!(time_stats(&table).is_err());
    assert!(station_stats(&table).is_err());
    assert!(trip_duration_stats(&table).mean.is_none());
    assert!(user_stats(&table).unwrap().user_types.is_empty());
}

#[test]
fn test_new_york_quoted_station_and_blank_user_type() {
    let table = load_city(fixtures(), City::NewYorkCity).unwrap();

    let stations = station_stats(&table).unwrap();
    assert_eq!(stations.popular_trip.value.end, "W Broadway & Spring St, SoHo");
    assert_eq!(stations.popular_trip.count, 2);

    let users = user_stats(&table).unwrap();
    assert_eq!(users.user_types.len(), 1);
    assert_eq!(users.user_types[0].count, 3);
    let Availability::Available(years) = users.birth_years else {
        panic!("new york city has birth years");
    };
    // every year appears once, so the earliest wins
    assert_eq!(years.most_common.value, 1981);
}

#[test]
fn test_gzip_source_matches_plain() {
    let dir: PathBuf = std::env::temp_dir().join("bikeshare_stats_gzip_source");
    fs::create_dir_all(&dir).unwrap();
    let gz_path = dir.join("washington.csv.gz");
    let _ = fs::remove_file(dir.join("washington.csv"));

    let plain = fs::read(fixtures().join("washington.csv")).unwrap();
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&plain).unwrap();
    fs::write(&gz_path, encoder.finish().unwrap()).unwrap();

    let from_gzip = load_city(&dir, City::Washington).unwrap();
    let from_plain = read_trips(plain.as_slice()).unwrap();
    assert_eq!(from_gzip, from_plain);

    fs::remove_file(&gz_path).unwrap();
}
