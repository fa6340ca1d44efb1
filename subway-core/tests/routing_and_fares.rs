use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use subway_core::prelude::*;

fn station(id: StationId) -> Station {
    Station::new(id, format!("Station {id}"))
}

fn random_lines(seed: u64, stations: u32, sections: usize) -> Vec<Line> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut lines: Vec<Line> = (1..=3)
        .map(|id| Line::new(id, format!("Line {id}"), rng.gen_range(0..5) * 100))
        .collect();

    // at most one section per ordered station pair
    let mut seen = HashSet::new();
    for i in 0..sections {
        let up = rng.gen_range(0..stations);
        let mut down = rng.gen_range(0..stations);
        if down == up {
            down = (up + 1) % stations;
        }
        if !seen.insert((up, down)) {
            continue;
        }
        let distance = rng.gen_range(1..=20);
        let duration = rng.gen_range(1..=20);
        lines[i % 3].add_section(
            station(u64::from(up)),
            station(u64::from(down)),
            distance,
            duration,
        );
    }
    lines
}

/// Reference all-pairs minimum cost by Floyd-Warshall
fn floyd_warshall(lines: &[Line], stations: u32, metric: CostMetric) -> Vec<Vec<Option<u64>>> {
    let n = stations as usize;
    let mut cost = vec![vec![None; n]; n];
    for (i, row) in cost.iter_mut().enumerate() {
        row[i] = Some(0);
    }
    for section in lines.iter().flat_map(Line::sections) {
        let up = usize::try_from(section.up_station().id()).expect("small id");
        let down = usize::try_from(section.down_station().id()).expect("small id");
        let weight = u64::from(match metric {
            CostMetric::Distance => section.distance(),
            CostMetric::Duration => section.duration(),
        });
        if cost[up][down].is_none_or(|current| weight < current) {
            cost[up][down] = Some(weight);
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                if let (Some(a), Some(b)) = (cost[i][k], cost[k][j]) {
                    if cost[i][j].is_none_or(|current| a + b < current) {
                        cost[i][j] = Some(a + b);
                    }
                }
            }
        }
    }
    cost
}

#[test]
fn three_station_line_by_distance() {
    let mut line = Line::new(1, "Line 1", 0);
    line.add_section(station(1), station(2), 3, 5);
    line.add_section(station(2), station(3), 4, 6);

    let map = SubwayMap::new(vec![line]);
    let path = map
        .find_path(1, 3, CostMetric::Distance)
        .expect("path exists");

    let ids: Vec<_> = path.stations().iter().map(Station::id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(path.distance(), 7);
    assert_eq!(path.duration(), 11);
}

#[test]
fn disjoint_lines_have_no_path() {
    let mut first = Line::new(1, "Line 1", 0);
    first.add_section(station(1), station(2), 3, 5);
    let mut second = Line::new(2, "Line 2", 0);
    second.add_section(station(3), station(4), 3, 5);

    let map = SubwayMap::new(vec![first, second]);

    assert!(matches!(
        map.find_path(1, 4, CostMetric::Distance),
        Err(Error::PathNotFound { from: 1, to: 4 })
    ));
}

#[test]
fn twelve_km_on_a_surcharged_line() {
    let mut line = Line::new(1, "New Bundang", 300);
    line.add_section(station(1), station(2), 5, 3);
    line.add_section(station(2), station(3), 7, 4);

    let map = SubwayMap::new(vec![line]);
    let journey = map
        .journey(1, 3, CostMetric::Distance, None, &FareCalculator::default())
        .expect("path exists");

    assert_eq!(journey.path.distance(), 12);
    assert_eq!(journey.fare.surcharge(SurchargeKind::Distance), 100);
    assert_eq!(journey.fare.surcharge(SurchargeKind::Line), 300);
    assert_eq!(journey.fare.amount(), 1650);
}

#[test]
fn dijkstra_matches_reference_costs() {
    const STATIONS: u32 = 12;

    for seed in 0..20 {
        let lines = random_lines(seed, STATIONS, 30);

        for metric in [CostMetric::Distance, CostMetric::Duration] {
            let reference = floyd_warshall(&lines, STATIONS, metric);
            let graph = SubwayGraph::build(lines.iter().flat_map(Line::sections), metric)
                .expect("valid sections");

            for source in 0..STATIONS {
                for target in 0..STATIONS {
                    let (s, t) = (u64::from(source), u64::from(target));
                    if !graph.contains(s) || !graph.contains(t) {
                        continue;
                    }
                    let expected = reference[source as usize][target as usize];
                    let found = find_path(&graph, s, t).ok().map(|path| match metric {
                        CostMetric::Distance => u64::from(path.distance()),
                        CostMetric::Duration => u64::from(path.duration()),
                    });

                    assert_eq!(found, expected, "seed {seed}, {metric}, {s} -> {t}");
                    assert_eq!(path_exists(&graph, s, t), expected.is_some());
                }
            }
        }
    }
}

#[test]
fn path_totals_equal_the_sum_of_travelled_sections() {
    let lines = random_lines(7, 10, 40);
    let graph = SubwayGraph::build(lines.iter().flat_map(Line::sections), CostMetric::Duration)
        .expect("valid sections");
    let sections: Vec<&Section> = lines.iter().flat_map(Line::sections).collect();

    for source in 0..10 {
        for target in 0..10 {
            let Ok(path) = find_path(&graph, source, target) else {
                continue;
            };

            let mut distance = 0;
            let mut duration = 0;
            for (hop, pair) in path.stations().windows(2).enumerate() {
                let section = sections
                    .iter()
                    .find(|s| s.up_station() == &pair[0] && s.down_station() == &pair[1])
                    .expect("travelled section exists");
                assert_eq!(section.line(), &path.lines()[hop]);
                distance += section.distance();
                duration += section.duration();
            }

            assert_eq!(path.stations().len(), path.lines().len() + 1);
            assert_eq!(path.distance(), distance);
            assert_eq!(path.duration(), duration);
        }
    }
}

#[test]
fn shared_graph_answers_concurrent_queries() {
    let lines = random_lines(3, 10, 40);
    let graph = SubwayGraph::build(lines.iter().flat_map(Line::sections), CostMetric::Distance)
        .expect("valid sections");
    let sequential: Vec<_> = (0..10).map(|t| find_path(&graph, 0, t).ok()).collect();

    let concurrent: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..10)
            .map(|t| {
                let graph = &graph;
                scope.spawn(move || find_path(graph, 0, t).ok())
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("query thread"))
            .collect()
    });

    assert_eq!(sequential, concurrent);
}
