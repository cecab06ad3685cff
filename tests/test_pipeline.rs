// Pipeline tests
// Author: Gabriel Demetrios Lafis

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rust_summary_engine::{
    data::{DataSet, Row, Value},
    processing::{
        fallback_analysis, ColumnStat, ColumnType, NoProgress, Sampler, SamplingStrategy,
        Summarizer, Summary, SummaryPipeline,
    },
};

fn count_where(data: &DataSet, column: &str, value: &str) -> usize {
    data.iter()
        .filter(|row| row.get(column) == Some(&Value::from(value)))
        .count()
}

fn summarize_all(data: &DataSet) -> Summary {
    Summarizer::summarize(data, data, &mut NoProgress)
}

#[test]
fn test_small_dataset_is_returned_unchanged() {
    let dataset: DataSet = (0..5)
        .map(|i| Row::new().with("id", i).with("name", format!("row {}", i)))
        .collect();

    let mut rng = StdRng::seed_from_u64(1);
    let (sample, strategy) = Sampler::new(5).sample_with_strategy(&dataset, &mut rng);

    assert_eq!(strategy, SamplingStrategy::Identity);
    assert_eq!(sample, dataset);
}

#[test]
fn test_empty_dataset_samples_to_empty() {
    let mut rng = StdRng::seed_from_u64(1);
    let sample = Sampler::default().sample(&DataSet::new(), &mut rng);
    assert!(sample.is_empty());
}

#[test]
fn test_stratified_sampling_is_proportional() {
    let dataset: DataSet = (0..100)
        .map(|i| Row::new().with("id", i).with("category", if i < 80 { "A" } else { "B" }))
        .collect();

    let mut rng = StdRng::seed_from_u64(42);
    let (sample, strategy) = Sampler::new(10).sample_with_strategy(&dataset, &mut rng);

    assert_eq!(strategy, SamplingStrategy::Stratified { column: "category".to_string() });
    assert_eq!(sample.len(), 10);
    assert_eq!(count_where(&sample, "category", "A"), 8);
    assert_eq!(count_where(&sample, "category", "B"), 2);
}

#[test]
fn test_stratified_sampling_fills_rounding_shortfall() {
    // Three groups of 10: floor(10 * 10 / 30) = 3 each, one row short
    let dataset: DataSet = (0..30)
        .map(|i| Row::new().with("id", i).with("group", ["x", "y", "z"][i as usize % 3]))
        .collect();

    let mut rng = StdRng::seed_from_u64(3);
    let sample = Sampler::new(10).sample(&dataset, &mut rng);

    assert_eq!(sample.len(), 10);
    let mut ids: Vec<String> = sample.iter().map(|row| row.get("id").unwrap().to_string()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 10);
}

#[test]
fn test_time_based_sampling_takes_evenly_spaced_dates() {
    // Unique dates in reverse order; too many distinct values to stratify
    let dataset: DataSet = (0..30)
        .rev()
        .map(|day| Row::new().with("date", format!("2024-01-{:02}", day + 1)).with("value", day))
        .collect();

    let mut rng = StdRng::seed_from_u64(5);
    let (sample, strategy) = Sampler::new(10).sample_with_strategy(&dataset, &mut rng);

    assert_eq!(strategy, SamplingStrategy::TimeBased { column: "date".to_string() });
    let dates: Vec<String> = sample.iter().map(|row| row.get("date").unwrap().to_string()).collect();
    let expected: Vec<String> = (0..10).map(|k| format!("2024-01-{:02}", 3 * k + 1)).collect();
    assert_eq!(dates, expected);
}

#[test]
fn test_time_based_sampling_puts_unparsable_dates_last() {
    let mut dates: Vec<String> = (1..=30).rev().map(|day| format!("2024-01-{:02}", day)).collect();
    dates.insert(5, "garbage".to_string());
    dates.insert(20, "nope".to_string());
    let dataset: DataSet = dates.iter().map(|d| Row::new().with("date", d.as_str())).collect();

    let mut rng = StdRng::seed_from_u64(1);
    let (sample, strategy) = Sampler::new(16).sample_with_strategy(&dataset, &mut rng);

    assert_eq!(strategy, SamplingStrategy::TimeBased { column: "date".to_string() });
    let picked: Vec<String> = sample.iter().map(|row| row.get("date").unwrap().to_string()).collect();
    let mut expected: Vec<String> = (0..15).map(|k| format!("2024-01-{:02}", 2 * k + 1)).collect();
    expected.push("garbage".to_string());
    assert_eq!(picked, expected);
}

#[test]
fn test_random_sampling_is_exact_and_reproducible() {
    let dataset: DataSet = (0..50).map(|i| Row::new().with("x", i * 7)).collect();

    let sampler = Sampler::new(10);
    let (first, strategy) = sampler.sample_with_strategy(&dataset, &mut StdRng::seed_from_u64(9));
    let second = sampler.sample(&dataset, &mut StdRng::seed_from_u64(9));

    assert_eq!(strategy, SamplingStrategy::Random);
    assert_eq!(first.len(), 10);
    assert_eq!(first, second);
    assert!(first.iter().all(|row| dataset.data.contains(row)));
}

#[test]
fn test_empty_summary_is_canonical() {
    let empty = DataSet::new();
    let first = summarize_all(&empty);
    let second = summarize_all(&empty);

    assert_eq!(first, Summary::empty());
    assert_eq!(first, second);

    let json = serde_json::to_value(&first).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "overview": {"totalRows": 0, "totalColumns": 0, "columns": [], "sampleSize": 0},
            "statistics": {},
            "patterns": {"correlations": {}, "trends": [], "outliers": []},
            "dataQuality": {"missingValues": {}, "duplicates": 0, "dataTypes": {}}
        })
    );

    let round_trip: Summary = serde_json::from_value(json).unwrap();
    assert_eq!(round_trip, Summary::empty());
}

fn mixed_column(numeric: usize) -> DataSet {
    (0..100)
        .map(|i| {
            let value = if i < numeric { Value::from(i as i64) } else { Value::from(format!("x{}", i)) };
            Row::new().with("mixed", value)
        })
        .collect()
}

#[test]
fn test_numeric_threshold_boundary() {
    let at_threshold = summarize_all(&mixed_column(70));
    assert_eq!(at_threshold.data_quality.data_types["mixed"], ColumnType::Numeric);
    assert_eq!(at_threshold.statistics["mixed"].column_type(), ColumnType::Numeric);

    let below = summarize_all(&mixed_column(69));
    assert_eq!(below.data_quality.data_types["mixed"], ColumnType::Categorical);
    assert_eq!(below.statistics["mixed"].column_type(), ColumnType::Categorical);
}

#[test]
fn test_median_and_quartiles() {
    let dataset: DataSet = [4, 1, 3, 2].iter().map(|&v| Row::new().with("v", v)).collect();
    let summary = summarize_all(&dataset);

    let stats = summary.statistics["v"].as_numeric().unwrap();
    assert_eq!(stats.count, 4);
    assert_eq!(stats.mean, 2.5);
    assert_eq!(stats.median, 2.5);
    assert_eq!(stats.min, 1.0);
    assert_eq!(stats.max, 4.0);
    assert_eq!(stats.quartiles, [1.5, 2.5, 3.5]);
    assert!((stats.std_dev - 1.25f64.sqrt()).abs() < 1e-12);
}

#[test]
fn test_correlations_threshold_and_sign() {
    let noise = [1, -1, -1, 1, 1, -1, -1, 1];
    let dataset: DataSet = (0..8)
        .map(|i| {
            Row::new()
                .with("a", i)
                .with("b", 5 - 2 * i)
                .with("noise", noise[i as usize])
        })
        .collect();

    let summary = summarize_all(&dataset);
    let correlations = &summary.patterns.correlations;

    assert_eq!(correlations.get("a_b"), Some(&-1.0));
    assert!(!correlations.contains_key("a_noise"));
    assert!(!correlations.contains_key("b_noise"));
    assert_eq!(correlations.len(), 1);
}

#[test]
fn test_correlation_skips_unparsable_pairs_and_constant_columns() {
    let dataset: DataSet = (0..10)
        .map(|i| {
            let y = if i == 4 { Value::from("oops") } else { Value::from(2 * i + 1) };
            Row::new().with("x", i).with("y", y).with("flat", 3)
        })
        .collect();

    let correlations = summarize_all(&dataset).patterns.correlations;
    assert_eq!(correlations.get("x_y"), Some(&1.0));
    assert!(!correlations.contains_key("x_flat"));
}

#[test]
fn test_correlation_candidates_use_leading_sample_rows() {
    // Numeric for the first 100 rows only: categorical overall, still correlated
    let dataset: DataSet = (0..200)
        .map(|i| {
            let x = if i < 100 { Value::from(i) } else { Value::from("n/a") };
            Row::new().with("x", x).with("y", 2 * i)
        })
        .collect();

    let summary = summarize_all(&dataset);
    assert_eq!(summary.statistics["x"].column_type(), ColumnType::Categorical);
    assert_eq!(summary.patterns.correlations.get("x_y"), Some(&1.0));
}

#[test]
fn test_summary_maps_follow_column_order() {
    let dataset: DataSet = (0..5)
        .map(|i| Row::new().with("zeta", i).with("alpha", "a").with("mid", 3 * i))
        .collect();

    let summary = summarize_all(&dataset);
    let order = vec!["zeta", "alpha", "mid"];
    assert_eq!(summary.overview.columns, order);
    assert_eq!(summary.statistics.keys().collect::<Vec<_>>(), order.iter().collect::<Vec<_>>());
    assert_eq!(summary.data_quality.data_types.keys().collect::<Vec<_>>(), order.iter().collect::<Vec<_>>());
    assert_eq!(summary.data_quality.missing_values.keys().collect::<Vec<_>>(), order.iter().collect::<Vec<_>>());
    assert_eq!(summary.patterns.correlations.keys().collect::<Vec<_>>(), vec!["zeta_mid"]);

    let json = serde_json::to_string(&summary.statistics).unwrap();
    assert!(json.find("\"zeta\"").unwrap() < json.find("\"alpha\"").unwrap());
}

#[test]
fn test_categorical_top_values() {
    let values = ["b", "a", "b", "a", "c"];
    let dataset: DataSet = values.iter().map(|&v| Row::new().with("k", v)).collect();

    let stats = summarize_all(&dataset).statistics["k"].as_categorical().cloned().unwrap();
    assert_eq!(stats.count, 5);
    assert_eq!(stats.unique, 3);

    let top: Vec<(String, usize)> = stats
        .top_values
        .iter()
        .map(|vc| (vc.value.to_string(), vc.count))
        .collect();
    assert_eq!(top, vec![("b".to_string(), 2), ("a".to_string(), 2), ("c".to_string(), 1)]);
}

#[test]
fn test_top_values_limited_to_ten() {
    let dataset: DataSet = (0..12).map(|i| Row::new().with("k", format!("v{}", i))).collect();

    let stats = summarize_all(&dataset).statistics["k"].as_categorical().cloned().unwrap();
    assert_eq!(stats.unique, 12);
    assert_eq!(stats.top_values.len(), 10);
}

#[test]
fn test_missing_values_and_empty_columns() {
    let dataset: DataSet = vec![
        Row::new().with("a", 1).with("b", Value::Null).with("c", ""),
        Row::new().with("a", "").with("b", Value::Null),
        Row::new().with("a", 3).with("b", Value::Null).with("c", "x"),
    ]
    .into();

    let summary = summarize_all(&dataset);
    assert_eq!(summary.data_quality.missing_values["a"], 1);
    assert_eq!(summary.data_quality.missing_values["b"], 3);
    assert_eq!(summary.data_quality.missing_values["c"], 2);
    assert_eq!(summary.data_quality.data_types["b"], ColumnType::Empty);

    match &summary.statistics["b"] {
        ColumnStat::Categorical(stats) => {
            assert_eq!(stats.count, 0);
            assert_eq!(stats.unique, 0);
            assert!(stats.top_values.is_empty());
        }
        other => panic!("expected categorical stats, got {:?}", other),
    }
}

#[test]
fn test_date_column_type() {
    let dataset: DataSet = (1..=20)
        .map(|d| Row::new().with("when", format!("2023-06-{:02}", d)))
        .collect();

    let summary = summarize_all(&dataset);
    assert_eq!(summary.data_quality.data_types["when"], ColumnType::Date);
}

#[test]
fn test_duplicates_counted_over_first_thousand_rows() {
    let dataset: DataSet = (0..5000).map(|_| Row::new().with("a", 1).with("b", "x")).collect();

    let summary = summarize_all(&dataset);
    assert_eq!(summary.data_quality.duplicates, 999);
}

#[test]
fn test_progress_checkpoints() {
    let dataset: DataSet = (0..10).map(|i| Row::new().with("x", i)).collect();
    let pipeline = SummaryPipeline::new(1000).unwrap();

    let mut seen = Vec::new();
    pipeline.run(&dataset, &mut |p: u8| seen.push(p), &mut StdRng::seed_from_u64(0));
    assert_eq!(seen, vec![20, 40, 60, 80, 100]);

    let mut seen = Vec::new();
    let analysis = pipeline.run(&DataSet::new(), &mut |p: u8| seen.push(p), &mut StdRng::seed_from_u64(0));
    assert_eq!(seen.last(), Some(&100));
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert!(analysis.sample.is_empty());
    assert_eq!(analysis.summary, Summary::empty());
}

#[test]
fn test_zero_sample_size_is_rejected() {
    assert!(SummaryPipeline::new(0).is_err());
}

#[test]
fn test_end_to_end_stratified_summary() {
    let mut rng = StdRng::seed_from_u64(2024);
    let dataset: DataSet = (0..2000)
        .map(|i| {
            Row::new()
                .with("category", if i % 5 == 0 { "B" } else { "A" })
                .with("value", rng.gen_range(0.0..100.0))
        })
        .collect();

    let pipeline = SummaryPipeline::new(1000).unwrap();
    let analysis = pipeline.run(&dataset, &mut NoProgress, &mut rng);
    let summary = &analysis.summary;

    assert_eq!(summary.overview.total_rows, 2000);
    assert_eq!(summary.overview.total_columns, 2);
    assert_eq!(summary.overview.columns, vec!["category", "value"]);
    assert_eq!(summary.overview.sample_size, 1000);
    assert_eq!(count_where(&analysis.sample, "category", "A"), 800);
    assert_eq!(count_where(&analysis.sample, "category", "B"), 200);
    assert_eq!(summary.statistics["category"].column_type(), ColumnType::Categorical);
    assert_eq!(summary.statistics["value"].column_type(), ColumnType::Numeric);
    assert_eq!(summary.data_quality.duplicates, 0);

    let json = serde_json::to_value(summary).unwrap();
    assert_eq!(json["statistics"]["category"]["type"], "categorical");
    assert_eq!(json["statistics"]["value"]["type"], "numeric");
    assert!(json["statistics"]["value"]["stdDev"].is_number());
}

#[test]
fn test_fallback_analysis_is_overview_only() {
    let dataset: DataSet = (0..1500).map(|i| Row::new().with("i", i).with("s", "x")).collect();

    let analysis = fallback_analysis(&dataset);
    assert_eq!(analysis.sample.len(), 1000);
    assert_eq!(analysis.sample.data[..], dataset.data[..1000]);
    assert_eq!(analysis.summary.overview.total_rows, 1500);
    assert_eq!(analysis.summary.overview.total_columns, 2);
    assert_eq!(analysis.summary.overview.sample_size, 1000);
    assert!(analysis.summary.statistics.is_empty());
    assert!(analysis.summary.patterns.correlations.is_empty());
    assert!(analysis.summary.data_quality.data_types.is_empty());
}
