// Simple summary example
// Author: Gabriel Demetrios Lafis

use rust_summary_engine::{
    data::{DataSet, Row, Value},
    processing::{ColumnStat, SummaryPipeline},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let products = ["widget", "gadget", "gizmo"];

    // Build a small sales dataset
    let dataset: DataSet = (0..3000)
        .map(|i| {
            Row::new()
                .with("product", products[i % products.len()])
                .with("units", (i % 17) as i64)
                .with("price", 9.99 + (i % 5) as f64)
                .with("date", format!("2024-03-{:02}", i % 28 + 1))
                .with("coupon", if i % 10 == 0 { Value::from("SPRING") } else { Value::Null })
        })
        .collect();

    let pipeline = SummaryPipeline::new(500)?.with_seed(Some(42));
    let analysis = pipeline.execute(&dataset, &mut |percent: u8| println!("progress: {}%", percent));

    let summary = &analysis.summary;
    println!(
        "\n{} rows, {} columns, sample of {}",
        summary.overview.total_rows, summary.overview.total_columns, summary.overview.sample_size
    );

    for (column, stat) in &summary.statistics {
        match stat {
            ColumnStat::Numeric(s) => println!(
                "{:<8} numeric     mean={:.2} median={:.2} sd={:.2} q={:?}",
                column, s.mean, s.median, s.std_dev, s.quartiles
            ),
            ColumnStat::Categorical(s) => println!(
                "{:<8} categorical unique={} top={:?}",
                column,
                s.unique,
                s.top_values.iter().map(|v| format!("{}={}", v.value, v.count)).collect::<Vec<_>>()
            ),
        }
    }

    println!("\ncorrelations: {:?}", summary.patterns.correlations);
    println!("missing: {:?}", summary.data_quality.missing_values);
    println!("types: {:?}", summary.data_quality.data_types);

    Ok(())
}
