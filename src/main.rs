use chrono::{Duration, Utc};
use daybucket::{Bucketizer, TimestampedValue, Value, Window};
use std::time::Instant;

fn main() -> daybucket::Result<()> {
    env_logger::builder()
        .filter_module("daybucket", log::LevelFilter::Debug)
        .parse_default_env()
        .init();

    let bucketizer = Bucketizer::builder()
        .time_zone("America/Sao_Paulo")
        .locale("pt-BR")
        .build()?;

    let now = Utc::now();

    let rows = {
        use rand::Rng;

        let mut rng = rand::thread_rng();

        // Sales spread over the last 10 days, so some fall outside of the window
        (0..10_000)
            .map(|_| {
                let age = Duration::seconds(rng.gen_range(0..10 * 86_400));
                let value: Value = rng.gen_range(5.0..500.0);
                let method = ["pix", "card", "cash"][rng.gen_range(0..3)];
                (method, TimestampedValue::new(now - age, value))
            })
            .collect::<Vec<_>>()
    };

    log::info!("generated {} sales", rows.len());

    let start = Instant::now();

    let totals = bucketizer
        .sum(Window::WEEK)
        .reference_time(now)
        .run(rows.iter().map(|(_, record)| record))?;

    log::info!("aggregated in {:?}", start.elapsed());

    for bucket in totals {
        log::info!(
            "{} ({}): {:.2} from {} sales",
            bucket.label,
            bucket.key,
            bucket.total,
            bucket.len
        );
    }

    let start = Instant::now();

    let by_method = bucketizer
        .sum(Window::WEEK)
        .reference_time(now)
        .run_grouped(rows)?
        .collect();

    log::info!("grouped in {:?}", start.elapsed());

    for (method, buckets) in by_method {
        let week: Value = buckets.iter().map(|b| b.total).sum();
        log::info!("[{method}] {week:.2} this week");
    }

    let raw = bucketizer
        .count(Window::days(3)?)
        .reference_time(now)
        .run_raw([
            ("2024-01-09T08:00:00+00:00", 1.0),
            ("not a timestamp", 1.0),
        ])?;

    log::info!("skipped {} malformed rows", raw.skipped.len());

    Ok(())
}
