//! Reasonableness check on the breakpoint tables.
//!
//! Print a table of sub-indices: for each pollutant, every concentration
//! breakpoint and the midpoint of every segment, plus one value past the top.

use aqi::{sub_index, Category, Pollutant, AQI_BREAKS};

fn main() {
    tracing_subscriber::fmt::init();

    for p in Pollutant::ALL {
        println!("{} ({})", p, p.unit());
        let breaks = p.breakpoints();
        let mut points: Vec<f64> = breaks
            .windows(2)
            .flat_map(|w| [w[0], (w[0] + w[1]) / 2.0])
            .collect();
        points.push(breaks[breaks.len() - 1]);
        points.push(breaks[breaks.len() - 1] * 1.1);

        for c in points {
            let s = sub_index(c, breaks, &AQI_BREAKS);
            println!(
                "  {:>8.2} -> {:>6.1}  {}",
                c,
                s,
                Category::from_sub_index(s)
            );
        }
    }
}
