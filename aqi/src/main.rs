use std::{process::ExitCode, sync::Arc};

use aqi::{
    advice::{self, Advice, AdviceGenerator, AdviceSource, Analysis},
    calculate_aqi,
    charts::{self, Charts},
    cli::Cli,
    context::Context,
    timestamp, AqiResult, Pollutant, PollutantData,
};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct Report<'a> {
    result: &'a AqiResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    charts: Option<&'a Charts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    advice: Option<AdviceReport<'a>>,
}

#[derive(Serialize)]
struct AdviceReport<'a> {
    #[serde(flatten)]
    analysis: &'a Analysis,
    fallback: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let raw = match cli.reading() {
        Ok(data) => data,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::from(2);
        }
    };

    let mut data = raw.clamped();
    for p in Pollutant::ALL {
        let (given, used) = (raw.reading(p), data.reading(p));
        if given != used {
            tracing::warn!("{} of {} is out of range; using {}", p, given, used);
        }
    }
    if data.timestamp.is_none() {
        data.timestamp = Some(timestamp::now_local());
    }

    let result = calculate_aqi(&data);
    let charts = cli.charts.then(|| Charts::new(&data));
    let advice = cli.advice.then(|| get_advice(&cli, &result, &data));

    if cli.json {
        let report = Report {
            result: &result,
            charts: charts.as_ref(),
            advice: advice.as_ref().map(|a| AdviceReport {
                analysis: &a.analysis,
                fallback: a.is_fallback(),
            }),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                tracing::error!("could not encode report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_result(&result, &data);
        if let Some(charts) = &charts {
            print_charts(charts);
        }
        if let Some(advice) = &advice {
            print_advice(advice);
        }
    }
    ExitCode::SUCCESS
}

fn generator(cli: &Cli) -> Arc<dyn AdviceGenerator + Send + Sync> {
    #[cfg(feature = "gemini")]
    {
        let mut settings = advisor::Settings::from_env();
        if let Some(key) = &cli.api_key {
            settings.api_key = Some(key.clone());
        }
        settings.model = cli.model.clone();
        settings.timeout = cli.advice_timeout();
        match advice::gemini::generator(settings) {
            Ok(g) => return Arc::from(g),
            Err(e) => tracing::warn!("advice service unavailable: {}", e),
        }
    }
    #[cfg(not(feature = "gemini"))]
    tracing::debug!("built without an advice service; ignoring model {}", cli.model);

    Arc::new(advice::NullAdviceGenerator {})
}

fn get_advice(cli: &Cli, result: &AqiResult, data: &PollutantData) -> Advice {
    let ctx = Context::with_timeout(cli.advice_timeout());
    {
        let ctx = ctx.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            tracing::info!("got SIGINT, abandoning advice");
            ctx.cancel();
        }) {
            tracing::warn!("could not set SIGINT handler: {}", e);
        }
    }
    advice::advise(generator(cli), result, data, &ctx)
}

fn print_result(result: &AqiResult, data: &PollutantData) {
    let location = if result.location.trim().is_empty() {
        "Local Reading"
    } else {
        result.location.as_str()
    };
    println!("AQI {} ({})", result.aqi_value, result.category);
    println!("{}", result.category.level().description);
    println!("Primary pollutant: {}", result.main_pollutant);
    println!("Location: {}", location);
    println!("Time: {}", timestamp::display(result.timestamp.as_deref()));
    println!();
    println!("{:<6} {:>9} {:<6} {:>9}", "", "value", "unit", "sub-index");
    for (p, sub) in result.sub_indices {
        println!(
            "{:<6} {:>9.2} {:<6} {:>9.1}",
            p.name(),
            data.reading(p),
            p.unit(),
            sub
        );
    }
}

fn print_charts(charts: &Charts) {
    println!();
    println!("Concentration vs safety limits (CPCB 24h):");
    for s in &charts.safety {
        println!(
            "  {:<6} {:>9.2} / {:<5} {:>4.0}%{}",
            s.pollutant.name(),
            s.value,
            s.limit,
            s.percentage,
            if s.above_limit { "  above limit" } else { "" }
        );
    }

    println!();
    println!("Pollutant mix:");
    if charts.mix.is_empty() {
        println!("  (no pollutants present)");
    }
    for m in &charts.mix {
        println!("  {:<6} {:>5.1}%", m.pollutant.name(), m.share * 100.0);
    }

    println!();
    println!("Signature profile (of {}):", charts::PROFILE_FULL_MARK);
    for pt in &charts.profile {
        println!(
            "  {:<6} {:>5.2}  (intensity {})",
            pt.pollutant.name(),
            pt.intensity,
            charts::tooltip_intensity(pt.intensity)
        );
    }
}

fn print_advice(advice: &Advice) {
    println!();
    if let AdviceSource::Fallback(e) = &advice.source {
        println!("Advice (generic; {}):", e);
    } else {
        println!("Advice:");
    }
    let a = &advice.analysis;
    println!("  {}", a.health_advice);
    for (i, p) in a.precautions.iter().enumerate() {
        println!("  {}. {}", i + 1, p);
    }
    println!("  {}", a.impact_summary);
}
