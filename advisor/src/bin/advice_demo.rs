//! Demo of requesting advice for a fixed reading.

use advisor::{Advisor, Settings};

const PROMPT: &str = "
    As an environmental health expert specializing in Indian air quality standards, analyze this specific reading:

    CONTEXT:
    Location: New Delhi
    Reading Time: 2024-11-14T08:00
    Overall AQI: 412 (Severe)
    Primary Pollutant: PM2.5

    Provide a professional analysis in JSON focusing on:
    1. healthAdvice: Specific advice.
    2. precautions: 3-4 actionable steps.
    3. impactSummary: 1-sentence environmental summary.
";

fn main() {
    let advisor = match Advisor::new(Settings::from_env()) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    println!("requesting advice from {}...", advisor.url());
    match advisor.analyze(PROMPT) {
        Ok(analysis) => println!("{}", analysis),
        Err(e) => println!("error: {}", e),
    }
}
