//! Bindings for the browser front end.
use log::MakeConsoleWriter;
use wasm_bindgen::prelude::*;

use crate::{advice::Analysis, calculate_aqi, Category, PollutantData};

#[wasm_bindgen(start)]
fn run() {
    tracing_subscriber::fmt::fmt()
        .with_writer(MakeConsoleWriter)
        .without_time()
        .init();

    tracing::info!("AQI calculator loaded");
}

/// Compute the AQI of a JSON-encoded reading; returns the JSON-encoded result.
#[wasm_bindgen]
pub fn calculate(reading: &str) -> Result<String, JsValue> {
    let data: PollutantData = serde_json::from_str(reading)
        .map_err(|e| JsValue::from_str(&format!("invalid reading: {e}")))?;
    let result = calculate_aqi(&data.clamped());
    serde_json::to_string(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Generic advice for a category label (e.g. "Very Poor"), JSON-encoded.
#[wasm_bindgen]
pub fn fallback_advice(category: &str) -> Result<String, JsValue> {
    let category = Category::ALL
        .into_iter()
        .find(|c| c.label().eq_ignore_ascii_case(category.trim()))
        .ok_or_else(|| JsValue::from_str(&format!("unknown category: {category}")))?;
    serde_json::to_string(&Analysis::fallback(category))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

mod log {
    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    /// Forwards formatted log lines to `console.log`.
    pub struct MakeConsoleWriter;

    impl MakeWriter<'_> for MakeConsoleWriter {
        type Writer = MakeConsoleWriter;

        fn make_writer(&self) -> Self::Writer {
            MakeConsoleWriter
        }
    }

    impl std::io::Write for MakeConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let line = String::from_utf8_lossy(buf);
            web_sys::console::log_1(&JsValue::from_str(line.trim_end()));
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
