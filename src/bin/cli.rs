//! TrashBot CLI
//!
//! Command-line client for the dashboard server:
//! - Show the current state
//! - Post detections and arm statuses by hand (stand-in for the vision
//!   pipeline and arm controller while developing the dashboard)
//! - Check server health

use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};

#[derive(Parser)]
#[command(name = "trashbot-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Talk to a running TrashBot dashboard server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server URL
    #[arg(long, default_value = "http://localhost:8080", global = true)]
    pub url: String,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the current robot state
    State,

    /// Post a vision detection
    Detect {
        /// Item label (e.g. bottle, can, banana_peel)
        label: String,
        /// Mark the item as recyclable
        #[arg(short, long)]
        recyclable: bool,
        /// Classifier confidence (0-1)
        #[arg(short, long)]
        confidence: Option<f64>,
        /// Item x coordinate
        #[arg(short, long, requires = "y")]
        x: Option<f64>,
        /// Item y coordinate
        #[arg(short, long, requires = "x")]
        y: Option<f64>,
    },

    /// Post an arm status
    Arm {
        /// Status string (e.g. idle, picking, error)
        status: String,
        /// Free-form detail attached to the report
        #[arg(short, long)]
        detail: Option<String>,
    },

    /// Show server health
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/').to_string();

    match cli.command {
        Commands::State => {
            let response = client.get(format!("{}/state", base)).send().await?;
            if !response.status().is_success() {
                eprintln!("Failed to fetch state: {}", response.status());
                std::process::exit(1);
            }

            let state: Value = response.json().await?;
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&state)?),
                _ => print_state(&state),
            }
        }

        Commands::Detect {
            label,
            recyclable,
            confidence,
            x,
            y,
        } => {
            let location = x.zip(y);
            let body = detection_body(&label, recyclable, confidence, location);
            post_report(&client, &format!("{}/vision/detection", base), &body).await?;
            println!(
                "Reported {} ({})",
                label,
                if recyclable { "recyclable" } else { "trash" }
            );
        }

        Commands::Arm { status, detail } => {
            let body = arm_body(&status, detail.as_deref());
            post_report(&client, &format!("{}/arm/status", base), &body).await?;
            println!("Reported arm status: {}", status);
        }

        Commands::Status => {
            let response = client.get(format!("{}/health", base)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: Value = resp.json().await?;

                    if cli.format == "json" {
                        println!("{}", serde_json::to_string_pretty(&health)?);
                        return Ok(());
                    }

                    println!("TrashBot dashboard {}", health["version"].as_str().unwrap_or("?"));
                    println!();
                    println!("Status:     {}", health["status"].as_str().unwrap_or("unknown"));
                    println!("Web root:   {}", health["web_root"].as_str().unwrap_or("unknown"));
                    println!("Dashboards: {}", health["ws_clients"].as_u64().unwrap_or(0));
                    println!("Vision:     {}", online_label(&health["vision_online"]));
                    println!("Arm:        {}", online_label(&health["arm_online"]));
                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!("Uptime:     {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("Server returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to TrashBot server at {}", base);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the server is running:");
                    eprintln!("  cargo run --bin trashbot");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// POST a JSON report and fail loudly on rejection
async fn post_report(client: &reqwest::Client, url: &str, body: &Value) -> anyhow::Result<()> {
    let response = client.post(url).json(body).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        eprintln!("Failed ({}): {}", status, text);
        std::process::exit(1);
    }

    Ok(())
}

/// Detection body in the shape the vision pipeline sends
fn detection_body(
    label: &str,
    recyclable: bool,
    confidence: Option<f64>,
    location: Option<(f64, f64)>,
) -> Value {
    let mut body = Map::new();
    body.insert("label".to_string(), json!(label));
    body.insert("recyclable".to_string(), json!(recyclable));
    if let Some(confidence) = confidence {
        body.insert("confidence".to_string(), json!(confidence));
    }
    if let Some((x, y)) = location {
        body.insert("location".to_string(), json!({ "x": x, "y": y }));
    }
    Value::Object(body)
}

/// Status body in the shape the arm controller sends
fn arm_body(status: &str, detail: Option<&str>) -> Value {
    match detail {
        Some(detail) => json!({ "status": status, "detail": detail }),
        None => json!({ "status": status }),
    }
}

fn print_state(state: &Value) {
    let counts = &state["counts"];
    let latest = &state["vision"]["latest"];

    println!("Vision: {}", online_label(&state["vision"]["online"]));
    if latest.is_object() {
        println!(
            "  Latest: {} (recyclable: {}, confidence: {})",
            latest["label"].as_str().unwrap_or("-"),
            latest["recyclable"].as_bool().unwrap_or(false),
            latest["confidence"]
                .as_f64()
                .map(|c| format!("{:.0}%", c * 100.0))
                .unwrap_or_else(|| "-".to_string())
        );
    }
    println!(
        "Arm:    {} ({})",
        online_label(&state["arm"]["online"]),
        state["arm"]["status"].as_str().unwrap_or("unknown")
    );
    println!();
    println!("{:<12} {:>8}", "Counter", "Value");
    println!("{}", "-".repeat(21));
    for key in ["total", "recyclable", "trash", "errors"] {
        println!("{:<12} {:>8}", key, counts[key].as_u64().unwrap_or(0));
    }
}

fn online_label(value: &Value) -> &'static str {
    if value.as_bool().unwrap_or(false) {
        "online"
    } else {
        "offline"
    }
}

fn format_duration(secs: u64) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m {}s", minutes, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_body_full() {
        let body = detection_body("bottle", true, Some(0.9), Some((1.0, 2.5)));
        assert_eq!(
            body,
            json!({"label": "bottle", "recyclable": true, "confidence": 0.9, "location": {"x": 1.0, "y": 2.5}})
        );
    }

    #[test]
    fn test_detection_body_minimal() {
        let body = detection_body("peel", false, None, None);
        assert_eq!(body, json!({"label": "peel", "recyclable": false}));
    }

    #[test]
    fn test_arm_body() {
        assert_eq!(arm_body("idle", None), json!({"status": "idle"}));
        assert_eq!(
            arm_body("error", Some("jam")),
            json!({"status": "error", "detail": "jam"})
        );
    }

    #[test]
    fn test_online_label() {
        assert_eq!(online_label(&json!(true)), "online");
        assert_eq!(online_label(&json!(false)), "offline");
        assert_eq!(online_label(&Value::Null), "offline");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(59), "0m 59s");
        assert_eq!(format_duration(3700), "1h 1m");
        assert_eq!(format_duration(90000), "1d 1h 0m");
    }
}
