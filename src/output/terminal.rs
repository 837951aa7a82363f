// Colored terminal output for analyses and snapshots.
//
// All terminal-specific formatting lives here: colors, bars, delta arrows.
// main.rs only decides what to show.

use colored::Colorize;

use crate::delta::snapshot::Snapshot;
use crate::pipeline::Analysis;
use crate::scoring::emotion::{Emotion, EmotionDistribution};

const BAR_WIDTH: usize = 20;

/// Display a full analysis: tension, emotion mix and topics.
pub fn display_analysis(analysis: &Analysis) {
    println!(
        "\n{}",
        format!(
            "=== Mood Report ({} items, {} duplicates removed) ===",
            analysis.items.len(),
            analysis.duplicates_removed
        )
        .bold()
    );
    println!();

    let delta = if analysis.has_baseline {
        format!("  ({})", signed(analysis.tension_delta, 0))
    } else {
        String::new()
    };
    println!(
        "  Tension index: {}/100{}",
        colorize_tension(analysis.tension_index),
        delta
    );
    println!();

    println!("  {}", "Emotion mix:".bold());
    for (emotion, value) in analysis.emotions.iter() {
        let change = if analysis.has_baseline {
            format!("  {}", signed(analysis.emotion_deltas.get(emotion) * 100.0, 1).dimmed())
        } else {
            String::new()
        };
        println!(
            "    {:<11} {} {:>5.1}%{}",
            emotion.as_str(),
            bar(value),
            value * 100.0,
            change
        );
    }
    println!();

    if analysis.topics.is_empty() {
        println!("  No topics found. Need at least two related items per topic.");
        return;
    }

    println!("  {}", format!("Trending topics ({}):", analysis.topics.len()).bold());
    for (i, topic) in analysis.topics.iter().enumerate() {
        let marker = if topic.is_new() {
            " NEW".bright_green().bold().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:>3}. {}{}  {}",
            i + 1,
            topic.title.bold(),
            marker,
            format!("weight {:.2}, mood: {}", topic.weight, dominant_label(&topic.emotions)).dimmed()
        );
        println!("       Keywords: {}", topic.keywords.join(", ").dimmed());
        if let Some(summary) = &topic.summary {
            println!("       {}", super::truncate_chars(summary, 140));
        }
        for receipt in &topic.receipts {
            println!(
                "       - [{}] {} {}",
                receipt.source,
                super::truncate_chars(&receipt.title, 90),
                format!("({} engagement)", receipt.engagement).dimmed()
            );
        }
        println!();
    }
}

/// Display a stored snapshot.
pub fn display_snapshot(snapshot: &Snapshot) {
    println!(
        "\n{}",
        format!("=== Snapshot for {} ===", snapshot.date).bold()
    );
    println!(
        "  Tension index: {}/100",
        colorize_tension(snapshot.tension_index)
    );
    println!("  Dominant mood: {}", dominant_label(&snapshot.emotions));
    println!("  Topics: {}", snapshot.topics.len());
    for (i, topic) in snapshot.topics.iter().enumerate() {
        println!(
            "    {:>2}. {} {}",
            i + 1,
            topic.keywords.join(", "),
            format!("({} items)", topic.item_ids.len()).dimmed()
        );
    }
}

fn bar(value: f64) -> String {
    let filled = ((value * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "=".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}

fn signed(value: f64, decimals: usize) -> String {
    if value > 0.0 {
        format!("+{value:.decimals$}").red().to_string()
    } else if value < 0.0 {
        format!("{value:.decimals$}").green().to_string()
    } else {
        format!("{value:.decimals$}")
    }
}

fn dominant_label(emotions: &EmotionDistribution) -> String {
    let dominant = emotions.dominant();
    if dominant == Emotion::Neutral {
        dominant.as_str().dimmed().to_string()
    } else {
        dominant.as_str().to_string()
    }
}

/// Colorize a tension value by severity.
fn colorize_tension(tension: f64) -> colored::ColoredString {
    let text = format!("{tension:.0}");
    match tension {
        t if t >= 70.0 => text.red().bold(),
        t if t >= 40.0 => text.bright_red(),
        t if t >= 20.0 => text.yellow(),
        _ => text.green(),
    }
}
