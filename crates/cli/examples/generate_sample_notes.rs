use std::fs::File;
use std::io::BufWriter;

const HEADERS: [&str; 9] = [
    "noteId",
    "tweetId",
    "createdAtMillis",
    "detected_language",
    "sentiment_category",
    "is_political",
    "is_hateful",
    "summary_en",
    "political_keywords_flagged",
];

/// Monday 2024-01-01 00:00 UTC
const START_MILLIS: u64 = 1_704_067_200_000;
const DAY_MILLIS: u64 = 24 * 60 * 60 * 1000;

const LANGUAGES: [&str; 7] = ["hi", "en", "ta", "ur", "mr", "bn", "en"];
const SENTIMENTS: [&str; 3] = ["positive", "neutral", "negative"];
const TOPICS: [(&str, &str); 6] = [
    ("Claim about the new fuel tax is misleading", "tax, fuel"),
    ("Video of the election rally is from 2019", "election, rally"),
    ("Cricket score posted before the match ended", ""),
    ("Quote attributed to the minister was fabricated", "minister, election"),
    ("Flood photo is from a different state", ""),
    ("Jobs report figures were misread", "jobs,tax"),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/tmp/sample_notes.csv".to_string());

    let mut writer = csv::Writer::from_writer(BufWriter::new(File::create(&output_file)?));
    writer.write_record(HEADERS)?;

    println!("Generating sample notes: {}\n", output_file);

    let mut rows = 0;
    for i in 0..240u64 {
        let (summary, keywords) = TOPICS[(i % TOPICS.len() as u64) as usize];
        let created = START_MILLIS + (i % 56) * DAY_MILLIS + i * 37_000;

        // Every 40th row carries a broken timestamp, every 25th lacks a tweet id
        let timestamp = if i % 40 == 39 {
            "not_a_number".to_string()
        } else {
            created.to_string()
        };
        let tweet_id = if i % 25 == 24 {
            String::new()
        } else {
            (1_750_000_000_000_000_000 + i).to_string()
        };

        writer.write_record([
            format!("N{:05}", i),
            tweet_id,
            timestamp,
            LANGUAGES[(i % LANGUAGES.len() as u64) as usize].to_string(),
            SENTIMENTS[(i % 3) as usize].to_string(),
            if i % 3 == 0 { "False" } else { "True" }.to_string(),
            if i % 11 == 0 { "True" } else { "False" }.to_string(),
            format!("{} (#{})", summary, i),
            keywords.to_string(),
        ])?;
        rows += 1;
    }

    writer.flush()?;

    println!("Generated {} notes over 8 weeks", rows);
    println!("  - Languages: hi, en, ta, ur, mr, bn");
    println!("  - Broken timestamps: {}", rows / 40);
    println!("  - Rows without tweetId: {}", rows / 25);
    println!("\nExplore with:");
    println!("  notescope view {} --language India", output_file);
    println!("  notescope tui {}", output_file);

    Ok(())
}
