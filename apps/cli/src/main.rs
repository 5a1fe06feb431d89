use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use konspekt_core::{
    AzureOpenAiClient, GenerationConfig, MetadataProvider, SlideDeck, SlideRecord, TextGenerator,
    TimedTextApi, TranscriptProvider, YoutubeConfig, YoutubeDataApi, extract_video_id,
    format_deck_readable, format_transcript_with_timestamps, generate_comment, get_cache_dir,
    get_deck_path, parse_subtopics, save_deck, segment_transcript, synthesize_slide,
};

#[derive(Parser)]
#[command(name = "konspekt")]
#[command(about = "Turn a YouTube video's transcript into a structured slide deck")]
struct Cli {
    /// Video URL or bare 11-character video ID
    video: String,

    /// Caption language to fetch
    #[arg(short, long, default_value = "en")]
    lang: String,

    /// Where to write the deck JSON (defaults to the cache directory)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Also generate a short social comment about the video
    #[arg(short, long)]
    comment: bool,

    /// Print the fetched transcript with timestamps before generating slides
    #[arg(short, long)]
    transcript: bool,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn resolve_video_id(input: &str) -> Result<String> {
    if let Some(id) = extract_video_id(input) {
        return Ok(id);
    }
    // Bare video ID
    if input.len() == 11
        && input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Ok(input.to_string());
    }
    bail!("'{input}' is not a YouTube URL or video ID");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Validate credentials early
    let generation_config = match GenerationConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };
    let youtube_config = match YoutubeConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    let video_id = resolve_video_id(&cli.video)?;

    let http = reqwest::Client::new();
    let metadata_api = YoutubeDataApi::new(http.clone(), youtube_config);
    let transcript_api = TimedTextApi::with_language(http, cli.lang.clone());
    let generator: Arc<dyn TextGenerator> = Arc::new(AzureOpenAiClient::new(generation_config)?);

    println!(
        "\n{}  {}\n",
        style("konspekt").cyan().bold(),
        style("Slide Generator").dim()
    );

    // Step 1: Metadata
    let spinner = create_spinner("Fetching video metadata...");
    let metadata = metadata_api.video_metadata(&video_id).await?;
    spinner.finish_with_message(format!(
        "{} Metadata: {}",
        style("✓").green().bold(),
        style(&metadata.title).dim()
    ));

    // Step 2: Transcript
    let spinner = create_spinner("Fetching transcript...");
    let transcript = transcript_api.transcript(&video_id).await?;
    let duration_mins = transcript.duration_seconds() / 60.0;
    spinner.finish_with_message(format!(
        "{} Transcript: {:.1} min, {} fragments",
        style("✓").green().bold(),
        duration_mins,
        transcript.fragments.len()
    ));

    if cli.transcript {
        println!("{}", style("─".repeat(60)).dim());
        println!("{}", format_transcript_with_timestamps(&transcript));
        println!("{}", style("─".repeat(60)).dim());
    }

    // Step 3: Segment into subtopics
    let spinner = create_spinner("Identifying subtopics...");
    let raw_outline = segment_transcript(generator.as_ref(), &transcript.plain_text()).await?;
    let outline = parse_subtopics(&raw_outline);
    spinner.finish_with_message(format!(
        "{} Subtopics identified: {}",
        style("✓").green().bold(),
        outline.len()
    ));

    // Step 4: Synthesize one slide per subtopic; a failed subtopic is
    // dropped, the rest of the deck still assembles.
    let mut deck = SlideDeck::with_cover(SlideRecord::cover(&metadata));
    for subtopic in outline.iter() {
        let spinner = create_spinner(&format!("Summarizing '{}'...", subtopic.title));
        match synthesize_slide(generator.as_ref(), &subtopic.excerpt).await {
            Ok(slide) => {
                deck.push(slide);
                spinner.finish_with_message(format!(
                    "{} Slide: {}",
                    style("✓").green().bold(),
                    style(&subtopic.title).dim()
                ));
            }
            Err(e) => {
                spinner.finish_with_message(format!(
                    "{} Dropped '{}': {}",
                    style("✗").red().bold(),
                    subtopic.title,
                    style(e).dim()
                ));
            }
        }
    }

    // Step 5: Dump the deck
    let deck_path = cli
        .out
        .unwrap_or_else(|| get_deck_path(&get_cache_dir(&video_id)));
    save_deck(&deck, &deck_path).await?;

    println!(
        "\n{} {} slides {}\n",
        style("Saved:").dim(),
        deck.len(),
        style(deck_path.display()).cyan()
    );
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", format_deck_readable(&deck));

    if cli.comment {
        let spinner = create_spinner("Writing a comment...");
        let comment =
            generate_comment(generator.as_ref(), &metadata.title, &metadata.description).await?;
        spinner.finish_and_clear();
        println!("{}", style("Suggested comment:").bold());
        println!("{comment}");
    }

    Ok(())
}
