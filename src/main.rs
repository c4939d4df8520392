use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

use track_suggestions::logging;
use track_suggestions::render::{render_table_body, SORTABLE_FIELDS};
use track_suggestions::{
    FilterControls, GenreMode, HttpBackend, MemoryView, PanelContext, RefreshOutcome,
    SuggestionsPanel, SuggestionsResponse,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Query the suggestions endpoint once and print the rendered table body
    Refresh(RefreshArgs),
    /// Render a saved suggestions response
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct RefreshArgs {
    /// Suggestions endpoint (the panel's data-ajax-url)
    #[arg(long, env = "SUGGESTIONS_URL")]
    url: String,

    /// Track to get suggestions for
    #[arg(long)]
    track_id: i64,

    /// BPM tolerance; without it the request uses the default
    #[arg(long)]
    bpm_range: Option<i64>,

    /// Value of the checked genre-mode radio (exact, same, secondary)
    #[arg(long)]
    genre_mode: Option<GenreMode>,

    /// Column header to click before refreshing, may be repeated
    #[arg(long = "click", value_name = "FIELD")]
    clicks: Vec<String>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// JSON response file, reads stdin when omitted
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    logging::init_tracing(cli.debug)?;

    match cli.command {
        Commands::Refresh(args) => run_refresh(args).await,
        Commands::Render(args) => run_render(args),
    }
}

async fn run_refresh(args: RefreshArgs) -> Result<()> {
    let mut controls = FilterControls::default();
    if let Some(bpm) = args.bpm_range {
        controls = controls.with_bpm_slider(bpm);
    }
    if let Some(mode) = args.genre_mode {
        controls = controls.with_checked_genre(mode);
    }

    let mut panel = SuggestionsPanel::new(
        PanelContext::new(args.track_id, args.url),
        MemoryView::new(SORTABLE_FIELDS),
    )
    .with_controls(controls);

    // Only the final refresh is sent; tickets issued by the clicks are superseded.
    for field in &args.clicks {
        panel.on_header_click(field);
    }
    tracing::info!(
        field = %panel.sort().field,
        order = %panel.sort().order,
        "querying suggestions"
    );

    let outcome = panel
        .refresh(&HttpBackend::new())
        .await
        .ok_or_else(|| anyhow!("panel has no track id or endpoint"))?;

    match outcome {
        RefreshOutcome::Rendered { count } => {
            println!(
                "{}",
                refresh_report(count, panel.view().tbody_html().unwrap_or_default())
            );
            tracing::info!(count, "suggestions rendered");
            Ok(())
        }
        RefreshOutcome::Failed => bail!("failed to fetch suggestions"),
        RefreshOutcome::Stale => bail!("suggestions response was superseded"),
    }
}

/// Count on the first line, table body after it.
fn refresh_report(count: i64, tbody: &str) -> String {
    format!("count: {}\n{}", count, tbody)
}

fn run_render(args: RenderArgs) -> Result<()> {
    let content = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read response file {:?}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read response from stdin")?;
            buf
        }
    };

    let response: SuggestionsResponse =
        serde_json::from_str(&content).context("Failed to parse suggestions response JSON")?;
    let body = render_table_body(&response.suggestions);
    println!("{}", body.html);
    tracing::info!(count = response.count, rows = body.row_ids.len(), "rendered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_report_starts_with_count() {
        let report = refresh_report(2, "<tr></tr>");
        let mut lines = report.lines();
        assert_eq!(lines.next(), Some("count: 2"));
        assert_eq!(lines.next(), Some("<tr></tr>"));
        assert_eq!(lines.next(), None);
    }
}
