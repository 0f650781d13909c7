//! Wren command line renderer
//!
//! Loads a page, lays it out and prints or draws the result.
//!
//! - wren URL                  # List the words visible in the viewport
//! - wren --tokens URL         # Dump the token stream
//! - wren --json URL           # Dump the whole display list as JSON
//! - wren -S out.png URL       # Take screenshot

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use log::warn;
use owo_colors::OwoColorize;
use wren_browser::renderer::Renderer;
use wren_browser::{
    FontSet, FontdueFontProvider, LoadedDocument, Viewport, load_document, parse_html_string,
};
use wren_html::{Token, text_content};
use wren_layout::{ApproximateFontProvider, FontCache, LayoutConfig};

/// Wren - a tiny renderer for styled HTML text
#[derive(Parser, Debug)]
#[command(name = "wren")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Lay out a page and list the visible words
    wren https://example.org/

    # Show the token stream of a local file
    wren --tokens file:///tmp/index.html

    # Screenshot the third screenful of a page
    wren -S page.png --scroll 12 https://example.org/

    # Lay out inline HTML
    wren --html 'Hi <b>there</b>!'

    # Measure and draw with a specific font file
    wren -S page.png --font DejaVuSans.ttf https://example.org/
"#)]
struct Cli {
    /// URL to open (http://, https:// or file://)
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Lay out an HTML string directly instead of fetching a URL
    #[arg(long, value_name = "HTML", conflicts_with = "url")]
    html: Option<String>,

    /// Print the token stream
    #[arg(long)]
    tokens: bool,

    /// Print the document text with markup removed
    #[arg(long)]
    text: bool,

    /// Print the full display list as JSON
    #[arg(long)]
    json: bool,

    /// Take a screenshot and save to the specified file (PNG format)
    #[arg(short = 'S', long, value_name = "FILE")]
    screenshot: Option<PathBuf>,

    /// Viewport and page width
    #[arg(long, default_value = "800")]
    width: u32,

    /// Viewport height
    #[arg(long, default_value = "600")]
    height: u32,

    /// Number of scroll steps to move down before printing or drawing
    #[arg(long, default_value = "0")]
    scroll: u32,

    /// Use this TrueType/OpenType file instead of searching system fonts
    #[arg(long, value_name = "FILE", conflicts_with = "approximate_metrics")]
    font: Option<PathBuf>,

    /// Measure text with fixed ratios instead of system fonts
    #[arg(long)]
    approximate_metrics: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let fonts = load_fonts(&cli)?;
    let mut cache = font_cache(&fonts, cli.approximate_metrics);

    let config = LayoutConfig::with_page_width(cli.width as f32);
    let doc = load_doc(&cli, &config, &mut cache)?;

    let mut viewport = Viewport::new(cli.width as f32, cli.height as f32);
    for _ in 0..cli.scroll {
        viewport.scroll_down();
    }
    viewport.clamp_to(&doc.display_list);

    if let Some(ref output_path) = cli.screenshot {
        take_screenshot(&doc, &viewport, fonts, output_path)?;
        println!("Screenshot saved to: {}", output_path.display());
        return Ok(());
    }

    if cli.tokens {
        print_tokens(&doc.tokens);
    } else if cli.text {
        println!("{}", text_content(&doc.tokens));
    } else if cli.json {
        println!("{}", serde_json::to_string_pretty(&doc.display_list)?);
    } else {
        print_display_list(&doc, &viewport);
    }
    Ok(())
}

/// Load the faces used for measuring and drawing.
fn load_fonts(cli: &Cli) -> anyhow::Result<FontSet> {
    if cli.approximate_metrics {
        return Ok(FontSet::default());
    }
    let Some(ref path) = cli.font else {
        return Ok(FontSet::load_system());
    };
    let data =
        fs::read(path).with_context(|| format!("could not read font '{}'", path.display()))?;
    FontSet::from_regular_bytes(&data)
        .map_err(|e| anyhow::anyhow!("invalid font '{}': {e}", path.display()))
}

/// Pick the font backend: system fonts when present, fixed ratios otherwise.
fn font_cache(fonts: &FontSet, approximate: bool) -> FontCache {
    if approximate {
        return FontCache::new(ApproximateFontProvider);
    }
    if !fonts.has_regular() {
        warn!("no system font available, falling back to approximate metrics");
        return FontCache::new(ApproximateFontProvider);
    }
    FontCache::new(FontdueFontProvider::new(fonts.clone()))
}

/// Load document from CLI arguments
fn load_doc(
    cli: &Cli,
    config: &LayoutConfig,
    fonts: &mut FontCache,
) -> anyhow::Result<LoadedDocument> {
    if let Some(ref html_string) = cli.html {
        Ok(parse_html_string(html_string, config, fonts)?)
    } else if let Some(ref url) = cli.url {
        load_document(url, config, fonts).with_context(|| format!("could not open {url}"))
    } else {
        anyhow::bail!("a URL or --html is required")
    }
}

/// Draw the visible part of the page to a PNG file.
fn take_screenshot(
    doc: &LoadedDocument,
    viewport: &Viewport,
    fonts: FontSet,
    output_path: &Path,
) -> anyhow::Result<()> {
    if !fonts.has_regular() {
        warn!("no system font available, screenshot will contain no text");
    }
    let mut renderer = Renderer::for_viewport(viewport, fonts);
    let _ = renderer.render(&doc.display_list, viewport);
    renderer.save(output_path)
}

fn print_tokens(tokens: &[Token]) {
    println!("{}", "=== Tokens ===".bold());
    for token in tokens {
        match token {
            Token::Text { content } => println!("{} {content:?}", "text".green()),
            Token::Tag { name } => println!("{}  <{name}>", "tag".cyan()),
        }
    }
}

fn print_display_list(doc: &LoadedDocument, viewport: &Viewport) {
    let visible: Vec<_> = viewport.visible_items(&doc.display_list).collect();
    println!(
        "{}",
        format!(
            "=== Display List ({} of {} words, scroll {}) ===",
            visible.len(),
            doc.display_list.len(),
            viewport.scroll
        )
        .bold()
    );
    for item in visible {
        println!(
            "{:>8.1} {:>8.1}  {}  {}",
            item.x,
            item.y,
            item.font.key().dimmed(),
            item.word
        );
    }
}
