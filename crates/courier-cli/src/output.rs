//! Output formatting for plan, zone and path rendering.

use clap::ValueEnum;

use crate::terminal::ColorPalette;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

/// Apply the palette to a plain-text rendering.
///
/// Headings (lines ending with `:`) are emphasised, warning lines highlighted
/// and distance lines colored.
pub fn colorize(text: &str, palette: &ColorPalette) -> String {
    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if trimmed.starts_with("[WARN]") {
                format!("{}{line}{}", palette.yellow, palette.reset)
            } else if trimmed.contains("distance:") || trimmed.starts_with("Distance:") {
                format!("{}{line}{}", palette.green, palette.reset)
            } else if line.ends_with(':') && !line.starts_with(' ') {
                format!("{}{line}{}", palette.white_bold, palette.reset)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print a rendered document to stdout in the requested format.
///
/// Only the renderer for the selected format is invoked.
pub fn emit<E>(
    format: OutputFormat,
    text: impl FnOnce() -> String,
    json: impl FnOnce() -> Result<String, E>,
) -> Result<(), E> {
    match format {
        OutputFormat::Text => println!("{}", colorize(&text(), &ColorPalette::detect())),
        OutputFormat::Json => println!("{}", json()?),
    }
    Ok(())
}
