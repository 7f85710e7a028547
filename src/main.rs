use anyhow::Result;
use clap::Parser;
use medimage_analyzer::ai::mime::detect_image_media_type;
use medimage_analyzer::models::{Config, ImagePayload};
use medimage_analyzer::prompts;
use medimage_analyzer::session::Session;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "medimage-analyzer")]
#[command(about = "Analyze a medical image with a hosted generative-AI model")]
struct CliArgs {
    /// Path to the medical image to analyze (JPEG or PNG).
    #[arg(value_name = "IMAGE")]
    image: Option<PathBuf>,
}

/// Declared media type for an upload: magic bytes first, file extension as a
/// fallback for files with unrecognized headers.
fn media_type_for(path: &Path, bytes: &[u8]) -> String {
    if let Some(sniffed) = detect_image_media_type(bytes) {
        return sniffed.to_string();
    }
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg".to_string(),
        Some("png") => "image/png".to_string(),
        _ => "application/octet-stream".to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medimage_analyzer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    // Missing access key is fatal before any session exists.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let session = Session::new(&config);

    let Some(image_path) = args.image else {
        println!("Please upload an image before requesting analysis.");
        return Ok(());
    };

    let bytes = fs::read(&image_path).map_err(medimage_analyzer::Error::Io)?;
    let media_type = media_type_for(&image_path, &bytes);
    info!(
        "Read {} ({} bytes, {})",
        image_path.display(),
        bytes.len(),
        media_type
    );

    match session.analyze(ImagePayload::new(bytes, media_type)).await {
        Ok(result) => {
            println!("{}", result.text);
        }
        Err(e) => {
            error!("Analysis failed: {}", e);
            eprintln!("{}", e);
        }
    }

    println!();
    println!("{}", prompts::DISCLAIMER);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::media_type_for;
    use std::path::Path;

    #[test]
    fn test_media_type_prefers_magic_bytes() {
        // PNG signature wins over a misleading extension.
        let media_type = media_type_for(Path::new("scan.jpg"), &[0x89, 0x50, 0x4E, 0x47]);
        assert_eq!(media_type, "image/png");
    }

    #[test]
    fn test_media_type_falls_back_to_extension() {
        assert_eq!(
            media_type_for(Path::new("scan.jpeg"), &[0x00, 0x00]),
            "image/jpeg"
        );
        assert_eq!(
            media_type_for(Path::new("scan.PNG"), &[0x00, 0x00]),
            "image/png"
        );
    }

    #[test]
    fn test_media_type_unknown_passes_through_for_validation() {
        assert_eq!(
            media_type_for(Path::new("scan.bmp"), &[0x42, 0x4D]),
            "application/octet-stream"
        );
    }
}
