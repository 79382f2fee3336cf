use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use thumbforge::{
    logger, AspectRatio, EncodedImage, GatewayConfig, GeneratedImage, GenerationGateway, Studio,
};

/// Generate a YouTube thumbnail and SEO metadata from a video brief.
#[derive(Parser, Debug)]
#[command(name = "thumbforge", version)]
struct Args {
    /// Channel niche (e.g. Gaming, Tech, Cooking)
    niche: String,

    /// Video title
    title: String,

    /// Text to render on the thumbnail. Omit for a text-free image.
    text: Option<String>,

    /// Extra visual details for the scene
    details: Option<String>,

    /// Output aspect ratio: 16:9, 9:16 or 1:1
    #[arg(long, default_value = "16:9", env = "ASPECT_RATIO")]
    aspect_ratio: AspectRatio,

    /// Face reference image
    #[arg(long, env = "FACE_IMAGE")]
    face: Option<PathBuf>,

    /// Environment reference image
    #[arg(long, env = "ENVIRONMENT_IMAGE")]
    environment: Option<PathBuf>,

    /// Style reference image
    #[arg(long, env = "STYLE_IMAGE")]
    style: Option<PathBuf>,

    /// Follow-up edit applied to the generated thumbnail
    #[arg(long, env = "EDIT_INSTRUCTION")]
    edit: Option<String>,

    /// Directory the images are written to
    #[arg(long, default_value = ".", env = "OUTPUT_DIR")]
    out_dir: PathBuf,
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

fn load_reference(label: &str, path: Option<&Path>) -> std::io::Result<Option<String>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let bytes = fs::read(path)?;
    log::info!("📎 {} loaded from {} ({} bytes)", label, path.display(), bytes.len());
    Ok(Some(EncodedImage::new(mime_for(path), bytes).to_data_uri()))
}

fn save(image: &GeneratedImage, dir: &Path) -> std::io::Result<PathBuf> {
    let ext = image.mime_type().rsplit('/').next().unwrap_or("png");
    let short_id: String = image.id.chars().take(8).collect();
    let path = dir.join(format!("thumbnail_{}_{}.{}", image.timestamp, short_id, ext));
    fs::write(&path, &image.image.data)?;
    Ok(path)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let args = Args::parse();
    logger::init_with_config(logger::LoggerConfig::development())?;
    if !dotenv_loaded {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = GatewayConfig::from_env();
    let gateway = GenerationGateway::new(&config)?;
    if !gateway.has_credential() {
        log::warn!("⚠️  No API key in API_KEY or GEMINI_API_KEY; the first request will fail");
    }

    let mut studio = Studio::new(gateway, &config);
    {
        let brief = studio.config_mut();
        brief.niche = args.niche;
        brief.video_title = args.title;
        brief.thumbnail_text = args.text;
        brief.details = args.details;
        brief.aspect_ratio = args.aspect_ratio;
        brief.face_reference = load_reference("Face", args.face.as_deref())?;
        brief.environment_reference = load_reference("Environment", args.environment.as_deref())?;
        brief.style_reference = load_reference("Style", args.style.as_deref())?;
    }

    fs::create_dir_all(&args.out_dir)?;

    log::info!("🎨 Generating thumbnail...");
    let image = match studio.generate().await {
        Ok(image) => image,
        Err(e) => {
            let message = studio
                .last_error()
                .map(str::to_string)
                .unwrap_or_else(|| e.to_string());
            log::error!("❌ {}", message);
            if studio.needs_credential() {
                log::warn!("💡 Set API_KEY or GEMINI_API_KEY to a key with image model access");
            }
            return Err(e.into());
        }
    };
    log::info!("💾 Thumbnail saved to: {}", save(&image, &args.out_dir)?.display());

    if let Some(caption) = &image.caption {
        println!("{}", caption);
    }

    if let Some(instruction) = &args.edit {
        log::info!("✏️  Applying edit: {}", instruction);
        if let Some(edited) = studio.edit(instruction).await? {
            log::info!("💾 Edited thumbnail saved to: {}", save(&edited, &args.out_dir)?.display());
        }
    }

    log::info!("📝 {} image(s) in history", studio.history().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_brief_and_options() {
        let args = Args::try_parse_from([
            "thumbforge",
            "Gaming",
            "I Beat The Game Blindfolded",
            "NO VISION",
            "--aspect-ratio",
            "9:16",
            "--face",
            "me.png",
            "--edit",
            "add flames",
        ])
        .unwrap();

        assert_eq!(args.niche, "Gaming");
        assert_eq!(args.text.as_deref(), Some("NO VISION"));
        assert!(args.details.is_none());
        assert_eq!(args.aspect_ratio, AspectRatio::Portrait);
        assert_eq!(args.face, Some(PathBuf::from("me.png")));
        assert_eq!(args.edit.as_deref(), Some("add flames"));
    }

    #[test]
    fn rejects_unknown_aspect_ratio() {
        let result = Args::try_parse_from(["thumbforge", "Tech", "Review", "--aspect-ratio", "4:3"]);
        assert!(result.is_err());
    }

    #[test]
    fn requires_niche_and_title() {
        assert!(Args::try_parse_from(["thumbforge", "Tech"]).is_err());
    }

    #[test]
    fn save_handles_short_ids() {
        let mut image = GeneratedImage::new(EncodedImage::new("image/png", vec![1]), "brief");
        image.id = "ab".into();
        let dir = std::env::temp_dir();
        let path = save(&image, &dir).unwrap();
        assert!(path.to_string_lossy().contains("_ab.png"));
        fs::remove_file(path).unwrap();
    }
}
