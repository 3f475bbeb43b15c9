//! Icon fetching and caching
//!
//! Spell and champion icons come from the Data Dragon CDN. Fetches run on a
//! background task fed through a channel so the render loop never blocks on
//! the network; decoded images flow back the same way. Downloads land in an
//! on-disk cache keyed by asset name, so a given icon is fetched at most
//! once across runs.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tracing::{debug, warn};

const CDN_BASE: &str = "https://ddragon.leagueoflegends.com/cdn";
const VERSIONS_URL: &str = "https://ddragon.leagueoflegends.com/api/versions.json";

/// Used when the live version list cannot be fetched.
const FALLBACK_VERSION: &str = "14.24.1";

/// Spell asset ids are stable; their icons are served from a pinned
/// version so a CDN layout change cannot break every button at once.
const SPELL_VERSION: &str = "13.24.1";

/// A decoded RGBA icon ready for drawing.
#[derive(Debug, Clone)]
pub struct IconImage {
    pub width: u32,
    pub height: u32,
    /// Straight-alpha RGBA, row-major.
    pub rgba: Vec<u8>,
}

/// What to fetch: a champion portrait or a summoner spell icon.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IconKey {
    /// Champion name as reported by telemetry, e.g. "Ahri".
    Champion(String),
    /// Spell asset id from the catalog, e.g. "SummonerFlash".
    Spell(String),
}

impl IconKey {
    /// File name inside the on-disk cache.
    fn cache_file(&self) -> String {
        match self {
            Self::Champion(name) => format!("champion_{}.png", sanitize_asset_name(name)),
            Self::Spell(id) => format!("spell_{id}.png"),
        }
    }

    fn url(&self, version: &str) -> String {
        match self {
            Self::Champion(name) => {
                format!("{CDN_BASE}/{version}/img/champion/{}.png", sanitize_asset_name(name))
            }
            Self::Spell(id) => format!("{CDN_BASE}/{SPELL_VERSION}/img/spell/{id}.png"),
        }
    }
}

#[derive(Debug)]
enum IconError {
    Http(reqwest::Error),
    Status(reqwest::StatusCode),
    Decode(png::DecodingError),
}

impl std::fmt::Display for IconError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(e) => write!(f, "icon request failed: {e}"),
            Self::Status(s) => write!(f, "icon request returned {s}"),
            Self::Decode(e) => write!(f, "icon decode failed: {e}"),
        }
    }
}

impl From<reqwest::Error> for IconError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<png::DecodingError> for IconError {
    fn from(e: png::DecodingError) -> Self {
        Self::Decode(e)
    }
}

/// Default on-disk icon cache directory.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("sumtrack")
        .join("icons")
}

/// Background task resolving icon requests to decoded images.
///
/// Runs until the request channel closes. Failures are logged and the
/// request dropped; the caller just keeps rendering its placeholder and may
/// re-request later.
pub async fn icon_fetch_task(
    mut requests: mpsc::Receiver<IconKey>,
    results: mpsc::Sender<(IconKey, IconImage)>,
    cache_dir: PathBuf,
) {
    if let Err(e) = std::fs::create_dir_all(&cache_dir) {
        warn!("failed to create icon cache dir {}: {e}", cache_dir.display());
    }

    let client = match reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            warn!("icon fetcher could not build an http client: {e}");
            return;
        }
    };
    // Resolved lazily on the first fetch, then reused for the whole run
    let mut version: Option<String> = None;

    while let Some(key) = requests.recv().await {
        let image = match load_icon(&client, &mut version, &cache_dir, &key).await {
            Ok(image) => image,
            Err(e) => {
                debug!("icon fetch for {key:?} failed: {e}");
                continue;
            }
        };
        if results.send((key, image)).await.is_err() {
            break;
        }
    }
}

async fn load_icon(
    client: &reqwest::Client,
    version: &mut Option<String>,
    cache_dir: &Path,
    key: &IconKey,
) -> Result<IconImage, IconError> {
    let cache_path = cache_dir.join(key.cache_file());

    if let Ok(bytes) = std::fs::read(&cache_path) {
        if let Ok(image) = decode_png(&bytes) {
            return Ok(image);
        }
        // Corrupt cache entry, refetch
        let _ = std::fs::remove_file(&cache_path);
    }

    // Only champion portraits track the live version
    let ver = match key {
        IconKey::Spell(_) => SPELL_VERSION.to_string(),
        IconKey::Champion(_) => match version {
            Some(v) => v.clone(),
            None => {
                let v = fetch_latest_version(client).await;
                *version = Some(v.clone());
                v
            }
        },
    };

    let url = key.url(&ver);
    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(IconError::Status(response.status()));
    }
    let bytes = response.bytes().await?;

    let image = decode_png(&bytes)?;
    if let Err(e) = std::fs::write(&cache_path, &bytes) {
        warn!("failed to cache icon {}: {e}", cache_path.display());
    }
    debug!("fetched icon {url}");
    Ok(image)
}

/// Latest CDN version, or the pinned fallback when the list is unreachable.
async fn fetch_latest_version(client: &reqwest::Client) -> String {
    let fetched: Result<Vec<String>, reqwest::Error> = async {
        client.get(VERSIONS_URL).send().await?.json().await
    }
    .await;

    match fetched {
        Ok(versions) => match versions.into_iter().next() {
            Some(v) => v,
            None => FALLBACK_VERSION.to_string(),
        },
        Err(e) => {
            warn!("failed to fetch CDN version list, using {FALLBACK_VERSION}: {e}");
            FALLBACK_VERSION.to_string()
        }
    }
}

/// Decode a PNG into straight-alpha RGBA.
fn decode_png(bytes: &[u8]) -> Result<IconImage, IconError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        // EXPAND leaves no indexed output
        png::ColorType::Indexed => buf,
    };

    Ok(IconImage {
        width: info.width,
        height: info.height,
        rgba,
    })
}

/// CDN asset names are alphanumeric with a leading capital; telemetry
/// champion names may contain spaces or punctuation ("Kai'Sa", "Dr. Mundo").
fn sanitize_asset_name(name: &str) -> String {
    let stripped: String = name.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    let mut chars = stripped.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => stripped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_asset_name() {
        assert_eq!(sanitize_asset_name("Ahri"), "Ahri");
        assert_eq!(sanitize_asset_name("Kai'Sa"), "KaiSa");
        assert_eq!(sanitize_asset_name("Dr. Mundo"), "DrMundo");
        assert_eq!(sanitize_asset_name(""), "");
    }

    #[test]
    fn test_icon_key_cache_file_and_url() {
        let spell = IconKey::Spell("SummonerFlash".to_string());
        assert_eq!(spell.cache_file(), "spell_SummonerFlash.png");
        assert_eq!(
            spell.url("14.24.1"),
            "https://ddragon.leagueoflegends.com/cdn/13.24.1/img/spell/SummonerFlash.png",
            "spell icons come from the pinned version regardless of the live one"
        );

        let champ = IconKey::Champion("Kai'Sa".to_string());
        assert_eq!(champ.cache_file(), "champion_KaiSa.png");
        assert_eq!(
            champ.url("14.24.1"),
            "https://ddragon.leagueoflegends.com/cdn/14.24.1/img/champion/KaiSa.png"
        );
    }

    #[test]
    fn test_decode_png_smallest_rgba() {
        // 1x1 transparent PNG
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, 1, 1);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[10, 20, 30, 40]).unwrap();
        }
        let image = decode_png(&bytes).unwrap();
        assert_eq!((image.width, image.height), (1, 1));
        assert_eq!(image.rgba, vec![10, 20, 30, 40]);
    }
}
