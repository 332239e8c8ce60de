//! Typeface provisioning.
//!
//! The renderer needs two faces: a sans-serif body face and a serif display
//! face. [`provision`] tries to make the requested families available from
//! the system, from extra font directories, or by downloading them, then
//! resolves each role to concrete font bytes. The resulting [`FontCache`] is
//! built once per process and passed to the renderer explicitly.

mod outline;
mod remote;

pub use outline::{glyph_transform, OutlineBuilder};

use crate::error::FontError;
use fontdb::{Database, Family, Query};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{info, warn};

pub const DEFAULT_FONT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontRole {
    Sans,
    Serif,
}

#[derive(Debug, Clone)]
pub struct FontRequest {
    pub role: FontRole,
    pub family: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FontSettings {
    pub timeout: Duration,
    pub load_system_fonts: bool,
    pub font_dirs: Vec<PathBuf>,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FONT_TIMEOUT,
            load_system_fonts: true,
            font_dirs: Vec::new(),
        }
    }
}

/// How a role ended up being served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FontStatus {
    /// The requested family was already installed.
    Registered,
    /// The requested family was fetched from its URL.
    Downloaded,
    /// Another installed face stands in for the requested family.
    SystemFallback { family: String },
    /// No face at all; text is measured approximately and not drawn.
    Unavailable,
}

#[derive(Debug, Clone, Serialize)]
pub struct FontReport {
    pub role: FontRole,
    pub requested: String,
    #[serde(flatten)]
    pub status: FontStatus,
}

/// Raw font bytes plus the face index inside them.
#[derive(Debug, Clone)]
pub struct LoadedFace {
    pub family: String,
    data: Arc<Vec<u8>>,
    index: u32,
}

impl LoadedFace {
    pub fn parse(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, self.index).ok()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FontCache {
    faces: HashMap<FontRole, LoadedFace>,
    report: Vec<FontReport>,
}

impl FontCache {
    /// A cache with no faces. Text falls back to approximate metrics.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn face(&self, role: FontRole) -> Option<&LoadedFace> {
        self.faces.get(&role)
    }

    pub fn report(&self) -> &[FontReport] {
        &self.report
    }
}

/// Default requests for the two roles, before configuration overrides.
pub fn default_requests() -> Vec<FontRequest> {
    vec![
        FontRequest {
            role: FontRole::Sans,
            family: "Inter".to_string(),
            url: None,
        },
        FontRequest {
            role: FontRole::Serif,
            family: "Playfair Display".to_string(),
            url: None,
        },
    ]
}

fn has_family(db: &Database, family: &str) -> bool {
    db.faces().any(|face| {
        face.families
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(family))
    })
}

fn face_bytes(db: &Database, id: fontdb::ID) -> Option<LoadedFace> {
    let family = db
        .face(id)?
        .families
        .first()
        .map(|(name, _)| name.clone())
        .unwrap_or_default();
    db.with_face_data(id, |data, index| LoadedFace {
        family,
        data: Arc::new(data.to_vec()),
        index,
    })
}

fn query_family(db: &Database, family: Family<'_>) -> Option<fontdb::ID> {
    db.query(&Query {
        families: &[family],
        ..Query::default()
    })
}

/// Picks an installed stand-in: the generic family first, then any face
/// whose name hints at the right style, then anything at all.
fn fallback_face(db: &Database, role: FontRole) -> Option<LoadedFace> {
    let generic = match role {
        FontRole::Sans => Family::SansSerif,
        FontRole::Serif => Family::Serif,
    };
    if let Some(face) = query_family(db, generic).and_then(|id| face_bytes(db, id)) {
        return Some(face);
    }

    let hinted = db.faces().find(|face| {
        face.families.iter().any(|(name, _)| match role {
            FontRole::Sans => name.contains("Sans"),
            FontRole::Serif => name.contains("Serif") && !name.contains("Sans"),
        })
    });
    hinted
        .or_else(|| db.faces().next())
        .and_then(|face| face_bytes(db, face.id))
}

/// Makes the requested typefaces available, best effort.
///
/// Every download runs concurrently and is bounded by `settings.timeout`.
/// Returns once all attempts have settled; failures are logged and the
/// affected role falls back to whatever is installed.
pub async fn provision(
    requests: &[FontRequest],
    settings: &FontSettings,
    client: &reqwest::Client,
) -> FontCache {
    let mut db = Database::new();
    if settings.load_system_fonts {
        db.load_system_fonts();
    }
    for dir in &settings.font_dirs {
        db.load_fonts_dir(dir);
    }
    info!("Font database holds {} faces", db.len());

    let mut downloads = JoinSet::new();
    for request in requests {
        if has_family(&db, &request.family) {
            continue;
        }
        let Some(url) = request.url.clone() else {
            continue;
        };
        let client = client.clone();
        let family = request.family.clone();
        let role = request.role;
        let timeout = settings.timeout;
        downloads.spawn(async move {
            let result = remote::fetch_font(&client, &family, &url, timeout).await;
            (role, result)
        });
    }

    let mut downloaded: HashMap<FontRole, LoadedFace> = HashMap::new();
    while let Some(joined) = downloads.join_next().await {
        match joined {
            Ok((role, Ok(face))) => {
                info!("Downloaded font {} for {:?}", face.family, role);
                db.load_font_data(face.data.as_ref().clone());
                downloaded.insert(role, face);
            }
            Ok((role, Err(e))) => warn!("Font for {:?} unavailable, using fallback: {}", role, e),
            Err(e) => warn!("Font download task failed: {}", e),
        }
    }

    let mut cache = FontCache::empty();
    for request in requests {
        let (face, status) = if let Some(face) = downloaded.remove(&request.role) {
            (Some(face), FontStatus::Downloaded)
        } else if let Some(face) = query_family(&db, Family::Name(&request.family))
            .and_then(|id| face_bytes(&db, id))
            .filter(|face| face.family.eq_ignore_ascii_case(&request.family))
        {
            (Some(face), FontStatus::Registered)
        } else if let Some(face) = fallback_face(&db, request.role) {
            let family = face.family.clone();
            (Some(face), FontStatus::SystemFallback { family })
        } else {
            (None, FontStatus::Unavailable)
        };

        if status == FontStatus::Unavailable {
            warn!(
                "No face available for {:?}; text will not be drawn",
                request.role
            );
        }
        if let Some(face) = face {
            cache.faces.insert(request.role, face);
        }
        cache.report.push(FontReport {
            role: request.role,
            requested: request.family.clone(),
            status,
        });
    }
    cache
}

pub(crate) fn validate(family: &str, data: Vec<u8>) -> Result<LoadedFace, FontError> {
    ttf_parser::Face::parse(&data, 0).map_err(|e| FontError::InvalidData {
        family: family.to_string(),
        reason: e.to_string(),
    })?;
    Ok(LoadedFace {
        family: family.to_string(),
        data: Arc::new(data),
        index: 0,
    })
}
