pub mod routes;
pub mod sitemap;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, SiteError};
use crate::models::PagesData;

pub const PAGES_FILE: &str = "pagesData.json";
pub const ROUTES_FILE: &str = "routesConfig.json";
pub const SUMMARY_FILE: &str = "summary.json";
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// Contents of `summary.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_businesses: usize,
    pub total_cities: usize,
    pub total_states: usize,
    pub generated_at: String,
}

impl Summary {
    pub fn new(pages: &PagesData, generated_at: &DateTime<Utc>) -> Self {
        Summary {
            total_businesses: pages.business_listings.len(),
            total_cities: pages.city_pages.len(),
            total_states: pages.state_pages.len(),
            generated_at: timestamp(generated_at),
        }
    }
}

/// RFC 3339, UTC, millisecond precision: `2026-10-19T08:30:00.000Z`.
pub fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A rendered output file waiting to be written.
pub struct OutputFile {
    pub name: &'static str,
    pub contents: Vec<u8>,
}

/// Render every output in memory. `site_url` enables the sitemap.
pub fn render(
    pages: &PagesData,
    summary: &Summary,
    site_url: Option<&str>,
) -> Result<Vec<OutputFile>> {
    let mut files = vec![
        OutputFile {
            name: PAGES_FILE,
            contents: serde_json::to_vec_pretty(pages)?,
        },
        OutputFile {
            name: ROUTES_FILE,
            contents: serde_json::to_vec_pretty(&routes::build_routes(pages))?,
        },
        OutputFile {
            name: SUMMARY_FILE,
            contents: serde_json::to_vec_pretty(summary)?,
        },
    ];
    if let Some(url) = site_url {
        let xml = sitemap::render_sitemap(url, pages, &summary.generated_at)?;
        files.push(OutputFile {
            name: SITEMAP_FILE,
            contents: xml.into_bytes(),
        });
    }
    Ok(files)
}

/// Write all files into `out_dir`. Each file is staged next to its target
/// and renamed into place only once every stage write has succeeded.
pub fn write_all(out_dir: &Path, files: &[OutputFile]) -> Result<()> {
    fs::create_dir_all(out_dir).map_err(|e| SiteError::io(out_dir, e))?;

    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(files.len());
    for file in files {
        let target = out_dir.join(file.name);
        let tmp = out_dir.join(format!(".{}.tmp", file.name));
        if let Err(e) = fs::write(&tmp, &file.contents) {
            discard(&staged);
            let _ = fs::remove_file(&tmp);
            return Err(SiteError::io(&tmp, e));
        }
        debug!(file = file.name, bytes = file.contents.len(), "staged");
        staged.push((tmp, target));
    }

    for (i, (tmp, target)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(tmp, target) {
            discard(&staged[i..]);
            return Err(SiteError::io(target, e));
        }
    }
    info!("Wrote {} files to {}", staged.len(), out_dir.display());
    Ok(())
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (tmp, _) in staged {
        let _ = fs::remove_file(tmp);
    }
}

/// Render and write every output for one build.
pub fn emit(
    out_dir: &Path,
    pages: &PagesData,
    generated_at: &DateTime<Utc>,
    site_url: Option<&str>,
) -> Result<Summary> {
    let summary = Summary::new(pages, generated_at);
    let files = render(pages, &summary, site_url)?;
    write_all(out_dir, &files)?;
    Ok(summary)
}
