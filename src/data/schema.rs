use super::loader::LoadError;

// ---------------------------------------------------------------------------
// Column names of the streaming dataset
// ---------------------------------------------------------------------------

pub const TRACK: &str = "Track";
pub const ARTIST: &str = "Artist";
pub const SPOTIFY_STREAMS: &str = "Spotify Streams";
pub const TIKTOK_VIEWS: &str = "TikTok Views";

/// How the cells of a column are interpreted at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Kept as text.
    Text,
    /// Thousands separators stripped, then parsed; failures become absent.
    Numeric,
    /// Not declared by the schema: type guessed per cell.
    Inferred,
}

/// A declared column: its name, kind and whether the file must carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub required: bool,
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Declared columns checked against the header row of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    specs: Vec<ColumnSpec>,
}

/// Header positions of the columns the dashboard reads directly.
///
/// `Track` and `Artist` are always present once a schema has resolved; the
/// numeric columns are optional and their charts draw nothing when missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub track: usize,
    pub artist: usize,
    pub spotify_streams: Option<usize>,
    pub tiktok_views: Option<usize>,
}

impl Schema {
    /// The streaming-statistics schema: two required text columns, two
    /// optional numeric ones.
    pub fn streaming() -> Self {
        Self {
            specs: vec![
                ColumnSpec { name: TRACK, kind: ColumnKind::Text, required: true },
                ColumnSpec { name: ARTIST, kind: ColumnKind::Text, required: true },
                ColumnSpec { name: SPOTIFY_STREAMS, kind: ColumnKind::Numeric, required: false },
                ColumnSpec { name: TIKTOK_VIEWS, kind: ColumnKind::Numeric, required: false },
            ],
        }
    }

    /// Kind used when parsing the column called `name`.
    pub fn kind_of(&self, name: &str) -> ColumnKind {
        self.specs
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.kind)
            .unwrap_or(ColumnKind::Inferred)
    }

    /// Validate `headers` and locate the dashboard columns.
    ///
    /// Fails on the first missing required column. Missing optional columns
    /// are logged and left unresolved.
    pub fn resolve(&self, headers: &[String]) -> Result<ColumnLayout, LoadError> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        for spec in &self.specs {
            if position(spec.name).is_none() {
                if spec.required {
                    return Err(LoadError::MissingColumn(spec.name.to_string()));
                }
                log::warn!("Optional column '{}' not found; its chart will be empty", spec.name);
            }
        }

        let required = |name: &str| {
            position(name).ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };

        Ok(ColumnLayout {
            track: required(TRACK)?,
            artist: required(ARTIST)?,
            spotify_streams: position(SPOTIFY_STREAMS),
            tiktok_views: position(TIKTOK_VIEWS),
        })
    }
}
