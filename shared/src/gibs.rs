use chrono::NaiveDate;

use crate::tile::TileCoord;

/// NASA Global Imagery Browse Services, geographic (EPSG:4326) projection,
/// "best available" endpoint.
pub const GIBS_BASE_URL: &str = "https://gibs.earthdata.nasa.gov/wmts/epsg4326/best";

/// One browsable GIBS layer. `resolution` names the tile matrix set, `max_zoom`
/// its deepest level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GibsLayer {
    pub id: &'static str,
    pub title: &'static str,
    pub resolution: &'static str,
    pub extension: &'static str,
    pub max_zoom: u8,
    /// Layers without a time dimension are addressed with the literal
    /// "default" date segment.
    pub supports_dates: bool,
}

/// Curated subset of the GIBS catalog offered by the space-imagery explorer.
pub const LAYERS: &[GibsLayer] = &[
    GibsLayer {
        id: "MODIS_Terra_CorrectedReflectance_TrueColor",
        title: "MODIS Terra True Color",
        resolution: "250m",
        extension: "jpg",
        max_zoom: 8,
        supports_dates: true,
    },
    GibsLayer {
        id: "MODIS_Aqua_CorrectedReflectance_TrueColor",
        title: "MODIS Aqua True Color",
        resolution: "250m",
        extension: "jpg",
        max_zoom: 8,
        supports_dates: true,
    },
    GibsLayer {
        id: "VIIRS_SNPP_CorrectedReflectance_TrueColor",
        title: "VIIRS SNPP True Color",
        resolution: "250m",
        extension: "jpg",
        max_zoom: 8,
        supports_dates: true,
    },
    GibsLayer {
        id: "BlueMarble_NextGeneration",
        title: "Blue Marble Next Generation",
        resolution: "500m",
        extension: "jpeg",
        max_zoom: 7,
        supports_dates: false,
    },
];

pub fn layer_by_id(id: &str) -> Option<&'static GibsLayer> {
    LAYERS.iter().find(|layer| layer.id == id)
}

/// Tile matrix dimensions `(columns, rows)` at a zoom level. The EPSG:4326
/// pyramid starts from a two-by-one quad at level 0 and doubles per level.
pub fn matrix_size(zoom: u8) -> (u32, u32) {
    (2_u32 << zoom, 1_u32 << zoom)
}

/// Build the WMTS tile URL for one coordinate:
/// `{base}/{layer}/default/{date}/{matrix_set}/{zoom}/{row}/{col}.{ext}`,
/// with an optional `?v=` cache-busting query parameter. The server never reads
/// `v`; it exists solely to defeat browser/CDN caching on reload.
pub fn tile_url(
    layer: &GibsLayer,
    date: Option<NaiveDate>,
    zoom: u8,
    coord: TileCoord,
    cache_token: Option<u64>,
) -> String {
    let date_segment = match date {
        Some(date) if layer.supports_dates => date.format("%Y-%m-%d").to_string(),
        _ => "default".to_string(),
    };
    let mut url = format!(
        "{GIBS_BASE_URL}/{}/default/{}/{}/{}/{}/{}.{}",
        layer.id, date_segment, layer.resolution, zoom, coord.y, coord.x, layer.extension
    );
    if let Some(token) = cache_token {
        url.push_str(&format!("?v={token}"));
    }
    url
}
