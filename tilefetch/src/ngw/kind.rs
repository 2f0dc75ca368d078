//! Resource kinds advertised by a map server's resource schema.

use std::fmt;

/// A resource type, identified by a single-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ResourceKind {
    None = 1 << 0,
    ResourceGroup = 1 << 1,
    PostgisLayer = 1 << 2,
    PostgisConnection = 1 << 3,
    WmsServerService = 1 << 4,
    BaseLayers = 1 << 5,
    WebMap = 1 << 6,
    WfsServerService = 1 << 7,
    VectorLayer = 1 << 8,
    RasterLayer = 1 << 9,
    VectorLayerStyle = 1 << 10,
    RasterLayerStyle = 1 << 11,
    FileSet = 1 << 12,
    Connection = 1 << 13,
    Connections = 1 << 14,
}

impl ResourceKind {
    /// Maps a schema key to a kind; unknown keys map to [`ResourceKind::None`].
    pub fn from_schema_name(name: &str) -> Self {
        match name {
            "resource_group" => ResourceKind::ResourceGroup,
            "postgis_layer" => ResourceKind::PostgisLayer,
            "wmsserver_service" => ResourceKind::WmsServerService,
            "baselayers" => ResourceKind::BaseLayers,
            "postgis_connection" => ResourceKind::PostgisConnection,
            "webmap" => ResourceKind::WebMap,
            "wfsserver_service" => ResourceKind::WfsServerService,
            "vector_layer" => ResourceKind::VectorLayer,
            "raster_layer" => ResourceKind::RasterLayer,
            "file_bucket" => ResourceKind::FileSet,
            _ => ResourceKind::None,
        }
    }

    pub fn bits(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::None => "none",
            ResourceKind::ResourceGroup => "resource group",
            ResourceKind::PostgisLayer => "PostGIS layer",
            ResourceKind::PostgisConnection => "PostGIS connection",
            ResourceKind::WmsServerService => "WMS service",
            ResourceKind::BaseLayers => "base layers",
            ResourceKind::WebMap => "web map",
            ResourceKind::WfsServerService => "WFS service",
            ResourceKind::VectorLayer => "vector layer",
            ResourceKind::RasterLayer => "raster layer",
            ResourceKind::VectorLayerStyle => "vector layer style",
            ResourceKind::RasterLayerStyle => "raster layer style",
            ResourceKind::FileSet => "file set",
            ResourceKind::Connection => "connection",
            ResourceKind::Connections => "connections",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
