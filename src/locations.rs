/// Geographic reference catalog for the Istanbul early-warning service.
///
/// Defines the reference point every epicentral distance is measured
/// against, the surrounding target cities, the Istanbul district centroids
/// that the presentation layer can pin on the map, and a sample set of
/// emergency assembly areas. This is the single source of truth for named
/// coordinates; other modules should look places up here rather than
/// hardcoding them.
///
/// Everything in this module is `static` and read-only for the lifetime of
/// the process.

use serde::Serialize;
use tracing::warn;

use crate::model::Coordinate;

// ---------------------------------------------------------------------------
// Named locations
// ---------------------------------------------------------------------------

/// A named point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NamedLocation {
    pub name: &'static str,
    pub coordinate: Coordinate,
}

const fn loc(name: &'static str, latitude: f64, longitude: f64) -> NamedLocation {
    NamedLocation {
        name,
        coordinate: Coordinate::new(latitude, longitude),
    }
}

/// Istanbul city centre (Fatih / Sultanahmet). All distances are measured from here.
pub const REFERENCE_POINT: Coordinate = Coordinate::new(41.0082, 28.9784);

/// Display name of the reference point.
pub const REFERENCE_NAME: &str = "İstanbul";

/// Cities around the Sea of Marmara most exposed to a North Anatolian
/// Fault rupture near Istanbul.
pub static TARGET_CITIES: &[NamedLocation] = &[
    loc("İstanbul", 41.0082, 28.9784),
    loc("Kocaeli", 40.7654, 29.9408),
    loc("Tekirdağ", 40.9781, 27.5126),
    loc("Sakarya", 40.7731, 30.3925),
    loc("Yalova", 40.6550, 29.2774),
    loc("Bursa", 40.1885, 29.0610),
];

/// Centroids of the 39 Istanbul districts.
pub static ISTANBUL_DISTRICTS: &[NamedLocation] = &[
    loc("Adalar", 40.8760, 29.0878),
    loc("Arnavutköy", 41.1839, 28.7419),
    loc("Ataşehir", 40.9830, 29.1291),
    loc("Avcılar", 41.0204, 28.7187),
    loc("Bağcılar", 41.0378, 28.8500),
    loc("Bahçelievler", 41.0021, 28.8577),
    loc("Bakırköy", 40.9817, 28.8773),
    loc("Başakşehir", 41.0931, 28.8026),
    loc("Bayrampaşa", 41.0467, 28.8967),
    loc("Beşiktaş", 41.0434, 29.0086),
    loc("Beykoz", 41.1473, 29.0988),
    loc("Beylikdüzü", 41.0103, 28.6428),
    loc("Beyoğlu", 41.0366, 28.9735),
    loc("Büyükçekmece", 41.0195, 28.5933),
    loc("Çatalca", 41.1426, 28.4515),
    loc("Çekmeköy", 41.0330, 29.1872),
    loc("Esenler", 41.0437, 28.8763),
    loc("Esenyurt", 41.0290, 28.6728),
    loc("Eyüp", 41.0478, 28.9339),
    loc("Fatih", 41.0187, 28.9394),
    loc("Gaziosmanpaşa", 41.0680, 28.9097),
    loc("Güngören", 41.0178, 28.8898),
    loc("Kadıköy", 40.9926, 29.0233),
    loc("Kağıthane", 41.0784, 28.9833),
    loc("Kartal", 40.8884, 29.1872),
    loc("Küçükçekmece", 41.0015, 28.7981),
    loc("Maltepe", 40.9351, 29.1362),
    loc("Pendik", 40.8750, 29.2583),
    loc("Sancaktepe", 41.0006, 29.2266),
    loc("Sarıyer", 41.1693, 29.0557),
    loc("Silivri", 41.0731, 28.2464),
    loc("Sultanbeyli", 40.9650, 29.2652),
    loc("Sultangazi", 41.1066, 28.8679),
    loc("Şile", 41.1748, 29.6119),
    loc("Şişli", 41.0603, 28.9868),
    loc("Tuzla", 40.8156, 29.3009),
    loc("Ümraniye", 41.0161, 29.0964),
    loc("Üsküdar", 41.0284, 29.0258),
    loc("Zeytinburnu", 41.0070, 28.9000),
];

/// Sample post-earthquake assembly areas. These are illustrative only; the
/// authoritative list is published by AFAD.
pub static ASSEMBLY_AREAS: &[NamedLocation] = &[
    loc("Kadıköy - Fenerbahçe Parkı", 40.9697, 29.0367),
    loc("Beşiktaş - İnönü Stadı Çevresi", 41.0421, 29.0148),
    loc("Fatih - Yenikapı Etkinlik Alanı", 41.0021, 28.9744),
    loc("Üsküdar - Doğancılar Parkı", 41.0265, 29.0152),
    loc("Bakırköy - Botanik Parkı", 40.9799, 28.8740),
    loc("Maltepe - Sahil Alanı", 40.9343, 29.1235),
    loc("Beylikdüzü - Yaşam Vadisi", 41.0017, 28.6394),
    loc("Ataşehir - Atatürk Parkı", 40.9847, 29.1272),
    loc("Beykoz - Çubuklu Sahili", 41.1058, 29.0835),
    loc("Sarıyer - Maslak Atatürk Oto Sanayi", 41.1150, 29.0117),
    loc("Pendik - Sahil Alanı", 40.8739, 29.2356),
    loc("Büyükçekmece - Sahil Alanı", 41.0224, 28.5941),
];

/// Districts pinned on the map when the user has not chosen any.
pub const DEFAULT_DISTRICTS: &[&str] = &["Kadıköy", "Fatih", "Beşiktaş", "Üsküdar"];

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Looks up a target city by exact name. Returns `None` if not found.
pub fn find_city(name: &str) -> Option<&'static NamedLocation> {
    TARGET_CITIES.iter().find(|c| c.name == name)
}

/// Looks up an Istanbul district by exact name. Returns `None` if not found.
pub fn find_district(name: &str) -> Option<&'static NamedLocation> {
    ISTANBUL_DISTRICTS.iter().find(|d| d.name == name)
}

/// Read-only handle over the static catalogs, built once at startup and
/// passed to whoever needs to resolve names.
#[derive(Debug, Clone, Copy)]
pub struct GeoReferenceTable {
    pub reference_name: &'static str,
    pub reference_point: Coordinate,
    pub target_cities: &'static [NamedLocation],
    pub districts: &'static [NamedLocation],
    pub assembly_areas: &'static [NamedLocation],
}

impl GeoReferenceTable {
    pub const fn istanbul() -> Self {
        Self {
            reference_name: REFERENCE_NAME,
            reference_point: REFERENCE_POINT,
            target_cities: TARGET_CITIES,
            districts: ISTANBUL_DISTRICTS,
            assembly_areas: ASSEMBLY_AREAS,
        }
    }

    /// Resolves the user's chosen district names, in the order given.
    ///
    /// Names not present in the catalog are skipped with a warning.
    /// Duplicates are kept once.
    pub fn select_districts<S: AsRef<str>>(&self, names: &[S]) -> Vec<NamedLocation> {
        let mut selected: Vec<NamedLocation> = Vec::new();
        for name in names {
            let name = name.as_ref();
            match self.districts.iter().find(|d| d.name == name) {
                Some(district) => {
                    if !selected.iter().any(|s| s.name == district.name) {
                        selected.push(*district);
                    }
                }
                None => warn!(district = name, "ignoring unknown district"),
            }
        }
        selected
    }
}

impl Default for GeoReferenceTable {
    fn default() -> Self {
        Self::istanbul()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
