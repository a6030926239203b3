/// Test fixtures: representative payloads from both upstream feeds.
///
/// Kandilli `lst9.asp` shape:
///   an HTML page wrapping a `<pre>` block; a title banner, a column header
///   line, a dashed separator line, then one event per line:
///     date time lat lon depth MD ML Mw REGION (PROVINCE) quality
///   Magnitude columns that were not computed show as `-.-`. Times are
///   Turkey local time (UTC+03:00).
///
/// USGS FDSN `format=geojson` shape:
///   FeatureCollection.features[]
///     .properties.mag   - magnitude (may be null)
///     .properties.place - free-text place (may be null)
///     .properties.time  - epoch milliseconds
///     .geometry.coordinates - [longitude, latitude, depth_km]
///
/// All timestamps fall on 2024-05-01 so tests can pin `now` to that day.

/// Four good lines, one short line, one line with a bad latitude, one
/// line without parentheses, and the closing `</pre>` tag.
#[cfg(test)]
pub(crate) fn fixture_kandilli_listing() -> &'static str {
    r#"<HTML><HEAD><TITLE>Son Depremler</TITLE></HEAD><BODY><pre>
                    B.U. KANDILLI RASATHANESI ve DAE.
                  BOLGESEL DEPREM-TSUNAMI IZLEME ve DEGERLENDIRME MERKEZI
                        SON DEPREMLER (QUICK EPICENTER DETERMINATIONS)

Tarih      Saat      Enlem(N)  Boylam(E) Derinlik(km)  MD   ML   Mw    Yer                                             Cozum Niteligi
---------- --------  --------  -------   ----------    ------------    --------------                                  --------------
2024.05.01 14:52:33  40.8512   28.2033        8.4      -.-  4.6  -.-   MARMARA DENIZI (SILIVRI-ISTANBUL)               İlksel
2024.05.01 14:10:02  40.6877   27.5055        7.0      -.-  3.0  -.-   SARKOY-MARMARA DENIZI (TEKIRDAG)                İlksel
2024.05.01 13:01:45  38.4210   27.1402       12.3      -.-  2.4  -.-
2024.05.01 12:44:10  4O.7000   29.9000        5.1      -.-  2.2  -.-   IZMIT KORFEZI (KOCAELI)                          İlksel
2024.05.01 11:30:00  39.9503   28.9901       10.6      -.-  2.8  -.-   ULUDAG-BURSA                                     İlksel
2024.05.01 09:05:19  40.7421   29.9514        6.2      -.-  3.4  3.5   GOLCUK (KOCAELI)                                 REVIZE01 (2024.05.01 09:10:11)
</pre></BODY></HTML>
"#
}

/// A page with no separator line and nothing parseable in it.
#[cfg(test)]
pub(crate) fn fixture_kandilli_maintenance_page() -> &'static str {
    "<HTML><BODY>Sistem bakimdadir. Lutfen daha sonra tekrar deneyiniz.</BODY></HTML>"
}

/// Three features: a complete one, one with a null magnitude, and one with a
/// negative depth (event above the datum). Listed oldest first on purpose.
#[cfg(test)]
pub(crate) fn fixture_usgs_feature_collection() -> &'static str {
    r#"{
      "type": "FeatureCollection",
      "metadata": {
        "generated": 1714575600000,
        "url": "https://earthquake.usgs.gov/fdsnws/event/1/query?format=geojson",
        "title": "USGS Earthquakes",
        "status": 200,
        "api": "1.14.1",
        "count": 3
      },
      "features": [
        {
          "type": "Feature",
          "properties": {
            "mag": 4.4,
            "place": "5 km SSW of Gemlik, Turkey",
            "time": 1714550400000,
            "updated": 1714554000000,
            "status": "reviewed",
            "type": "earthquake"
          },
          "geometry": { "type": "Point", "coordinates": [29.13, 40.39, 9.8] },
          "id": "us7000m1a1"
        },
        {
          "type": "Feature",
          "properties": {
            "mag": null,
            "place": "Sea of Marmara",
            "time": 1714557600000,
            "updated": 1714557700000,
            "status": "automatic",
            "type": "earthquake"
          },
          "geometry": { "type": "Point", "coordinates": [28.5, 40.8, 10.0] },
          "id": "us7000m1a2"
        },
        {
          "type": "Feature",
          "properties": {
            "mag": 2.7,
            "place": null,
            "time": 1714564800000,
            "updated": 1714564900000,
            "status": "automatic",
            "type": "earthquake"
          },
          "geometry": { "type": "Point", "coordinates": [27.9, 40.6, -0.5] },
          "id": "us7000m1a3"
        }
      ]
    }"#
}

#[cfg(test)]
pub(crate) fn fixture_usgs_empty_collection() -> &'static str {
    r#"{ "type": "FeatureCollection", "metadata": { "count": 0 }, "features": [] }"#
}
