//! Embedded HTML skeleton for generated map documents.
//!
//! Leaflet and the leaflet.heat plugin load from CDN, so the written file
//! is a single self-contained artifact. The `__MAP_DATA__` placeholder is
//! replaced with a JSON payload; all dynamic content flows through that
//! payload and is applied by the bootstrap script, never interpolated into
//! the markup itself.

/// Marker replaced with the serialized map payload.
pub const MAP_DATA_PLACEHOLDER: &str = "__MAP_DATA__";

/// The map document skeleton.
pub const MAP_HTML: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Crime Map</title>

  <!-- Leaflet 1.9.4 -->
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css"
    crossorigin="anonymous" referrerpolicy="no-referrer" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js"
    crossorigin="anonymous" referrerpolicy="no-referrer"></script>

  <!-- Leaflet.heat 0.2.0 -->
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet.heat/0.2.0/leaflet-heat.js"
    crossorigin="anonymous" referrerpolicy="no-referrer"></script>

  <style>
    body {
      margin: 0;
      font-family: system-ui, -apple-system, sans-serif;
      background: #f4f4f2;
    }
    h1 {
      margin: 18px 0 10px;
      text-align: center;
      font-size: 1.25rem;
      font-weight: 600;
    }
    #map {
      margin: 0 auto 24px;
      border: 1px solid #d0d0cd;
    }
  </style>
</head>
<body>
  <h1 id="title"></h1>
  <div id="map"></div>

  <script id="map-data" type="application/json">__MAP_DATA__</script>
  <script>
    const data = JSON.parse(document.getElementById('map-data').textContent);

    document.title = data.title;
    document.getElementById('title').textContent = data.title;

    const mapEl = document.getElementById('map');
    mapEl.style.width = data.width + 'px';
    mapEl.style.height = data.height + 'px';

    const map = L.map('map').setView([data.center.latitude, data.center.longitude], data.zoom);
    L.tileLayer(data.tiles.url, {
      attribution: data.tiles.attribution,
      maxZoom: 19,
    }).addTo(map);

    if (data.kind === 'heatmap') {
      const points = data.points.map((p) => [p.latitude, p.longitude, 1.0]);
      L.heatLayer(points, {
        radius: data.heat.radius,
        gradient: data.heat.gradient,
        minOpacity: data.heat.min,
      }).addTo(map);
      const canvas = document.querySelector('.leaflet-heatmap-layer');
      if (canvas) canvas.style.opacity = data.heat.opacity;
    } else {
      for (const p of data.points) {
        L.circleMarker([p.latitude, p.longitude], { radius: data.markerRadius })
          .bindTooltip(p.label)
          .addTo(map);
      }
    }
  </script>
</body>
</html>
"##;
