/// Geographic camera math.
///
/// Positions are WGS84 longitude/latitude in degrees. Offsets and distances
/// use a planar small-angle approximation: adequate for camera choreography
/// over radii of a few degrees, not geodesically exact.

/// Wraps a bearing in degrees to the `[0, 360)` range.
pub fn wrap_bearing(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Planar straight-line distance to `other`, in degrees.
    pub fn planar_distance(self, other: LngLat) -> f64 {
        let dx = other.lng - self.lng;
        let dy = other.lat - self.lat;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point reached by travelling `distance_deg` along `bearing_deg`
    /// (0° = north, 90° = east).
    pub fn destination(self, bearing_deg: f64, distance_deg: f64) -> LngLat {
        let rad = bearing_deg.to_radians();
        LngLat::new(
            self.lng + distance_deg * rad.sin(),
            self.lat + distance_deg * rad.cos(),
        )
    }
}

/// Geographic bounding box in degrees, used by the selection-box flow.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoBounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GeoBounds {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    pub fn center(&self) -> LngLat {
        LngLat::new((self.west + self.east) / 2.0, (self.south + self.north) / 2.0)
    }

    pub fn lng_delta(&self) -> f64 {
        (self.east - self.west).abs()
    }

    pub fn lat_delta(&self) -> f64 {
        (self.north - self.south).abs()
    }

    /// Larger of the two side lengths, in degrees.
    pub fn max_delta(&self) -> f64 {
        self.lng_delta().max(self.lat_delta())
    }
}
