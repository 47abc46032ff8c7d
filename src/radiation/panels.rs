//! Source panel grids
//!
//! A paneled radiation source discretizes a spherical body surface into flat
//! elements. Two layouts exist:
//!
//! - **Static**: the full sphere, generated once at setup and immutable.
//! - **Dynamic**: a spherical cap of concentric rings centered on the
//!   sub-target point (the point on the surface nearest the target),
//!   covering exactly the region visible from the target. Cap grids are
//!   served from a synchronized cache keyed by a quantized sub-target
//!   bucket, so a target that has not moved past the bucket threshold reuses
//!   the previous grid.
//!
//! Both layouts are exact equal-area partitions: band edges are placed so
//! every panel covers the same solid area, which governs reflectivity
//! accuracy, not just performance. Panel counts are fixed at configuration
//! time; regeneration only moves the cap, never changes the layout.
//!
//! Panels are stored contiguously per grid and referenced by index; counts
//! can reach tens of thousands and are iterated every evaluation.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::Arc;

use nalgebra::Vector3;
use parking_lot::RwLock;

use crate::error::{RadPressError, Result};
use crate::radiation::radiosity::SurfaceDistribution;

/// One surface element of a paneled radiation source
///
/// Geometry is body-fixed; absolute center and normal are derived from the
/// owning body's current state at evaluation time. The normal has unit
/// length and the area is strictly positive.
#[derive(Debug, Clone)]
pub struct SourcePanel {
    /// Panel area in m²
    pub area: f64,

    /// Panel center relative to the body center, body-fixed (meters)
    pub center: Vector3<f64>,

    /// Unit outward normal, body-fixed
    pub normal: Vector3<f64>,

    /// Body-fixed latitude of the panel center (radians)
    pub latitude: f64,

    /// Body-fixed longitude of the panel center (radians)
    pub longitude: f64,

    /// Albedo coefficient sampled at generation time
    pub albedo: f64,

    /// Emissivity coefficient sampled at generation time
    pub emissivity: f64,
}

fn make_panel(
    radius: f64,
    area: f64,
    direction: Vector3<f64>,
    albedo: &SurfaceDistribution,
    emissivity: &SurfaceDistribution,
) -> SourcePanel {
    let latitude = (direction.z).clamp(-1.0, 1.0).asin();
    let longitude = direction.y.atan2(direction.x);
    SourcePanel {
        area,
        center: radius * direction,
        normal: direction,
        latitude,
        longitude,
        albedo: albedo.value(latitude, longitude),
        emissivity: emissivity.value(latitude, longitude),
    }
}

/// Generate a static full-sphere grid with `panel_count` equal-area panels
///
/// Panels are arranged in latitude bands; band edges are placed so every
/// panel covers exactly 4πR²/N. Azimuths are staggered between adjacent
/// bands to avoid seams of aligned panel centers.
pub fn generate_static_grid(
    radius: f64,
    panel_count: usize,
    albedo: &SurfaceDistribution,
    emissivity: &SurfaceDistribution,
) -> Result<Vec<SourcePanel>> {
    if radius <= 0.0 {
        return Err(RadPressError::InvalidConfiguration(format!(
            "source radius must be positive, got {radius}"
        )));
    }
    if panel_count == 0 {
        return Err(RadPressError::InvalidConfiguration(
            "static grid needs at least one panel".into(),
        ));
    }

    let n = panel_count;
    let bands = (n as f64).sqrt().round().max(1.0) as usize;

    // Spread panels over bands as evenly as integer counts allow
    let mut band_counts = vec![n / bands; bands];
    for count in band_counts.iter_mut().take(n % bands) {
        *count += 1;
    }

    let panel_area = 4.0 * PI * radius * radius / n as f64;
    let mut panels = Vec::with_capacity(n);
    let mut assigned = 0usize;

    for (band, &count) in band_counts.iter().enumerate() {
        // Band edges in cos(colatitude), proportional to the panel count so
        // each panel covers the same area
        let cos_hi = 1.0 - 2.0 * assigned as f64 / n as f64;
        let cos_lo = 1.0 - 2.0 * (assigned + count) as f64 / n as f64;
        let cos_mid = 0.5 * (cos_hi + cos_lo);
        let sin_mid = (1.0 - cos_mid * cos_mid).max(0.0).sqrt();

        let stagger = if band % 2 == 0 { 0.0 } else { PI / count as f64 };
        for j in 0..count {
            let az = 2.0 * PI * j as f64 / count as f64 + stagger;
            let dir = Vector3::new(sin_mid * az.cos(), sin_mid * az.sin(), cos_mid);
            panels.push(make_panel(radius, panel_area, dir, albedo, emissivity));
        }
        assigned += count;
    }

    Ok(panels)
}

/// Ring layout and cache quantization for dynamic cap grids
#[derive(Debug, Clone)]
pub struct CapGridConfig {
    /// Panel count per concentric ring, excluding the central cap panel
    pub panels_per_ring: Vec<usize>,

    /// Sub-target point bucket size; the grid is regenerated once the
    /// sub-target point moves into a different bucket (radians)
    pub bucket_angle_rad: f64,
}

impl CapGridConfig {
    /// Layout used by the reference lunar scenarios: five rings, 91 panels
    pub fn knocke_rings() -> Self {
        Self {
            panels_per_ring: vec![6, 12, 18, 24, 30],
            bucket_angle_rad: 1.0_f64.to_radians(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.panels_per_ring.iter().any(|&c| c == 0) {
            return Err(RadPressError::InvalidConfiguration(
                "cap grid rings must have at least one panel each".into(),
            ));
        }
        if self.bucket_angle_rad <= 0.0 {
            return Err(RadPressError::InvalidConfiguration(format!(
                "cap cache bucket angle must be positive, got {}",
                self.bucket_angle_rad
            )));
        }
        Ok(())
    }

    /// Total panel count, central cap included
    pub fn panel_count(&self) -> usize {
        1 + self.panels_per_ring.iter().sum::<usize>()
    }
}

/// Generate a spherical-cap grid centered on `sub_target_dir`
///
/// The cap spans `cap_half_angle` of colatitude around the sub-target
/// direction (both body-fixed). A central cap panel is surrounded by
/// concentric rings; ring band edges are placed so every panel covers the
/// same area.
pub fn generate_cap_grid(
    radius: f64,
    cap_half_angle: f64,
    sub_target_dir: &Vector3<f64>,
    config: &CapGridConfig,
    albedo: &SurfaceDistribution,
    emissivity: &SurfaceDistribution,
) -> Vec<SourcePanel> {
    let n = config.panel_count();
    let cap_depth = 1.0 - cap_half_angle.cos();
    let panel_area = 2.0 * PI * radius * radius * cap_depth / n as f64;

    let (e1, e2) = orthonormal_basis(sub_target_dir);

    let mut panels = Vec::with_capacity(n);

    // Central cap panel sits on the sub-target point itself
    panels.push(make_panel(radius, panel_area, *sub_target_dir, albedo, emissivity));

    let mut assigned = 1usize;
    for (ring, &count) in config.panels_per_ring.iter().enumerate() {
        let cos_hi = 1.0 - cap_depth * assigned as f64 / n as f64;
        let cos_lo = 1.0 - cap_depth * (assigned + count) as f64 / n as f64;
        let cos_mid = 0.5 * (cos_hi + cos_lo);
        let sin_mid = (1.0 - cos_mid * cos_mid).max(0.0).sqrt();

        let stagger = if ring % 2 == 0 { 0.0 } else { PI / count as f64 };
        for j in 0..count {
            let az = 2.0 * PI * j as f64 / count as f64 + stagger;
            let dir = cos_mid * sub_target_dir + sin_mid * (az.cos() * e1 + az.sin() * e2);
            panels.push(make_panel(radius, panel_area, dir, albedo, emissivity));
        }
        assigned += count;
    }

    panels
}

/// Two unit vectors completing `z` to a right-handed orthonormal basis
fn orthonormal_basis(z: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let helper = if z.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let e1 = z.cross(&helper).normalize();
    let e2 = z.cross(&e1);
    (e1, e2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CapKey {
    lat_idx: i32,
    lon_idx: i32,
    dist_idx: i32,
}

/// Synchronized cache of dynamic cap grids
///
/// The one piece of mutable state in the framework. Keys quantize the
/// sub-target point (latitude/longitude bucketed by the configured angle)
/// and the target distance (5% relative buckets, which is what moves the cap
/// half-angle). Grids are built fully before insertion, so readers never
/// observe a half-updated grid; `Arc` lets concurrent evaluations share one
/// grid without copying.
pub struct CapCache {
    config: CapGridConfig,
    albedo: SurfaceDistribution,
    emissivity: SurfaceDistribution,
    cache: RwLock<HashMap<CapKey, Arc<Vec<SourcePanel>>>>,
}

impl CapCache {
    /// Create a cache for the given layout and surface properties
    pub fn new(
        config: CapGridConfig,
        albedo: SurfaceDistribution,
        emissivity: SurfaceDistribution,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            albedo,
            emissivity,
            cache: RwLock::new(HashMap::new()),
        })
    }

    /// Ring layout of the cached grids
    pub fn config(&self) -> &CapGridConfig {
        &self.config
    }

    /// Grid for a target at `target_bf` (body-fixed, meters from the body
    /// center), generating and caching it on a bucket miss
    pub fn grid_for(&self, radius: f64, target_bf: &Vector3<f64>) -> Result<Arc<Vec<SourcePanel>>> {
        let distance = target_bf.norm();
        if distance <= radius {
            return Err(RadPressError::DegenerateGeometry(
                "target at or below the source surface",
            ));
        }

        let dir = target_bf / distance;
        let key = self.make_key(&dir, distance, radius);

        if let Some(grid) = self.cache.read().get(&key).cloned() {
            return Ok(grid);
        }

        // Cap covers exactly the region visible from the target
        let cap_half_angle = (radius / distance).acos();
        log::trace!(
            "regenerating cap grid: {} panels, half-angle {:.3} rad",
            self.config.panel_count(),
            cap_half_angle
        );
        let grid = Arc::new(generate_cap_grid(
            radius,
            cap_half_angle,
            &dir,
            &self.config,
            &self.albedo,
            &self.emissivity,
        ));
        self.cache.write().insert(key, grid.clone());
        Ok(grid)
    }

    /// Number of cached grids
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    fn make_key(&self, dir: &Vector3<f64>, distance: f64, radius: f64) -> CapKey {
        let lat = dir.z.clamp(-1.0, 1.0).asin();
        let lon = dir.y.atan2(dir.x);
        CapKey {
            lat_idx: quantize(lat, self.config.bucket_angle_rad),
            lon_idx: quantize(lon, self.config.bucket_angle_rad),
            dist_idx: quantize((distance / radius).ln(), 0.05),
        }
    }
}

fn quantize(value: f64, step: f64) -> i32 {
    (value / step).round() as i32
}
