//! End-to-end scenarios wiring bodies, ephemeris, settings and the
//! acceleration orchestrator together.

use nalgebra::Vector3;
use satkit::Instant;

use radpress::bodies::{
    Body, BodySet, BodyState, AU_M, MOON_RADIUS_M, SOLAR_IRRADIANCE_1AU, SPEED_OF_LIGHT,
    SUN_RADIUS_M,
};
use radpress::ephemeris::FixedEphemeris;
use radpress::frames::cart2track;
use radpress::radiation::{
    LuminosityModel, OccultationModel, RadiationPressureAcceleration, RadiationSourceModel,
    RadiationPressureTargetModel, SourceSettings, TargetSettings,
};

const SC_MASS: f64 = 1000.0;
const SC_AREA: f64 = 11.6;
const SC_COEFF: f64 = 1.3;

fn epoch() -> Instant {
    Instant::from_datetime(2011, 9, 26, 18, 0, 0.0).unwrap()
}

fn sun() -> Body {
    let lum = LuminosityModel::from_irradiance(SOLAR_IRRADIANCE_1AU, AU_M).unwrap();
    Body::new("Sun", 1.989e30, SUN_RADIUS_M).with_source(RadiationSourceModel::point(lum))
}

fn spacecraft() -> Body {
    Body::new("SC", SC_MASS, 1.0)
        .with_target(RadiationPressureTargetModel::cannonball(SC_AREA, SC_COEFF).unwrap())
}

#[test]
fn solar_cannonball_matches_analytic_value() {
    let mut bodies = BodySet::new();
    let sun_id = bodies.add(sun());
    let sc_id = bodies.add(spacecraft());

    let eph = FixedEphemeris::new()
        .with_state("Sun", BodyState::at_origin())
        .with_state("SC", BodyState::at_position(Vector3::new(AU_M, 0.0, 0.0)));

    let model =
        RadiationPressureAcceleration::new(&bodies, sun_id, sc_id, OccultationModel::none())
            .unwrap();
    let a = model.acceleration(&mut bodies, &eph, &epoch()).unwrap();

    // a = E · A · C / (c · m), pointed away from the Sun
    let expected = SOLAR_IRRADIANCE_1AU * SC_AREA * SC_COEFF / (SPEED_OF_LIGHT * SC_MASS);
    assert!((a.norm() - expected).abs() < 1e-9 * expected);
    assert!((a.normalize() - Vector3::x()).norm() < 1e-12);
}

#[test]
fn lunar_eclipse_kills_solar_pressure() {
    let mut bodies = BodySet::new();
    let sun_id = bodies.add(sun());
    let sc_id = bodies.add(spacecraft());
    let moon_id = bodies.add(Body::new("Moon", 7.342e22, MOON_RADIUS_M));

    // Spacecraft 100 km behind the Moon on the anti-solar line
    let eph = FixedEphemeris::new()
        .with_state("Sun", BodyState::at_position(Vector3::new(AU_M, 0.0, 0.0)))
        .with_state("Moon", BodyState::at_origin())
        .with_state(
            "SC",
            BodyState::at_position(Vector3::new(-(MOON_RADIUS_M + 100_000.0), 0.0, 0.0)),
        );

    let model = RadiationPressureAcceleration::new(
        &bodies,
        sun_id,
        sc_id,
        OccultationModel::with_bodies(vec![moon_id]),
    )
    .unwrap();
    let a = model.acceleration(&mut bodies, &eph, &epoch()).unwrap();
    assert_eq!(a, Vector3::zeros());
}

#[test]
fn lunar_albedo_pushes_away_from_moon() {
    let mut bodies = BodySet::new();
    let sun_id = bodies.add(sun());
    let moon_id = bodies.add(Body::new("Moon", 7.342e22, MOON_RADIUS_M));
    let sc_id = bodies.add(spacecraft());

    let settings_json = r#"{
        "paneling": "dynamic",
        "albedo": { "constant": { "value": 0.12 } },
        "thermal": "angle_based"
    }"#;
    let settings: SourceSettings = serde_json::from_str(settings_json).unwrap();
    let moon_model = settings.build(&bodies, moon_id, sun_id, vec![]).unwrap();
    bodies.get_mut(moon_id).source = Some(moon_model);

    // Spacecraft 50 km above the subsolar point
    let eph = FixedEphemeris::new()
        .with_state("Sun", BodyState::at_position(Vector3::new(AU_M, 0.0, 0.0)))
        .with_state("Moon", BodyState::at_origin())
        .with_state(
            "SC",
            BodyState::at_position(Vector3::new(MOON_RADIUS_M + 50_000.0, 0.0, 0.0)),
        );

    let model =
        RadiationPressureAcceleration::new(&bodies, moon_id, sc_id, OccultationModel::none())
            .unwrap();
    let a = model.acceleration(&mut bodies, &eph, &epoch()).unwrap();

    // Net push radially away from the Moon, well below the direct solar term
    assert!(a.x > 0.0);
    assert!(a.y.abs() < a.x * 0.1);
    assert!(a.z.abs() < a.x * 0.1);
    let solar = SOLAR_IRRADIANCE_1AU * SC_AREA * SC_COEFF / (SPEED_OF_LIGHT * SC_MASS);
    assert!(a.norm() < solar);
    assert!(a.norm() > 1e-3 * solar);
}

#[test]
fn night_side_albedo_only_source_is_zero() {
    let mut bodies = BodySet::new();
    let sun_id = bodies.add(sun());
    let moon_id = bodies.add(Body::new("Moon", 7.342e22, MOON_RADIUS_M));
    let sc_id = bodies.add(spacecraft());

    let settings_json = r#"{
        "paneling": "dynamic",
        "albedo": { "constant": { "value": 0.12 } },
        "thermal": "none"
    }"#;
    let settings: SourceSettings = serde_json::from_str(settings_json).unwrap();
    let moon_model = settings.build(&bodies, moon_id, sun_id, vec![]).unwrap();
    bodies.get_mut(moon_id).source = Some(moon_model);

    // Over the anti-solar point no panel receives sunlight
    let eph = FixedEphemeris::new()
        .with_state("Sun", BodyState::at_position(Vector3::new(AU_M, 0.0, 0.0)))
        .with_state("Moon", BodyState::at_origin())
        .with_state(
            "SC",
            BodyState::at_position(Vector3::new(-(MOON_RADIUS_M + 50_000.0), 0.0, 0.0)),
        );

    let model =
        RadiationPressureAcceleration::new(&bodies, moon_id, sc_id, OccultationModel::none())
            .unwrap();
    let a = model.acceleration(&mut bodies, &eph, &epoch()).unwrap();
    assert_eq!(a, Vector3::zeros());
}

#[test]
fn settings_built_paneled_target_from_json() {
    let target_json = r#"{
        "target_type": "paneled",
        "panels": [
            {
                "area_m2": 11.6,
                "normal": [-1.0, 0.0, 0.0],
                "absorptivity": 1.0,
                "specular_reflectivity": 0.0,
                "diffuse_reflectivity": 0.0
            }
        ]
    }"#;
    let settings: TargetSettings = serde_json::from_str(target_json).unwrap();

    let mut bodies = BodySet::new();
    let sun_id = bodies.add(sun());
    let sc_id = bodies.add(
        Body::new("SC", SC_MASS, 1.0).with_target(settings.build().unwrap()),
    );

    let eph = FixedEphemeris::new()
        .with_state("Sun", BodyState::at_origin())
        .with_state("SC", BodyState::at_position(Vector3::new(AU_M, 0.0, 0.0)));

    let model =
        RadiationPressureAcceleration::new(&bodies, sun_id, sc_id, OccultationModel::none())
            .unwrap();
    let a = model.acceleration(&mut bodies, &eph, &epoch()).unwrap();

    // One absorbing plate facing the Sun equals a cannonball with C = 1
    let expected = SOLAR_IRRADIANCE_1AU * SC_AREA / (SPEED_OF_LIGHT * SC_MASS);
    assert!((a.norm() - expected).abs() < 1e-9 * expected);
    assert!((a.normalize() - Vector3::x()).norm() < 1e-12);
}

#[test]
fn paneled_target_facing_away_yields_zero_end_to_end() {
    // Same plate as above with the normal flipped: sunlight arrives from
    // behind every panel, so the whole pipeline must produce exactly zero
    let target_json = r#"{
        "target_type": "paneled",
        "panels": [
            {
                "area_m2": 11.6,
                "normal": [1.0, 0.0, 0.0],
                "absorptivity": 1.0,
                "specular_reflectivity": 0.0,
                "diffuse_reflectivity": 0.0
            }
        ]
    }"#;
    let settings: TargetSettings = serde_json::from_str(target_json).unwrap();

    let mut bodies = BodySet::new();
    let sun_id = bodies.add(sun());
    let sc_id = bodies.add(
        Body::new("SC", SC_MASS, 1.0).with_target(settings.build().unwrap()),
    );

    let eph = FixedEphemeris::new()
        .with_state("Sun", BodyState::at_origin())
        .with_state("SC", BodyState::at_position(Vector3::new(AU_M, 0.0, 0.0)));

    let model =
        RadiationPressureAcceleration::new(&bodies, sun_id, sc_id, OccultationModel::none())
            .unwrap();
    let a = model.acceleration(&mut bodies, &eph, &epoch()).unwrap();
    assert_eq!(a, Vector3::zeros());
}

#[test]
fn track_frame_decomposition_of_solar_pressure() {
    let mut bodies = BodySet::new();
    let sun_id = bodies.add(sun());
    let sc_id = bodies.add(spacecraft());

    let position = Vector3::new(AU_M, 0.0, 0.0);
    let velocity = Vector3::new(0.0, 29_780.0, 0.0);
    let eph = FixedEphemeris::new()
        .with_state("Sun", BodyState::at_origin())
        .with_state("SC", BodyState::at_position(position));

    let model =
        RadiationPressureAcceleration::new(&bodies, sun_id, sc_id, OccultationModel::none())
            .unwrap();
    let a = model.acceleration(&mut bodies, &eph, &epoch()).unwrap();

    // Sunlight along the radial axis shows up purely radial in track frame
    let (radial, along, cross) = cart2track(&a, &velocity, &position).unwrap();
    assert!((radial - a.norm()).abs() < 1e-12 * a.norm());
    assert!(along.abs() < 1e-15);
    assert!(cross.abs() < 1e-15);
}
