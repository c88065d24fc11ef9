use std::f64::consts::PI;

use plansim::{
    Body, NVec2, NewtonianGravity, Parameters, ScenarioConfig, SimError, SimulationWorld,
    TimeControl, TrailHistory, AU, G, TRAIL_CAPACITY,
};

const M_SUN: f64 = 1.98892e30;
const M_EARTH: f64 = 5.97e24;
const DT: f64 = 3600.0;

/// Circular orbital speed around a fixed mass `m` at distance `d`
pub fn circular_speed(m: f64, d: f64) -> f64 {
    (G * m / d).sqrt()
}

/// Orbital period around a fixed mass `m` at distance `d`
pub fn period(m: f64, d: f64) -> f64 {
    2.0 * PI * (d.powi(3) / (G * m)).sqrt()
}

fn sun() -> Body {
    Body::anchor("Sun", [255, 204, 0], NVec2::zeros(), M_SUN, 696_340.0e3)
}

fn planet(name: &str, d: f64, v: f64) -> Body {
    Body::planet(
        name,
        [0, 102, 255],
        NVec2::new(d, 0.0),
        NVec2::new(0.0, v),
        M_EARTH,
        6_371.0e3,
        TRAIL_CAPACITY,
    )
}

/// Anchor plus one planet on a circular orbit at distance `d`
pub fn two_body_world(d: f64) -> SimulationWorld {
    let bodies = vec![sun(), planet("Earth", d, circular_speed(M_SUN, d))];
    SimulationWorld::new(bodies, Parameters::default()).expect("valid two-body world")
}

fn trail(world: &SimulationWorld, i: usize) -> &TrailHistory {
    world.body(i).unwrap().trail.as_ref().unwrap()
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_points_toward_anchor_with_inverse_square_magnitude() {
    let world = two_body_world(AU);
    let earth = world.body(1).unwrap();

    // primed at construction
    assert!(earth.a.x < 0.0, "acceleration should point at the anchor: {:?}", earth.a);
    assert!(earth.a.y.abs() < 1e-12 * earth.a.norm());

    let expected = G * M_SUN / (AU * AU);
    let rel = (earth.a.norm() - expected).abs() / expected;
    assert!(rel < 1e-12, "expected |a| = {expected}, got {}", earth.a.norm());
}

#[test]
fn gravity_records_distance_to_anchor() {
    let world = two_body_world(AU);
    let earth = world.body(1).unwrap();
    assert!((earth.distance_to_anchor - AU).abs() < 1.0);
}

#[test]
fn gravity_newton_third_law() {
    let bodies = vec![sun(), planet("a", AU, 0.0), planet("b", 2.0 * AU, 0.0)];
    let gravity = NewtonianGravity { G };

    let a1 = gravity.acceleration_on(&bodies, 1).acceleration;
    let a2 = gravity.acceleration_on(&bodies, 2).acceleration;
    let a0 = gravity.acceleration_on(&bodies, 0).acceleration;

    let net = a0 * bodies[0].m + a1 * bodies[1].m + a2 * bodies[2].m;
    let scale = a1.norm() * bodies[1].m;
    assert!(net.norm() < 1e-9 * scale, "net force not zero: {:?}", net);
}

#[test]
fn gravity_inverse_square_law() {
    let gravity = NewtonianGravity { G };
    let near = vec![sun(), planet("p", AU, 0.0)];
    let far = vec![sun(), planet("p", 2.0 * AU, 0.0)];

    let ratio = gravity.acceleration_on(&near, 1).acceleration.norm()
        / gravity.acceleration_on(&far, 1).acceleration.norm();
    assert!((ratio - 4.0).abs() < 1e-9, "Expected 4x, got {}", ratio);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn verlet_three_pass_ordering() {
    let bodies = vec![
        sun(),
        planet("inner", 0.7 * AU, circular_speed(M_SUN, 0.7 * AU)),
        planet("outer", 1.0 * AU, circular_speed(M_SUN, 1.0 * AU)),
    ];
    let mut world = SimulationWorld::new(bodies, Parameters::default()).unwrap();
    let before: Vec<Body> = world.bodies().to_vec();

    world.step(DT).unwrap();

    let gravity = NewtonianGravity { G };
    for (i, (old, new)) in before.iter().zip(world.bodies()).enumerate() {
        if old.is_fixed {
            assert_eq!(old.x, new.x, "anchor moved");
            continue;
        }

        let x_expected = old.x + (old.v * DT + 0.5 * old.a * DT * DT);
        assert!(
            (new.x - x_expected).norm() < 1e-12 * old.x.norm(),
            "position of {}",
            new.name
        );

        // new acceleration must come from the positions of this same step
        let a_expected = gravity.acceleration_on(world.bodies(), i).acceleration;
        assert!((new.a - a_expected).norm() <= 1e-15 * a_expected.norm());

        let v_expected = old.v + 0.5 * (old.a + a_expected) * DT;
        assert!(
            (new.v - v_expected).norm() < 1e-9 * v_expected.norm(),
            "velocity of {}: {:?} vs {:?}",
            new.name,
            new.v,
            v_expected
        );
    }
}

#[test]
fn verlet_keeps_circular_radius() {
    let mut world = two_body_world(AU);
    let n = (period(M_SUN, AU) / DT).ceil() as usize;

    let mut max_dev: f64 = 0.0;
    for _ in 0..n {
        world.step(DT).unwrap();
        let r = world.body(1).unwrap().x.norm();
        max_dev = max_dev.max((r - AU).abs() / AU);
    }

    assert!(max_dev < 1e-4, "radius drifted by {max_dev}");
}

#[test]
fn verlet_drift_beats_naive_euler() {
    let mut world = two_body_world(AU);
    let n = (period(M_SUN, AU) / DT).ceil() as usize;
    let gm = G * M_SUN;

    // explicit Euler stand-in on the same initial conditions
    let mut x = NVec2::new(AU, 0.0);
    let mut v = NVec2::new(0.0, circular_speed(M_SUN, AU));
    for _ in 0..n {
        let a = -gm * x / x.norm().powi(3);
        x += v * DT;
        v += a * DT;
        world.step(DT).unwrap();
    }

    let euler_drift = (x.norm() - AU).abs() / AU;
    let verlet_drift = (world.body(1).unwrap().x.norm() - AU).abs() / AU;
    assert!(
        verlet_drift * 10.0 < euler_drift,
        "verlet {verlet_drift} vs euler {euler_drift}"
    );
}

#[test]
fn verlet_conserves_energy_and_angular_momentum() {
    let mut world = two_body_world(AU);
    let e0 = world.total_energy();
    let l0 = world.angular_momentum();

    let n = (period(M_SUN, AU) / DT).ceil() as usize;
    for _ in 0..n {
        world.step(DT).unwrap();
    }

    let de = (world.total_energy() - e0).abs() / e0.abs();
    let dl = (world.angular_momentum() - l0).abs() / l0.abs();
    assert!(e0 < 0.0, "bound orbit must have negative energy");
    assert!(de < 1e-4, "energy drift {de}");
    assert!(dl < 1e-9, "angular momentum drift {dl}");
}

#[test]
fn scenario_a_one_period_closes_orbit() {
    let mut world = two_body_world(AU);
    let start = world.body(1).unwrap().x;
    let t = period(M_SUN, AU);
    let n = (t / DT).ceil() as usize;

    for step in 0..n {
        world.step(DT).unwrap();
        if step == n / 2 {
            assert!(!world.body(1).unwrap().orbit_completed(), "closed after half a period");
        }
    }

    let earth = world.body(1).unwrap();
    assert!(earth.orbit_completed(), "orbit not completed after one period");
    assert!(
        (earth.x - start).norm() < 1e-2 * AU,
        "did not return to start: {:?} vs {:?}",
        earth.x,
        start
    );
    assert_eq!(world.anchor().x, NVec2::zeros());
    assert!((world.time() - n as f64 * DT).abs() < 1e-6);
}

#[test]
fn step_rejects_non_positive_dt() {
    let mut world = two_body_world(AU);
    let x0 = world.body(1).unwrap().x;

    for dt in [0.0, -DT, f64::NAN, f64::INFINITY] {
        assert!(matches!(world.step(dt), Err(SimError::NonPositiveTimestep(_))));
    }
    assert_eq!(world.steps(), 0);
    assert_eq!(world.body(1).unwrap().x, x0);
}

// ==================================================================================
// Trail tests
// ==================================================================================

#[test]
fn trail_records_crossing_and_freezes() {
    let mut t = TrailHistory::new(3, 0.0);

    assert!(!t.record(NVec2::new(-1.0, -1.0)));
    assert!(!t.record(NVec2::new(-1.0, 1.0))); // upward, but on the negative-x side
    assert!(!t.record(NVec2::new(1.0, -1.0)));
    assert!(t.record(NVec2::new(1.0, 0.0))); // upward on +x, y == 0 counts
    assert!(t.orbit_completed);
    assert_eq!(t.full_first_orbit.len(), 4);
    assert_eq!(*t.full_first_orbit.last().unwrap(), NVec2::new(1.0, 0.0));

    assert!(!t.record(NVec2::new(2.0, -2.0)));
    assert!(!t.record(NVec2::new(2.0, 2.0)));
    assert!(t.orbit_completed);
    assert_eq!(t.full_first_orbit.len(), 4);
    assert_eq!(t.last_y, 2.0);

    let recent: Vec<NVec2> = t.recent.iter().copied().collect();
    assert_eq!(
        recent,
        vec![NVec2::new(1.0, 0.0), NVec2::new(2.0, -2.0), NVec2::new(2.0, 2.0)]
    );
}

#[test]
fn trail_capacity_is_fifo() {
    let mut world = two_body_world(AU);

    for tick in 1..=200usize {
        world.step(DT).unwrap();
        assert_eq!(trail(&world, 1).recent_len(), tick.min(TRAIL_CAPACITY));
    }

    let t = trail(&world, 1);
    assert!(!t.orbit_completed);
    assert_eq!(t.full_first_orbit.len(), 200);
    // recent holds exactly the last 150 positions, in append order
    assert!(t.recent.iter().eq(t.full_first_orbit[50..].iter()));
    assert_eq!(*t.recent.back().unwrap(), world.body(1).unwrap().x);
}

#[test]
fn orbit_completion_is_monotonic() {
    let d = 0.4 * AU;
    let bodies = vec![sun(), planet("Mercury", d, circular_speed(M_SUN, d))];
    let mut world = SimulationWorld::new(bodies, Parameters::default()).unwrap();

    let n = (3.0 * period(M_SUN, d) / DT) as usize;
    let mut frozen_len = None;
    for _ in 0..n {
        world.step(DT).unwrap();
        let t = trail(&world, 1);
        if let Some(len) = frozen_len {
            assert!(t.orbit_completed, "completion flag went back to false");
            assert_eq!(t.full_first_orbit.len(), len, "first orbit kept growing");
        } else if t.orbit_completed {
            frozen_len = Some(t.full_first_orbit.len());
        }
        assert_eq!(t.last_y, world.body(1).unwrap().x.y);
    }

    let len = frozen_len.expect("orbit never completed");
    let expected = (period(M_SUN, d) / DT).ceil() as usize;
    assert!(len.abs_diff(expected) <= 1, "first orbit has {len} points, expected ~{expected}");
}

#[test]
fn anchor_has_no_trail() {
    let mut world = two_body_world(AU);
    world.step(DT).unwrap();

    let views: Vec<_> = world.views().collect();
    assert!(views[0].planet.is_none());
    assert!(!world.anchor().orbit_completed());

    let earth = views[1].planet.unwrap();
    assert_eq!(earth.recent_trail.len(), 1);
    assert_eq!(earth.distance_label(), "1.00 AU");
}

// ==================================================================================
// Validation tests
// ==================================================================================

#[test]
fn scenario_b_planet_on_anchor_is_rejected() {
    let cfg = ScenarioConfig::from_yaml_str(
        "bodies:\n  - { name: Bad, color: [1, 2, 3], mass: 1.0e24, radius_km: 1000, dist_au: 0.0, speed_kms: 10.0 }\n",
    )
    .unwrap();

    match SimulationWorld::from_config(&cfg) {
        Err(SimError::CoincidentBodies { first, second }) => {
            assert_eq!(first, "Sun");
            assert_eq!(second, "Bad");
        }
        other => panic!("expected CoincidentBodies, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn rejects_bad_mass_radius_and_anchor_count() {
    let mut light = planet("light", AU, 0.0);
    light.m = 0.0;
    let err = SimulationWorld::new(vec![sun(), light], Parameters::default()).unwrap_err();
    assert!(matches!(err, SimError::NonPositiveMass { .. }));

    let mut tiny = planet("tiny", AU, 0.0);
    tiny.radius = -1.0;
    let err = SimulationWorld::new(vec![sun(), tiny], Parameters::default()).unwrap_err();
    assert!(matches!(err, SimError::NonPositiveRadius { .. }));

    let err = SimulationWorld::new(vec![planet("lonely", AU, 0.0)], Parameters::default()).unwrap_err();
    assert!(matches!(err, SimError::NoAnchor));

    let mut second_sun = sun();
    second_sun.x = NVec2::new(5.0 * AU, 0.0);
    let err = SimulationWorld::new(vec![sun(), second_sun], Parameters::default()).unwrap_err();
    assert!(matches!(err, SimError::MultipleAnchors(2)));

    let mut lost = planet("lost", AU, 0.0);
    lost.v = NVec2::new(f64::NAN, 0.0);
    let err = SimulationWorld::new(vec![sun(), lost], Parameters::default()).unwrap_err();
    assert!(matches!(err, SimError::NonFiniteValue { field: "velocity", .. }));
}

#[test]
fn rejects_bad_parameters() {
    let mut p = Parameters::default();
    p.min_time_multiplier = 0.0;
    assert!(matches!(
        SimulationWorld::new(vec![sun(), planet("p", AU, 0.0)], p),
        Err(SimError::Config(_))
    ));

    let mut p = Parameters::default();
    p.base_timestep = -1.0;
    assert!(matches!(
        SimulationWorld::new(vec![sun(), planet("p", AU, 0.0)], p),
        Err(SimError::NonPositiveTimestep(_))
    ));
}

// ==================================================================================
// Time control tests
// ==================================================================================

#[test]
fn scenario_c_multiplier_clamped_above_zero() {
    let params = Parameters::default();
    let mut clock = TimeControl::new(&params);
    assert_eq!(clock.dt(), params.base_timestep);

    for _ in 0..100 {
        clock.slow_down();
    }
    assert_eq!(clock.multiplier(), params.min_time_multiplier);
    assert!(clock.dt() >= params.base_timestep * params.min_time_multiplier);
    assert!(clock.dt() > 0.0);

    for bad in [0.0, -3.0, f64::NAN, f64::NEG_INFINITY] {
        clock.set_multiplier(bad);
        assert_eq!(clock.multiplier(), params.min_time_multiplier);
    }

    clock.set_multiplier(1.0);
    clock.speed_up();
    assert!((clock.multiplier() - 1.5).abs() < 1e-12);
    assert!((clock.dt() - 5400.0).abs() < 1e-9);
}

// ==================================================================================
// Configuration and world tests
// ==================================================================================

#[test]
fn default_config_is_the_solar_system() {
    let cfg = ScenarioConfig::from_yaml_str("{}").unwrap();
    let world = SimulationWorld::from_config(&cfg).unwrap();

    assert_eq!(world.bodies().len(), 9);
    assert!(world.bodies()[0].is_fixed);
    assert_eq!(world.bodies()[0].name, "Sun");
    assert_eq!(world.anchor().dimmed_color(0.4), [102, 81, 0]);
    assert!(world.bodies()[1..].iter().all(|b| !b.is_fixed && b.trail.is_some()));

    let earth = world.body(world.find("Earth").unwrap()).unwrap();
    assert!((earth.x.x - AU).abs() < 1.0);
    assert!((earth.v.y - 29_800.0).abs() < 1e-9);
    assert!((earth.radius - 6_371_000.0).abs() < 1e-6);
    // planet-planet pulls shift the anchor distance only after the first step
    assert!((earth.distance_to_anchor - AU).abs() < 1.0);
}

#[test]
fn config_overrides_parameters() {
    let cfg = ScenarioConfig::from_yaml_str(
        "parameters:\n  time_multiplier: 10.0\n  trail_capacity: 5\nbodies:\n  - { name: Earth, color: [0, 102, 255], mass: 5.97e24, radius_km: 6371, dist_au: 1.0, speed_kms: 29.8 }\n",
    )
    .unwrap();
    assert_eq!(cfg.parameters.base_timestep, 3600.0);
    assert_eq!(cfg.anchor.name, "Sun");

    let mut world = SimulationWorld::from_config(&cfg).unwrap();
    let clock = TimeControl::new(world.parameters());
    assert_eq!(clock.dt(), 36_000.0);

    for _ in 0..10 {
        world.step(clock.dt()).unwrap();
    }
    assert_eq!(trail(&world, 1).recent_len(), 5);
}

#[test]
fn bad_yaml_is_reported() {
    let err = ScenarioConfig::from_yaml_str("bodies: 12").unwrap_err();
    assert!(matches!(err, SimError::Yaml(_)));
}

#[test]
fn restart_rebuilds_initial_state() {
    let mut world = two_body_world(AU);
    let initial: Vec<Body> = world.bodies().to_vec();

    for _ in 0..100 {
        world.step(DT).unwrap();
    }
    world.restart();

    assert_eq!(world.steps(), 0);
    assert_eq!(world.time(), 0.0);
    for (a, b) in initial.iter().zip(world.bodies()) {
        assert_eq!(a.x, b.x);
        assert_eq!(a.v, b.v);
        assert_eq!(a.a, b.a);
    }
    let t = trail(&world, 1);
    assert!(t.recent.is_empty() && t.full_first_orbit.is_empty() && !t.orbit_completed);
}
