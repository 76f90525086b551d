//! Integration tests: dual RK4 / Dormand-Prince flight with bounce and divergence.
//!
//! Covers:
//! - Drag-free trajectories follow the closed-form parabola
//! - Elastic and damped ground contact
//! - Divergence total never decreases, even after both tracks settle
//! - Step refinement shrinks the RK4 / Dormand-Prince gap
//! - A single RK4 step from the 50 m/s, 45 degree launch

use df_core::numeric::{Tolerances, nearly_equal};
use df_core::units::{deg, kg, m, mps, s};
use df_sim::{
    ClockPolicy, Launch, Motion, Parameters, Rk4, SimOptions, Simulation, Stepper, StepperKind,
    refinement_study, resolve_ground_contact, state,
};

fn original_launch() -> Launch {
    Launch::new(m(0.0), m(1.0), mps(50.0), deg(45.0))
}

fn original_params() -> Parameters {
    Parameters::builder()
        .mass(kg(3.0))
        .diameter(m(0.1))
        .drag_coefficient(0.47)
        .wind_from(mps(-20.0), deg(0.0))
        .restitution(0.8)
        .min_speed_threshold(mps(0.5))
        .time_step(s(0.01))
        .build()
        .expect("valid parameters")
}

#[test]
fn drag_free_flight_matches_parabola() {
    let p = Parameters::builder()
        .drag_coefficient(0.0)
        .time_step(s(0.01))
        .build()
        .unwrap();
    let s0 = state(0.0, 1.0, 35.355, 35.355);
    let mut sim = Simulation::from_state(p.clone(), s0, SimOptions::default());

    for _ in 0..150 {
        sim.step();
    }

    let tol = Tolerances {
        abs: 1e-9,
        rel: 1e-6,
    };
    let trajectory = sim.primary().trajectory();
    assert_eq!(trajectory.len(), 150);
    for (i, pos) in trajectory.iter().enumerate() {
        let t = (i + 1) as f64 * 0.01;
        let x = s0[0] + s0[2] * t;
        let y = s0[1] + s0[3] * t - 0.5 * p.gravity() * t * t;
        assert!(nearly_equal(pos.x, x, tol), "x at step {}: {} vs {}", i + 1, pos.x, x);
        assert!(nearly_equal(pos.y, y, tol), "y at step {}: {} vs {}", i + 1, pos.y, y);
    }
}

#[test]
fn one_rk4_step_from_45_degree_launch() {
    let p = Parameters::builder()
        .mass(kg(3.0))
        .radius(m(0.05))
        .drag_coefficient(0.0)
        .time_step(s(0.01))
        .build()
        .unwrap();
    let s1 = Rk4.step(&state(0.0, 1.0, 35.355, 35.355), p.time_step(), &p);

    assert!((s1[0] - 0.35355).abs() < 1e-4);
    // exact RK4 under constant gravity: 1 + 0.35355 - 0.5 * 9.81 * 0.01^2
    assert!((s1[1] - 1.3530595).abs() < 1e-4);
}

#[test]
fn elastic_contact_inverts_vertical_speed() {
    let p = Parameters::builder()
        .drag_coefficient(0.0)
        .restitution(1.0)
        .min_speed_threshold(mps(0.5))
        .build()
        .unwrap();
    let (after, motion) = resolve_ground_contact(state(10.0, -0.02, 3.0, -12.5), &p);
    assert_eq!(after[1], 0.0);
    assert!((after[3] - 12.5).abs() < 1e-12);
    assert_eq!(motion, Motion::Running);
}

#[test]
fn slow_contact_settles_track() {
    let p = Parameters::builder()
        .restitution(0.8)
        .min_speed_threshold(mps(0.5))
        .build()
        .unwrap();
    let (after, motion) = resolve_ground_contact(state(0.0, -0.001, 0.0, -0.3), &p);
    assert_eq!(after[1], 0.0);
    assert!((after[3] - 0.24).abs() < 1e-12);
    assert_eq!(motion, Motion::Settled);
}

#[test]
fn elastic_drop_rebounds_without_losing_height() {
    let p = Parameters::builder()
        .drag_coefficient(0.0)
        .restitution(1.0)
        .min_speed_threshold(mps(0.0))
        .build()
        .unwrap();
    let mut sim = Simulation::from_state(p, state(0.0, 5.0, 0.0, 0.0), SimOptions::default());

    let mut bounced = false;
    let mut peak_after_bounce: f64 = 0.0;
    for _ in 0..400 {
        let snap = sim.step();
        let pos = snap.primary.position();
        assert!(pos.y >= 0.0);
        if pos.y == 0.0 {
            bounced = true;
        } else if bounced {
            peak_after_bounce = peak_after_bounce.max(pos.y);
        }
    }
    assert!(bounced);
    // lifting the body back to y = 0 at its pre-contact speed adds at most
    // one step of fall height
    assert!(peak_after_bounce > 4.8, "peak = {peak_after_bounce}");
    assert!(peak_after_bounce < 5.2, "peak = {peak_after_bounce}");
}

#[test]
fn original_launch_settles_and_divergence_keeps_accumulating() {
    let mut sim = Simulation::new(original_params(), &original_launch(), SimOptions::default())
        .expect("valid launch");

    let mut last_total = 0.0;
    let mut steps = 0;
    while !sim.all_settled() && steps < 20_000 {
        let snap = sim.step();
        assert!(snap.divergence_total >= last_total);
        last_total = snap.divergence_total;
        steps += 1;
    }
    assert!(sim.all_settled(), "still running after {steps} steps");

    let frozen_time = sim.time();
    let frozen_rk4 = sim.primary().trajectory().len();
    let frozen_dopri = sim.secondary().trajectory().len();
    let gap = (sim.primary().position() - sim.secondary().position()).norm();

    for _ in 0..10 {
        let snap = sim.step();
        assert_eq!(snap.sim_time, frozen_time);
        assert_eq!(snap.primary.trajectory.len(), frozen_rk4);
        assert_eq!(snap.secondary.trajectory.len(), frozen_dopri);
        assert!(snap.divergence_total >= last_total);
        assert!((snap.divergence_total - last_total - gap).abs() <= 1e-12 + 1e-9 * gap);
        last_total = snap.divergence_total;
    }
}

#[test]
fn settled_track_is_frozen_while_other_runs() {
    // once the RK4 track settles it must stay put, whatever the clock does
    let opts = SimOptions {
        clock: ClockPolicy::Continuous,
        ..SimOptions::default()
    };
    let mut sim = Simulation::new(original_params(), &original_launch(), opts).unwrap();

    let mut frozen: Option<(usize, df_sim::State)> = None;
    for _ in 0..20_000 {
        let snap = sim.step();
        if let Some((len, st)) = frozen {
            assert_eq!(snap.primary.trajectory.len(), len);
            assert_eq!(snap.primary.state, st);
            assert_eq!(snap.primary.motion, Motion::Settled);
        } else if snap.primary.motion == Motion::Settled {
            frozen = Some((snap.primary.trajectory.len(), snap.primary.state));
        }
    }
    assert!(frozen.is_some());
}

#[test]
fn refinement_shrinks_method_gap() {
    let p = Parameters::builder()
        .mass(kg(0.5))
        .diameter(m(0.1))
        .drag_coefficient(0.47)
        .wind_from(mps(-20.0), deg(0.0))
        .time_step(s(0.1))
        .build()
        .unwrap();
    let levels = refinement_study(&p, &original_launch(), 2.0, 4).unwrap();
    assert_eq!(levels.len(), 4);
    for pair in levels.windows(2) {
        assert!(
            pair[1].final_gap < pair[0].final_gap,
            "dt {} gap {} !< dt {} gap {}",
            pair[1].time_step,
            pair[1].final_gap,
            pair[0].time_step,
            pair[0].final_gap
        );
    }
}

#[test]
fn swapped_steppers_mirror_tracks() {
    let p = original_params();
    let launch = original_launch();
    let mut a = Simulation::new(p.clone(), &launch, SimOptions::default()).unwrap();
    let mut b = Simulation::new(
        p,
        &launch,
        SimOptions {
            primary: StepperKind::DormandPrince,
            secondary: StepperKind::Rk4,
            ..SimOptions::default()
        },
    )
    .unwrap();

    for _ in 0..250 {
        a.step();
        b.step();
    }
    assert_eq!(a.primary().state(), b.secondary().state());
    assert_eq!(a.secondary().state(), b.primary().state());
    assert_eq!(a.divergence_total(), b.divergence_total());
}
