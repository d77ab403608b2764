//! End-to-end EV compensation validator behavior against synthetic sessions.

use camcert::session::{Capability, Rational};
use camcert::testing::SyntheticSession;
use camcert::validator::{EvCompensationValidator, Verdict};
use camcert::CamcertConfig;

fn validator() -> EvCompensationValidator {
    let mut config = CamcertConfig::default().validator;
    config.plot_enabled = false;
    EvCompensationValidator::new(config)
}

#[test]
fn test_exact_model_passes_with_zero_deviation() {
    let mut session = SyntheticSession::exact();
    let verdict = validator().run(&mut session).unwrap();

    match verdict {
        Verdict::Passed(report) => {
            assert_eq!(report.max_delta, 0.0);
            assert_eq!(report.avg_delta, 0.0);
            assert_eq!(report.evs, vec![-3, -2, -1, 0, 1, 2, 3]);
            assert_eq!(report.measured.len(), report.evs.len());
            assert_eq!(report.expected.len(), report.evs.len());
        }
        other => panic!("expected pass, got {other:?}"),
    }
}

#[test]
fn test_half_stop_device_passes_within_float_noise() {
    let mut session = SyntheticSession::new(); // [-4, 4] at 1/2 EV per step
    let verdict = validator().run(&mut session).unwrap();

    match verdict {
        Verdict::Passed(report) => {
            assert_eq!(report.evs, vec![-4, -2, 0, 2, 4]);
            assert!(report.max_delta < 1e-6);
        }
        other => panic!("expected pass, got {other:?}"),
    }
}

#[test]
fn test_single_perturbed_step_fails_and_is_the_max() {
    // Push the sample at EV +2 well past the 0.02 threshold.
    let mut session = SyntheticSession::exact().with_luma_offset(2, 0.05);
    let verdict = validator().run(&mut session).unwrap();

    match verdict {
        Verdict::Failed(report) => {
            assert!((report.max_delta - 0.05).abs() < 1e-6);
            let perturbed = report.evs.iter().position(|&ev| ev == 2).unwrap();
            let (argmax, _) = report
                .measured
                .iter()
                .zip(report.expected.iter())
                .enumerate()
                .map(|(i, (m, e))| (i, (e - m).abs()))
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .unwrap();
            assert_eq!(argmax, perturbed);
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn test_deviation_just_under_threshold_passes() {
    let mut session = SyntheticSession::exact().with_luma_offset(2, 0.018);
    let verdict = validator().run(&mut session).unwrap();
    assert!(verdict.is_pass(), "0.018 < 0.02 must pass: {verdict:?}");
}

#[test]
fn test_missing_capability_skips() {
    for capability in [
        Capability::ManualSensor,
        Capability::ManualPostProcessing,
        Capability::PerFrameControl,
        Capability::EvCompensation,
    ] {
        let mut session = SyntheticSession::exact().without_capability(capability);
        let verdict = validator().run(&mut session).unwrap();
        assert!(verdict.is_skip(), "missing {capability:?} must skip");
        // A skip never touches the device.
        assert!(session.converge_log.is_empty());
        assert!(session.capture_log.is_empty());
    }
}

#[test]
fn test_sweep_locks_ae_and_skips_af() {
    let mut session = SyntheticSession::new();
    validator().run(&mut session).unwrap();

    assert_eq!(session.converge_log.len(), 5);
    assert!(session.converge_log.iter().all(|c| c.lock_ae && !c.run_af));

    let linear = camcert::session::TonemapCurve::linear();
    assert_eq!(session.capture_log.len(), 5);
    assert!(session
        .capture_log
        .iter()
        .all(|r| r.lock_ae && r.tonemap == linear));

    // One converge-then-capture pair per enumerated EV, in order.
    let converge_evs: Vec<i32> = session.converge_log.iter().map(|c| c.ev_comp).collect();
    let capture_evs: Vec<i32> = session.capture_log.iter().map(|r| r.ev_comp).collect();
    assert_eq!(converge_evs, vec![-4, -2, 0, 2, 4]);
    assert_eq!(capture_evs, converge_evs);
}

#[test]
fn test_third_stop_device_sweeps_stride_three() {
    let mut session =
        SyntheticSession::new().with_range(-6, 6, Rational::new(1, 3)).with_base_luma(0.05);
    let verdict = validator().run(&mut session).unwrap();
    match verdict {
        Verdict::Passed(report) => {
            assert_eq!(report.evs, vec![-6, -3, 0, 3, 6]);
        }
        other => panic!("expected pass, got {other:?}"),
    }
}

#[test]
fn test_plot_artifact_is_written_when_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = CamcertConfig::default().validator;
    config.plot_directory = dir.path().to_string_lossy().into_owned();

    let mut session = SyntheticSession::exact();
    EvCompensationValidator::new(config)
        .run(&mut session)
        .unwrap();

    assert!(dir.path().join("ev_compensation_plot_means.png").exists());
}
