use anyhow::Result;
use camcert::testing::SyntheticSession;
use camcert::validator::{EvCompensationValidator, Verdict, EV_COMPENSATION_TEST_NAME};
use camcert::CamcertConfig;
use serde::Serialize;
use std::env;
use std::process;

#[derive(Serialize)]
struct Report<'a> {
    test: &'a str,
    generated_at: String,
    #[serde(flatten)]
    verdict: &'a Verdict,
}

fn main() {
    camcert::init_logging();

    let args: Vec<String> = env::args().collect();
    let json = args.iter().any(|a| a == "--json");

    match run(json) {
        Ok(verdict) => match verdict {
            Verdict::Passed(_) | Verdict::Skipped { .. } => {}
            Verdict::Failed(_) => process::exit(1),
        },
        Err(e) => {
            eprintln!("ev-check failed: {e}");
            process::exit(2);
        }
    }
}

fn run(json: bool) -> Result<Verdict> {
    let config = CamcertConfig::load_or_default();
    if let Err(reason) = config.validate() {
        anyhow::bail!("invalid configuration: {reason}");
    }

    // The device protocol is an external collaborator; the shipped binary
    // exercises the sweep against the synthetic session.
    let mut session = SyntheticSession::new();
    let validator = EvCompensationValidator::new(config.validator);
    let verdict = validator.run(&mut session)?;

    if json {
        let report = Report {
            test: EV_COMPENSATION_TEST_NAME,
            generated_at: chrono::Utc::now().to_rfc3339(),
            verdict: &verdict,
        };
        println!("{}", serde_json::to_string(&report)?);
    } else {
        match &verdict {
            Verdict::Passed(report) => println!(
                "PASS max delta {:.5}, avg delta {:.5} (threshold {})",
                report.max_delta, report.avg_delta, report.threshold
            ),
            Verdict::Failed(report) => println!(
                "FAIL max delta {:.5}, avg delta {:.5} (threshold {})",
                report.max_delta, report.avg_delta, report.threshold
            ),
            Verdict::Skipped { reason } => println!("SKIP {reason}"),
        }
    }

    Ok(verdict)
}
